use color_eyre::eyre::{eyre, Result};
use tokio::process::Command;

/// Hands `url` to the platform's URL opener. Only http(s) targets are opened.
pub async fn open_in_browser(url: &str) -> Result<()> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(eyre!("Refusing to open non-web URL: {url}"));
    }
    let (cmd, args): (&str, Vec<&str>) = if cfg!(target_os = "macos") {
        ("open", vec![url])
    } else if cfg!(target_os = "windows") {
        ("cmd", vec!["/C", "start", "", url])
    } else {
        ("xdg-open", vec![url])
    };
    Command::new(cmd)
        .args(&args)
        .spawn()
        .map_err(|e| eyre!("Failed to open browser: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_non_web_urls() {
        let err = open_in_browser("file:///etc/passwd").await.unwrap_err();
        assert!(err.to_string().contains("non-web"));
    }
}
