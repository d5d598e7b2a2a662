use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "testdeck", version, about = "Terminal dashboard for previewing files and watching test runs")]
pub struct Cli {
    /// Files to load at startup, as if uploaded
    pub files: Vec<PathBuf>,

    /// Base URL of the test service (e.g. http://localhost:8000/api).
    /// Without it the dashboard runs offline on sample data.
    #[arg(short = 'a', long)]
    pub api_url: Option<String>,

    /// Seconds before a running test is stopped automatically
    #[arg(long = "auto-stop", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub auto_stop_secs: u64,

    /// Milliseconds the preview waits before showing new content
    #[arg(long = "debounce", default_value_t = 300)]
    pub debounce_ms: u64,

    /// Disable desktop notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Write debug logs to the state directory
    #[arg(short, long)]
    pub verbose: bool,
}
