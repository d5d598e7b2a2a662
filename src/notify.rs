use notify_rust::{Notification, Urgency};

/// Desktop popup when a run is stopped. Failures are ignored.
pub fn send_desktop(test_name: &str, outcome: Option<&str>) {
    let (summary, icon, urgency) = match outcome {
        Some("failed") => ("Test Failed", "dialog-error", Urgency::Critical),
        Some("passed") => ("Test Passed", "dialog-information", Urgency::Normal),
        _ => ("Test Finished", "dialog-information", Urgency::Normal),
    };

    let _ = Notification::new()
        .summary(summary)
        .body(test_name)
        .icon(icon)
        .urgency(urgency)
        .show();
}
