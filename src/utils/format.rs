use std::time::Duration;

/// Format an elapsed call time as `MM:SS`, zero-padded. Durations past an
/// hour keep counting in total minutes, matching the call timer display.
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
