/// Formats a second count for the time label: `m:ss`, or `h:mm:ss` from one
/// hour up (30 -> "0:30", 3750 -> "1:02:30").
pub fn make_time_string(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
