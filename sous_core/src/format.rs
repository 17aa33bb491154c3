use std::time::Duration;

pub trait FormatTime {
    fn as_readable_time(&self) -> String;
}

impl FormatTime for Duration {
    fn as_readable_time(&self) -> String {
        let total = self.as_secs();
        let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
        format!("{hours}h {minutes}m {seconds}s")
    }
}
