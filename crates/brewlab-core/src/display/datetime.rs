//! Local time rendering for recipe and share-link timestamps.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Renders a timestamp in the system time zone as `YYYY-MM-DD HH:MM TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M %Z")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minute_precision() {
        let at = Timestamp::from_second(1_704_067_200).unwrap();
        let output = LocalDateTime(&at).to_string();
        assert!(output.starts_with("202"));
        assert_eq!(output.as_bytes()[13], b':');
        assert_ne!(output.as_bytes()[16], b':');
    }
}
