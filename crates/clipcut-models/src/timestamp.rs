//! Timestamp formatting utilities.
//!
//! Clip definitions carry plain seconds; logs display `HH:MM:SS(.mmm)` and
//! the subtitle renderer exchanges SRT `HH:MM:SS,mmm` strings.

/// Format seconds as `HH:MM:SS` or `HH:MM:SS.mmm` when fractional.
pub fn format_seconds(total_secs: f64) -> String {
    let hours = (total_secs / 3600.0).floor() as u32;
    let mins = ((total_secs % 3600.0) / 60.0).floor() as u32;
    let secs = total_secs % 60.0;

    if (secs - secs.floor()).abs() > 0.0001 {
        format!("{:02}:{:02}:{:06.3}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}:{:02}", hours, mins, secs.floor() as u32)
    }
}

/// Format seconds in SRT timing format (`HH:MM:SS,mmm`).
pub fn format_srt_time(total_secs: f64) -> String {
    let hours = (total_secs / 3600.0).floor() as u32;
    let mins = ((total_secs % 3600.0) / 60.0).floor() as u32;
    let secs = (total_secs % 60.0).floor() as u32;
    let millis = ((total_secs % 1.0) * 1000.0).round() as u32;

    format!("{:02}:{:02}:{:02},{:03}", hours, mins, secs, millis.min(999))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(5400.0), "01:30:00");
        assert_eq!(format_seconds(330.0), "00:05:30");
        assert_eq!(format_seconds(30.5), "00:00:30.500");
    }

    #[test]
    fn test_format_srt_time() {
        assert_eq!(format_srt_time(0.0), "00:00:00,000");
        assert_eq!(format_srt_time(61.25), "00:01:01,250");
        assert_eq!(format_srt_time(3723.999), "01:02:03,999");
    }
}
