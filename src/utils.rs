use once_cell::sync::Lazy;
use regex::Regex;

// Compiled regexes for reading numeric prefixes out of input fields
static LEADING_FLOAT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap()
});
static LEADING_INT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").unwrap());

/// Read the leading decimal number of a field value, ignoring trailing text.
///
/// Mirrors how browsers read a number out of a text field, so `"4.5s"` is
/// `4.5` and `"abc"` is `None`.
///
/// # Examples
/// ```
/// use breath_pacer::utils::parse_leading_float;
/// assert_eq!(parse_leading_float("4.5s"), Some(4.5));
/// assert_eq!(parse_leading_float(" .5"), Some(0.5));
/// assert_eq!(parse_leading_float("seconds"), None);
/// ```
pub fn parse_leading_float(input: &str) -> Option<f64> {
    let captures = LEADING_FLOAT_REGEX.captures(input)?;
    captures[1].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read the leading integer of a field value; `"40.7"` and `"40px"` are both `40`.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let captures = LEADING_INT_REGEX.captures(input)?;
    captures[1].parse::<i64>().ok()
}

/// Read a radius field, accepting only strictly positive values that fit a `u32`.
pub fn parse_radius(input: &str) -> Option<u32> {
    parse_leading_int(input)
        .filter(|r| *r > 0)
        .and_then(|r| u32::try_from(r).ok())
}

/// Format the remaining time of the current leg, one decimal place.
pub fn format_countdown(seconds: f64) -> String {
    format!("{:.1}s", seconds)
}

/// Countdown text shown while idle: the raw duration field, or the default.
pub fn format_idle_countdown(duration_text: &str, default_secs: f64) -> String {
    let trimmed = duration_text.trim();
    if trimmed.is_empty() {
        format!("{}s", default_secs)
    } else {
        format!("{}s", trimmed)
    }
}

/// CSS length for a circle of the given radius.
pub fn diameter_px(radius: f64) -> String {
    format!("{}px", radius * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("5", Some(5.0))]
    #[case("  4.5", Some(4.5))]
    #[case("4.5s", Some(4.5))]
    #[case(".5", Some(0.5))]
    #[case("-2", Some(-2.0))]
    #[case("1e1", Some(10.0))]
    #[case("1e", Some(1.0))]
    #[case("", None)]
    #[case("abc", None)]
    #[case("s5", None)]
    fn leading_float(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_leading_float(input), expected);
    }

    #[rstest]
    #[case("40", Some(40))]
    #[case("40.9", Some(40))]
    #[case("120px", Some(120))]
    #[case(" -3", Some(-3))]
    #[case("", None)]
    #[case("px", None)]
    fn leading_int(#[case] input: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_leading_int(input), expected);
    }

    #[rstest]
    #[case("40", Some(40))]
    #[case("0", None)]
    #[case("-10", None)]
    #[case("99999999999", None)]
    #[case("wide", None)]
    fn radius(#[case] input: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_radius(input), expected);
    }

    #[test]
    fn countdown_has_one_decimal() {
        assert_eq!(format_countdown(2.0), "2.0s");
        assert_eq!(format_countdown(1.94), "1.9s");
        assert_eq!(format_countdown(0.07), "0.1s");
    }

    #[test]
    fn idle_countdown_falls_back_to_default() {
        assert_eq!(format_idle_countdown("", 5.0), "5s");
        assert_eq!(format_idle_countdown("4.5", 5.0), "4.5s");
    }

    #[test]
    fn diameter_is_twice_the_radius() {
        assert_eq!(diameter_px(40.0), "80px");
        assert_eq!(diameter_px(62.5), "125px");
    }
}
