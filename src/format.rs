//! Display formatting for dashboard values
//!
//! Pure helpers turning raw numbers into the strings the frontend shows.

use serde::Serialize;

use crate::models::Units;

const POSITIVE_COLOR: &str = "#10b981";
const NEGATIVE_COLOR: &str = "#ef4444";

/// Currency with a magnitude suffix: `$1.50B`, `$950.00`
#[must_use]
pub fn format_currency(value: f64) -> String {
    let suffixes = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    for (scale, suffix) in suffixes {
        if value >= scale {
            return format!("${:.2}{suffix}", value / scale);
        }
    }
    format!("${value:.2}")
}

/// Compact count: `1.2M`, `3.4K`, `950`
#[must_use]
pub fn format_number(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1e6)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1e3)
    } else {
        value.to_string()
    }
}

/// Signed percentage badge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Percentage {
    pub text: String,
    pub color: &'static str,
    pub icon: &'static str,
}

#[must_use]
pub fn format_percentage(value: f64) -> Percentage {
    let (color, icon) = if value >= 0.0 {
        (POSITIVE_COLOR, "↗")
    } else {
        (NEGATIVE_COLOR, "↘")
    };
    Percentage {
        text: format!("{icon} {value:.2}%"),
        color,
        icon,
    }
}

#[must_use]
pub fn format_temperature(value: f64, units: Units) -> String {
    match units {
        Units::Metric => format!("{value:.1}°C"),
        Units::Imperial => format!("{value:.1}°F"),
    }
}

#[must_use]
pub fn format_pressure(value: i64) -> String {
    format!("{value} hPa")
}

#[must_use]
pub fn format_wind_speed(value: i64, units: Units) -> String {
    match units {
        Units::Metric => format!("{value} km/h"),
        Units::Imperial => format!("{value} mph"),
    }
}

#[must_use]
pub fn format_humidity(value: i64) -> String {
    format!("{value}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1_500_000_000.0, "$1.50B")]
    #[case(950.0, "$950.00")]
    #[case(2_340_000_000_000.0, "$2.34T")]
    #[case(12_500_000.0, "$12.50M")]
    #[case(1_000.0, "$1.00K")]
    #[case(0.0, "$0.00")]
    fn test_format_currency(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_currency(value), expected);
    }

    #[rstest]
    #[case(950, "950")]
    #[case(1_234, "1.2K")]
    #[case(2_500_000, "2.5M")]
    fn test_format_number(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(format_number(value), expected);
    }

    #[test]
    fn test_format_percentage_sign_and_color() {
        let up = format_percentage(3.456);
        assert_eq!(up.text, "↗ 3.46%");
        assert_eq!(up.color, POSITIVE_COLOR);

        let down = format_percentage(-1.2);
        assert_eq!(down.text, "↘ -1.20%");
        assert_eq!(down.color, NEGATIVE_COLOR);
        assert_eq!(down.icon, "↘");
    }

    #[test]
    fn test_unit_suffixes() {
        assert_eq!(format_temperature(21.0, Units::Metric), "21.0°C");
        assert_eq!(format_temperature(70.0, Units::Imperial), "70.0°F");
        assert_eq!(format_pressure(1013), "1013 hPa");
        assert_eq!(format_wind_speed(12, Units::Metric), "12 km/h");
        assert_eq!(format_wind_speed(8, Units::Imperial), "8 mph");
        assert_eq!(format_humidity(55), "55%");
    }
}
