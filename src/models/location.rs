//! City input and geocoded location models

/// City input as typed by the user, e.g. `"Belgrade, Serbia"` or `"Tokyo"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery {
    /// City name sent to the geocoder
    pub city: String,
    /// Country given explicitly after the last comma
    pub country: Option<String>,
}

impl CityQuery {
    /// Split `"City, Region, Country"` into the first and last segments.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if !input.contains(',') {
            return Self {
                city: input.to_string(),
                country: None,
            };
        }

        let parts: Vec<&str> = input.split(',').map(str::trim).collect();
        let city = parts.first().copied().unwrap_or_default().to_string();
        let country = parts
            .last()
            .filter(|c| !c.is_empty())
            .map(|c| (*c).to_string());
        Self { city, country }
    }
}

/// Geocoding result; only lives for the duration of one weather request
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// IANA timezone reported by the geocoder
    pub timezone: Option<String>,
    /// Country name reported by the geocoder
    pub country: Option<String>,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            timezone: None,
            country: None,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
