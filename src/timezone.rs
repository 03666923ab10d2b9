//! Country and timezone inference for weather display
//!
//! One canonical table maps lowercase country names to IANA zones, and one
//! table maps well-known city names to the country they belong to.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;

pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const UNKNOWN_COUNTRY: &str = "Unknown";

const COUNTRY_TIMEZONES: &[(&str, &str)] = &[
    ("serbia", "Europe/Belgrade"),
    ("united states", "America/New_York"),
    ("usa", "America/New_York"),
    ("united kingdom", "Europe/London"),
    ("uk", "Europe/London"),
    ("france", "Europe/Paris"),
    ("germany", "Europe/Berlin"),
    ("croatia", "Europe/Zagreb"),
    ("hungary", "Europe/Budapest"),
    ("czech republic", "Europe/Prague"),
    ("czechia", "Europe/Prague"),
    ("poland", "Europe/Warsaw"),
    ("italy", "Europe/Rome"),
    ("spain", "Europe/Madrid"),
    ("netherlands", "Europe/Amsterdam"),
    ("belgium", "Europe/Brussels"),
    ("austria", "Europe/Vienna"),
    ("sweden", "Europe/Stockholm"),
    ("norway", "Europe/Oslo"),
    ("denmark", "Europe/Copenhagen"),
    ("finland", "Europe/Helsinki"),
    ("ireland", "Europe/Dublin"),
    ("portugal", "Europe/Lisbon"),
    ("greece", "Europe/Athens"),
    ("romania", "Europe/Bucharest"),
    ("bulgaria", "Europe/Sofia"),
    ("estonia", "Europe/Tallinn"),
    ("latvia", "Europe/Riga"),
    ("lithuania", "Europe/Vilnius"),
    ("japan", "Asia/Tokyo"),
    ("south korea", "Asia/Seoul"),
    ("china", "Asia/Shanghai"),
    ("australia", "Australia/Sydney"),
    ("canada", "America/Toronto"),
    ("india", "Asia/Kolkata"),
    ("brazil", "America/Sao_Paulo"),
    ("egypt", "Africa/Cairo"),
    ("mexico", "America/Mexico_City"),
    ("thailand", "Asia/Bangkok"),
    ("russia", "Europe/Moscow"),
    ("ukraine", "Europe/Kyiv"),
    ("belarus", "Europe/Minsk"),
    ("moldova", "Europe/Chisinau"),
    ("slovakia", "Europe/Bratislava"),
    ("slovenia", "Europe/Ljubljana"),
    ("montenegro", "Europe/Podgorica"),
    ("albania", "Europe/Tirane"),
    ("north macedonia", "Europe/Skopje"),
    ("bosnia and herzegovina", "Europe/Sarajevo"),
];

/// Checked in order; the first city found in the input decides the country.
const CITY_COUNTRIES: &[(&str, &str)] = &[
    ("london", "United Kingdom"),
    ("manchester", "United Kingdom"),
    ("birmingham", "United Kingdom"),
    ("new york", "United States"),
    ("los angeles", "United States"),
    ("chicago", "United States"),
    ("paris", "France"),
    ("lyon", "France"),
    ("marseille", "France"),
    ("berlin", "Germany"),
    ("munich", "Germany"),
    ("hamburg", "Germany"),
    ("belgrade", "Serbia"),
    ("novi sad", "Serbia"),
    ("nis", "Serbia"),
    ("zagreb", "Croatia"),
    ("split", "Croatia"),
    ("rijeka", "Croatia"),
    ("budapest", "Hungary"),
    ("debrecen", "Hungary"),
    ("szeged", "Hungary"),
    ("prague", "Czech Republic"),
    ("brno", "Czech Republic"),
    ("ostrava", "Czech Republic"),
    ("warsaw", "Poland"),
    ("krakow", "Poland"),
    ("lodz", "Poland"),
    ("rome", "Italy"),
    ("milan", "Italy"),
    ("naples", "Italy"),
    ("madrid", "Spain"),
    ("barcelona", "Spain"),
    ("valencia", "Spain"),
    ("amsterdam", "Netherlands"),
    ("rotterdam", "Netherlands"),
    ("the hague", "Netherlands"),
    ("brussels", "Belgium"),
    ("antwerp", "Belgium"),
    ("ghent", "Belgium"),
    ("vienna", "Austria"),
    ("graz", "Austria"),
    ("linz", "Austria"),
    ("stockholm", "Sweden"),
    ("gothenburg", "Sweden"),
    ("malmo", "Sweden"),
    ("oslo", "Norway"),
    ("bergen", "Norway"),
    ("trondheim", "Norway"),
    ("copenhagen", "Denmark"),
    ("aarhus", "Denmark"),
    ("odense", "Denmark"),
    ("helsinki", "Finland"),
    ("espoo", "Finland"),
    ("tampere", "Finland"),
    ("dublin", "Ireland"),
    ("cork", "Ireland"),
    ("galway", "Ireland"),
    ("lisbon", "Portugal"),
    ("porto", "Portugal"),
    ("braga", "Portugal"),
    ("athens", "Greece"),
    ("thessaloniki", "Greece"),
    ("patras", "Greece"),
    ("bucharest", "Romania"),
    ("cluj-napoca", "Romania"),
    ("timisoara", "Romania"),
    ("sofia", "Bulgaria"),
    ("plovdiv", "Bulgaria"),
    ("varna", "Bulgaria"),
    ("tallinn", "Estonia"),
    ("tartu", "Estonia"),
    ("narva", "Estonia"),
    ("riga", "Latvia"),
    ("daugavpils", "Latvia"),
    ("liepaja", "Latvia"),
    ("vilnius", "Lithuania"),
    ("kaunas", "Lithuania"),
    ("klaipeda", "Lithuania"),
    ("tokyo", "Japan"),
    ("osaka", "Japan"),
    ("kyoto", "Japan"),
    ("beijing", "China"),
    ("shanghai", "China"),
    ("guangzhou", "China"),
    ("sydney", "Australia"),
    ("melbourne", "Australia"),
    ("brisbane", "Australia"),
    ("toronto", "Canada"),
    ("montreal", "Canada"),
    ("vancouver", "Canada"),
    ("mumbai", "India"),
    ("delhi", "India"),
    ("bangalore", "India"),
    ("sao paulo", "Brazil"),
    ("rio de janeiro", "Brazil"),
    ("brasilia", "Brazil"),
    ("cairo", "Egypt"),
    ("alexandria", "Egypt"),
    ("giza", "Egypt"),
    ("mexico city", "Mexico"),
    ("guadalajara", "Mexico"),
    ("monterrey", "Mexico"),
    ("seoul", "South Korea"),
    ("busan", "South Korea"),
    ("incheon", "South Korea"),
    ("bangkok", "Thailand"),
    ("chiang mai", "Thailand"),
    ("phuket", "Thailand"),
];

/// Country → timezone table with a city-name heuristic for bare inputs
#[derive(Debug, Clone)]
pub struct TimezoneTable {
    countries: HashMap<String, String>,
    cities: &'static [(&'static str, &'static str)],
}

impl Default for TimezoneTable {
    fn default() -> Self {
        Self {
            countries: COUNTRY_TIMEZONES
                .iter()
                .map(|(country, zone)| ((*country).to_string(), (*zone).to_string()))
                .collect(),
            cities: CITY_COUNTRIES,
        }
    }
}

impl TimezoneTable {
    /// Built-in table extended (or overridden) by `country=Zone` pairs
    #[must_use]
    pub fn with_overrides(overrides: &[(String, String)]) -> Self {
        let mut table = Self::default();
        for (country, zone) in overrides {
            table
                .countries
                .insert(country.trim().to_lowercase(), zone.clone());
        }
        table
    }

    /// Timezone for a country name, case-insensitive; `UTC` when unknown
    #[must_use]
    pub fn timezone_for(&self, country: &str) -> &str {
        self.countries
            .get(&country.trim().to_lowercase())
            .map_or(DEFAULT_TIMEZONE, String::as_str)
    }

    /// Guess the country of a bare city name from the known-city table
    #[must_use]
    pub fn guess_country(&self, city: &str) -> Option<&'static str> {
        let city = city.to_lowercase();
        self.cities
            .iter()
            .find(|(name, _)| contains_word(&city, name))
            .map(|(_, country)| *country)
    }
}

/// `needle` occurs in `haystack` delimited by non-alphanumeric characters
fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Wall-clock time in `timezone`, formatted like `10/17/2026, 3:04:05 PM`
#[must_use]
pub fn local_time(timezone: &str, now: DateTime<Utc>) -> Option<String> {
    let tz: Tz = timezone.parse().ok()?;
    Some(
        now.with_timezone(&tz)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string(),
    )
}
