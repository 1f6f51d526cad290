//! Geolocation data structures.

use serde::{Deserialize, Deserializer, Serialize};

/// Field schema of a [`LocationRecord`]: wire name and human-readable meaning.
///
/// Registered with the storage sink once, before any record is written.
pub const LOCATION_SCHEMA: &[(&str, &str)] = &[
    ("url", "URL"),
    ("ipVersion", "The IP version (e.g., 4 for IPv4)."),
    (
        "ipAddress",
        "The IP address for which geolocation information is provided.",
    ),
    (
        "latitude",
        "The latitude coordinate of the IP address location.",
    ),
    (
        "longitude",
        "The longitude coordinate of the IP address location.",
    ),
    (
        "countryName",
        "The name of the country where the IP address is located.",
    ),
    (
        "countryCode",
        "The ISO 3166-1 alpha-2 country code of the IP address location.",
    ),
    ("timeZone", "The time zone offset of the IP address location."),
    (
        "zipCode",
        "The ZIP code or postal code of the IP address location.",
    ),
    (
        "cityName",
        "The name of the city where the IP address is located.",
    ),
    (
        "regionName",
        "The name of the region or state where the IP address is located.",
    ),
    (
        "continent",
        "The name of the continent where the IP address is located.",
    ),
    (
        "continentCode",
        "The ISO code of the continent where the IP address is located.",
    ),
];

/// Geolocation of a domain's resolved IP address.
///
/// Every field except `url` is taken verbatim from the provider response;
/// `null` or missing provider values become the field's default and unknown
/// provider fields are ignored. `url` always holds the queried hostname.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ip_version: u8,
    #[serde(deserialize_with = "null_as_default")]
    pub ip_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub country_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub time_zone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub zip_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub region_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub continent: String,
    #[serde(deserialize_with = "null_as_default")]
    pub continent_code: String,
}

impl LocationRecord {
    /// Stamps the record with the hostname it was looked up for, replacing
    /// whatever `url` the provider sent.
    pub fn for_host(mut self, hostname: &str) -> Self {
        self.url = hostname.to_string();
        self
    }
}

/// Human-facing projection of a [`LocationRecord`], used only for logging.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country_name: String,
    pub zip_code: String,
    pub city_name: String,
    pub region_name: String,
}

impl From<&LocationRecord> for Summary {
    fn from(record: &LocationRecord) -> Self {
        Summary {
            url: record.url.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            country_name: record.country_name.clone(),
            zip_code: record.zip_code.clone(),
            city_name: record.city_name.clone(),
            region_name: record.region_name.clone(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
