//! Shared test helpers for storage module tests.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::geolocation::LocationRecord;

/// Creates an in-memory test database pool.
///
/// A single connection keeps every query on the same in-memory database.
pub async fn create_test_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool")
}

/// The `example.com` record as the provider describes it.
pub fn example_record() -> LocationRecord {
    LocationRecord {
        url: "example.com".to_string(),
        ip_version: 4,
        ip_address: "93.184.216.34".to_string(),
        latitude: 37.75,
        longitude: -97.82,
        country_name: "United States".to_string(),
        country_code: "US".to_string(),
        time_zone: "-05:00".to_string(),
        zip_code: String::new(),
        city_name: String::new(),
        region_name: String::new(),
        continent: "North America".to_string(),
        continent_code: "NA".to_string(),
    }
}
