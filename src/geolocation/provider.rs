//! Geolocation provider client.

use std::net::IpAddr;

use log::debug;

use super::types::LocationRecord;
use crate::error_handling::LocateError;

/// Builds the provider lookup URL for `ip`: `<base>/api/json/<ip>`.
pub fn provider_endpoint(base: &str, ip: IpAddr) -> String {
    format!("{}/api/json/{}", base.trim_end_matches('/'), ip)
}

/// Fetches the geolocation of `ip` from the provider at `base`.
///
/// The returned record carries the provider's values verbatim; callers stamp
/// the hostname onto it.
///
/// # Errors
///
/// - `LocateError::FetchFailed` on transport errors, non-2xx statuses and body
///   read errors
/// - `LocateError::DecodeFailed` if the body is not a JSON location record
pub async fn fetch_location(
    client: &reqwest::Client,
    base: &str,
    ip: IpAddr,
) -> Result<LocationRecord, LocateError> {
    let endpoint = provider_endpoint(base, ip);
    debug!("Fetching geolocation for {ip} from {endpoint}");

    let response = client
        .get(&endpoint)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(LocateError::FetchFailed)?;
    let body = response.text().await.map_err(LocateError::FetchFailed)?;

    Ok(serde_json::from_str(&body)?)
}
