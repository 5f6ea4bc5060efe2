//! Bus stop information service client.
//!
//! Both queries are one-shot: no retries and no timeout beyond what the host
//! transport applies.

use anyhow::Context;
use bytes::Bytes;
use http::Method;
use http::header::ACCEPT;
use http_body_util::Empty;
use realtime::{Config, HttpRequest, bad_gateway, invalid_format, not_found};
use tracing::debug;

use crate::{Bounds, Result, Stop, StopDetail, StopId, StopsResponse};

/// Host configuration key holding the stop service base URL.
pub const API_URL_KEY: &str = "BUS_STOPS_API_URL";

/// Retrieves the stops inside the given viewport bounds.
///
/// # Errors
///
/// Returns an error when the stop service cannot be reached, answers with a
/// non-success status, or the response cannot be deserialized.
pub async fn stops_in_bounds<P>(provider: &P, bounds: &Bounds) -> Result<Vec<Stop>>
where
    P: Config + HttpRequest,
{
    let api_url = api_url(provider).await?;
    let uri = format!("{api_url}?{}", bounds.to_query());

    let body = get(provider, &uri).await?;
    let response: StopsResponse = serde_json::from_slice(&body)
        .map_err(|err| invalid_format!("deserializing stops response: {}", err))?;

    debug!(stops = response.markers.len(), "fetched stops in bounds");
    Ok(response.markers)
}

/// Retrieves live departures for a single stop.
///
/// # Errors
///
/// Returns an error when the stop service cannot be reached, answers with a
/// non-success status, or the response cannot be deserialized.
pub async fn stop_detail<P>(provider: &P, stop_id: &StopId) -> Result<StopDetail>
where
    P: Config + HttpRequest,
{
    let api_url = api_url(provider).await?;
    let uri = format!("{api_url}/{}", urlencoding::encode(stop_id.as_str()));

    let body = get(provider, &uri).await?;
    let detail: StopDetail = serde_json::from_slice(&body)
        .map_err(|err| invalid_format!("deserializing detail for stop {}: {}", stop_id, err))?;

    debug!(stop_id = %stop_id, arrivals = detail.arrivals.len(), "fetched stop detail");
    Ok(detail)
}

async fn api_url(provider: &impl Config) -> Result<String> {
    let url = Config::get(provider, API_URL_KEY).await.context("getting `BUS_STOPS_API_URL`")?;
    Ok(url.trim_end_matches('/').to_string())
}

async fn get(provider: &impl HttpRequest, uri: &str) -> Result<Bytes> {
    let request = http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(ACCEPT, "application/json")
        .body(Empty::<Bytes>::new())
        .context("building stop service request")?;

    let response = HttpRequest::fetch(provider, request)
        .await
        .map_err(|err| bad_gateway!("request to {} failed: {:#}", uri, err))?;

    let status = response.status();
    if status == http::StatusCode::NOT_FOUND {
        return Err(not_found!("{} returned {}", uri, status));
    }
    if !status.is_success() {
        return Err(bad_gateway!("{} returned {}", uri, status));
    }

    Ok(response.into_body())
}
