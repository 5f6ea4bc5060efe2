#![allow(missing_docs)]


use bus_stops::{Bounds, Error, LatLng, StopId, api};
use http::StatusCode;
use pretty_assertions::assert_eq;

use self::provider::{API_URL, MockProvider};

fn viewport() -> Bounds {
    Bounds::new(LatLng::new(51.52, -0.08), LatLng::new(51.49, -0.12))
}

// Should query the service with the viewport corners and decode the markers.
#[tokio::test]
async fn stops_in_bounds() {
    let provider =
        MockProvider::new().route("/bus-stops", StatusCode::OK, include_bytes!("data/stops.json"));

    let stops = api::stops_in_bounds(&provider, &viewport()).await.expect("should fetch");

    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0].id, StopId::from("1"));
    assert_eq!(stops[0].name, "Stop A");
    assert_eq!(stops[1].id.as_str(), "490008660N");

    assert_eq!(
        provider.requests(),
        vec![format!("{API_URL}?northEast=51.52,-0.08&southWest=51.49,-0.12")]
    );
}

// Should fetch departures for a single stop, including cancelled ones.
#[tokio::test]
async fn stop_detail() {
    let provider = MockProvider::new().route(
        "/bus-stops/490008660N",
        StatusCode::OK,
        include_bytes!("data/detail.json"),
    );

    let detail = api::stop_detail(&provider, &StopId::from("490008660N"))
        .await
        .expect("should fetch");

    assert_eq!(detail.arrivals.len(), 3);
    assert_eq!(detail.arrivals[0].route_name, "24");
    assert!(detail.arrivals[1].is_cancelled);
    assert_eq!(provider.requests(), vec![format!("{API_URL}/490008660N")]);
}

// Should percent-encode ids used as a path segment.
#[tokio::test]
async fn encoded_stop_id() {
    let provider = MockProvider::new().route(
        "/bus-stops/stop%2F7",
        StatusCode::OK,
        br#"{"arrivals": []}"#,
    );

    let detail =
        api::stop_detail(&provider, &StopId::from("stop/7")).await.expect("should fetch");

    assert!(detail.arrivals.is_empty());
    assert_eq!(provider.requests(), vec![format!("{API_URL}/stop%2F7")]);
}

// Should report transport failures as fetch errors.
#[tokio::test]
async fn offline() {
    let provider = MockProvider::new().offline();

    let err = api::stops_in_bounds(&provider, &viewport()).await.expect_err("should fail");

    assert!(matches!(err, Error::BadGateway(_)));
    assert!(err.is_fetch());
}

// Should report server errors and unknown stops distinctly.
#[tokio::test]
async fn error_status() {
    let provider = MockProvider::new().route("/bus-stops", StatusCode::SERVICE_UNAVAILABLE, b"");

    let err = api::stops_in_bounds(&provider, &viewport()).await.expect_err("should fail");
    assert!(matches!(err, Error::BadGateway(_)));

    let err = api::stop_detail(&provider, &StopId::from("42")).await.expect_err("should fail");
    assert!(matches!(err, Error::NotFound(_)));
}

// Should report undecodable payloads as invalid format.
#[tokio::test]
async fn malformed_payload() {
    let provider = MockProvider::new()
        .route("/bus-stops", StatusCode::OK, b"<html>oops</html>")
        .route("/bus-stops/42", StatusCode::OK, br#"{"arrivals": 3}"#);

    let err = api::stops_in_bounds(&provider, &viewport()).await.expect_err("should fail");
    assert!(matches!(err, Error::InvalidFormat(_)), "unexpected error: {err}");
    assert_eq!(err.code(), "invalid_format");

    let err = api::stop_detail(&provider, &StopId::from("42")).await.expect_err("should fail");
    let Error::InvalidFormat(description) = err else {
        panic!("unexpected error: {err}");
    };
    assert!(description.starts_with("deserializing detail for stop 42"), "{description}");
}
