//! End-to-end tests of the HTTP feature-info path against a local server.

use std::time::{Duration, Instant};

use stookwijzer::{
    AdvisoryError, AdvisoryLevel, AdvisoryService, ClientConfig, GeoCoordinate, NetworkError,
};
use test_utils::fixtures;
use test_utils::{MockResponse, MockServer};

fn config_for(server: &MockServer, timeout: Duration) -> ClientConfig {
    ClientConfig {
        endpoint: server.url(),
        timeout,
        ..Default::default()
    }
}

fn utrecht() -> GeoCoordinate {
    let (lat, lon) = fixtures::sites::UTRECHT;
    GeoCoordinate::new(lat, lon)
}

// ============================================================================
// Successful fetch
// ============================================================================

#[tokio::test]
async fn test_fetch_forecast_over_http() {
    let body = fixtures::feature_collection(fixtures::advisory_properties()).to_string();
    let server = MockServer::start(MockResponse::Json(body)).await;
    let service = AdvisoryService::from_config(config_for(&server, Duration::from_secs(5))).unwrap();

    let forecast = service.fetch_forecast(utrecht()).await.unwrap();

    let levels: Vec<_> = forecast.records().iter().map(|r| r.advisory_level).collect();
    assert_eq!(
        levels,
        vec![
            AdvisoryLevel::Yellow,
            AdvisoryLevel::Orange,
            AdvisoryLevel::Red,
            AdvisoryLevel::Unknown
        ]
    );
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_query_string_carries_wms_parameters() {
    let body = fixtures::feature_collection(fixtures::advisory_properties()).to_string();
    let server = MockServer::start(MockResponse::Json(body)).await;
    let service = AdvisoryService::from_config(config_for(&server, Duration::from_secs(5))).unwrap();

    let (lat, lon) = fixtures::sites::AMERSFOORT_REFERENCE;
    service
        .fetch_forecast(GeoCoordinate::new(lat, lon))
        .await
        .unwrap();

    let requests = server.requests();
    let line = &requests[0];
    assert!(line.starts_with("GET /geo/alo/wms?"), "{}", line);
    for expected in [
        "service=WMS",
        "version=1.3.0",
        "request=GetFeatureInfo",
        "query_layers=stookwijzer_v2",
        "layers=stookwijzer_v2",
        "info_format=application%2Fjson",
        "feature_count=1",
        "I=139",
        "J=222",
        "WIDTH=256",
        "HEIGHT=256",
        "CRS=EPSG%3A28992",
        "BBOX=155000%2C463000%2C155010%2C463010",
    ] {
        assert!(line.contains(expected), "missing {} in {}", expected, line);
    }
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_timeout_returns_within_bound() {
    let server = MockServer::start(MockResponse::Stall).await;
    let service =
        AdvisoryService::from_config(config_for(&server, Duration::from_millis(300))).unwrap();

    let started = Instant::now();
    let err = service.fetch_forecast(utrecht()).await.unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {}", err);
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_error_status_is_network_failure() {
    let server = MockServer::start(MockResponse::Raw {
        status: 503,
        content_type: "text/plain",
        body: "maintenance".to_string(),
    })
    .await;
    let service = AdvisoryService::from_config(config_for(&server, Duration::from_secs(5))).unwrap();

    let err = service.fetch_forecast(utrecht()).await.unwrap_err();
    match err {
        AdvisoryError::NetworkFailure(NetworkError::Status(status)) => {
            assert_eq!(status.as_u16(), 503)
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_non_json_body_is_network_failure() {
    let server = MockServer::start(MockResponse::Raw {
        status: 200,
        content_type: "text/xml",
        body: "<ServiceExceptionReport version=\"1.3.0\"/>".to_string(),
    })
    .await;
    let service = AdvisoryService::from_config(config_for(&server, Duration::from_secs(5))).unwrap();

    let err = service.fetch_forecast(utrecht()).await.unwrap_err();
    assert!(matches!(
        err,
        AdvisoryError::NetworkFailure(NetworkError::Body(_))
    ));
}

#[tokio::test]
async fn test_empty_features_is_network_failure() {
    let body = fixtures::empty_feature_collection().to_string();
    let server = MockServer::start(MockResponse::Json(body)).await;
    let service = AdvisoryService::from_config(config_for(&server, Duration::from_secs(5))).unwrap();

    let err = service.fetch_forecast(utrecht()).await.unwrap_err();
    assert!(matches!(
        err,
        AdvisoryError::NetworkFailure(NetworkError::NoFeatures)
    ));
}

#[tokio::test]
async fn test_missing_model_run_over_http() {
    let body = fixtures::feature_collection(fixtures::advisory_properties_without(
        "model_runtime",
    ))
    .to_string();
    let server = MockServer::start(MockResponse::Json(body)).await;
    let service = AdvisoryService::from_config(config_for(&server, Duration::from_secs(5))).unwrap();

    let err = service.fetch_forecast(utrecht()).await.unwrap_err();
    assert!(matches!(err, AdvisoryError::MissingModelRun));
}

#[tokio::test]
async fn test_connection_refused_is_network_failure() {
    // Bind and drop so the port is very likely closed.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let config = ClientConfig {
        endpoint: format!("http://{}/geo/alo/wms", addr),
        timeout: Duration::from_secs(2),
        ..Default::default()
    };
    let service = AdvisoryService::from_config(config).unwrap();

    let err = service.fetch_forecast(utrecht()).await.unwrap_err();
    assert!(matches!(
        err,
        AdvisoryError::NetworkFailure(NetworkError::Request(_))
    ));
}
