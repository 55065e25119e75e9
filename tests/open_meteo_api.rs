use serde_json::json;
use windblend::{
    FetchError, ForecastProvider, OpenMeteoClient, SiteConfig, Snapshot, WeatherModel, WindBlend,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> SiteConfig {
    SiteConfig::builder()
        .base_url(format!("{}/v1", server.uri()))
        .build()
}

#[tokio::test]
async fn fetch_hourly_sends_the_expected_query_and_parses_the_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "52.623"))
        .and(query_param("longitude", "5.783"))
        .and(query_param(
            "hourly",
            "wind_speed_10m,wind_gusts_10m,wind_direction_10m",
        ))
        .and(query_param("forecast_days", "3"))
        .and(query_param("wind_speed_unit", "kn"))
        .and(query_param("models", "gfs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "latitude": 52.625,
            "longitude": 5.78125,
            "hourly": {
                "time": ["2025-08-23T00:00", "2025-08-23T01:00", "2025-08-23T02:00"],
                "wind_speed_10m": [10.4, 11.2, null],
                "wind_gusts_10m": [15.1, 16.8, 17.0],
                "wind_direction_10m": [231.0, 228.0, 226.0]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(&test_config(&server)).unwrap();
    let series = client.fetch_hourly("gfs").await.unwrap();

    assert_eq!(series.time.len(), 3);
    assert_eq!(series.wind[1], Some(11.2));
    assert_eq!(series.wind[2], None);
    assert_eq!(series.sample_at(0), Some((10.4, 15.1, 231.0)));
    assert_eq!(series.sample_at(2), None);
}

#[tokio::test]
async fn fetch_hourly_surfaces_http_errors_as_status_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(&test_config(&server)).unwrap();
    let err = client.fetch_hourly("gfs").await.unwrap_err();

    match err {
        FetchError::HttpStatus { status, url } => {
            assert_eq!(status.as_u16(), 503);
            assert!(url.contains("models=gfs"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_hourly_surfaces_malformed_bodies_as_decode_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("surprise, html"))
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(&test_config(&server)).unwrap();
    let err = client.fetch_hourly("gfs").await.unwrap_err();

    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn fetch_hourly_treats_a_missing_hourly_block_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "latitude": 52.625,
            "longitude": 5.78125
        })))
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(&test_config(&server)).unwrap();
    let series = client.fetch_hourly("gfs").await.unwrap();

    assert!(series.time.is_empty());
}

/// Full pipeline over HTTP: one model answers directly, one falls back to its
/// second alias, one errors on every alias and is dropped.
#[tokio::test]
async fn fetch_command_pipeline_merges_what_the_api_serves() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("models", "gfs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hourly": {
                "time": ["2025-08-23T00:00", "2025-08-23T01:00"],
                "wind_speed_10m": [10.0, 11.0],
                "wind_gusts_10m": [14.0, 15.0],
                "wind_direction_10m": [220.0, 225.0]
            }
        })))
        .mount(&server)
        .await;

    // preferred ICON alias is down, the seamless fallback works
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("models", "icon_eu"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("models", "icon_seamless"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hourly": {
                "time": ["2025-08-23T01:00", "2025-08-23T02:00"],
                "wind_speed_10m": [12.0, 13.0],
                "wind_gusts_10m": [16.0, 17.0],
                "wind_direction_10m": [230.0, 235.0]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    // ecmwf and jma aliases are not mocked and answer 404

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("latest.json");

    let blender = WindBlend::new(test_config(&server)).unwrap();
    let snapshot = blender.write_latest(&output).await.unwrap();

    assert_eq!(
        snapshot.meta.models,
        vec![WeatherModel::Gfs, WeatherModel::Icon]
    );
    assert_eq!(snapshot.meta.aliases[&WeatherModel::Icon], "icon_seamless");

    // union of both timelines: 00, 01 and 02
    assert_eq!(snapshot.hours.len(), 3);
    assert_eq!(snapshot.hours[0].time, "2025-08-23T00:00Z");
    assert_eq!(snapshot.hours[1].models.len(), 2);
    assert_eq!(snapshot.hours[2].models.len(), 1);

    let reread = Snapshot::read_json(&output).unwrap();
    assert_eq!(reread, snapshot);
}

#[tokio::test]
async fn a_dead_api_fails_the_whole_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let blender = WindBlend::new(test_config(&server)).unwrap();
    let err = blender.build_snapshot().await.unwrap_err();

    assert!(matches!(
        err,
        windblend::WindBlendError::NoModelData { attempts: 8 }
    ));
}
