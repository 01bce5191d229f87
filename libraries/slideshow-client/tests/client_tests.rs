//! Tests for the slideshow backend client.
//!
//! These tests use mock servers to verify paths, methods and response
//! parsing without a real backend.

use slideshow_client::{ClientConfig, ClientError, SlideshowClient};
use slideshow_playback::{
    ConfigKey, PlaybackError, PlaylistOrigin, ResourceId, ScreenSize, SlideshowBackend,
};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> SlideshowClient {
    SlideshowClient::new(ClientConfig::new(server.uri())).unwrap()
}

fn ids(raw: &[&str]) -> Vec<ResourceId> {
    raw.iter().map(|id| ResourceId::new(*id)).collect()
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_valid_http_url() {
        assert!(SlideshowClient::new(ClientConfig::new("http://localhost:8080")).is_ok());
    }

    #[test]
    fn test_empty_url_rejected() {
        match SlideshowClient::new(ClientConfig::new("  ")) {
            Err(ClientError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        match SlideshowClient::new(ClientConfig::new("frame.local")) {
            Err(ClientError::InvalidUrl(msg)) => assert!(msg.contains("http://")),
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[test]
    fn test_trailing_slash_removed() {
        let client = SlideshowClient::new(ClientConfig::new("http://frame.local:8080/")).unwrap();
        assert_eq!(client.url(), "http://frame.local:8080");
    }

    #[test]
    fn test_custom_timeout() {
        let config = ClientConfig::new("http://frame.local").with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(SlideshowClient::new(config).is_ok());
    }
}

// =============================================================================
// Resource Tests
// =============================================================================

mod resources {
    use super::*;

    #[tokio::test]
    async fn test_week_playlist() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/resources/week"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"["a1", "b2", "c3"]"#))
            .expect(1)
            .mount(&server)
            .await;

        let playlist = client_for(&server).await.week_playlist().await.unwrap();

        assert_eq!(playlist.origin(), PlaylistOrigin::Week);
        assert_eq!(playlist.as_slice(), ids(&["a1", "b2", "c3"]).as_slice());
    }

    #[tokio::test]
    async fn test_week_count() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/resources/week/count"))
            .respond_with(ResponseTemplate::new(200).set_body_string("12"))
            .mount(&server)
            .await;

        assert_eq!(client_for(&server).await.week_count().await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_week_count_garbage_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/resources/week/count"))
            .respond_with(ResponseTemplate::new(200).set_body_string("many"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .resources()
            .week_count()
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_random_playlist_from_plain_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/resources/random"))
            .respond_with(ResponseTemplate::new(200).set_body_string("9f86d081884c7d65"))
            .mount(&server)
            .await;

        let playlist = client_for(&server).await.random_playlist().await.unwrap();

        assert_eq!(playlist.origin(), PlaylistOrigin::Random);
        assert_eq!(playlist.as_slice(), ids(&["9f86d081884c7d65"]).as_slice());
    }

    #[tokio::test]
    async fn test_random_single_takes_first_of_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/resources/random"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"["r1", "r2"]"#))
            .mount(&server)
            .await;

        let id = client_for(&server).await.random_resource().await.unwrap();
        assert_eq!(id, Some(ResourceId::new("r1")));
    }

    #[tokio::test]
    async fn test_random_single_empty_body_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/resources/random"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let id = client_for(&server).await.random_resource().await.unwrap();
        assert_eq!(id, None);
    }

    #[tokio::test]
    async fn test_image_requested_at_size() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/resources/a1/1920/1080"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]))
            .expect(1)
            .mount(&server)
            .await;

        let bytes = client_for(&server)
            .await
            .image(&ResourceId::new("a1"), ScreenSize::new(1920, 1080))
            .await
            .unwrap();

        assert_eq!(bytes.as_ref(), &[0x89, 0x50, 0x4e, 0x47]);
    }

    #[tokio::test]
    async fn test_warm_image_hits_image_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/resources/b2/800/600"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .await
            .warm_image(&ResourceId::new("b2"), ScreenSize::new(800, 600))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_description() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/resources/a1/description"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Lake Constance, 2019"))
            .mount(&server)
            .await;

        let caption = client_for(&server)
            .await
            .description(&ResourceId::new("a1"))
            .await
            .unwrap();
        assert_eq!(caption, "Lake Constance, 2019");
    }

    #[tokio::test]
    async fn test_hide_posts_resource_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/resources/hide/a1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .await
            .hide(&ResourceId::new("a1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_server_error_maps_to_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/resources/hide/a1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("store locked"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        match client.resources().hide(&ResourceId::new("a1")).await {
            Err(ClientError::ServerError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "store locked");
            }
            other => panic!("Expected ServerError, got {:?}", other),
        }

        let err = client.hide(&ResourceId::new("a1")).await.unwrap_err();
        assert!(matches!(err, PlaybackError::Backend(_)));
    }
}

// =============================================================================
// Config Tests
// =============================================================================

mod settings {
    use super::*;

    #[tokio::test]
    async fn test_config_paths() {
        let server = MockServer::start().await;
        let cases = [
            ("/api/config/interval/slideshow", "30"),
            ("/api/config/interval/refresh", "180"),
            ("/api/config/show-hide-button", "true"),
            ("/api/config/random-slideshow", "false"),
            ("/api/config/preload-images", "true"),
            ("/api/weather", "false"),
        ];
        for (route, body) in cases {
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(200).set_body_string(format!("{}\n", body)))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = client_for(&server).await;
        assert_eq!(client.config_value(ConfigKey::SlideshowInterval).await.unwrap(), "30");
        assert_eq!(client.config_value(ConfigKey::RefreshInterval).await.unwrap(), "180");
        assert_eq!(client.config_value(ConfigKey::ShowHideButton).await.unwrap(), "true");
        assert_eq!(client.config_value(ConfigKey::RandomSlideshow).await.unwrap(), "false");
        assert_eq!(client.config_value(ConfigKey::PreloadImages).await.unwrap(), "true");
        assert_eq!(client.config_value(ConfigKey::WeatherEnabled).await.unwrap(), "false");
    }

    #[tokio::test]
    async fn test_missing_config_is_error() {
        let server = MockServer::start().await;

        let err = client_for(&server)
            .await
            .config_value(ConfigKey::SlideshowInterval)
            .await
            .unwrap_err();
        assert!(matches!(err, PlaybackError::Backend(_)));
    }
}

// =============================================================================
// Weather Tests
// =============================================================================

mod weather {
    use super::*;

    #[tokio::test]
    async fn test_current_weather() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/weather/current"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"weather":[{"id":500,"main":"Rain","description":"light rain","icon":"10n"}],
                    "main":{"temp":8.4,"feels_like":6.1},"name":"Hamburg"}"#,
            ))
            .mount(&server)
            .await;

        let current = client_for(&server).await.current_weather().await.unwrap();
        assert_eq!(current.weather[0].description, "light rain");
        assert_eq!(current.weather[0].icon, "10n");
        assert!((current.main.temp - 8.4).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_ambient_sensor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/weather/homeassistant"))
            .respond_with(ResponseTemplate::new(200).set_body_string("true"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/weather/homeassistant/temperature"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"entity_id":"sensor.living_room","state":"21.6",
                    "attributes":{"unit_of_measurement":"°C","friendly_name":"Living room"}}"#,
            ))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.ambient_enabled().await.unwrap());

        let ambient = client.ambient_temperature().await.unwrap();
        assert_eq!(ambient.reading(), Some(21.6));
        assert_eq!(ambient.attributes.unit_of_measurement, "°C");
    }

    #[tokio::test]
    async fn test_weather_unit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/weather/unit"))
            .respond_with(ResponseTemplate::new(200).set_body_string("imperial"))
            .mount(&server)
            .await;

        assert_eq!(client_for(&server).await.weather_unit().await.unwrap(), "imperial");
    }

    #[tokio::test]
    async fn test_malformed_weather_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/weather/current"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.current_weather().await.unwrap_err();
        assert!(matches!(err, PlaybackError::InvalidResponse(_)));
    }
}
