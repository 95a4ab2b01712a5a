#[cfg(test)]
mod tests {
    use rustf_utils::prelude::*;
    use rustf_utils::utils::http::fetch;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(200).set_body_string("feed body"))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/feed", server.uri());
        let body = fetch(&url, &FetchOptions::default()).await.unwrap();

        assert_eq!(body, "feed body");
    }

    #[tokio::test]
    async fn test_fetch_disallowed_status_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such page"))
            .mount(&server)
            .await;

        let url = format!("{}/missing", server.uri());
        let err = fetch(&url, &FetchOptions::default()).await.unwrap_err();

        assert!(!err.is_transport());
        match err {
            Error::UnexpectedStatus { status, body, .. } => {
                assert_eq!(status, 404);
                assert_eq!(body, "no such page");
            }
            other => panic!("expected UnexpectedStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_allowed_statuses_are_configurable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("fallback"))
            .mount(&server)
            .await;

        let options = FetchOptions::default().allow_statuses(&[200, 404]);
        let body = fetch(&server.uri(), &options).await.unwrap();

        assert_eq!(body, "fallback");
    }

    #[tokio::test]
    async fn test_fetch_sends_custom_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("accept", "application/json"))
            .and(header("user-agent", "rustf-utils-test"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let options = FetchOptions::default()
            .header("Accept", "application/json")
            .user_agent("rustf-utils-test");
        let body = fetch(&server.uri(), &options).await.unwrap();

        assert_eq!(body, "{}");
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let options = FetchOptions::default().timeout(Duration::from_millis(100));
        let err = fetch(&server.uri(), &options).await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(err.error_code(), "E_TRANSPORT");
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_transport_error() {
        // Bind then drop a listener to get a port nobody is serving
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let url = format!("http://127.0.0.1:{}/", port);
        let options = FetchOptions::default().timeout(Duration::from_secs(2));
        let err = fetch(&url, &options).await.unwrap_err();

        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_fetch_rejects_invalid_url() {
        let err = fetch("not a url", &FetchOptions::default()).await.unwrap_err();
        assert_eq!(err.error_code(), "E_INVALID_URL");
    }
}
