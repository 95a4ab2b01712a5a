#[cfg(test)]
mod tests {
    use hyper::{Body, Request};
    use rustf_utils::config::RequestConfig;
    use rustf_utils::prelude::*;
    use std::net::SocketAddr;

    fn form_request() -> RequestContext {
        RequestContext::new("post")
            .with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_header("X-Forwarded-For", "198.51.100.23, 10.0.0.2")
            .with_query("page=3&filter[status]=open")
            .with_body("title=Hello+World&tags[]=rust&tags[]=web")
            .with_remote_addr("10.0.0.2")
    }

    #[test]
    fn test_request_accessors() {
        let ctx = form_request();

        assert_eq!(ctx.method(true), "POST");
        assert_eq!(ctx.method(false), "post");
        assert_eq!(ctx.client_ip(false), Some("10.0.0.2".to_string()));
        assert_eq!(ctx.client_ip(true), Some("198.51.100.23".to_string()));
        assert_eq!(ctx.content_type(), None);
        assert!(!ctx.is_ajax());
        assert!(!ctx.is_https());
    }

    #[test]
    fn test_decoded_input() {
        let ctx = form_request();

        assert_eq!(ctx.fetch(InputSource::Get, "filter"), Some(&json!({"status": "open"})));
        assert_eq!(ctx.fetch(InputSource::Post, "title"), Some(&json!("Hello World")));
        assert_eq!(ctx.fetch(InputSource::Post, "tags"), Some(&json!(["rust", "web"])));
        assert_eq!(ctx.fetch(InputSource::Post, "missing"), None);

        let merged = ctx.fetch_all(InputSource::Request);
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["page", "filter", "title", "tags"]);
    }

    #[test]
    fn test_json_body() {
        let ctx = RequestContext::new("POST")
            .with_header("Content-Type", "application/json")
            .with_body(r#"{"user": {"id": 7}}"#);

        assert_eq!(ctx.content_type(), Some("application/json".to_string()));
        assert_eq!(ctx.body_json(Value::Null)["user"]["id"], json!(7));
        // JSON bodies are not form encoded
        assert!(ctx.input(InputSource::Post).is_empty());
    }

    #[test]
    fn test_custom_content_types() {
        let mut config = RequestConfig::default();
        config
            .supported_content_types
            .insert("csv".to_string(), "text/csv".to_string());

        let ctx = RequestContext::new("POST")
            .with_config(config)
            .with_header("Content-Type", "text/csv; header=present");
        assert_eq!(ctx.content_type(), Some("text/csv".to_string()));
    }

    #[test]
    fn test_separate_requests_do_not_share_caches() {
        let first = RequestContext::new("DELETE").with_body("id=1");
        let second = RequestContext::new("DELETE").with_body("id=2");

        assert_eq!(first.fetch(InputSource::Delete, "id"), Some(&json!("1")));
        assert_eq!(second.fetch(InputSource::Delete, "id"), Some(&json!("2")));
        assert_eq!(first.fetch(InputSource::Delete, "id"), Some(&json!("1")));
    }

    #[tokio::test]
    async fn test_from_hyper_request() {
        let req = Request::builder()
            .method("PATCH")
            .uri("/items/9?dry_run=1")
            .header("X-Forwarded-Proto", "https")
            .header("Client-IP", "203.0.113.50")
            .body(Body::from("name=renamed"))
            .unwrap();
        let peer: SocketAddr = "[2001:db8::1]:443".parse().unwrap();

        let ctx = RequestContext::from_hyper(req, Some(peer)).await.unwrap();

        assert_eq!(ctx.method(false), "patch");
        assert!(ctx.is_https());
        assert_eq!(ctx.client_ip(false), Some("2001:db8::1".to_string()));
        assert_eq!(ctx.client_ip(true), Some("203.0.113.50".to_string()));
        assert_eq!(ctx.fetch(InputSource::Head, "dry_run"), Some(&json!("1")));
        assert_eq!(ctx.fetch(InputSource::Patch, "name"), Some(&json!("renamed")));
        assert_eq!(ctx.header("x-forwarded-proto"), Some("https"));
    }
}
