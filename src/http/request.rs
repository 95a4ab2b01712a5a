use crate::config::RequestConfig;
use crate::configuration::CONF;
use crate::error::Result;
use crate::http::form::parse_str;
use crate::utils::validation::is_any_ip_address;
use hyper::{Body, Request as HyperRequest};
use once_cell::unsync::OnceCell;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::net::SocketAddr;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Which decoded input map to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// Query string
    Get,
    /// Query string, as sent with a HEAD request
    Head,
    /// Form body, only for `application/x-www-form-urlencoded` requests
    Post,
    /// Form-encoded body
    Put,
    /// Form-encoded body
    Patch,
    /// Form-encoded body
    Delete,
    /// `Get` merged with `Post`, the latter winning
    Request,
}

/// Everything the request helpers know about one incoming request
///
/// Decoded query and body maps are computed on first use and kept for the
/// lifetime of this value, so two requests never see each other's data.
///
/// # Example
/// ```rust,ignore
/// let ctx = RequestContext::new("post")
///     .with_header("Content-Type", "application/x-www-form-urlencoded")
///     .with_query("page=2")
///     .with_body("name=ada&tags[]=x")
///     .with_remote_addr("203.0.113.7");
///
/// assert_eq!(ctx.method(true), "POST");
/// assert_eq!(ctx.fetch(InputSource::Request, "page"), Some(&json!("2")));
/// ```
#[derive(Debug, Default)]
pub struct RequestContext {
    method: String,
    headers: HashMap<String, String>,
    query: String,
    body: Option<Vec<u8>>,
    remote_addr: Option<String>,
    https: Option<String>,
    config: Option<RequestConfig>,

    query_params: OnceCell<Map<String, Value>>,
    body_params: OnceCell<Map<String, Value>>,
    post_params: OnceCell<Map<String, Value>>,
    request_params: OnceCell<Map<String, Value>>,
    json_body: OnceCell<Option<Value>>,
}

impl RequestContext {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Default::default()
        }
    }

    /// Add a header; names are case-insensitive
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Set the raw query string (without the leading `?`)
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Address of the directly connected peer
    pub fn with_remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = Some(addr.into());
        self
    }

    /// Value of the `HTTPS` transport flag set by the server in front of us
    pub fn with_https(mut self, flag: impl Into<String>) -> Self {
        self.https = Some(flag.into());
        self
    }

    /// Use these settings instead of the global configuration
    pub fn with_config(mut self, config: RequestConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build a context from a hyper request, reading the whole body
    pub async fn from_hyper(req: HyperRequest<Body>, remote_addr: Option<SocketAddr>) -> Result<Self> {
        let method = req.method().to_string();
        let query = req.uri().query().unwrap_or("").to_string();
        let https = match req.uri().scheme_str() {
            Some(scheme) if scheme.eq_ignore_ascii_case("https") => Some("on".to_string()),
            _ => None,
        };

        // Repeated headers are joined in arrival order
        let mut headers: HashMap<String, String> = HashMap::new();
        for (name, value) in req.headers() {
            if let Ok(value_str) = value.to_str() {
                headers
                    .entry(name.as_str().to_string())
                    .and_modify(|joined| {
                        joined.push_str(", ");
                        joined.push_str(value_str);
                    })
                    .or_insert_with(|| value_str.to_string());
            }
        }

        let body = hyper::body::to_bytes(req.into_body()).await?.to_vec();
        log::trace!("Read {} byte request body for {} request", body.len(), method);

        Ok(Self {
            method,
            headers,
            query,
            body: Some(body),
            remote_addr: remote_addr.map(|addr| addr.ip().to_string()),
            https,
            ..Default::default()
        })
    }

    fn request_config(&self) -> &RequestConfig {
        self.config.as_ref().unwrap_or(&CONF::get().request)
    }

    /// Request method, upper- or lower-cased
    pub fn method(&self, to_upper: bool) -> String {
        if to_upper {
            self.method.to_uppercase()
        } else {
            self.method.to_lowercase()
        }
    }

    /// Get a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    /// Raw request body, empty when none was supplied
    pub fn body(&self) -> &[u8] {
        self.body.as_deref().unwrap_or(&[])
    }

    /// Get the client IP address
    ///
    /// With `trust_proxy`, the first configured proxy header that is present
    /// is consulted and its first comma-separated entry is used if it is a
    /// valid IPv4 or IPv6 address. Otherwise the peer address is returned,
    /// again only if valid.
    pub fn client_ip(&self, trust_proxy: bool) -> Option<String> {
        if trust_proxy {
            let forwarded = self
                .request_config()
                .proxy_headers
                .iter()
                .find_map(|name| self.header(name));

            if let Some(value) = forwarded {
                let candidate = value.split(',').next().unwrap_or("").trim();
                if is_any_ip_address(candidate) {
                    return Some(candidate.to_string());
                }
                log::debug!("Ignoring invalid forwarded address '{}'", candidate);
            }
        }

        self.remote_addr
            .as_deref()
            .filter(|addr| is_any_ip_address(addr))
            .map(|addr| addr.to_string())
    }

    /// Declared content type, if it is one of the supported types
    ///
    /// Parameters after `;` are ignored and the comparison is
    /// case-insensitive. The configured spelling is returned.
    pub fn content_type(&self) -> Option<String> {
        let declared = self.declared_content_type()?;

        self.request_config()
            .supported_content_types
            .values()
            .find(|supported| supported.eq_ignore_ascii_case(declared))
            .cloned()
    }

    fn declared_content_type(&self) -> Option<&str> {
        self.header("content-type")
            .and_then(|value| value.split(';').next())
            .map(str::trim)
    }

    /// Check if request is AJAX/XHR
    pub fn is_ajax(&self) -> bool {
        self.header("x-requested-with")
            .map(|v| v.eq_ignore_ascii_case("xmlhttprequest"))
            .unwrap_or(false)
    }

    /// Check if the request arrived over an encrypted connection
    ///
    /// True when the `HTTPS` flag is set to anything but `off`, when
    /// `X-Forwarded-Proto` is `https`, or when `Front-End-Https` is present
    /// and not `off`.
    pub fn is_https(&self) -> bool {
        let not_off = |value: &str| !value.eq_ignore_ascii_case("off");

        self.https.as_deref().map_or(false, not_off)
            || self
                .header("x-forwarded-proto")
                .map_or(false, |proto| proto.eq_ignore_ascii_case("https"))
            || self.header("front-end-https").map_or(false, not_off)
    }

    /// Parse the body as JSON, or return `default` when absent or malformed
    pub fn body_json(&self, default: Value) -> Value {
        let parsed = self.json_body.get_or_init(|| {
            let body = self.body.as_deref()?;
            match serde_json::from_slice(body) {
                Ok(value) => Some(value),
                Err(e) => {
                    log::debug!("Request body is not valid JSON: {}", e);
                    None
                }
            }
        });

        parsed.clone().unwrap_or(default)
    }

    /// Decoded input map for a source
    pub fn input(&self, source: InputSource) -> &Map<String, Value> {
        match source {
            InputSource::Get | InputSource::Head => self
                .query_params
                .get_or_init(|| parse_str(&self.query)),
            InputSource::Put | InputSource::Patch | InputSource::Delete => self
                .body_params
                .get_or_init(|| parse_str(&String::from_utf8_lossy(self.body()))),
            InputSource::Post => self.post_params.get_or_init(|| {
                let is_form = self
                    .declared_content_type()
                    .map_or(false, |ct| ct.eq_ignore_ascii_case(FORM_URLENCODED));

                if is_form {
                    parse_str(&String::from_utf8_lossy(self.body()))
                } else {
                    Map::new()
                }
            }),
            InputSource::Request => self.request_params.get_or_init(|| {
                let mut merged = self.input(InputSource::Get).clone();
                for (key, value) in self.input(InputSource::Post) {
                    merged.insert(key.clone(), value.clone());
                }
                merged
            }),
        }
    }

    /// Get a single input value
    pub fn fetch(&self, source: InputSource, key: &str) -> Option<&Value> {
        self.input(source).get(key)
    }

    /// Get several input values; missing keys map to `null`
    pub fn fetch_many(&self, source: InputSource, keys: &[&str]) -> Map<String, Value> {
        let input = self.input(source);
        keys.iter()
            .map(|key| {
                let value = input.get(*key).cloned().unwrap_or(Value::Null);
                (key.to_string(), value)
            })
            .collect()
    }

    /// Deep copy of an input map
    pub fn fetch_all(&self, source: InputSource) -> Map<String, Value> {
        self.input(source).clone()
    }
}
