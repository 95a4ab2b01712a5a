//! Value validation predicates
//!
//! Every predicate answers `false` for malformed input and never panics.

use crate::configuration::CONF;
use ipnetwork::{Ipv4Network, Ipv6Network};
use lazy_static::lazy_static;
use regex::Regex;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use url::Url;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
    ).unwrap();
    static ref INTEGER_REGEX: Regex = Regex::new(r"^-?[1-9][0-9]*$").unwrap();
    static ref FLOAT_REGEX: Regex = Regex::new(r"^-?([0-9]+)\.[0-9]+$").unwrap();
    static ref IMAGE_REGEX: Regex = Regex::new(r"(?i)\.(?:gif|jpe?g|png|svg|tif|webp)$").unwrap();

    static ref V4_EXCLUDED: Vec<Ipv4Network> = [
        // private
        "10.0.0.0/8",
        "172.16.0.0/12",
        "192.168.0.0/16",
        // reserved
        "0.0.0.0/8",
        "127.0.0.0/8",
        "169.254.0.0/16",
        "240.0.0.0/4",
    ]
    .iter()
    .map(|cidr| cidr.parse().unwrap())
    .collect();

    static ref V6_EXCLUDED: Vec<Ipv6Network> = [
        // private
        "fc00::/7",
        // reserved
        "::/128",
        "::1/128",
        "::ffff:0:0/96",
        "fe80::/10",
    ]
    .iter()
    .map(|cidr| cidr.parse().unwrap())
    .collect();
}

/// Schemes that must carry `://` and a host
const HIERARCHICAL_SCHEMES: &[&str] = &["http", "https", "ftp", "ws", "wss"];

/// IP protocol family accepted by [`is_ip_address`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IpFamily {
    #[default]
    V4,
    V6,
}

impl IpFamily {
    /// Resolve `"ipv4"`/`"ipv6"` case-insensitively; anything else is IPv4
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("ipv6") {
            IpFamily::V6
        } else {
            IpFamily::V4
        }
    }
}

/// Validate an IP address of the given family
///
/// With `exclude_private_and_reserved` set, addresses in the private and
/// reserved ranges are rejected as well.
///
/// # Example
/// ```rust,ignore
/// assert!(is_ip_address("192.168.1.1", IpFamily::V4, false));
/// assert!(!is_ip_address("192.168.1.1", IpFamily::V4, true));
/// assert!(is_ip_address("2001:db8::1", IpFamily::V6, false));
/// ```
pub fn is_ip_address(value: &str, family: IpFamily, exclude_private_and_reserved: bool) -> bool {
    match family {
        IpFamily::V4 => value
            .parse::<Ipv4Addr>()
            .map(|ip| !exclude_private_and_reserved || !V4_EXCLUDED.iter().any(|n| n.contains(ip)))
            .unwrap_or(false),
        IpFamily::V6 => value
            .parse::<Ipv6Addr>()
            .map(|ip| !exclude_private_and_reserved || !V6_EXCLUDED.iter().any(|n| n.contains(ip)))
            .unwrap_or(false),
    }
}

/// Validate an address of either family, private ranges included
pub fn is_any_ip_address(value: &str) -> bool {
    value.parse::<IpAddr>().is_ok()
}

/// Validate an absolute URL
///
/// Surrounding or embedded whitespace is rejected. Web schemes need `://`
/// followed by a non-empty host.
pub fn is_url(value: &str) -> bool {
    if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }

    let parsed = match Url::parse(value) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    if HIERARCHICAL_SCHEMES.contains(&parsed.scheme()) {
        let after_scheme = &value[parsed.scheme().len()..];
        return after_scheme.starts_with("://")
            && parsed.host_str().map_or(false, |host| !host.is_empty());
    }

    true
}

/// Validate an e-mail address
///
/// The domain must contain at least one dot. The address is limited to 254
/// characters and the local part to 64, with no leading, trailing or doubled
/// dots.
pub fn is_email_address(value: &str) -> bool {
    if value.len() > 254 || !EMAIL_REGEX.is_match(value) {
        return false;
    }

    match value.rsplit_once('@') {
        Some((local, _)) => {
            local.len() <= 64
                && !local.starts_with('.')
                && !local.ends_with('.')
                && !local.contains("..")
        }
        None => false,
    }
}

/// Check if a string is an integer without leading zeros
///
/// `"0"` itself does not pass.
pub fn is_integer(value: &str) -> bool {
    INTEGER_REGEX.is_match(value)
}

/// Check if a string is a decimal number with a fractional part
///
/// The integer part may not start with `00`.
pub fn is_float(value: &str) -> bool {
    FLOAT_REGEX
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map_or(false, |int_part| !int_part.as_str().starts_with("00"))
}

/// Check if bytes are well formed under the configured charset
pub fn is_utf8(bytes: &[u8]) -> bool {
    CONF::encoding().is_valid(bytes)
}

/// Check if a string is a complete JSON document
pub fn is_json(value: &str) -> bool {
    !value.is_empty() && serde_json::from_str::<serde_json::Value>(value).is_ok()
}

/// Check if a path or URL points at an image by its extension
///
/// Query string and fragment are ignored, so `/a.png?size=2` passes.
pub fn is_image_path(value: &str) -> bool {
    IMAGE_REGEX.is_match(url_path(value))
}

/// Path portion of a URL or plain path
fn url_path(value: &str) -> &str {
    let end = value.find(['?', '#']).unwrap_or(value.len());
    let without_query = &value[..end];

    let authority_start = if let Some(pos) = without_query.find("://") {
        Some(pos + 3)
    } else if without_query.starts_with("//") {
        Some(2)
    } else {
        None
    };

    match authority_start {
        Some(start) => {
            let rest = &without_query[start..];
            rest.find('/').map_or("", |slash| &rest[slash..])
        }
        None => without_query,
    }
}
