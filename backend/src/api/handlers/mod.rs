//! HTTP request handlers.

pub mod cli;
pub mod download;
pub mod health;

use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, HeaderName};

use crate::models::audit_log::ClientInfo;

const X_REAL_IP: &str = "x-real-ip";
const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Client host and agent from proxy-supplied request headers.
///
/// The host comes from `X-Real-IP`, falling back to the first
/// `X-Forwarded-For` hop. Values are recorded for audit only.
pub fn client_info(headers: &HeaderMap) -> ClientInfo {
    let host = header_value(headers, X_REAL_IP.as_bytes())
        .or_else(|| {
            header_value(headers, X_FORWARDED_FOR.as_bytes())
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        })
        .map(str::to_string);
    let agent = header_value(headers, USER_AGENT.as_str().as_bytes()).map(str::to_string);

    ClientInfo::new(host, agent)
}

fn header_value<'a>(headers: &'a HeaderMap, name: &[u8]) -> Option<&'a str> {
    let name = HeaderName::from_bytes(name).ok()?;
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_info_prefers_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert(X_REAL_IP, HeaderValue::from_static("10.0.0.1"));
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static("10.0.0.2"));
        headers.insert(USER_AGENT, HeaderValue::from_static("curl/8.4.0"));

        let info = client_info(&headers);
        assert_eq!(info.host.as_deref(), Some("10.0.0.1"));
        assert_eq!(info.agent.as_deref(), Some("curl/8.4.0"));
    }

    #[test]
    fn test_client_info_uses_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            X_FORWARDED_FOR,
            HeaderValue::from_static("203.0.113.9, 10.0.0.2"),
        );

        let info = client_info(&headers);
        assert_eq!(info.host.as_deref(), Some("203.0.113.9"));
        assert!(info.agent.is_none());
    }

    #[test]
    fn test_client_info_empty() {
        assert_eq!(client_info(&HeaderMap::new()), ClientInfo::default());
    }
}
