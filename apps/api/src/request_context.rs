use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use garden_domain::ClientIp;
use ipnet::IpNet;

use crate::state::AppState;

const PLATFORM_FORWARDED_FOR: &str = "x-vercel-forwarded-for";
const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";

/// Caller details needed by the like handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub client_ip: ClientIp,
    pub origin: Option<String>,
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(address)| address.ip());

        Ok(extract_request_context(
            &parts.headers,
            peer,
            &state.trusted_proxies,
        ))
    }
}

pub(crate) fn extract_request_context(
    headers: &HeaderMap,
    peer: Option<IpAddr>,
    trusted_proxies: &[IpNet],
) -> RequestContext {
    let origin = header_value(headers, header::ORIGIN.as_str())
        .or_else(|| header_value(headers, header::REFERER.as_str()))
        .map(ToOwned::to_owned);

    RequestContext {
        client_ip: resolve_client_ip(headers, peer, trusted_proxies),
        origin,
    }
}

/// Resolves the caller address.
///
/// Without trusted proxies, forwarding headers are taken at face value. With
/// trusted proxies, they are only honoured when the TCP peer is one of them.
fn resolve_client_ip(
    headers: &HeaderMap,
    peer: Option<IpAddr>,
    trusted_proxies: &[IpNet],
) -> ClientIp {
    if !trusted_proxies.is_empty() {
        let Some(peer) = peer else {
            return ClientIp::unknown();
        };

        if !trusted_proxies.iter().any(|network| network.contains(&peer)) {
            return ClientIp::new(peer.to_string());
        }
    }

    forwarded_client_ip(headers)
}

fn forwarded_client_ip(headers: &HeaderMap) -> ClientIp {
    for name in [PLATFORM_FORWARDED_FOR, FORWARDED_FOR] {
        if let Some(value) = header_value(headers, name) {
            return ClientIp::new(value.split(',').next().unwrap_or_default());
        }
    }

    header_value(headers, REAL_IP)
        .map(ClientIp::new)
        .unwrap_or_else(ClientIp::unknown)
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use std::net::IpAddr;
    use std::str::FromStr;

    use axum::http::{HeaderMap, HeaderValue};
    use ipnet::IpNet;

    use super::extract_request_context;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(*name, HeaderValue::from_static(*value));
        }
        headers
    }

    fn client_ip(pairs: &[(&'static str, &'static str)]) -> String {
        extract_request_context(&headers(pairs), None, &[])
            .client_ip
            .as_str()
            .to_owned()
    }

    #[test]
    fn platform_header_wins() {
        let ip = client_ip(&[
            ("x-vercel-forwarded-for", "203.0.113.7, 10.0.0.1"),
            ("x-forwarded-for", "198.51.100.2"),
            ("x-real-ip", "192.0.2.1"),
        ]);
        assert_eq!(ip, "203.0.113.7");
    }

    #[test]
    fn forwarded_for_uses_first_entry() {
        let ip = client_ip(&[
            ("x-forwarded-for", " 198.51.100.2 , 10.0.0.1"),
            ("x-real-ip", "192.0.2.1"),
        ]);
        assert_eq!(ip, "198.51.100.2");
    }

    #[test]
    fn real_ip_is_the_last_resort() {
        assert_eq!(client_ip(&[("x-real-ip", " 192.0.2.1 ")]), "192.0.2.1");
    }

    #[test]
    fn missing_headers_mean_unknown() {
        assert_eq!(client_ip(&[]), "unknown");
    }

    #[test]
    fn blank_first_entry_does_not_fall_through() {
        let ip = client_ip(&[
            ("x-forwarded-for", " , 10.0.0.1"),
            ("x-real-ip", "192.0.2.1"),
        ]);
        assert_eq!(ip, "unknown");
    }

    #[test]
    fn origin_falls_back_to_referer() {
        let context = extract_request_context(
            &headers(&[("referer", "https://chmal.it/blog/hello-world")]),
            None,
            &[],
        );
        assert_eq!(
            context.origin.as_deref(),
            Some("https://chmal.it/blog/hello-world")
        );

        let context = extract_request_context(
            &headers(&[
                ("origin", "https://chmal.it"),
                ("referer", "https://elsewhere.example/"),
            ]),
            None,
            &[],
        );
        assert_eq!(context.origin.as_deref(), Some("https://chmal.it"));
    }

    #[test]
    fn untrusted_peer_cannot_spoof_forwarding_headers() {
        let trusted = [IpNet::from_str("10.0.0.0/8").unwrap_or_else(|_| panic!("test"))];
        let peer = IpAddr::from_str("198.51.100.9").ok();

        let context = extract_request_context(
            &headers(&[("x-forwarded-for", "203.0.113.7")]),
            peer,
            &trusted,
        );

        assert_eq!(context.client_ip.as_str(), "198.51.100.9");
    }

    #[test]
    fn trusted_peer_forwards_client_address() {
        let trusted = [IpNet::from_str("10.0.0.0/8").unwrap_or_else(|_| panic!("test"))];
        let peer = IpAddr::from_str("10.1.2.3").ok();

        let context = extract_request_context(
            &headers(&[("x-forwarded-for", "203.0.113.7")]),
            peer,
            &trusted,
        );

        assert_eq!(context.client_ip.as_str(), "203.0.113.7");
    }
}
