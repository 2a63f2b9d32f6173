// Client IP extraction for request logging
//
// The rate limiter keys on the same headers (see rate_limit.rs); this
// middleware only makes the address available to handlers.
use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use std::net::{IpAddr, SocketAddr};

/// Extension key for storing extracted IP address
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientIp(pub IpAddr);

/// Middleware to extract client IP address from request
///
/// Priority:
/// 1. X-Forwarded-For header (for requests through proxies)
/// 2. X-Real-IP header (for Nginx)
/// 3. ConnectInfo socket address (direct connection, absent in tests)
pub async fn extract_client_ip(
    connect_info: Option<ConnectInfo<SocketAddr>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(ip) = client_ip(&request, connect_info.map(|ConnectInfo(addr)| addr)) {
        request.extensions_mut().insert(ClientIp(ip));
    }

    next.run(request).await
}

fn client_ip(request: &Request, peer: Option<SocketAddr>) -> Option<IpAddr> {
    let headers = request.headers();

    // X-Forwarded-For is a comma-separated list; the first entry is the client
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        return forwarded
            .to_str()
            .ok()
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok());
    }

    if let Some(real_ip) = headers.get("x-real-ip") {
        return real_ip.to_str().ok().and_then(|s| s.trim().parse::<IpAddr>().ok());
    }

    peer.map(|addr| addr.ip())
}
