//! Request origin extraction from HTTP headers.
//!
//! Short URLs fall back to the origin the client used to reach the service when
//! no `BASE_URL` is configured.

use axum::http::{HeaderMap, Uri, header};

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_HOST: &str = "x-forwarded-host";

/// Builds `scheme://host[:port]` for the current request.
///
/// The host comes from the `Host` header, or from the request target's
/// authority when the header is absent (HTTP/2 `:authority`, absolute-form
/// requests). The scheme is the target's own, else `http`. When `behind_proxy`
/// is set, `X-Forwarded-Proto` and `X-Forwarded-Host` take precedence (first
/// value of a comma-separated list).
///
/// Returns `None` if no usable host is present.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "localhost:4000".parse().unwrap());
///
/// let uri = Uri::from_static("/shorten");
/// assert_eq!(request_origin(&headers, &uri, false).unwrap(), "http://localhost:4000");
/// ```
pub fn request_origin(headers: &HeaderMap, uri: &Uri, behind_proxy: bool) -> Option<String> {
    let (scheme, host) = if behind_proxy {
        (
            first_forwarded(headers, FORWARDED_PROTO),
            first_forwarded(headers, FORWARDED_HOST),
        )
    } else {
        (None, None)
    };

    let host = host
        .or_else(|| {
            headers
                .get(header::HOST)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        })
        .or_else(|| uri.authority().map(|a| a.as_str()))?;

    let scheme = scheme.or_else(|| uri.scheme_str()).unwrap_or("http");

    Some(format!("{scheme}://{host}"))
}

fn first_forwarded<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
