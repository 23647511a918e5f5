//! HTTP response building module
//!
//! Provides builders for the response shapes the handlers produce,
//! decoupled from specific business logic. Builder failures are logged
//! and degrade to an empty response instead of panicking mid-request.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 303 See Other response pointing at `target`
pub fn build_see_other_response(target: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(303)
        .header("Location", target)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("See Other")))
        .unwrap_or_else(|e| {
            log_build_error("303", &e);
            Response::new(Full::new(Bytes::from("See Other")))
        })
}

/// Build 200 response for a static file
pub fn build_file_response(
    content: Vec<u8>,
    content_type: &'static str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 response carrying external program output verbatim.
///
/// No Content-Type is set; the bytes pass through untouched.
pub fn build_passthrough_response(output: Vec<u8>) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .body(Full::new(Bytes::from(output)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_404_response() {
        let resp = build_404_response();
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
    }

    #[test]
    fn test_see_other_response() {
        let resp = build_see_other_response("http://example.com:9090");
        assert_eq!(resp.status(), 303);
        assert_eq!(resp.headers()["Location"], "http://example.com:9090");
    }

    #[test]
    fn test_file_response_head_omits_body() {
        let resp = build_file_response(b"hello".to_vec(), "text/plain; charset=utf-8", true);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Length"], "5");
    }

    #[test]
    fn test_passthrough_has_no_content_type() {
        let resp = build_passthrough_response(b"{\"ok\":true}".to_vec());
        assert_eq!(resp.status(), 200);
        assert!(!resp.headers().contains_key("Content-Type"));
    }
}
