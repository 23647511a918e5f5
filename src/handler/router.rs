//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Every request is matched
//! against exactly one handler; handlers share nothing and run to
//! completion independently.

use crate::config::{Config, REDIRECT_PATH, REDIRECT_PORT};
use crate::handler::{exec, static_files};
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub host: &'a str,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    cfg: Arc<Config>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let path = req.uri().path();

    logger::log_request(method, path);

    let host = req
        .headers()
        .get(hyper::header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| req.uri().host())
        .unwrap_or("localhost");

    let ctx = RequestContext {
        path,
        host,
        is_head: *method == Method::HEAD,
    };

    Ok(route_request(&ctx, &cfg).await)
}

/// Route request based on path
pub async fn route_request(ctx: &RequestContext<'_>, cfg: &Config) -> Response<Full<Bytes>> {
    // 1. CGI trigger path (exact match)
    if ctx.path == cfg.uri {
        return exec::serve(cfg, ctx.path).await;
    }

    // 2. Fixed redirect path
    if ctx.path == REDIRECT_PATH {
        return redirect_to_alternate_port(ctx);
    }

    // 3. Everything else falls through to static file serving
    static_files::serve(&cfg.www, ctx.path, ctx.is_head).await
}

/// Send the client to the same host on the alternate port, discarding
/// the original path and any port in the Host header.
fn redirect_to_alternate_port(ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    let target = format!("http://{}:{REDIRECT_PORT}", host_without_port(ctx.host));
    logger::log_redirect(&target);
    http::build_see_other_response(&target)
}

/// Strip a `:port` suffix from a Host header value. Bracketed IPv6
/// literals keep their brackets.
fn host_without_port(host: &str) -> &str {
    if let Some(end) = host.find(']') {
        return &host[..=end];
    }
    match host.split_once(':') {
        Some((name, _port)) => name,
        None => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn test_config(www: &str) -> Config {
        Config {
            cgi: "/bin/true".to_string(),
            port: 8080,
            uri: "/status.json".to_string(),
            www: www.to_string(),
            cgi_timeout: 0,
        }
    }

    fn ctx<'a>(path: &'a str, host: &'a str) -> RequestContext<'a> {
        RequestContext {
            path,
            host,
            is_head: false,
        }
    }

    #[test]
    fn test_host_without_port() {
        assert_eq!(host_without_port("example.com"), "example.com");
        assert_eq!(host_without_port("example.com:8080"), "example.com");
        assert_eq!(host_without_port("192.168.0.7:80"), "192.168.0.7");
        assert_eq!(host_without_port("[::1]:8080"), "[::1]");
        assert_eq!(host_without_port("[::1]"), "[::1]");
    }

    #[tokio::test]
    async fn test_cockpit_redirects_to_alternate_port() {
        let cfg = test_config("/nonexistent");
        let resp = route_request(&ctx("/cockpit", "example.com"), &cfg).await;
        assert_eq!(resp.status(), 303);
        assert_eq!(resp.headers()["Location"], "http://example.com:9090");
    }

    #[tokio::test]
    async fn test_cockpit_drops_request_port() {
        let cfg = test_config("/nonexistent");
        let resp = route_request(&ctx("/cockpit", "example.com:8080"), &cfg).await;
        assert_eq!(resp.status(), 303);
        assert_eq!(resp.headers()["Location"], "http://example.com:9090");
    }

    #[tokio::test]
    async fn test_unmatched_path_is_404() {
        let root = std::env::temp_dir().join(format!("web-dispatch-router-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();

        let cfg = test_config(root.to_str().unwrap());
        let resp = route_request(&ctx("/no-such-file", "example.com"), &cfg).await;
        assert_eq!(resp.status(), 404);

        std::fs::remove_dir_all(&root).ok();
    }

    #[tokio::test]
    async fn test_trigger_path_runs_cgi() {
        use std::os::unix::fs::PermissionsExt;

        let script =
            std::env::temp_dir().join(format!("web-dispatch-router-cgi-{}", std::process::id()));
        std::fs::write(&script, "#!/bin/sh\nprintf '{\"ok\":true}'\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut cfg = test_config("/nonexistent");
        cfg.cgi = script.to_str().unwrap().to_string();

        let resp = route_request(&ctx("/status.json", "example.com"), &cfg).await;
        assert_eq!(resp.status(), 200);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"ok":true}"#);

        std::fs::remove_file(&script).ok();
    }
}
