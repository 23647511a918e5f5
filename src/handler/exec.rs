//! CGI-style exec handler module
//!
//! Runs the configured executable with the request path as its single
//! argument and returns the program's standard output as the response
//! body. The path travels as one argv element through a direct process
//! invocation; no shell is involved, so shell metacharacters in the
//! path are inert.

use crate::config::Config;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// Run the configured executable and wrap its output in a response
pub async fn serve(cfg: &Config, path: &str) -> Response<Full<Bytes>> {
    logger::log_exec(&cfg.cgi);
    let output = run(cfg, path).await;
    http::build_passthrough_response(output)
}

/// Run the executable and collect its stdout.
///
/// Failure contract: spawn errors, non-zero exits and timeouts are
/// logged server-side only, and whatever stdout was produced up to that
/// point is returned unchanged. The client never sees an error status
/// from this handler.
async fn run(cfg: &Config, path: &str) -> Vec<u8> {
    let mut child = match Command::new(&cfg.cgi)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        // Child stderr goes straight to the server's own stderr
        .stderr(Stdio::inherit())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            logger::log_error(&format!("Failed to start '{}': {e}", cfg.cgi));
            return Vec::new();
        }
    };

    let mut output = Vec::new();
    let Some(mut stdout) = child.stdout.take() else {
        logger::log_error(&format!("No stdout pipe for '{}'", cfg.cgi));
        return output;
    };

    let read = stdout.read_to_end(&mut output);
    let timed_out = if cfg.cgi_timeout == 0 {
        // No deadline: a hung program holds this task until it exits
        if let Err(e) = read.await {
            logger::log_error(&format!("Failed to read output of '{}': {e}", cfg.cgi));
        }
        false
    } else {
        match tokio::time::timeout(Duration::from_secs(cfg.cgi_timeout), read).await {
            Ok(Ok(_)) => false,
            Ok(Err(e)) => {
                logger::log_error(&format!("Failed to read output of '{}': {e}", cfg.cgi));
                false
            }
            Err(_) => {
                logger::log_error(&format!(
                    "'{}' exceeded {}s timeout, killing",
                    cfg.cgi, cfg.cgi_timeout
                ));
                if let Err(e) = child.start_kill() {
                    logger::log_error(&format!("Failed to kill '{}': {e}", cfg.cgi));
                }
                true
            }
        }
    };

    match child.wait().await {
        Ok(status) if !status.success() && !timed_out => {
            logger::log_error(&format!("'{}' exited with {status}", cfg.cgi));
        }
        Err(e) => {
            logger::log_error(&format!("Failed to wait for '{}': {e}", cfg.cgi));
        }
        _ => {}
    }

    output
}
