//! Static file serving module
//!
//! Resolves request paths against the configured web root and builds
//! file responses with extension-based Content-Type inference.

use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

const INDEX_FILE: &str = "index.html";

/// Serve a file from the web root, or 404 when nothing matches
pub async fn serve(www_root: &str, path: &str, is_head: bool) -> Response<Full<Bytes>> {
    match load_from_root(www_root, path).await {
        Some((content, content_type)) => http::build_file_response(content, content_type, is_head),
        None => http::build_404_response(),
    }
}

/// Load a file from the web root with index file support
async fn load_from_root(www_root: &str, path: &str) -> Option<(Vec<u8>, &'static str)> {
    // Remove leading slash and neutralize traversal segments
    let clean_path = path.trim_start_matches('/').replace("..", "");
    let clean_path = clean_path.trim_start_matches('/');

    let mut file_path = Path::new(www_root).join(clean_path);

    let root_canonical = match Path::new(www_root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static root not found or inaccessible '{www_root}': {e}"
            ));
            return None;
        }
    };

    // Directories resolve to their index file
    if file_path.is_dir() || clean_path.is_empty() || clean_path.ends_with('/') {
        file_path = file_path.join(INDEX_FILE);
    }

    // Missing files are an ordinary 404, not worth a log line
    let Ok(file_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {path} -> {}",
            file_canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&file_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_canonical.display(),
                e
            ));
            return None;
        }
    };

    let content_type = mime::content_type_for(file_canonical.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}
