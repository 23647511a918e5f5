//! Logging utilities
//!
//! Timestamped plain lines: informational output on stdout, errors and
//! warnings on stderr. The process keeps no log files; stdout and stderr
//! are the only sinks.

use crate::config::Config;
use chrono::Local;
use hyper::Method;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn write_info(message: &str) {
    println!("[{}] {message}", Local::now().format(TIME_FORMAT));
}

fn write_error(message: &str) {
    eprintln!("[{}] {message}", Local::now().format(TIME_FORMAT));
}

pub fn log_server_start(cfg: &Config) {
    write_info(&format!("Listening on port {}", cfg.port));
    write_info(&format!("CGI handler: {} (trigger {})", cfg.cgi, cfg.uri));
    write_info(&format!("Static root: {}", cfg.www));
    if cfg.cgi_timeout > 0 {
        write_info(&format!("CGI timeout: {}s", cfg.cgi_timeout));
    }
}

pub fn log_request(method: &Method, path: &str) {
    write_info(&format!("{method} {path}"));
}

pub fn log_exec(program: &str) {
    write_info(&format!("Exec: {program}"));
}

pub fn log_redirect(target: &str) {
    write_info(&format!("Redirect: {target}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}
