//! Startup configuration
//!
//! All configuration comes from command line flags parsed once in `main`.
//! The resulting struct is immutable and shared with the handlers through
//! an `Arc`; nothing reconfigures at runtime.

use clap::Parser;
use std::net::SocketAddr;

/// Fixed path that triggers the redirect handler.
pub const REDIRECT_PATH: &str = "/cockpit";

/// Port the redirect handler sends clients to.
pub const REDIRECT_PORT: u16 = 9090;

/// Command line flags.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "web-dispatch",
    about = "HTTP front-end dispatching between static files, a CGI-style handler and a fixed redirect"
)]
pub struct Config {
    /// Path of the executable invoked by the CGI handler
    #[arg(long, default_value = "/opt/revoedge/user/hp_wp_ups/status.py")]
    pub cgi: String,

    /// TCP port to listen on
    #[arg(long, default_value_t = 80)]
    pub port: u16,

    /// Request path that triggers the CGI handler
    #[arg(long, default_value = "/status.json")]
    pub uri: String,

    /// Root directory for static file serving
    #[arg(long, default_value = "/var/www/html")]
    pub www: String,

    /// Kill the CGI executable after this many seconds (0 disables)
    #[arg(long, default_value_t = 0)]
    pub cgi_timeout: u64,
}

impl Config {
    /// Listen address: all interfaces on the configured port.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
