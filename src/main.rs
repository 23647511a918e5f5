use clap::Parser;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use std::sync::Arc;
use tokio::net::TcpListener;

mod config;
mod handler;
mod http;
mod logger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    // A bind failure (port in use, missing privilege) is fatal and
    // surfaces through main's error return.
    let listener = create_listener(cfg.socket_addr())?;

    logger::log_server_start(&cfg);

    let cfg = Arc::new(cfg);
    loop {
        match listener.accept().await {
            Ok((stream, _peer_addr)) => {
                serve_connection(stream, Arc::clone(&cfg));
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}

/// Serve one connection on its own task. Requests on different
/// connections run concurrently with no shared mutable state; a failed
/// connection never takes down the accept loop.
fn serve_connection(stream: tokio::net::TcpStream, cfg: Arc<config::Config>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| {
                let cfg = Arc::clone(&cfg);
                async move { handler::handle_request(req, cfg).await }
            }),
        );

        if let Err(e) = conn.await {
            logger::log_connection_error(&e);
        }
    });
}

/// Create a `TcpListener` with `SO_REUSEADDR` enabled so a quick restart
/// does not trip over sockets lingering in TIME_WAIT.
fn create_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;

    // Non-blocking mode is required before handing the socket to tokio.
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
