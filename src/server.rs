//! TCP listener for the rent-a-game server.
//!
//! Binds the configured port, accepts connections forever, and spawns one
//! detached session task per connection. The accept loop never waits on a
//! handler; a failing session ends only itself.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use crate::config::{Config, Protocol};
use crate::protocols::{echo, rental};

/// Maximum number of concurrent connections.
const MAX_CONNECTIONS: usize = 10000;

/// Listen backlog.
const BACKLOG: i32 = 128;

/// Server instance.
pub struct Server {
    listener: TcpListener,
    protocol: Protocol,
    connection_limit: Arc<Semaphore>,
}

impl Server {
    /// Bind the listening socket. Any failure here (bad port, bind, listen)
    /// is fatal to the process.
    pub fn bind(config: &Config) -> std::io::Result<Self> {
        let port: u16 = config.port.parse().map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid port '{}'", config.port),
            )
        })?;

        let listener = bind_listener(port)?;

        Ok(Server {
            listener,
            protocol: config.protocol.clone(),
            connection_limit: Arc::new(Semaphore::new(MAX_CONNECTIONS)),
        })
    }

    /// Address the listener is bound to. With port 0 in the config this is
    /// how tests learn the chosen port.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections forever, one detached session task each.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        loop {
            // Wait for a connection slot; the permit rides along with the
            // session task and frees the slot when the session ends.
            let permit = self.connection_limit.clone().acquire_owned().await?;

            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    info!(peer = %peer_ip(&addr), "Connection accepted");

                    let protocol = self.protocol.clone();
                    tokio::spawn(async move {
                        let result = match protocol {
                            Protocol::Rental { hostname } => {
                                rental::handle_connection(stream, addr, hostname).await
                            }
                            Protocol::Echo => echo::handle_connection(stream, addr).await,
                        };
                        if let Err(e) = result {
                            warn!(peer = %peer_ip(&addr), error = %e, "Session error");
                        }
                        drop(permit);
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}

/// Bind one dual-stack IPv6 socket (`IPV6_V6ONLY` off) covering both
/// address families, falling back to plain IPv4 on hosts without IPv6.
fn bind_listener(port: u16) -> std::io::Result<TcpListener> {
    let std_listener = match bind_socket(
        socket2::Domain::IPV6,
        SocketAddr::from((Ipv6Addr::UNSPECIFIED, port)),
    ) {
        Ok(listener) => listener,
        Err(e) => {
            debug!(error = %e, "Dual-stack bind failed, falling back to IPv4");
            bind_socket(
                socket2::Domain::IPV4,
                SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            )?
        }
    };

    TcpListener::from_std(std_listener)
}

fn bind_socket(domain: socket2::Domain, addr: SocketAddr) -> std::io::Result<std::net::TcpListener> {
    let socket = socket2::Socket::new(domain, socket2::Type::STREAM, Some(socket2::Protocol::TCP))?;

    if domain == socket2::Domain::IPV6 {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;

    Ok(socket.into())
}

/// The peer's IP address without the port, as the protocol echoes it. IPv4
/// peers accepted on the dual-stack socket arrive as V6-mapped addresses
/// and are reported in plain dotted-quad form.
pub fn peer_ip(addr: &SocketAddr) -> String {
    match addr.ip() {
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => v4.to_string(),
            None => v6.to_string(),
        },
        IpAddr::V4(v4) => v4.to_string(),
    }
}
