//! Local development server that defeats the service-worker cache.
//!
//! Serves the source tree directly with aggressive no-cache headers so
//! edits are visible on refresh, even when a production service worker
//! has precached the app shell.

mod response;

use crate::{config::ProjectConfig, log};
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tiny_http::{Request, Server};

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Bind and run the server until interrupted.
pub fn serve(config: &ProjectConfig) -> Result<()> {
    let (server, addr) = bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    crate::core::register_server(Arc::clone(&server));

    log!("serve"; "http://{} (caching disabled)", addr);
    log!("serve"; "serving {}", config.get_root().display());

    for request in server.incoming_requests() {
        if crate::core::is_shutdown() {
            break;
        }
        if let Err(e) = handle_request(request, config) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Bind to the specified interface and port, with automatic port retry.
fn bind_with_retry(interface: std::net::IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < MAX_PORT_RETRIES => continue,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    MAX_PORT_RETRIES,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

/// Handle a single HTTP request
fn handle_request(request: Request, config: &ProjectConfig) -> Result<()> {
    match response::resolve_path(request.url(), config.get_root()) {
        Some(path) => response::respond_file(request, &path),
        None => response::respond_not_found(request),
    }
}
