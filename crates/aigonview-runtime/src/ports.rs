//! Port allocation for new viewer instances.

use std::net::TcpListener;

use tracing::debug;

/// Check if a port is available by attempting to bind to it on loopback.
/// The listener is dropped immediately, which releases the port.
pub fn is_port_available(port: u16) -> bool {
    match TcpListener::bind(("127.0.0.1", port)) {
        Ok(listener) => listener.local_addr().is_ok(),
        Err(_) => false,
    }
}

/// Find the first bindable port in `start .. start + max_attempts`.
///
/// Ports are probed in ascending order and the range stops at 65535. The
/// answer is best-effort: another process may take the port before the
/// viewer binds it.
pub fn find_available_port(start: u16, max_attempts: u16) -> Option<u16> {
    let found = (0..max_attempts)
        .map_while(|offset| start.checked_add(offset))
        .find(|&port| {
            let free = is_port_available(port);
            if !free {
                debug!(port = %port, "Port unavailable on system, skipping");
            }
            free
        });

    if let Some(port) = found {
        debug!(port = %port, requested = %start, "Allocated available port");
    }
    found
}

/// Last port of the search window starting at `start`, for messages.
pub fn search_window_end(start: u16, max_attempts: u16) -> u16 {
    start.saturating_add(max_attempts.saturating_sub(1))
}
