use super::{is_timeout, socket_timeout};
use nsquery_domain::{AddressFamily, TransportError};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{SocketAddr, TcpStream, UdpSocket};
use std::ops::{Deref, DerefMut};
use std::time::Duration;
use tracing::trace;

/// Owns the socket of one attempt. The socket is closed when the guard drops,
/// on every return path of the transport that opened it.
pub struct SocketGuard<S> {
    socket: S,
    peer: SocketAddr,
    protocol: &'static str,
}

impl<S> SocketGuard<S> {
    fn new(socket: S, peer: SocketAddr, protocol: &'static str) -> Self {
        trace!(peer = %peer, protocol, "Socket opened");
        Self {
            socket,
            peer,
            protocol,
        }
    }
}

impl<S> Deref for SocketGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.socket
    }
}

impl<S> DerefMut for SocketGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.socket
    }
}

impl<S> Drop for SocketGuard<S> {
    fn drop(&mut self) {
        trace!(peer = %self.peer, protocol = self.protocol, "Socket closed");
    }
}

/// Datagram socket bound to an ephemeral port of the destination's family and
/// connected to `destination`. Only the receive side carries a deadline.
pub fn open_udp(
    destination: SocketAddr,
    recv_timeout: Duration,
) -> Result<SocketGuard<UdpSocket>, TransportError> {
    let io_error = |e: io::Error| TransportError::IoError {
        server: destination,
        reason: format!("Failed to open UDP socket: {}", e),
    };

    let family = AddressFamily::of_socket(&destination);
    let socket = Socket::new(
        Domain::for_address(destination),
        Type::DGRAM,
        Some(Protocol::UDP),
    )
    .map_err(io_error)?;

    socket
        .bind(&family.unspecified_bind_addr().into())
        .map_err(io_error)?;
    socket
        .set_read_timeout(Some(socket_timeout(recv_timeout)))
        .map_err(io_error)?;
    socket.connect(&destination.into()).map_err(io_error)?;

    let std_socket: UdpSocket = socket.into();
    Ok(SocketGuard::new(std_socket, destination, "UDP"))
}

/// Connected stream socket with `io_timeout` applied to every read and write.
pub fn connect_tcp(
    destination: SocketAddr,
    connect_timeout: Duration,
    io_timeout: Duration,
) -> Result<SocketGuard<TcpStream>, TransportError> {
    let connect_failed = |e: io::Error| TransportError::ConnectFailed {
        server: destination,
        reason: e.to_string(),
    };

    let socket = Socket::new(
        Domain::for_address(destination),
        Type::STREAM,
        Some(Protocol::TCP),
    )
    .map_err(connect_failed)?;

    let io_timeout = socket_timeout(io_timeout);
    socket
        .set_read_timeout(Some(io_timeout))
        .map_err(connect_failed)?;
    socket
        .set_write_timeout(Some(io_timeout))
        .map_err(connect_failed)?;

    socket
        .connect_timeout(&destination.into(), socket_timeout(connect_timeout))
        .map_err(|e| connect_error(e, destination))?;

    let stream: TcpStream = socket.into();
    stream.set_nodelay(true).map_err(connect_failed)?;

    Ok(SocketGuard::new(stream, destination, "TCP"))
}

/// Classifies a failed connect: an elapsed deadline is a timeout, anything
/// else (refusal, unreachable network) is a connect failure.
fn connect_error(e: io::Error, server: SocketAddr) -> TransportError {
    if is_timeout(&e) {
        TransportError::Timeout { server }
    } else {
        TransportError::ConnectFailed {
            server,
            reason: e.to_string(),
        }
    }
}
