#![allow(dead_code)]
use std::io::{Read, Write};
use std::net::{IpAddr, SocketAddr, TcpListener, TcpStream, UdpSocket};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// What a `MockUdpServer` does with each datagram it receives.
#[derive(Clone)]
pub enum UdpBehavior {
    /// Answers with `build_mock_response` for the received query.
    Answer,
    /// Answers every query with the same bytes.
    Fixed(Vec<u8>),
    /// Reads queries and never replies.
    Silent,
    /// Replies with the given bytes from a second socket on another port.
    AnswerFromOtherPort(Vec<u8>),
}

pub struct MockUdpServer {
    addr: SocketAddr,
    received: Arc<AtomicUsize>,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl MockUdpServer {
    pub fn start(behavior: UdpBehavior) -> std::io::Result<Self> {
        Self::bind(SocketAddr::from(([127, 0, 0, 1], 0)), behavior)
    }

    pub fn bind(addr: SocketAddr, behavior: UdpBehavior) -> std::io::Result<Self> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_read_timeout(Some(POLL_INTERVAL))?;
        let addr = socket.local_addr()?;

        let received = Arc::new(AtomicUsize::new(0));
        let shutdown = Arc::new(AtomicBool::new(false));

        let handle = {
            let received = Arc::clone(&received);
            let shutdown = Arc::clone(&shutdown);
            thread::spawn(move || {
                let mut buf = vec![0u8; 65535];
                while !shutdown.load(Ordering::Relaxed) {
                    let Ok((len, peer)) = socket.recv_from(&mut buf) else {
                        continue;
                    };
                    received.fetch_add(1, Ordering::SeqCst);

                    let response = match &behavior {
                        UdpBehavior::Answer => build_mock_response(&buf[..len]),
                        UdpBehavior::Fixed(bytes) => bytes.clone(),
                        UdpBehavior::Silent => continue,
                        UdpBehavior::AnswerFromOtherPort(bytes) => {
                            if let Ok(other) = UdpSocket::bind(SocketAddr::new(addr.ip(), 0)) {
                                let _ = other.send_to(bytes, peer);
                            }
                            continue;
                        }
                    };
                    let _ = socket.send_to(&response, peer);
                }
            })
        };

        Ok(Self {
            addr,
            received,
            shutdown,
            handle: Some(handle),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn ip(&self) -> IpAddr {
        self.addr.ip()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }
}

impl Drop for MockUdpServer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Serves length-prefixed replies, writing each reply body in the given
/// chunk sizes with a pause between writes. The last chunk takes the rest.
pub struct MockTcpServer {
    addr: SocketAddr,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl MockTcpServer {
    pub fn start(response: Vec<u8>, chunks: Vec<usize>) -> std::io::Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;
        let shutdown = Arc::new(AtomicBool::new(false));

        let handle = {
            let shutdown = Arc::clone(&shutdown);
            thread::spawn(move || {
                while !shutdown.load(Ordering::Relaxed) {
                    match listener.accept() {
                        Ok((stream, _)) => {
                            let _ = Self::serve(stream, &response, &chunks);
                        }
                        Err(_) => thread::sleep(POLL_INTERVAL),
                    }
                }
            })
        };

        Ok(Self {
            addr,
            shutdown,
            handle: Some(handle),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn serve(mut stream: TcpStream, response: &[u8], chunks: &[usize]) -> std::io::Result<()> {
        stream.set_nonblocking(false)?;
        stream.set_nodelay(true)?;
        stream.set_read_timeout(Some(Duration::from_secs(2)))?;

        let mut len_buf = [0u8; 2];
        stream.read_exact(&mut len_buf)?;
        let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
        stream.read_exact(&mut query)?;

        stream.write_all(&(response.len() as u16).to_be_bytes())?;
        stream.flush()?;

        let mut offset = 0;
        for &size in chunks {
            let end = (offset + size).min(response.len());
            thread::sleep(POLL_INTERVAL);
            stream.write_all(&response[offset..end])?;
            stream.flush()?;
            offset = end;
        }
        if offset < response.len() {
            thread::sleep(POLL_INTERVAL);
            stream.write_all(&response[offset..])?;
            stream.flush()?;
        }

        Ok(())
    }
}

impl Drop for MockTcpServer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// A loopback address with nothing listening on it.
pub fn closed_tcp_port() -> SocketAddr {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Echoes the query's ID and question and appends one A record
/// (`93.184.216.34`, TTL 60) for the question name.
pub fn build_mock_response(query: &[u8]) -> Vec<u8> {
    if query.len() < 12 {
        return vec![];
    }

    let mut response = Vec::with_capacity(512);
    response.extend_from_slice(&query[0..2]);
    response.push(0x81);
    response.push(0x80);
    response.extend_from_slice(&query[4..6]);
    response.extend_from_slice(&[0x00, 0x01]);
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&query[12..]);

    response.extend_from_slice(&[
        0xc0, 0x0c, // name pointer to the question
        0x00, 0x01, // A
        0x00, 0x01, // IN
        0x00, 0x00, 0x00, 0x3c, // TTL
        0x00, 0x04, // RDLENGTH
        93, 184, 216, 34,
    ]);

    response
}
