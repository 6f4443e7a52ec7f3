/// Datagram transport boundary. Retries, fragmentation, and congestion
/// control are explicitly not this crate's concern — `UdpTransport` is a
/// thin, synchronous wrapper just thick enough to run the binary end to
/// end; everything upstream of it only depends on the `Transport` trait.

use crate::error::ServerError;
use std::net::{SocketAddr, UdpSocket};

pub trait Transport {
    /// Block until the next datagram arrives. `None` on a transport-level
    /// read error (logged by the caller, not fatal).
    fn recv(&mut self) -> Option<(SocketAddr, String)>;

    fn send(&mut self, addr: SocketAddr, message: &str);

    fn local_addr(&self) -> SocketAddr;
}

pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    pub fn bind(addr: &str) -> Result<Self, ServerError> {
        let socket =
            UdpSocket::bind(addr).map_err(|e| ServerError::TransportInitFailed(e.to_string()))?;
        Ok(UdpTransport { socket })
    }
}

impl Transport for UdpTransport {
    fn recv(&mut self) -> Option<(SocketAddr, String)> {
        let mut buf = [0u8; 2048];
        match self.socket.recv_from(&mut buf) {
            Ok((n, addr)) => Some((addr, String::from_utf8_lossy(&buf[..n]).into_owned())),
            Err(e) => {
                log::warn!("transport read error: {e}");
                None
            }
        }
    }

    fn send(&mut self, addr: SocketAddr, message: &str) {
        if let Err(e) = self.socket.send_to(message.as_bytes(), addr) {
            log::warn!("transport write error to {addr}: {e}");
        }
    }

    fn local_addr(&self) -> SocketAddr {
        self.socket
            .local_addr()
            .expect("a bound socket always has a local address")
    }
}

/// An in-memory `Transport` used by coordinator and broadcast tests so game
/// logic never has to open a real socket to be exercised.
pub mod fake {
    use super::Transport;
    use std::collections::VecDeque;
    use std::net::SocketAddr;

    pub struct FakeTransport {
        inbox: VecDeque<(SocketAddr, String)>,
        sent: Vec<(SocketAddr, String)>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            FakeTransport { inbox: VecDeque::new(), sent: Vec::new() }
        }

        pub fn push_incoming(&mut self, addr: SocketAddr, message: &str) {
            self.inbox.push_back((addr, message.to_string()));
        }

        pub fn sent_to(&self, addr: SocketAddr) -> Vec<String> {
            self.sent.iter().filter(|(a, _)| *a == addr).map(|(_, m)| m.clone()).collect()
        }

        pub fn all_sent(&self) -> &[(SocketAddr, String)] {
            &self.sent
        }
    }

    impl Default for FakeTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for FakeTransport {
        fn recv(&mut self) -> Option<(SocketAddr, String)> {
            self.inbox.pop_front()
        }

        fn send(&mut self, addr: SocketAddr, message: &str) {
            self.sent.push((addr, message.to_string()));
        }

        fn local_addr(&self) -> SocketAddr {
            "127.0.0.1:0".parse().unwrap()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn fake_transport_roundtrips_incoming_messages() {
            let mut t = FakeTransport::new();
            let addr: SocketAddr = "127.0.0.1:4000".parse().unwrap();
            t.push_incoming(addr, "PLAY alice");
            assert_eq!(t.recv(), Some((addr, "PLAY alice".to_string())));
            assert_eq!(t.recv(), None);
        }

        #[test]
        fn fake_transport_records_sent_messages_per_address() {
            let mut t = FakeTransport::new();
            let a: SocketAddr = "127.0.0.1:4000".parse().unwrap();
            let b: SocketAddr = "127.0.0.1:4001".parse().unwrap();
            t.send(a, "OK A");
            t.send(b, "OK B");
            assert_eq!(t.sent_to(a), vec!["OK A".to_string()]);
            assert_eq!(t.sent_to(b), vec!["OK B".to_string()]);
        }
    }
}
