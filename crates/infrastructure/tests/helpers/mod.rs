#![allow(dead_code)]
pub mod dns_server_mock;

pub use dns_server_mock::{
    build_mock_response, closed_tcp_port, MockTcpServer, MockUdpServer, UdpBehavior,
};
