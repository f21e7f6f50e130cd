pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use dns_census_domain::CensusError;
use std::time::Duration;

pub use tcp::TcpTransport;
pub use udp::UdpTransport;

/// Result of a raw DNS transport operation
#[derive(Debug)]
pub struct TransportResponse {
    /// Raw DNS response bytes (wire format)
    pub bytes: Vec<u8>,
    /// Which protocol was used
    pub protocol_used: &'static str,
}

/// Trait for sending raw DNS messages over the wire
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, CensusError>;

    fn protocol_name(&self) -> &'static str;
}
