use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use dns_census_domain::CensusError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// DNS over TCP with the standard 2-byte length prefix. Only used as
/// the fallback for truncated UDP responses; connections are not
/// reused.
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    async fn exchange(&self, message_bytes: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut stream = TcpStream::connect(self.server_addr).await?;

        let len = u16::try_from(message_bytes.len())
            .map_err(|_| std::io::Error::other("DNS message exceeds the TCP length prefix"))?;
        stream.write_all(&len.to_be_bytes()).await?;
        stream.write_all(message_bytes).await?;
        stream.flush().await?;

        let mut len_buf = [0u8; 2];
        stream.read_exact(&mut len_buf).await?;
        let response_len = u16::from_be_bytes(len_buf) as usize;

        let mut response = vec![0u8; response_len];
        stream.read_exact(&mut response).await?;
        Ok(response)
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, CensusError> {
        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| {
                CensusError::Transport(format!("Timeout on TCP exchange with {}", self.server_addr))
            })?
            .map_err(|e| {
                CensusError::Transport(format!(
                    "TCP exchange with {} failed: {e}",
                    self.server_addr
                ))
            })?;

        debug!(
            server = %self.server_addr,
            bytes_received = bytes.len(),
            "TCP response received"
        );

        Ok(TransportResponse {
            bytes,
            protocol_used: "TCP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}
