use super::message_builder::MessageBuilder;
use super::response_parser::{ParsedResponse, ResponseParser};
use super::transport::{DnsTransport, TcpTransport, UdpTransport};
use async_trait::async_trait;
use dns_census_application::ports::{DnsExchange, QueryOutcome, QueryType};
use dns_census_domain::CensusError;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::debug;

/// DNS client over a shared nameserver pool.
///
/// Each query tries a fresh random permutation of the pool; the first
/// nameserver yielding a usable response wins and the rest are never
/// contacted. A truncated UDP response re-issues the identical query
/// bytes over TCP exactly once. The only post-decode validation is the
/// id check. The outer attempts loop exists for configurations that
/// want more than one full pass; the operating default is a single
/// pass, which leaves the inter-attempt delay dormant.
pub struct PoolExchange {
    nameservers: Vec<SocketAddr>,
    timeout: Duration,
    attempts: u32,
    retry_delay: Duration,
}

impl PoolExchange {
    pub fn new(nameservers: Vec<SocketAddr>, timeout: Duration) -> Self {
        Self {
            nameservers,
            timeout,
            attempts: 1,
            retry_delay: Duration::from_millis(250),
        }
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// One exchange against one nameserver: UDP, TCP fallback on
    /// truncation, id validation.
    async fn exchange(
        &self,
        server: SocketAddr,
        domain: &str,
        record_type: QueryType,
    ) -> Result<ParsedResponse, CensusError> {
        let (id, query_bytes) = MessageBuilder::build_query(domain, record_type)?;
        let started = Instant::now();

        let udp = UdpTransport::new(server);
        let response = udp.send(&query_bytes, self.timeout).await?;
        let mut parsed = ResponseParser::parse(&response.bytes)?;

        if parsed.truncated {
            // Identical query over TCP, once. A decoded response is
            // already in hand, so a fallback failure is tolerated and
            // the truncated UDP answer is used as-is.
            let tcp = TcpTransport::new(server);
            match tcp.send(&query_bytes, self.timeout).await {
                Ok(tcp_response) => match ResponseParser::parse(&tcp_response.bytes) {
                    Ok(full) => parsed = full,
                    Err(e) => {
                        debug!(
                            server = %server,
                            domain,
                            error = %e,
                            "TCP fallback response unusable, keeping truncated UDP response"
                        );
                    }
                },
                Err(e) => {
                    debug!(
                        server = %server,
                        domain,
                        error = %e,
                        "TCP fallback failed, keeping truncated UDP response"
                    );
                }
            }
        }

        if parsed.id != id {
            return Err(CensusError::IdMismatch);
        }

        debug!(
            server = %server,
            domain,
            record_type = record_type.as_str(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            rcode = ?parsed.rcode,
            "exchange complete"
        );
        Ok(parsed)
    }
}

#[async_trait]
impl DnsExchange for PoolExchange {
    async fn query(
        &self,
        domain: &str,
        record_type: QueryType,
    ) -> Result<QueryOutcome, CensusError> {
        if self.nameservers.is_empty() {
            return Err(CensusError::NoNameservers);
        }

        for attempt in 0..self.attempts {
            if attempt > 0 {
                tokio::time::sleep(self.retry_delay).await;
            }

            let mut order: Vec<usize> = (0..self.nameservers.len()).collect();
            fastrand::shuffle(&mut order);

            for index in order {
                let server = self.nameservers[index];
                match self.exchange(server, domain, record_type).await {
                    Ok(parsed) => {
                        return Ok(QueryOutcome {
                            authenticated: parsed.authenticated,
                            success: parsed.is_success(),
                            rcode: ResponseParser::rcode_to_status(parsed.rcode).to_string(),
                            addresses: parsed.addresses,
                            cname_links: parsed.cname_links,
                            rrsig: parsed.rrsig,
                        });
                    }
                    Err(e) => {
                        debug!(
                            server = %server,
                            domain,
                            record_type = record_type.as_str(),
                            error = %e,
                            "nameserver exchange failed, trying the next one"
                        );
                    }
                }
            }
        }

        Err(CensusError::ExchangeFailed {
            domain: domain.to_string(),
            record_type: record_type.as_str(),
        })
    }
}
