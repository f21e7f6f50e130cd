use async_trait::async_trait;
use dns_census_domain::CensusError;
use std::net::IpAddr;

/// Record types the census queries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    A,
    Aaaa,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::A => "A",
            QueryType::Aaaa => "AAAA",
        }
    }
}

/// Parsed outcome of one query exchange: one domain, one record type.
#[derive(Debug, Clone, Default)]
pub struct QueryOutcome {
    /// AD bit from the response header.
    pub authenticated: bool,

    /// The response code was NOERROR.
    pub success: bool,

    /// Response code token ("NOERROR", "NXDOMAIN", "SERVFAIL", ...).
    pub rcode: String,

    /// Address records, attributed to the owner name of each record.
    /// Owner names are lower-case without a trailing dot.
    pub addresses: Vec<(String, IpAddr)>,

    /// CNAME edges from the answer section, owner → target.
    pub cname_links: Vec<(String, String)>,

    /// An RRSIG record was present in the answer section.
    pub rrsig: bool,
}

/// One query/record-type exchange against the nameserver pool,
/// including transport fallback and response validation.
#[async_trait]
pub trait DnsExchange: Send + Sync {
    async fn query(
        &self,
        domain: &str,
        record_type: QueryType,
    ) -> Result<QueryOutcome, CensusError>;
}
