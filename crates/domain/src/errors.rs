use thiserror::Error;

#[derive(Error, Debug)]
pub enum CensusError {
    #[error("No nameservers")]
    NoNameservers,

    #[error("No nameserver returned a usable response for {domain} ({record_type})")]
    ExchangeFailed {
        domain: String,
        record_type: &'static str,
    },

    #[error("Id mismatch")]
    IdMismatch,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Geolocation database error: {0}")]
    GeoDatabase(String),
}
