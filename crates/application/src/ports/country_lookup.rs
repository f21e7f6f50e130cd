use std::net::IpAddr;

/// Secondary port mapping an address to its country.
///
/// Implementations degrade rather than fail: an unavailable database
/// or a miss both yield `None`, which the enricher records as an
/// unknown location.
pub trait CountryLookup: Send + Sync {
    /// ISO 3166-1 alpha-2 code for the address, `None` when unknown.
    fn country_code(&self, addr: IpAddr) -> Option<String>;
}
