use crate::ports::CountryLookup;
use dns_census_domain::ResolutionResult;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

/// Memoized IP-to-country enrichment for one run.
///
/// The two caches are write-once per key: every address seen during
/// the run is recorded, hit or miss, so the underlying database is
/// consulted at most once per distinct address. Owned exclusively by
/// the single result consumer, hence no synchronization.
pub struct GeoEnricher {
    lookup: Arc<dyn CountryLookup>,
    cache_v4: HashMap<Ipv4Addr, Option<String>>,
    cache_v6: HashMap<Ipv6Addr, Option<String>>,
    domestic_code: String,
}

impl GeoEnricher {
    pub fn new(lookup: Arc<dyn CountryLookup>, domestic_code: String) -> Self {
        Self {
            lookup,
            cache_v4: HashMap::new(),
            cache_v6: HashMap::new(),
            domestic_code,
        }
    }

    /// Appends the country of every address in the result tree to the
    /// top-level country set, newly-seen codes only.
    pub fn enrich(&mut self, result: &mut ResolutionResult) {
        let v4: Vec<Ipv4Addr> = result
            .chain()
            .flat_map(|node| node.ip4.iter())
            .filter_map(|s| s.parse().ok())
            .collect();
        let v6: Vec<Ipv6Addr> = result
            .chain()
            .flat_map(|node| node.ip6.iter())
            .filter_map(|s| s.parse().ok())
            .collect();

        for addr in v4 {
            if let Some(code) = self.country_of_v4(addr) {
                result.push_country(&code);
            }
        }
        for addr in v6 {
            if let Some(code) = self.country_of_v6(addr) {
                result.push_country(&code);
            }
        }
    }

    fn country_of_v4(&mut self, addr: Ipv4Addr) -> Option<String> {
        if let Some(cached) = self.cache_v4.get(&addr) {
            return cached.clone();
        }
        let code = self.lookup.country_code(IpAddr::V4(addr));
        self.cache_v4.insert(addr, code.clone());
        code
    }

    fn country_of_v6(&mut self, addr: Ipv6Addr) -> Option<String> {
        if let Some(cached) = self.cache_v6.get(&addr) {
            return cached.clone();
        }
        let code = self.lookup.country_code(IpAddr::V6(addr));
        self.cache_v6.insert(addr, code.clone());
        code
    }

    pub fn domestic_code(&self) -> &str {
        &self.domestic_code
    }

    /// Distinct IPv4 addresses seen so far.
    pub fn unique_v4(&self) -> usize {
        self.cache_v4.len()
    }

    /// Distinct IPv6 addresses seen so far.
    pub fn unique_v6(&self) -> usize {
        self.cache_v6.len()
    }
}
