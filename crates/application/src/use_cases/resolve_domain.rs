use crate::ports::{DnsExchange, QueryType};
use dns_census_domain::{ResolutionResult, MAX_CNAME_HOPS};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::warn;

/// Resolves one domain into its report entry.
///
/// Issues the A and then the AAAA query, reconstructs the CNAME chain
/// from the target mappings seen in either answer, attributes address
/// records to the chain node owning them, and classifies the result.
/// A resolver-level failure on either query marks the result as an
/// error but never propagates: failure stays inside the entry.
pub struct ResolveDomainUseCase {
    exchange: Arc<dyn DnsExchange>,
}

impl ResolveDomainUseCase {
    pub fn new(exchange: Arc<dyn DnsExchange>) -> Self {
        Self { exchange }
    }

    pub async fn execute(&self, domain: &str) -> ResolutionResult {
        let mut result = ResolutionResult::new(domain);
        let mut cnames: HashMap<String, String> = HashMap::new();
        let mut records: Vec<(String, IpAddr)> = Vec::new();

        for record_type in [QueryType::A, QueryType::Aaaa] {
            match self.exchange.query(domain, record_type).await {
                Ok(outcome) => {
                    result.dnssec |= outcome.authenticated;
                    if outcome.success {
                        result.rrsig |= outcome.rrsig;
                        records.extend(outcome.addresses);
                        cnames.extend(outcome.cname_links);
                    } else {
                        // Both queries failing leaves the later code in
                        // place: last write wins.
                        result.rcode = outcome.rcode;
                    }
                }
                Err(e) => {
                    result.error = true;
                    warn!(
                        domain,
                        record_type = record_type.as_str(),
                        error = %e,
                        "resolution failed"
                    );
                }
            }
        }

        let mut hops = Self::build_chain(domain, &cnames);
        Self::attribute_records(&mut result, &mut hops, records);
        Self::link_chain(&mut result, hops);
        Self::classify(&mut result);
        result
    }

    /// Follows CNAME target edges from the queried name, one node per
    /// hop. The hop cap is the loop guard: when it fires the chain is
    /// cut without a terminal node.
    fn build_chain(domain: &str, cnames: &HashMap<String, String>) -> Vec<ResolutionResult> {
        let mut hops = Vec::new();
        let mut name = domain;
        while let Some(target) = cnames.get(name) {
            if hops.len() == MAX_CNAME_HOPS {
                warn!(domain, hops = hops.len(), "CNAME chain too long, truncating");
                break;
            }
            hops.push(ResolutionResult::new(target.clone()));
            name = target;
        }
        hops
    }

    /// Places each address record on the node owning it. Records whose
    /// owner matches neither the domain nor a hop stay on the top
    /// level so nothing observed is dropped.
    fn attribute_records(
        result: &mut ResolutionResult,
        hops: &mut [ResolutionResult],
        records: Vec<(String, IpAddr)>,
    ) {
        for (owner, addr) in records {
            let node = if owner == result.domain {
                &mut *result
            } else if let Some(hop) = hops.iter_mut().find(|h| h.domain == owner) {
                hop
            } else {
                &mut *result
            };
            match addr {
                IpAddr::V4(v4) => node.ip4.push(v4.to_string()),
                IpAddr::V6(v6) => node.ip6.push(v6.to_string()),
            }
        }
    }

    fn link_chain(result: &mut ResolutionResult, hops: Vec<ResolutionResult>) {
        let mut next: Option<Box<ResolutionResult>> = None;
        for mut hop in hops.into_iter().rev() {
            hop.cname = next.take();
            next = Some(Box::new(hop));
        }
        result.cname = next;
    }

    fn classify(result: &mut ResolutionResult) {
        let has_v4 = result.has_ipv4();
        let has_v6 = result.has_ipv6();
        if !has_v4 && !has_v6 && !result.error && result.rcode.is_empty() {
            result.empty = true;
        }
        if has_v6 && !has_v4 {
            result.ip6only = true;
        }
    }
}
