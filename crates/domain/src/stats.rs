use crate::resolution::{ResolutionResult, RCODE_NXDOMAIN, RCODE_SERVFAIL};
use serde::{Deserialize, Serialize};

/// Aggregate counters for one census run.
///
/// Mutated exclusively by the single result consumer, frozen when the
/// completion queue drains, serialized once at the end of the report.
/// `record` holds the complete per-result accounting so a stats object
/// can be recomputed from a parsed report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub domains: u64,
    pub dnssec: u64,
    pub rrsig: u64,
    pub cname: u64,
    pub servfail: u64,
    pub nxdomain: u64,
    pub ip4: u64,
    pub ip6: u64,
    pub uniq_ip4: u64,
    pub uniq_ip6: u64,
    pub ip6only: u64,
    pub empty: u64,
    pub errors: u64,
    pub duration: i64,
    /// Results whose country set contains the domestic code.
    pub runet: u64,
}

impl RunStats {
    /// Accounts one enriched result. An errored result contributes to
    /// the error counter alone; ip6only/empty are not counted for
    /// SERVFAIL results.
    pub fn record(&mut self, result: &ResolutionResult, domestic_code: &str) {
        if result.error {
            self.errors += 1;
            return;
        }
        if result.cname.is_some() {
            self.cname += 1;
        }
        if result.has_ipv4() {
            self.ip4 += 1;
        }
        if result.has_ipv6() {
            self.ip6 += 1;
        }
        if result.country.iter().any(|c| c == domestic_code) {
            self.runet += 1;
        }
        if result.dnssec {
            self.dnssec += 1;
        }
        if result.rrsig {
            self.rrsig += 1;
        }
        if result.rcode == RCODE_NXDOMAIN {
            self.nxdomain += 1;
        }
        if result.rcode == RCODE_SERVFAIL {
            self.servfail += 1;
        } else {
            if result.ip6only {
                self.ip6only += 1;
            }
            if result.empty {
                self.empty += 1;
            }
        }
    }

    /// Unique-address counters are snapshots of the geo cache sizes.
    pub fn set_unique_addresses(&mut self, unique_v4: usize, unique_v6: usize) {
        self.uniq_ip4 = unique_v4 as u64;
        self.uniq_ip6 = unique_v6 as u64;
    }
}
