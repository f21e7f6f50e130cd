use serde::{Deserialize, Serialize};

/// Upper bound on CNAME chain length. The cap is the cycle-safety
/// mechanism: chains are cut here even when target mappings loop.
pub const MAX_CNAME_HOPS: usize = 10;

/// Canonical response-code tokens the stats accounting keys on.
pub const RCODE_NXDOMAIN: &str = "NXDOMAIN";
pub const RCODE_SERVFAIL: &str = "SERVFAIL";

/// Outcome of resolving one domain, in the report wire format.
///
/// Field names follow the report format: absent, false and empty
/// optional fields are omitted from serialization. `cn` nests the next
/// hop of a CNAME chain; each node owns its successor exclusively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    #[serde(rename = "d")]
    pub domain: String,

    /// Response carried the DNSSEC Authenticated Data flag.
    #[serde(rename = "ad", default, skip_serializing_if = "is_false")]
    pub dnssec: bool,

    /// An RRSIG record was seen in an answer section.
    #[serde(rename = "rs", default, skip_serializing_if = "is_false")]
    pub rrsig: bool,

    #[serde(rename = "cn", default, skip_serializing_if = "Option::is_none")]
    pub cname: Option<Box<ResolutionResult>>,

    #[serde(rename = "ip4", default, skip_serializing_if = "Vec::is_empty")]
    pub ip4: Vec<String>,

    #[serde(rename = "ip6", default, skip_serializing_if = "Vec::is_empty")]
    pub ip6: Vec<String>,

    /// Terminal response code token, empty when resolution succeeded.
    #[serde(rename = "rc", default, skip_serializing_if = "String::is_empty")]
    pub rcode: String,

    #[serde(rename = "ip6o", default, skip_serializing_if = "is_false")]
    pub ip6only: bool,

    #[serde(rename = "e", default, skip_serializing_if = "is_false")]
    pub empty: bool,

    #[serde(rename = "err", default, skip_serializing_if = "is_false")]
    pub error: bool,

    /// Country codes in first-seen order, no duplicates.
    #[serde(rename = "c", default, skip_serializing_if = "Vec::is_empty")]
    pub country: Vec<String>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(v: &bool) -> bool {
    !*v
}

impl ResolutionResult {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    /// This result followed by every CNAME hop it owns.
    pub fn chain(&self) -> impl Iterator<Item = &ResolutionResult> {
        std::iter::successors(Some(self), |node| node.cname.as_deref())
    }

    /// Number of CNAME hop nodes below this result.
    pub fn chain_len(&self) -> usize {
        self.chain().count() - 1
    }

    /// Any IPv4 address anywhere in the result tree.
    pub fn has_ipv4(&self) -> bool {
        self.chain().any(|node| !node.ip4.is_empty())
    }

    /// Any IPv6 address anywhere in the result tree.
    pub fn has_ipv6(&self) -> bool {
        self.chain().any(|node| !node.ip6.is_empty())
    }

    /// Appends a country code unless the result already carries it.
    /// Returns whether the code was newly added.
    pub fn push_country(&mut self, code: &str) -> bool {
        if self.country.iter().any(|c| c == code) {
            return false;
        }
        self.country.push(code.to_string());
        true
    }
}
