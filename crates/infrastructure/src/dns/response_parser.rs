use dns_census_domain::CensusError;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{Name, RData, RecordType};
use std::net::IpAddr;
use tracing::debug;

/// Decoded response of one exchange, reduced to what the census needs.
#[derive(Debug, Clone)]
pub struct ParsedResponse {
    pub id: u16,
    pub truncated: bool,
    /// AD bit: the upstream validated the answer.
    pub authenticated: bool,
    pub rcode: ResponseCode,
    /// Address records attributed to their owner names, lower-case
    /// without a trailing dot.
    pub addresses: Vec<(String, IpAddr)>,
    /// CNAME edges from the answer section, owner → target.
    pub cname_links: Vec<(String, String)>,
    /// An RRSIG record was present among the answers.
    pub rrsig: bool,
}

impl ParsedResponse {
    pub fn is_success(&self) -> bool {
        self.rcode == ResponseCode::NoError
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<ParsedResponse, CensusError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            CensusError::InvalidDnsResponse(format!("Failed to parse DNS response: {e}"))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();
        let authenticated = message.authentic_data();

        let mut addresses = Vec::with_capacity(message.answers().len().min(8));
        let mut cname_links = Vec::new();
        let mut rrsig = false;

        for record in message.answers() {
            let owner = normalize_name(record.name());
            match record.data() {
                RData::A(a) => addresses.push((owner, IpAddr::V4(a.0))),
                RData::AAAA(aaaa) => addresses.push((owner, IpAddr::V6(aaaa.0))),
                RData::CNAME(canonical) => {
                    let target = canonical.to_utf8();
                    let target = target.trim_end_matches('.').to_ascii_lowercase();
                    debug!(owner = %owner, cname = %target, "CNAME record found");
                    cname_links.push((owner, target));
                }
                _ => {
                    if record.record_type() == RecordType::RRSIG {
                        rrsig = true;
                    } else {
                        debug!(
                            owner = %owner,
                            record_type = %record.record_type(),
                            "ignoring answer record type"
                        );
                    }
                }
            }
        }

        debug!(
            rcode = ?rcode,
            addresses = addresses.len(),
            cname_edges = cname_links.len(),
            truncated,
            "DNS response parsed"
        );

        Ok(ParsedResponse {
            id: message.id(),
            truncated,
            authenticated,
            rcode,
            addresses,
            cname_links,
            rrsig,
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}

fn normalize_name(name: &Name) -> String {
    name.to_utf8().trim_end_matches('.').to_ascii_lowercase()
}
