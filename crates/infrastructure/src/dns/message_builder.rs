//! DNS query construction.
//!
//! Builds census queries in wire format with `hickory-proto`. Every
//! query carries a fresh random id, requests recursion, asks for
//! DNSSEC data (AD requested, server-side checking disabled so the
//! raw signed status reaches the client) and advertises an EDNS0 UDP
//! payload with the DNSSEC-OK bit.

use dns_census_application::ports::QueryType;
use dns_census_domain::CensusError;
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// UDP payload size advertised through EDNS0.
pub const EDNS_UDP_PAYLOAD: u16 = 4096;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Builds the wire bytes for one census query, returning the query
    /// id for response matching.
    pub fn build_query(
        domain: &str,
        record_type: QueryType,
    ) -> Result<(u16, Vec<u8>), CensusError> {
        let name = Name::from_str(domain)
            .map_err(|e| CensusError::InvalidDomainName(format!("{domain}: {e}")))?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(to_hickory(record_type));
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);
        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.set_authentic_data(true);
        message.set_checking_disabled(true);
        message.add_query(query);

        let mut edns = Edns::new();
        edns.set_max_payload(EDNS_UDP_PAYLOAD);
        edns.set_dnssec_ok(true);
        message.set_edns(edns);

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        message.emit(&mut encoder).map_err(|e| {
            CensusError::Serialization(format!("Failed to serialize DNS query: {e}"))
        })?;

        Ok((id, buf))
    }
}

fn to_hickory(record_type: QueryType) -> RecordType {
    match record_type {
        QueryType::A => RecordType::A,
        QueryType::Aaaa => RecordType::AAAA,
    }
}
