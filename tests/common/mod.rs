#![allow(dead_code)]

//! Scripted UDP nameserver for flow tests: fixed zones, per-question
//! rcodes, honest ids. Fault injection lives in the infrastructure
//! crate's own tests; flows exercise the happy wire path.

use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, CNAME};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

type Key = (String, RecordType);

#[derive(Default)]
pub struct Zones {
    answers: HashMap<Key, Vec<Record>>,
    rcodes: HashMap<Key, ResponseCode>,
}

impl Zones {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn a(mut self, owner: &str, ip: &str) -> Self {
        let record = Record::from_rdata(fqdn(owner), 60, RData::A(A(ip.parse().unwrap())));
        self.answers.entry(key(owner, RecordType::A)).or_default().push(record);
        self
    }

    pub fn aaaa(mut self, owner: &str, ip: &str) -> Self {
        let record = Record::from_rdata(fqdn(owner), 60, RData::AAAA(AAAA(ip.parse().unwrap())));
        self.answers
            .entry(key(owner, RecordType::AAAA))
            .or_default()
            .push(record);
        self
    }

    /// CNAME plus the target's A record in one answer section, the way
    /// recursive resolvers flatten alias lookups.
    pub fn alias_a(mut self, owner: &str, target: &str, target_ip: &str) -> Self {
        let entry = self.answers.entry(key(owner, RecordType::A)).or_default();
        entry.push(Record::from_rdata(
            fqdn(owner),
            60,
            RData::CNAME(CNAME(fqdn(target))),
        ));
        entry.push(Record::from_rdata(
            fqdn(target),
            60,
            RData::A(A(target_ip.parse().unwrap())),
        ));
        self
    }

    pub fn rcode(mut self, owner: &str, qtype: RecordType, rcode: ResponseCode) -> Self {
        self.rcodes.insert(key(owner, qtype), rcode);
        self
    }

    fn respond(&self, query_bytes: &[u8]) -> Option<Vec<u8>> {
        let query = Message::from_vec(query_bytes).ok()?;
        let question = query.queries().first()?.clone();
        let question_key = key(&question.name().to_utf8(), question.query_type());

        let mut response = Message::new(query.id(), MessageType::Response, OpCode::Query);
        response.set_recursion_desired(true);
        response.set_recursion_available(true);
        response.add_query(question);

        let rcode = self
            .rcodes
            .get(&question_key)
            .copied()
            .unwrap_or(ResponseCode::NoError);
        response.set_response_code(rcode);
        if rcode == ResponseCode::NoError {
            if let Some(records) = self.answers.get(&question_key) {
                for record in records {
                    response.add_answer(record.clone());
                }
            }
        }
        response.to_vec().ok()
    }
}

fn key(owner: &str, qtype: RecordType) -> Key {
    (owner.trim_end_matches('.').to_ascii_lowercase(), qtype)
}

fn fqdn(name: &str) -> Name {
    Name::from_str(&format!("{}.", name.trim_end_matches('.'))).unwrap()
}

pub struct TestNameserver {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestNameserver {
    pub async fn start(zones: Zones) -> std::io::Result<(Self, SocketAddr)> {
        let zones = Arc::new(zones);
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let local_addr = socket.local_addr()?;
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = zones.respond(&buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok((
            Self {
                addr: local_addr,
                shutdown_tx: Some(shutdown_tx),
            },
            local_addr,
        ))
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestNameserver {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
