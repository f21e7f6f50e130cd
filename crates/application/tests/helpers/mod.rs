#![allow(dead_code)]

use async_trait::async_trait;
use dns_census_application::ports::{DnsExchange, QueryOutcome, QueryType, ReportSink};
use dns_census_domain::{CensusError, DumpMetadata, ResolutionResult, RunStats};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn addr(owner: &str, ip: &str) -> (String, IpAddr) {
    (owner.to_string(), ip.parse().unwrap())
}

pub fn success(addresses: Vec<(String, IpAddr)>) -> QueryOutcome {
    QueryOutcome {
        success: true,
        rcode: "NOERROR".to_string(),
        addresses,
        ..Default::default()
    }
}

pub fn refused_with(rcode: &str) -> QueryOutcome {
    QueryOutcome {
        success: false,
        rcode: rcode.to_string(),
        ..Default::default()
    }
}

pub enum Script {
    Outcome(QueryOutcome),
    Fail,
}

/// Scripted DnsExchange with a concurrency probe. Unscripted queries
/// succeed with an empty answer.
#[derive(Default)]
pub struct ScriptedExchange {
    scripts: Mutex<HashMap<(String, QueryType), Script>>,
    pub current: AtomicUsize,
    pub peak: AtomicUsize,
    pub delay: Duration,
}

impl ScriptedExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn script(&self, domain: &str, record_type: QueryType, script: Script) {
        self.scripts
            .lock()
            .unwrap()
            .insert((domain.to_string(), record_type), script);
    }
}

#[async_trait]
impl DnsExchange for ScriptedExchange {
    async fn query(
        &self,
        domain: &str,
        record_type: QueryType,
    ) -> Result<QueryOutcome, CensusError> {
        let current = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let outcome = {
            let scripts = self.scripts.lock().unwrap();
            match scripts.get(&(domain.to_string(), record_type)) {
                Some(Script::Outcome(outcome)) => Ok(outcome.clone()),
                Some(Script::Fail) => Err(CensusError::ExchangeFailed {
                    domain: domain.to_string(),
                    record_type: record_type.as_str(),
                }),
                None => Ok(success(Vec::new())),
            }
        };
        self.current.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

/// ReportSink collecting everything in memory.
#[derive(Default)]
pub struct CollectSink {
    pub header: Option<(i64, DumpMetadata)>,
    pub results: Vec<ResolutionResult>,
    pub stats: Option<RunStats>,
}

impl ReportSink for CollectSink {
    fn begin(&mut self, timestamp: i64, header: &DumpMetadata) -> Result<(), CensusError> {
        self.header = Some((timestamp, header.clone()));
        Ok(())
    }

    fn write_result(&mut self, result: &ResolutionResult) -> Result<(), CensusError> {
        self.results.push(result.clone());
        Ok(())
    }

    fn finish(&mut self, stats: &RunStats) -> Result<(), CensusError> {
        self.stats = Some(stats.clone());
        Ok(())
    }
}

/// CountryLookup backed by a fixed table.
#[derive(Default)]
pub struct TableLookup {
    pub table: HashMap<IpAddr, &'static str>,
}

impl TableLookup {
    pub fn new(entries: &[(&str, &'static str)]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(ip, code)| (ip.parse().unwrap(), *code))
                .collect(),
        }
    }
}

impl dns_census_application::ports::CountryLookup for TableLookup {
    fn country_code(&self, addr: IpAddr) -> Option<String> {
        self.table.get(&addr).map(|code| code.to_string())
    }
}
