//! Complete census cycle against a scripted local nameserver:
//! list intake → bounded resolution → enrichment-less stats → streamed
//! report → compressed archive.

#[path = "../common/mod.rs"]
mod common;

use common::{TestNameserver, Zones};
use dns_census_application::ports::CensusCycle;
use dns_census_domain::{Config, ResolutionResult, RunStats};
use dns_census_infrastructure::CensusService;
use flate2::read::GzDecoder;
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::RecordType;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{Read, Write};
use std::net::SocketAddr;
use std::path::Path;

fn census_config(nameserver: SocketAddr, workdir: &Path, results_dir: &Path) -> Config {
    let mut config = Config::default();
    config.resolver.dns_host = nameserver.ip().to_string();
    config.resolver.dns_port = nameserver.port();
    config.resolver.maxpool = 4;
    config.resolver.nextpool = 2;
    config.resolver.query_timeout_secs = 1;
    config.output.workdir = workdir.to_path_buf();
    config.output.results_dir = results_dir.to_path_buf();
    config
}

fn write_inputs(workdir: &Path, domains: &str, metadata: &str) {
    let mut list = File::create(workdir.join("domains.lst")).unwrap();
    list.write_all(domains.as_bytes()).unwrap();
    let mut current = File::create(workdir.join("current")).unwrap();
    current.write_all(metadata.as_bytes()).unwrap();
}

fn read_report(workdir: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(workdir.join("result.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

/// Recomputes the stats object from the emitted result list. Unique
/// address counts are the distinct addresses across all result trees;
/// duration is copied, wall clock being the one non-derivable field.
fn recompute_stats(results: &[ResolutionResult], embedded: &RunStats) -> RunStats {
    let mut stats = RunStats::default();
    stats.domains = results.len() as u64;
    let mut unique_v4 = HashSet::new();
    let mut unique_v6 = HashSet::new();
    for result in results {
        stats.record(result, "RU");
        for node in result.chain() {
            unique_v4.extend(node.ip4.iter().cloned());
            unique_v6.extend(node.ip6.iter().cloned());
        }
    }
    stats.set_unique_addresses(unique_v4.len(), unique_v6.len());
    stats.duration = embedded.duration;
    stats
}

#[tokio::test]
async fn full_cycle_produces_report_and_archive() {
    let zones = Zones::new()
        .a("ok.example", "93.184.216.34")
        .aaaa("v6.example", "2001:db8::1")
        .rcode("gone.example", RecordType::A, ResponseCode::NXDomain)
        .rcode("gone.example", RecordType::AAAA, ResponseCode::ServFail)
        .alias_a("alias.example", "cdn.example.net", "198.51.100.7");
    let (server, addr) = TestNameserver::start(zones).await.unwrap();

    let workdir = tempfile::tempdir().unwrap();
    let results_dir = tempfile::tempdir().unwrap();
    write_inputs(
        workdir.path(),
        "OK.example.\nv6.example\ngone.example\nalias.example\n192.168.0.1\nquiet.example\n",
        r#"{"id":"dump-42","crc":"abc123","ut":1754000100}"#,
    );

    let config = census_config(addr, workdir.path(), results_dir.path());
    let service = CensusService::from_config(config).await.unwrap();
    let stats = service.run_cycle().await.unwrap();

    // The IPv4 literal is skipped at intake; everything else resolves.
    assert_eq!(stats.domains, 5);
    assert_eq!(stats.errors, 0);

    let document = read_report(workdir.path());
    assert_eq!(document["v"], "1.0");
    assert_eq!(document["h"]["id"], "dump-42");
    assert!(document["t"].as_i64().unwrap() > 0);

    let results: Vec<ResolutionResult> =
        serde_json::from_value(document["list"].clone()).unwrap();
    let by_domain: HashMap<&str, &ResolutionResult> =
        results.iter().map(|r| (r.domain.as_str(), r)).collect();
    assert_eq!(by_domain.len(), 5, "exactly one result per admitted domain");

    let ok = by_domain["ok.example"];
    assert_eq!(ok.ip4, ["93.184.216.34"]);
    assert!(ok.ip6.is_empty());
    assert!(!ok.empty && !ok.ip6only && !ok.error);

    let v6 = by_domain["v6.example"];
    assert_eq!(v6.ip6, ["2001:db8::1"]);
    assert!(v6.ip6only);

    // Both queries failed with different codes: the AAAA one wins.
    let gone = by_domain["gone.example"];
    assert_eq!(gone.rcode, "SERVFAIL");
    assert!(!gone.error);

    let alias = by_domain["alias.example"];
    assert!(alias.ip4.is_empty());
    let hop = alias.cname.as_deref().expect("chain node");
    assert_eq!(hop.domain, "cdn.example.net");
    assert_eq!(hop.ip4, ["198.51.100.7"]);

    let quiet = by_domain["quiet.example"];
    assert!(quiet.empty);

    // Embedded stats are reproducible from the result list.
    let embedded: RunStats = serde_json::from_value(document["stat"].clone()).unwrap();
    assert_eq!(embedded, stats);
    assert_eq!(recompute_stats(&results, &embedded), embedded);
    assert_eq!(embedded.cname, 1);
    assert_eq!(embedded.servfail, 1);
    assert_eq!(embedded.nxdomain, 0);
    assert_eq!(embedded.ip4, 2);
    assert_eq!(embedded.ip6, 1);
    assert_eq!(embedded.uniq_ip4, 2);
    assert_eq!(embedded.uniq_ip6, 1);
    assert_eq!(embedded.empty, 1);
    assert_eq!(embedded.ip6only, 1);

    // The archive is the report, byte for byte.
    let archive_path = results_dir
        .path()
        .join(format!("{}.gz", document["t"].as_i64().unwrap()));
    let mut decoder = GzDecoder::new(File::open(&archive_path).unwrap());
    let mut decompressed = String::new();
    decoder.read_to_string(&mut decompressed).unwrap();
    assert_eq!(
        decompressed,
        std::fs::read_to_string(workdir.path().join("result.json")).unwrap()
    );

    server.shutdown();
}

#[tokio::test]
async fn wide_runs_emit_one_result_per_domain() {
    let (server, addr) = TestNameserver::start(Zones::new()).await.unwrap();

    let workdir = tempfile::tempdir().unwrap();
    let results_dir = tempfile::tempdir().unwrap();
    let list: String = (0..16).map(|i| format!("host-{i}.example\n")).collect();
    write_inputs(workdir.path(), &list, "{}");

    let mut config = census_config(addr, workdir.path(), results_dir.path());
    config.resolver.maxpool = 3;
    config.resolver.nextpool = 2;

    let service = CensusService::from_config(config).await.unwrap();
    let stats = service.run_cycle().await.unwrap();
    assert_eq!(stats.domains, 16);
    assert_eq!(stats.empty, 16);

    let document = read_report(workdir.path());
    let results: Vec<ResolutionResult> =
        serde_json::from_value(document["list"].clone()).unwrap();
    assert_eq!(results.len(), 16);
    let distinct: HashSet<&str> = results.iter().map(|r| r.domain.as_str()).collect();
    assert_eq!(distinct.len(), 16);

    server.shutdown();
}

#[tokio::test]
async fn forcecount_truncates_the_run() {
    let (server, addr) = TestNameserver::start(Zones::new()).await.unwrap();

    let workdir = tempfile::tempdir().unwrap();
    let results_dir = tempfile::tempdir().unwrap();
    let list: String = (0..8).map(|i| format!("host-{i}.example\n")).collect();
    write_inputs(workdir.path(), &list, "{}");

    let mut config = census_config(addr, workdir.path(), results_dir.path());
    config.resolver.forcecount = 3;

    let service = CensusService::from_config(config).await.unwrap();
    let stats = service.run_cycle().await.unwrap();
    assert_eq!(stats.domains, 3);

    let document = read_report(workdir.path());
    let results: Vec<ResolutionResult> =
        serde_json::from_value(document["list"].clone()).unwrap();
    let distinct: HashSet<&str> = results.iter().map(|r| r.domain.as_str()).collect();
    // Admission is in input order.
    assert_eq!(
        distinct,
        ["host-0.example", "host-1.example", "host-2.example"]
            .into_iter()
            .collect()
    );

    server.shutdown();
}
