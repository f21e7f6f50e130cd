use dns_census_domain::{domain_name, CensusError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Reads and normalizes the registry domain list.
///
/// Invalid entries are skipped with a warning; an unreadable file is
/// fatal for the run.
pub fn load_domain_list(path: &Path) -> Result<Vec<String>, CensusError> {
    let file = File::open(path).map_err(|e| {
        CensusError::Io(format!("Cannot read domain list {}: {e}", path.display()))
    })?;
    let reader = BufReader::new(file);

    let mut domains = Vec::new();
    let mut skipped: u64 = 0;
    for line in reader.lines() {
        let line = line.map_err(|e| {
            CensusError::Io(format!("Cannot read domain list {}: {e}", path.display()))
        })?;
        if line.trim().is_empty() {
            continue;
        }
        match domain_name::normalize(&line) {
            Ok(domain) => domains.push(domain),
            Err(reason) => {
                skipped += 1;
                warn!(entry = %line.trim(), %reason, "skipping domain list entry");
            }
        }
    }

    info!(
        list = %path.display(),
        admitted = domains.len(),
        skipped,
        "domain list loaded"
    );
    Ok(domains)
}
