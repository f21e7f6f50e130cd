use dns_census_application::ports::CountryLookup;
use maxminddb::geoip2;
use std::net::IpAddr;
use std::path::Path;
use tracing::{info, warn};

/// Country lookups against a MaxMind database.
///
/// The database is an optional collaborator: when it cannot be opened
/// every lookup yields unknown and the census run proceeds.
pub struct MaxmindCountryLookup {
    reader: Option<maxminddb::Reader<Vec<u8>>>,
}

impl MaxmindCountryLookup {
    pub fn open(path: Option<&Path>) -> Self {
        let reader = match path {
            Some(path) => match maxminddb::Reader::open_readfile(path) {
                Ok(reader) => {
                    info!(path = %path.display(), "GeoIP database opened");
                    Some(reader)
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Cannot open GeoIP database, locations degrade to unknown"
                    );
                    None
                }
            },
            None => {
                info!("No GeoIP database configured, locations degrade to unknown");
                None
            }
        };
        Self { reader }
    }
}

impl CountryLookup for MaxmindCountryLookup {
    fn country_code(&self, addr: IpAddr) -> Option<String> {
        let reader = self.reader.as_ref()?;
        let country: geoip2::Country = reader.lookup(addr).ok()?;
        country
            .country
            .and_then(|c| c.iso_code)
            .map(str::to_owned)
    }
}
