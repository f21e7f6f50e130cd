use serde::{Deserialize, Serialize};

/// Registry dump descriptor produced by the fetch stage.
///
/// Opaque to the census core: it is read from the current-dump file and
/// embedded verbatim in the report header so downstream consumers can
/// tie a report to the dump it was resolved against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpMetadata {
    #[serde(rename = "a", default)]
    pub arch_status: i64,
    #[serde(rename = "as", default)]
    pub arch_size: i64,
    #[serde(default)]
    pub crc: String,
    #[serde(rename = "ct", default)]
    pub cache_expiration_time: i64,
    #[serde(default)]
    pub id: String,
    #[serde(rename = "s", default)]
    pub size: i64,
    #[serde(rename = "u", default)]
    pub db_update_time: i64,
    #[serde(rename = "ut", default)]
    pub update_time: i64,
    #[serde(rename = "utu", default)]
    pub urgent_update_time: i64,
}
