use dns_census_domain::CensusError;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Compresses the finished report into a timestamped archive.
///
/// Same temp-then-rename discipline as the report itself: the archive
/// only appears under its final name once it is complete and synced.
pub fn compress_report(
    report_path: &Path,
    results_dir: &Path,
    timestamp: i64,
) -> Result<PathBuf, CensusError> {
    let archive_path = results_dir.join(format!("{timestamp}.gz"));
    let tmp_path = results_dir.join(format!("{timestamp}.gz.tmp"));

    let mut input = File::open(report_path).map_err(|e| {
        CensusError::Io(format!("Cannot open report {}: {e}", report_path.display()))
    })?;
    let output = File::create(&tmp_path)
        .map_err(|e| CensusError::Io(format!("Cannot create {}: {e}", tmp_path.display())))?;

    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder)
        .map_err(|e| CensusError::Io(format!("Cannot compress report: {e}")))?;
    let output = encoder
        .finish()
        .map_err(|e| CensusError::Io(format!("Cannot finalize archive: {e}")))?;
    output
        .sync_all()
        .map_err(|e| CensusError::Io(format!("Cannot sync archive: {e}")))?;

    fs::rename(&tmp_path, &archive_path).map_err(|e| {
        CensusError::Io(format!(
            "Cannot move archive into place at {}: {e}",
            archive_path.display()
        ))
    })?;
    info!(archive = %archive_path.display(), "archive published");
    Ok(archive_path)
}
