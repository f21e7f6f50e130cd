use dns_census_application::ports::ReportSink;
use dns_census_domain::{CensusError, DumpMetadata, ResolutionResult, RunStats};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Report format version emitted in the document header.
pub const FORMAT_VERSION: &str = "1.0";

const REPORT_NAME: &str = "result.json";
const REPORT_TMP_NAME: &str = "result.json.tmp";

/// Streams the report document to disk, one result at a time.
///
/// Everything is written to a temporary file; `finish` renames it into
/// the canonical path, so readers never observe a partial report. An
/// interrupted run leaves only the temporary file behind, which the
/// next run overwrites.
pub struct JsonReportWriter {
    writer: BufWriter<File>,
    tmp_path: PathBuf,
    final_path: PathBuf,
    results_written: u64,
}

impl JsonReportWriter {
    pub fn create(workdir: &Path) -> Result<Self, CensusError> {
        let tmp_path = workdir.join(REPORT_TMP_NAME);
        let final_path = workdir.join(REPORT_NAME);
        let file = File::create(&tmp_path).map_err(|e| {
            CensusError::Io(format!("Cannot create {}: {e}", tmp_path.display()))
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
            tmp_path,
            final_path,
            results_written: 0,
        })
    }

    /// Canonical path the finished report is renamed to.
    pub fn path(&self) -> &Path {
        &self.final_path
    }

    fn io(&self, e: std::io::Error) -> CensusError {
        CensusError::Io(format!("Cannot write {}: {e}", self.tmp_path.display()))
    }
}

impl ReportSink for JsonReportWriter {
    fn begin(&mut self, timestamp: i64, header: &DumpMetadata) -> Result<(), CensusError> {
        let header_json = serde_json::to_string(header)
            .map_err(|e| CensusError::Serialization(e.to_string()))?;
        write!(
            self.writer,
            "{{\n\"v\": \"{FORMAT_VERSION}\",\n\"t\": {timestamp},\n\"h\": {header_json},\n\"list\": [\n"
        )
        .map_err(|e| self.io(e))
    }

    fn write_result(&mut self, result: &ResolutionResult) -> Result<(), CensusError> {
        if self.results_written > 0 {
            self.writer.write_all(b",\n").map_err(|e| self.io(e))?;
        }
        serde_json::to_writer(&mut self.writer, result)
            .map_err(|e| CensusError::Serialization(e.to_string()))?;
        self.results_written += 1;
        Ok(())
    }

    fn finish(&mut self, stats: &RunStats) -> Result<(), CensusError> {
        let stats_json = serde_json::to_string(stats)
            .map_err(|e| CensusError::Serialization(e.to_string()))?;
        write!(self.writer, "\n],\n\"stat\": {stats_json}\n}}\n").map_err(|e| self.io(e))?;
        self.writer.flush().map_err(|e| self.io(e))?;

        fs::rename(&self.tmp_path, &self.final_path).map_err(|e| {
            CensusError::Io(format!(
                "Cannot move report into place at {}: {e}",
                self.final_path.display()
            ))
        })?;
        info!(
            report = %self.final_path.display(),
            results = self.results_written,
            "report published"
        );
        Ok(())
    }
}
