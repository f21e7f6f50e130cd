pub mod compress;
pub mod json_writer;

pub use compress::compress_report;
pub use json_writer::JsonReportWriter;
