pub mod status_report;

pub use status_report::CarReport;
pub use status_report::StatusReport;
