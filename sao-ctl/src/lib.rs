pub mod config;
pub mod export;

pub use crate::config::{CtlConfig, ScanSettings};
pub use crate::export::{DumpFormat, summary_line, write_dump, write_json, write_traces_csv};
