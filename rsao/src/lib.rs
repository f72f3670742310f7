//! Decoder for SAO ionogram files written by Digisonde-class sounders.
//!
//! ```no_run
//! use librsao::{DecodeOptions, parse_file};
//!
//! let file = parse_file("TR169_2020083143000.SAO", &DecodeOptions::default())?;
//! for record in file.records() {
//!     println!("{:?}: {} F2 trace points", record.timestamp(), record.o_f2_frequencies().len());
//! }
//! # Ok::<(), librsao::errors::Error>(())
//! ```

pub mod config;
pub mod decoder;
pub mod errors;
pub mod parser;
pub mod record;
pub mod structs;
pub mod tables;
pub mod traces;

pub use crate::config::{DecodeOptions, IndexLayout, SeparatorPolicy, UnusedGroupPolicy};
pub use crate::decoder::{ByteInput, Decoder};
pub use crate::parser::*;
pub use crate::record::{GroupData, SAOFile, SAORecord};
pub use crate::structs::{IndexTable, SettingsField, SounderSettings};
pub use crate::traces::{Trace, TraceSpec};
