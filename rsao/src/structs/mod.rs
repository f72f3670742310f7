pub mod index;
pub mod settings;
pub(crate) mod tools;

pub use index::IndexTable;
pub use settings::{SettingsField, SounderSettings};
