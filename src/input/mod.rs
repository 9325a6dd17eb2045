//! Input records and the CSV record source

pub mod loader;
pub mod record;

pub use loader::RecordLoader;
pub use record::{RawRecord, Record};
