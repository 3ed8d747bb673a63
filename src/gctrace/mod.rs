pub mod parser;
pub mod reader;
pub mod types;

pub use parser::{parse_line, ParseError};
pub use reader::{read_records, ReaderStats};
pub use types::{GcRecord, HeapSize, Phase, PhaseTimings};
