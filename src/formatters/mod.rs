pub mod outcome_formatter;
pub mod record_formatter;

pub use outcome_formatter::{OutputFormat, write_outcome};
pub use record_formatter::{format_record, max_title_len};
