pub mod completion;
pub mod config;
pub mod formatters;
pub mod logging;
pub mod query;
pub mod search;

pub use completion::{BASH_SCRIPT, complete_arg, complete_table_names};
pub use config::{SearchPath, default_search_path, expand_tilde, resolve_search_path};
pub use formatters::{OutputFormat, format_record, write_outcome};
pub use query::{KeyPattern, TableName};
pub use search::{
    LookupEngine, MatchBlock, MatchResult, QueryOutcome, TableDiscovery, TableIndex,
    discover_tables, match_key_in_file,
};
