pub mod engine;
pub mod file_discovery;
pub mod matcher;

pub use engine::{LookupEngine, MatchBlock, QueryOutcome};
pub use file_discovery::{MAX_DEPTH, TABLE_EXT, TableDiscovery, TableIndex, discover_tables};
pub use matcher::{MatchResult, Record, match_key_in_file};
