use super::file_discovery::{TableIndex, discover_tables};
use super::matcher::{Record, match_key_in_file};
use crate::config::SearchPath;
use crate::query::{KeyPattern, TableName};
use std::path::PathBuf;

/// One matching row, ready to be printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchBlock {
    pub key: String,
    pub file: PathBuf,
    pub header: Vec<String>,
    pub record: Record,
}

impl MatchBlock {
    /// `(title, value)` pairs in column order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .iter()
            .zip(&self.record)
            .map(|(title, value)| (title.as_str(), value.as_str()))
    }
}

/// Everything one invocation produced.
///
/// Blocks are ordered by key, then file, then row. `missing` keeps the keys
/// that matched nowhere in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOutcome {
    pub table: String,
    pub table_found: bool,
    pub blocks: Vec<MatchBlock>,
    pub missing: Vec<String>,
}

impl QueryOutcome {
    pub fn any_match(&self) -> bool {
        !self.blocks.is_empty()
    }
}

pub struct LookupEngine {
    index: TableIndex,
}

impl LookupEngine {
    pub fn new(index: TableIndex) -> Self {
        Self { index }
    }

    /// Scans `search_path` once and keeps the resulting index for this run.
    pub fn from_search_path(search_path: &SearchPath) -> Self {
        Self::new(discover_tables(search_path))
    }

    pub fn index(&self) -> &TableIndex {
        &self.index
    }

    /// Searches every file of `table` for each key in turn.
    ///
    /// An unknown table still yields an outcome: every key lands in
    /// `missing`.
    pub fn run_query(&self, table: &str, keys: &[String]) -> QueryOutcome {
        let name = TableName::new(table);
        let files = self.index.files(&name);

        let mut outcome = QueryOutcome {
            table: table.to_string(),
            table_found: !files.is_empty(),
            ..QueryOutcome::default()
        };
        if !outcome.table_found {
            tracing::debug!(table = %name, "no files for table");
        }

        for key in keys {
            let pattern = KeyPattern::new(key);
            let mut key_found = false;

            for file in files {
                let result = match_key_in_file(file, &pattern);
                if !result.matched() {
                    continue;
                }
                key_found = true;
                let header = result.header;
                outcome
                    .blocks
                    .extend(result.records.into_iter().map(|record| MatchBlock {
                        key: key.clone(),
                        file: result.file.clone(),
                        header: header.clone(),
                        record,
                    }));
            }

            if !key_found {
                outcome.missing.push(key.clone());
            }
        }

        tracing::debug!(
            table = %name,
            files = files.len(),
            matches = outcome.blocks.len(),
            missing = outcome.missing.len(),
            "query finished"
        );
        outcome
    }
}
