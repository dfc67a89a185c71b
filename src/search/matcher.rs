use crate::query::KeyPattern;
use csv::{ByteRecord, ReaderBuilder};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Field values of one data row.
pub type Record = Vec<String>;

/// Rows of a single table file that matched one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub file: PathBuf,
    pub header: Vec<String>,
    pub records: Vec<Record>,
}

impl MatchResult {
    fn empty(file: &Path) -> Self {
        Self {
            file: file.to_path_buf(),
            header: Vec::new(),
            records: Vec::new(),
        }
    }

    pub fn matched(&self) -> bool {
        !self.records.is_empty()
    }
}

/// Opens `file` and collects every row containing `key` as a word or phrase.
///
/// A file that cannot be opened contributes nothing and is not reported.
pub fn match_key_in_file(file: &Path, key: &KeyPattern) -> MatchResult {
    match File::open(file) {
        Ok(handle) => match_key_in_reader(file, handle, key),
        Err(err) => {
            tracing::debug!("cannot open {}: {}", file.display(), err);
            MatchResult::empty(file)
        }
    }
}

/// Same as [`match_key_in_file`] over an already opened reader; `file` only
/// labels diagnostics and the result.
pub fn match_key_in_reader<R: Read>(file: &Path, reader: R, key: &KeyPattern) -> MatchResult {
    let mut result = MatchResult::empty(file);
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut row = ByteRecord::new();
    let mut header_len = None;

    loop {
        match csv_reader.read_byte_record(&mut row) {
            Ok(false) => break,
            Ok(true) => {}
            Err(err) => {
                tracing::warn!("error: {} {}", file.display(), err);
                // The reader cannot resume after an I/O failure; other
                // errors only spoil the current row.
                if err.is_io_error() {
                    break;
                }
                continue;
            }
        }
        let line = row.position().map_or(0, |pos| pos.line());
        let fields = decode_fields(&row);

        let Some(expected) = header_len else {
            header_len = Some(fields.len());
            result.header = fields;
            continue;
        };

        if fields.len() != expected {
            tracing::warn!(
                "error: {} record on line {}: wrong number of fields (expected {}, found {})",
                file.display(),
                line,
                expected,
                fields.len()
            );
            continue;
        }

        if key.matches_any(fields.iter().map(String::as_str)) {
            result.records.push(fields);
        }
    }

    result
}

/// Field text with invalid UTF-8 replaced, so a stray Latin-1 byte never
/// costs a whole row.
fn decode_fields(row: &ByteRecord) -> Record {
    row.iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}
