use super::record_formatter::format_record;
use crate::search::{MatchBlock, QueryOutcome};
use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    #[value(name = "jsonl")]
    JsonL,
}

#[derive(Debug, Serialize)]
struct FieldJson<'a> {
    title: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct MatchJson<'a> {
    key: &'a str,
    file: String,
    fields: Vec<FieldJson<'a>>,
}

impl<'a> From<&'a MatchBlock> for MatchJson<'a> {
    fn from(block: &'a MatchBlock) -> Self {
        Self {
            key: &block.key,
            file: block.file.display().to_string(),
            fields: block
                .fields()
                .map(|(title, value)| FieldJson { title, value })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct OutcomeJson<'a> {
    table: &'a str,
    table_found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<Vec<MatchJson<'a>>>,
    missing: &'a [String],
}

impl<'a> OutcomeJson<'a> {
    fn new(outcome: &'a QueryOutcome, with_matches: bool) -> Self {
        Self {
            table: &outcome.table,
            table_found: outcome.table_found,
            matches: with_matches.then(|| outcome.blocks.iter().map(MatchJson::from).collect()),
            missing: &outcome.missing,
        }
    }
}

/// Trailer line of the JSONL stream.
#[derive(Debug, Serialize)]
struct MetadataJson<'a> {
    #[serde(rename = "_metadata")]
    metadata: OutcomeJson<'a>,
}

/// Writes a finished query in the requested format.
pub fn write_outcome<W: Write>(
    out: &mut W,
    outcome: &QueryOutcome,
    format: OutputFormat,
    use_color: bool,
) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(out, outcome, use_color)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &OutcomeJson::new(outcome, true))?;
            writeln!(out)?;
        }
        OutputFormat::JsonL => {
            for block in &outcome.blocks {
                serde_json::to_writer(&mut *out, &MatchJson::from(block))?;
                writeln!(out)?;
            }
            let metadata = MetadataJson {
                metadata: OutcomeJson::new(outcome, false),
            };
            serde_json::to_writer(&mut *out, &metadata)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Plain listing: blocks separated by one blank line, then the keys that
/// matched nothing.
fn write_text<W: Write>(out: &mut W, outcome: &QueryOutcome, use_color: bool) -> Result<()> {
    if !outcome.table_found {
        writeln!(out, "No such lookup table: {}", outcome.table)?;
    }

    for (i, block) in outcome.blocks.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", format_record(&block.header, &block.record, use_color))?;
    }

    if !outcome.missing.is_empty() {
        if outcome.any_match() {
            writeln!(out)?;
        }
        for key in &outcome.missing {
            writeln!(out, "Not found: {key}")?;
        }
    }
    Ok(())
}
