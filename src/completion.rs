//! Shell completion support.
//!
//! Bash gets a small hook that calls back into `lookup complete arg` so table
//! names are completed from the live search path. Other shells get a static
//! clap_complete script covering flags and subcommands only.

use crate::search::TableIndex;
use anyhow::{Result, bail};

/// To enable completions in Bash: `eval "$(lookup complete script bash)"`
pub const BASH_SCRIPT: &str = r#"_lookup_complete() { IFS=$'\n' COMPREPLY=($(compgen -W "$(lookup complete arg "$COMP_CWORD" "${COMP_WORDS[@]}")" -- "${COMP_WORDS[COMP_CWORD]}")); }; complete -o nospace -F _lookup_complete lookup"#;

/// Sorted names of every known table.
pub fn complete_table_names(index: &TableIndex) -> Vec<String> {
    index.names().map(|name| name.as_str().to_string()).collect()
}

/// Candidates for the word at `arg_index` of a command line.
///
/// `words` is the shell's word list after the `complete arg <index>` prefix.
/// Only index 1, the table slot, has candidates.
pub fn complete_arg(arg_index: i64, words: &[String], index: &TableIndex) -> Result<Vec<String>> {
    if arg_index < 1 {
        bail!("arg index too low");
    }

    // Slot 0 stands in for the program name.
    let mut args = Vec::with_capacity(words.len() + 2);
    args.push(String::new());
    args.extend(words.iter().cloned());

    let arg_index = arg_index as usize;
    if arg_index == args.len() {
        args.push(String::new());
    }
    if arg_index >= args.len() {
        bail!("arg index too high");
    }

    if arg_index == 1 {
        Ok(complete_table_names(index))
    } else {
        Ok(Vec::new())
    }
}
