use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, error::ErrorKind};
use clap_complete::Shell;
use lookup::config::PATH_ENV;
use lookup::{
    BASH_SCRIPT, LookupEngine, OutputFormat, complete_arg, logging, resolve_search_path,
    write_outcome,
};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lookup",
    version,
    about = "Search personal and system-wide CSV lookup tables",
    long_about = None,
    args_conflicts_with_subcommands = true,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Table to search (case-insensitive, matches <table>.csv)
    table: Option<String>,

    /// Words or phrases to look for in the table's rows; every word after
    /// the table is a key, even one starting with `-`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    keys: Vec<String>,

    /// Extra table directories searched before ~/.lookup (colon-separated)
    #[arg(long = "path", env = PATH_ENV, value_delimiter = ':', global = true)]
    extra_dirs: Vec<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log discovery and parsing details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Shell completion support
    Complete {
        #[command(subcommand)]
        action: CompleteAction,
    },
}

#[derive(Subcommand)]
enum CompleteAction {
    /// Print a completion script; for bash: eval "$(lookup complete script bash)"
    Script {
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Print completion candidates for one argument position
    Arg {
        /// Position of the word being completed
        #[arg(allow_negative_numbers = true)]
        index: i64,

        /// Words of the command line being completed
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_tracing(cli.verbose);

    match cli.command {
        Some(Command::Complete { action }) => complete(action, &cli.extra_dirs),
        None => {
            let Some(table) = cli.table else {
                Cli::command()
                    .error(ErrorKind::MissingRequiredArgument, "a table name is required")
                    .exit();
            };
            let use_color = !cli.no_color && io::stdout().is_terminal();
            run_lookup(&table, &cli.keys, &cli.extra_dirs, cli.format, use_color)
        }
    }
}

fn run_lookup(
    table: &str,
    keys: &[String],
    extra_dirs: &[PathBuf],
    format: OutputFormat,
    use_color: bool,
) -> Result<()> {
    let search_path = resolve_search_path(extra_dirs)?;
    let engine = LookupEngine::from_search_path(&search_path);
    let outcome = engine.run_query(table, keys);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_outcome(&mut handle, &outcome, format, use_color)?;
    handle.flush()?;
    Ok(())
}

fn complete(action: CompleteAction, extra_dirs: &[PathBuf]) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match action {
        CompleteAction::Script { shell: Shell::Bash } => {
            writeln!(handle, "{BASH_SCRIPT}")?;
        }
        CompleteAction::Script { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "lookup", &mut handle);
        }
        CompleteAction::Arg { index, words } => {
            let search_path = resolve_search_path(extra_dirs)?;
            let engine = LookupEngine::from_search_path(&search_path);
            for comp in complete_arg(index, &words, engine.index())? {
                writeln!(handle, "{comp} ")?;
            }
        }
    }

    handle.flush()?;
    Ok(())
}
