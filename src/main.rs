// src/main.rs
mod logger;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use hufpack::{codec, codes, journal, utils};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hufpack", version = "0.1.0")]
#[command(about = "Huffman compression with a separate tree file.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Append a JSON record of each completed operation to this file
    #[arg(long, global = true)]
    journal: Option<PathBuf>,
}

#[derive(Args)]
struct Transfer {
    source: PathBuf,
    dest: PathBuf,
    /// Tree file location (defaults to the payload path with `.tree` appended)
    #[arg(short, long)]
    tree: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress SOURCE into DEST and its tree file
    Encode(Transfer),
    /// Decompress SOURCE (with its tree file) into DEST
    Decode(Transfer),
    /// Print the code table stored in a tree file
    Codes { tree: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(logger::level_for(cli.verbose, cli.quiet))?;

    let args: Vec<String> = std::env::args().collect();
    let span = tracing::info_span!("command_execution", command = ?args);
    let _enter = span.enter();

    match cli.command {
        Commands::Encode(Transfer { source, dest, tree }) => {
            let tree = tree.unwrap_or_else(|| utils::tree_path_for(&dest));
            let report = codec::encode_file(&source, &dest, &tree)
                .with_context(|| format!("failed to encode {}", source.display()))?;
            record(cli.journal.as_deref(), "encode", &source, &dest, &tree, &report)
        }
        Commands::Decode(Transfer { source, dest, tree }) => {
            let tree = tree.unwrap_or_else(|| utils::tree_path_for(&source));
            let report = codec::decode_file(&source, &tree, &dest)
                .with_context(|| format!("failed to decode {}", source.display()))?;
            record(cli.journal.as_deref(), "decode", &source, &dest, &tree, &report)
        }
        Commands::Codes { tree } => print_codes(&tree),
    }
}

fn record(
    journal_path: Option<&Path>,
    action: &str,
    source: &Path,
    dest: &Path,
    tree: &Path,
    report: &codec::FileReport,
) -> anyhow::Result<()> {
    let Some(path) = journal_path else {
        return Ok(());
    };
    let entry = journal::JournalEntry::new(action, source, dest, tree, report);
    journal::append(path, &entry)
        .with_context(|| format!("failed to write journal {}", path.display()))
}

fn print_codes(tree: &Path) -> anyhow::Result<()> {
    let table = codec::code_table_file(tree)
        .with_context(|| format!("failed to load tree {}", tree.display()))?;
    let Some(table) = table else {
        println!("(empty tree: source was empty)");
        return Ok(());
    };

    for (byte, code) in table.iter() {
        let shown = if byte.is_ascii_graphic() {
            format!("'{}'", byte as char)
        } else {
            "   ".to_string()
        };
        let bits = if code.is_empty() {
            "(single symbol)".to_string()
        } else {
            codes::bits_to_string(code)
        };
        println!("{:#04x} {}  {}", byte, shown, bits);
    }
    Ok(())
}
