//! Inspect hanja tables from the command line: load a table (plus an
//! optional symbol table) and print the matches a key would produce for a
//! given lookup method.

use anyhow::Result;
use clap::Parser;
use libhangul_core::{HanjaDictionary, LookupMethod};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hanja-lookup")]
#[command(about = "Look up a key in hanja tables the way the IME would")]
struct Args {
    /// Main hanja table (key:value:comment lines)
    table: PathBuf,

    /// Key to look up
    key: String,

    /// Lookup method: exact, prefix or suffix
    #[arg(long, default_value = "prefix")]
    method: String,

    /// Optional symbol table consulted before the main table
    #[arg(long)]
    symbol: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let method = match args.method.as_str() {
        "exact" => LookupMethod::Exact,
        "prefix" => LookupMethod::Prefix,
        "suffix" => LookupMethod::Suffix,
        other => anyhow::bail!("unknown method '{}', use exact/prefix/suffix", other),
    };

    let dict = HanjaDictionary::load(&args.table, args.symbol.as_ref())?;
    let entries = dict.lookup(&args.key, method);

    if entries.is_empty() {
        println!("no matches for '{}' ({:?})", args.key, method);
        return Ok(());
    }

    println!("{} matches for '{}' ({:?}):", entries.len(), args.key, method);
    for (i, entry) in entries.iter().enumerate() {
        println!("  {}. {} -> {}", i + 1, entry.key, entry.value);
    }
    Ok(())
}
