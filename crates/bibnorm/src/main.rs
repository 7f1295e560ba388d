//! bibnorm binary
//!
//! Pipeline: read everything, parse, normalize titles, serialize,
//! write everything.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "bibnorm",
    version,
    about = "Normalize title capitalization in BibTeX files"
)]
struct Cli {
    /// The *.bib input file; reads from stdin when omitted
    input: Option<PathBuf>,

    /// The *.bib output file; writes to stdout when omitted
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let text = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut db = bibnorm::parse(&text)?;
    debug!(entries = db.entries.len(), "parsed input");

    bibnorm::normalize_database(&mut db);
    let out = bibnorm::format_database(&db);

    match &cli.output {
        Some(path) => fs::write(path, out)?,
        None => io::stdout().write_all(out.as_bytes())?,
    }

    Ok(())
}
