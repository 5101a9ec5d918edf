// src/main.rs
//
// htmlformat — canonical HTML pretty-printer
//
// - Parses the input as an HTML fragment (default) or as a whole document.
// - Writes one block element per line, nested elements indented by one unit
//   per level, elements holding only text kept on a single line.
// - Inline runs and trailing punctuation stay on the line they belong to.
// - <script>/<style> bodies are reindented as blocks; everything below
//   <pre>/<code> is written verbatim.
//
// CLI flags:
//   --document        : parse the input as a whole document
//   --indent <STRING> : indentation unit (default: two spaces)
//   --tabs            : indent with a single tab
//   --output <FILE>   : write here instead of stdout
// Input defaults to stdin. RUST_LOG controls logging on stderr.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use htmlformat::FormatOptions;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Parse the input as a whole document instead of a fragment
    #[arg(short, long, action = ArgAction::SetTrue)]
    document: bool,

    /// Indentation unit, written verbatim once per nesting level
    #[arg(short, long, default_value = htmlformat::DEFAULT_INDENT, conflicts_with = "tabs")]
    indent: String,

    /// Indent with a single tab character
    #[arg(short, long, action = ArgAction::SetTrue)]
    tabs: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Input file (default: stdin; `-` reads stdin too)
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let options = if cli.tabs {
        FormatOptions::with_indent("\t")
    } else {
        FormatOptions::with_indent(cli.indent)
    };

    let mut input = open_input(cli.input.as_deref())?;
    // Parse everything before opening the output so `-o` may name the input file.
    let tree = if cli.document {
        htmlformat::parse::parse_document(&mut input)
    } else {
        htmlformat::parse::parse_fragment(&mut input)
    }
    .context("failed to parse input")?;
    debug!(document = cli.document, nodes = tree.len(), "input parsed");

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut out = BufWriter::new(out);

    htmlformat::nodes(&mut out, &tree, &options).context("failed to format")?;
    out.flush().context("failed to write output")?;
    Ok(())
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(file))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// Log to stderr so formatted output on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
