//! Command-line interface for the decoder.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use serde::Serialize;

use crate::atom::{parse_document, AtomDocument};
use crate::error::Result;

/// Decode dict/list content from Atom entries and feeds.
#[derive(Parser)]
#[command(name = "atom-decoder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode an Atom entry or feed and print it.
    Decode {
        /// Input file, or `-` for stdin
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,

        /// Print only the decoded content of each entry
        #[arg(long)]
        content_only: bool,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a short overview of an Atom entry or feed.
    Summary {
        /// Input file, or `-` for stdin
        input: PathBuf,
    },
}

/// Serialization format for decoded documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            input,
            format,
            content_only,
            output,
        } => decode_command(&input, format, content_only, output.as_deref()),
        Commands::Summary { input } => summary_command(&input),
    }
}

/// Read the input file, treating `-` as stdin.
fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(fs::read_to_string(input)?)
}

/// Serialize a value in the requested format, newline-terminated.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    let mut out = match format {
        OutputFormat::Yaml => serde_yaml_ng::to_string(value)?,
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// Render a parsed document, optionally reduced to entry content.
pub fn render_document(
    document: &AtomDocument,
    format: OutputFormat,
    content_only: bool,
) -> Result<String> {
    if !content_only {
        return render(document, format);
    }
    match document {
        AtomDocument::Entry(entry) => render(&entry.content, format),
        AtomDocument::Feed(feed) => {
            let contents: Vec<_> = feed.entries.iter().map(|e| &e.content).collect();
            render(&contents, format)
        }
    }
}

/// Execute the decode command.
fn decode_command(
    input: &Path,
    format: OutputFormat,
    content_only: bool,
    output: Option<&Path>,
) -> Result<()> {
    let xml = read_input(input)?;
    let document = parse_document(&xml)?;
    let rendered = render_document(&document, format, content_only)?;

    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            tracing::debug!(path = %path.display(), "Wrote decoded document");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

/// Execute the summary command.
fn summary_command(input: &Path) -> Result<()> {
    let xml = read_input(input)?;
    let document = parse_document(&xml)?;

    match &document {
        AtomDocument::Entry(entry) => {
            println!("{}", style("Entry").bold());
            print_field("Id", entry.object.id.as_deref());
            print_field("Title", entry.object.title.as_deref());
            print_field("Published", entry.published.as_deref());
            let keys = entry.content.as_ref().map_or(0, |c| c.len());
            println!("  Content keys: {}", style(keys).cyan());
        }
        AtomDocument::Feed(feed) => {
            println!("{}", style("Feed").bold());
            print_field("Id", feed.object.id.as_deref());
            print_field("Title", feed.object.title.as_deref());
            println!("  Entries: {}", style(feed.entries.len()).cyan());
            if let Some(total) = feed.total_results {
                println!("  Total results: {}", style(total).cyan());
            }
        }
    }
    Ok(())
}

fn print_field(label: &str, value: Option<&str>) {
    match value {
        Some(v) => println!("  {label}: {}", style(v).green()),
        None => println!("  {label}: {}", style("-").dim()),
    }
}
