//! haodoo - HaoDoo ebook converter

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use haodoo::{DecodePolicy, HaodooReader, Metadata, ReadOptions, Variant};

#[derive(Parser)]
#[command(name = "haodoo")]
#[command(version, about = "Convert HaoDoo PDB/uPDB ebooks", long_about = None)]
#[command(after_help = "EXAMPLES:
    haodoo book.updb book.epub    Convert to EPUB
    haodoo book.pdb book-oeb      Write index.html and metadata.opf into book-oeb/
    haodoo -i book.updb           Show book metadata and chapters
    haodoo -i --json book.pdb     Same, as JSON")]
struct Cli {
    /// Input file (.pdb or .updb)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output EPUB file, or a directory for OEB output
    #[arg(value_name = "OUTPUT", required_unless_present = "info")]
    output: Option<String>,

    /// Show book metadata without converting
    #[arg(short, long)]
    info: bool,

    /// Print info as JSON
    #[arg(long, requires = "info")]
    json: bool,

    /// Fail on malformed text instead of substituting U+FFFD
    #[arg(long)]
    strict: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Serialize)]
struct BookInfo<'a> {
    file: &'a str,
    format: &'static str,
    #[serde(flatten)]
    metadata: Metadata,
    chapters: &'a [String],
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = if cli.info {
        show_info(&cli)
    } else {
        match cli.output.as_deref() {
            Some(output) => convert(&cli, output),
            None => Err("missing OUTPUT".to_string()),
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn open(cli: &Cli) -> Result<HaodooReader, String> {
    let mut options = ReadOptions::default();
    if cli.strict {
        options = options.with_policy(DecodePolicy::strict());
    }
    let source = haodoo::io::FileSource::open(&cli.input)
        .map_err(|e| format!("{}: {e}", cli.input))?;
    HaodooReader::from_source(std::sync::Arc::new(source), options).map_err(|e| e.to_string())
}

fn show_info(cli: &Cli) -> Result<(), String> {
    let reader = open(cli)?;
    let metadata = reader.metadata().map_err(|e| e.to_string())?;
    let header = reader.header();
    let format = match reader.variant() {
        Variant::Legacy => "pdb (Big5)",
        Variant::Unicode => "updb (UTF-16LE)",
    };

    if cli.json {
        let info = BookInfo {
            file: &cli.input,
            format,
            metadata,
            chapters: &header.chapter_titles,
        };
        let json = serde_json::to_string_pretty(&info).map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    }

    println!("File: {}", cli.input);
    println!("Format: {format}");
    println!("Title: {}", metadata.title);
    println!("Authors: {}", metadata.authors.join(", "));
    println!("Language: {}", metadata.language);
    println!("Identifier: {}", metadata.identifier);
    println!("Chapters: {}", header.num_records);
    for (i, title) in header.chapter_titles.iter().enumerate() {
        println!("  {:>4}. {title}", i + 1);
    }

    Ok(())
}

fn convert(cli: &Cli, output: &str) -> Result<(), String> {
    let reader = open(cli)?;
    let document = reader.document().map_err(|e| e.to_string())?;
    let book = reader.book_from(&document).map_err(|e| e.to_string())?;

    let is_epub = Path::new(output)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("epub"));
    if is_epub {
        haodoo::write_epub(&book, output).map_err(|e| e.to_string())?;
    } else {
        haodoo::write_oeb_dir(&book, output).map_err(|e| e.to_string())?;
    }

    if !cli.quiet {
        println!(
            "{} -> {} ({} chapters)",
            cli.input,
            output,
            book.toc.len()
        );
        if document.malformed > 0 {
            println!(
                "{} malformed byte sequence(s) replaced or dropped",
                document.malformed
            );
        }
    }
    Ok(())
}
