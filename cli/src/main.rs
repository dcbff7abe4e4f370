//! doctext CLI - DOCX and PDF text extraction tool

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use doctext::{
    detect_format_from_path, render, ConvertOptions, ConverterRegistry, DocumentFormat,
    JsonFormat, OutputFormat, PageSelection, ParseOptions, DEFAULT_DOCX_INPUT,
    DEFAULT_REPORT_OUTPUT, PDF_PATH_ENV,
};

#[derive(Parser)]
#[command(name = "doctext")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract text from DOCX and PDF documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the content report of a DOCX file
    Docx {
        /// Input DOCX file
        #[arg(value_name = "FILE", default_value = DEFAULT_DOCX_INPUT)]
        input: PathBuf,

        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_REPORT_OUTPUT)]
        output: PathBuf,

        /// Write JSON instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// Print the text of each PDF page
    Pdf {
        /// Input PDF file
        #[arg(value_name = "FILE", env = PDF_PATH_ENV)]
        input: PathBuf,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Fail on the first page whose text cannot be extracted
        #[arg(long)]
        strict: bool,

        /// Extract pages one at a time
        #[arg(long)]
        sequential: bool,

        /// Print JSON instead of the page listing
        #[arg(long)]
        json: bool,
    },

    /// Convert a document by extension (docx, pdf)
    Convert {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Show document information
    Info {
        /// Input DOCX or PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Report (DOCX) or page listing (PDF)
    Text,
    /// JSON structure
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let (context, result) = match cli.command {
        Commands::Docx {
            input,
            output,
            json,
        } => ("Error", cmd_docx(&input, &output, json)),
        Commands::Pdf {
            input,
            pages,
            strict,
            sequential,
            json,
        } => (
            "Error reading PDF",
            cmd_pdf(&input, pages.as_deref(), strict, sequential, json),
        ),
        Commands::Convert {
            input,
            output,
            format,
        } => ("Error", cmd_convert(&input, output.as_deref(), format)),
        Commands::Info { input } => ("Error", cmd_info(&input)),
        Commands::Version => {
            cmd_version();
            ("Error", Ok(()))
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", context.red().bold(), e);
        std::process::exit(exit_code(e.as_ref()));
    }
}

/// Partial PDF extraction exits with 2, every other failure with 1.
fn exit_code(err: &(dyn std::error::Error + 'static)) -> i32 {
    match err.downcast_ref::<doctext::Error>() {
        Some(doctext::Error::PartialExtraction { .. }) => 2,
        _ => 1,
    }
}

fn cmd_docx(input: &Path, output: &Path, json: bool) -> CliResult {
    if json {
        let doc = doctext::parse_docx(input)?;
        fs::write(output, render::to_json(&doc, JsonFormat::Pretty)?)?;
    } else {
        doctext::write_docx_report(input, output)?;
    }

    println!("Content extracted to {}", output.display());
    Ok(())
}

fn cmd_pdf(
    input: &Path,
    pages: Option<&str>,
    strict: bool,
    sequential: bool,
    json: bool,
) -> CliResult {
    let options = pdf_options(pages, strict, sequential)?;
    log::debug!("Reading {} with {:?}", input.display(), options);

    let pdf = doctext::parse_pdf_with_options(input, options)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        writeln!(out, "{}", render::to_json(&pdf, JsonFormat::Pretty)?)?;
    } else {
        render::write_listing(&pdf, &mut out)?;
    }

    pdf.ensure_complete()?;
    Ok(())
}

/// Lenient unless asked otherwise: print every page that can be read.
fn pdf_options(pages: Option<&str>, strict: bool, sequential: bool) -> doctext::Result<ParseOptions> {
    let page_selection = match pages {
        Some(p) => PageSelection::parse(p)?,
        None => PageSelection::All,
    };

    let options = ParseOptions::new()
        .with_pages(page_selection)
        .with_parallel(!sequential);
    Ok(if strict { options } else { options.lenient() })
}

fn cmd_convert(input: &Path, output: Option<&Path>, format: Format) -> CliResult {
    let registry = ConverterRegistry::with_defaults();
    let options = ConvertOptions::new()
        .with_parse_options(ParseOptions::new().lenient())
        .with_format(format.into());

    log::debug!("Converting {} with {:?}", input.display(), options);
    let result = registry.convert(input, &options)?;

    for warning in &result.warnings {
        eprintln!("{}: {}", "Warning".yellow().bold(), warning);
    }

    if let Some(path) = output {
        fs::write(path, &result.content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", result.content);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> CliResult {
    let format = detect_format_from_path(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);

    match format {
        DocumentFormat::Docx => {
            let doc = doctext::parse_docx(input)?;

            if let Some(ref title) = doc.metadata.title {
                println!("{}: {}", "Title".bold(), title);
            }
            if let Some(ref author) = doc.metadata.author {
                println!("{}: {}", "Author".bold(), author);
            }
            if let Some(ref created) = doc.metadata.created {
                println!("{}: {}", "Created".bold(), created);
            }
            if let Some(ref modified) = doc.metadata.modified {
                println!("{}: {}", "Modified".bold(), modified);
            }

            println!();
            println!("{}", "Content Statistics".cyan().bold());
            println!("{}", "─".repeat(40).dimmed());

            let blank = doc.paragraph_count() - doc.visible_paragraphs().count();
            println!(
                "{}: {} ({} blank)",
                "Paragraphs".bold(),
                doc.paragraph_count(),
                blank
            );
            println!("{}: {}", "Tables".bold(), doc.table_count());
            println!("{}: {}", "Sections".bold(), doc.section_count());
            println!(
                "{}: {}",
                "Words".bold(),
                doc.plain_text().split_whitespace().count()
            );
        }
        DocumentFormat::Pdf(_) => {
            // Show metadata even if some pages cannot be read
            let pdf = doctext::parse_pdf_with_options(input, ParseOptions::new().lenient())?;
            let meta = &pdf.metadata;

            println!("{}: {}", "Pages".bold(), meta.page_count);
            println!(
                "{}: {}",
                "Encrypted".bold(),
                if meta.encrypted { "Yes" } else { "No" }
            );

            if let Some(ref title) = meta.title {
                println!("{}: {}", "Title".bold(), title);
            }
            if let Some(ref author) = meta.author {
                println!("{}: {}", "Author".bold(), author);
            }
            if let Some(ref creator) = meta.creator {
                println!("{}: {}", "Creator".bold(), creator);
            }
            if let Some(ref producer) = meta.producer {
                println!("{}: {}", "Producer".bold(), producer);
            }
            if let Some(ref created) = meta.created {
                println!("{}: {}", "Created".bold(), created);
            }
            if let Some(ref modified) = meta.modified {
                println!("{}: {}", "Modified".bold(), modified);
            }

            println!();
            println!("{}", "Content Statistics".cyan().bold());
            println!("{}", "─".repeat(40).dimmed());

            let text = pdf.plain_text();
            println!("{}: {}", "Words".bold(), text.split_whitespace().count());
            println!("{}: {}", "Characters".bold(), text.chars().count());

            let failed = pdf.failed_pages();
            if !failed.is_empty() {
                println!("{}: {:?}", "Unreadable pages".yellow().bold(), failed);
            }
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "doctext".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("DOCX and PDF text extraction tool");
    println!();
    println!("License: MIT");
}
