//! Tagwright CLI - Command-line tool for rendering and escaping XML markup.
//!
//! This is the main entry point for the Tagwright command-line application.

mod document;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use tagwright::prelude::*;

use crate::document::Document;

/// Tagwright - XML markup generation tool
#[derive(Parser)]
#[command(name = "tagwright")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render JSON document descriptions to XML
    Render {
        /// Input JSON file or glob pattern
        #[arg(short, long, env = "TAGWRIGHT_INPUT")]
        input: String,

        /// Output XML file, or directory when several inputs match
        #[arg(short, long, env = "TAGWRIGHT_OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        writer: WriterArgs,
    },

    /// Escape text for use in XML content or attribute values
    Escape {
        /// Text to escape
        text: String,

        /// Escape for an attribute value instead of element content
        #[arg(short, long)]
        attribute: bool,

        /// Quote style the attribute value will be wrapped in
        #[arg(short, long, default_value_t = Quote::Double)]
        quote: Quote,
    },
}

/// Writer options, read from `--config` and overridden by individual flags.
#[derive(Args)]
struct WriterArgs {
    /// JSON file holding writer options
    #[arg(short, long, env = "TAGWRIGHT_CONFIG")]
    config: Option<PathBuf>,

    /// Spaces per nesting level (0 for compact output)
    #[arg(long)]
    indent: Option<usize>,

    /// Nesting level to start at
    #[arg(long)]
    margin: Option<usize>,

    /// Attribute quote style (double or single)
    #[arg(long)]
    quote: Option<Quote>,

    /// Target encoding label
    #[arg(long)]
    encoding: Option<String>,

    /// Mark nil values with nil="true"
    #[arg(long)]
    explicit_nil: bool,
}

impl WriterArgs {
    fn options(&self) -> Result<WriterOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                serde_json::from_str(&json).context("Failed to parse writer options")?
            }
            None => WriterOptions::default(),
        };

        if let Some(indent) = self.indent {
            options.indent = indent;
        }
        if let Some(margin) = self.margin {
            options.initial_level = margin;
        }
        if let Some(quote) = self.quote {
            options.quote = quote;
        }
        if let Some(encoding) = &self.encoding {
            options.encoding = encoding.clone();
        }
        if self.explicit_nil {
            options.explicit_nil_handling = true;
        }

        Ok(options)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { input, output, writer } => {
            cmd_render(&input, &output, &writer.options()?)?;
        }
        Commands::Escape { text, attribute, quote } => {
            cmd_escape(&text, attribute, quote);
        }
    }

    Ok(())
}

fn cmd_render(pattern: &str, output: &Path, options: &WriterOptions) -> Result<()> {
    let inputs: Vec<PathBuf> = glob::glob(pattern)
        .context("Invalid input pattern")?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();

    if inputs.is_empty() {
        anyhow::bail!("No input files match '{}'", pattern);
    }

    if !Charset::for_label(&options.encoding).is_known() {
        eprintln!(
            "Warning: unknown encoding '{}', non-ASCII text will be written as character references",
            options.encoding
        );
    }

    if inputs.len() == 1 && !output.is_dir() {
        let input = &inputs[0];
        println!("Rendering: {} -> {}", input.display(), output.display());
        render_file(input, output, options)?;
        println!("Render complete");
        return Ok(());
    }

    println!("Rendering {} documents to {}...", inputs.len(), output.display());
    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let rendered = AtomicUsize::new(0);
    let errors = AtomicUsize::new(0);

    // One writer per document; writers are never shared between threads.
    inputs.par_iter().for_each(|input| {
        let file_name = input.file_stem().unwrap_or(input.as_os_str());
        let output_path = output.join(file_name).with_extension("xml");

        match render_file(input, &output_path, options) {
            Ok(()) => {
                rendered.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                pb.suspend(|| eprintln!("Error rendering {}: {:#}", input.display(), e));
                errors.fetch_add(1, Ordering::Relaxed);
            }
        }

        pb.inc(1);
    });

    pb.finish_with_message("Done");
    println!(
        "Rendered {} documents in {:?} ({} errors)",
        rendered.load(Ordering::Relaxed),
        start.elapsed(),
        errors.load(Ordering::Relaxed)
    );

    Ok(())
}

fn render_file(input: &Path, output: &Path, options: &WriterOptions) -> Result<()> {
    let json = fs::read_to_string(input).context("Failed to read input file")?;
    let document = Document::from_json(&json).context("Failed to parse document")?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(output).context("Failed to create output file")?;
    document
        .render(options, BufWriter::new(file))
        .context("Failed to render document")?;

    Ok(())
}

fn cmd_escape(text: &str, attribute: bool, quote: Quote) {
    if attribute {
        println!("{}", encode_attribute(text, quote));
    } else {
        println!("{}", encode(text));
    }
}
