//! pdfoutline CLI - heading outline inference for PDF manuals

use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;

use pdfoutline::{extract_outline, render, JsonFormat, OutlineOptions};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer a heading outline with section content from a PDF", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE", required_unless_present = "print_config")]
    input: Option<PathBuf>,

    /// Only scan the first N pages
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Print the outline as JSON instead of an indented tree
    #[arg(long)]
    json: bool,

    /// Compact JSON output (implies --json)
    #[arg(long)]
    compact: bool,

    /// JSON file with outline options
    #[arg(long, value_name = "FILE", env = "PDFOUTLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Font size tolerance when matching heading tiers
    #[arg(long, value_name = "PT")]
    size_tolerance: Option<f32>,

    /// Horizontal gap that separates table columns
    #[arg(long, value_name = "PT")]
    gap_threshold: Option<f32>,

    /// Minimum occurrences for a heading font size
    #[arg(long, value_name = "COUNT")]
    min_occurrences: Option<usize>,

    /// Disable parallel page scanning
    #[arg(long)]
    sequential: bool,

    /// Print the effective options as JSON and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    /// Options from the config file (or defaults) with flag overrides applied.
    fn options(&self) -> Result<OutlineOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => OutlineOptions::from_json_file(path)?,
            None => OutlineOptions::default(),
        };

        if let Some(pages) = self.max_pages {
            options = options.with_max_pages(pages);
        }
        if let Some(tolerance) = self.size_tolerance {
            options = options.with_size_tolerance(tolerance);
        }
        if let Some(threshold) = self.gap_threshold {
            options = options.with_gap_threshold(threshold);
        }
        if let Some(count) = self.min_occurrences {
            options = options.with_min_heading_occurrences(count);
        }
        if self.sequential {
            options = options.sequential();
        }

        options.validate()?;
        Ok(options)
    }

    fn json_format(&self) -> Option<JsonFormat> {
        if self.compact {
            Some(JsonFormat::Compact)
        } else if self.json {
            Some(JsonFormat::Pretty)
        } else {
            None
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match (&cli.input, cli.print_config) {
        (_, true) => cmd_print_config(&cli),
        (Some(input), false) => cmd_outline(input, &cli),
        (None, false) => Err("no input file given".into()),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_outline(input: &Path, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = cli.options()?;
    let outline = extract_outline(input, &options)?;
    log::info!(
        "{}: {} heading(s)",
        input.display(),
        outline.heading_count()
    );

    // Render fully before writing so a failure leaves stdout empty
    let output = match cli.json_format() {
        Some(format) => render::to_json(&outline, format)?,
        None => render::to_text(&outline),
    };
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn cmd_print_config(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = cli.options()?;
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}
