//! word2csv CLI - Word document to CSV converter
//!
//! Converts each DOCX file given on the command line into a CSV file of
//! headings, paragraphs, table rows, comments and footnotes.

mod config;

use clap::{ArgAction, Parser};
use colored::*;
use config::{check_writable, Config};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use word2csv::{CsvOptions, Converter};

/// Convert Word documents to CSV
#[derive(Parser)]
#[command(
    name = "word2csv",
    version,
    about = "Convert Word documents to CSV",
    long_about = "word2csv - Flatten Word (DOCX) documents into CSV.\n\n\
                  Each heading, paragraph and table row becomes one row, followed by rows\n\
                  for its comments and footnotes. One <name>.docx.csv is written per input."
)]
struct Cli {
    /// Word documents to convert
    files: Vec<PathBuf>,

    /// Directory to write CSV files to (default: from config, else current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Config file (default: word2csv.toml next to the executable)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Store the output directory in the config file
    #[arg(long)]
    save_config: bool,

    /// Confirm or change the output directory before converting
    #[arg(short, long)]
    interactive: bool,

    /// CSV field delimiter
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(0) => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Convert every input; returns the number of documents that failed.
fn run(cli: Cli) -> Result<usize, Box<dyn std::error::Error>> {
    print_banner();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)?;

    let mut output_dir = match cli.output_dir.clone().or_else(|| config.output.path.clone()) {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let mut save = cli.save_config;
    if cli.interactive {
        if let Some(dir) = prompt_output_dir(&output_dir)? {
            output_dir = dir;
            save = true;
        }
    }

    check_writable(&output_dir)
        .map_err(|e| format!("'{}' is invalid: {}", output_dir.display(), e))?;

    if save {
        config.output.path = Some(output_dir.clone());
        config.save(&config_path)?;
    }

    let options = csv_options(cli.delimiter.or(config.csv.delimiter))?;
    let documents = select_documents(&cli.files);

    println!("\nConverting {} documents.", documents.len());
    if documents.is_empty() {
        println!("\nTry passing some Word files next time...");
        return Ok(0);
    }

    let mut failed = 0;
    for (i, path) in documents.iter().enumerate() {
        println!(
            "{}/{} : Convert {}",
            i + 1,
            documents.len(),
            word2csv::document_name(path)
        );
        match convert_one(path, &output_dir, &options) {
            Ok((rows, output)) => println!(
                "{} {} rows -> {}",
                "✓".green().bold(),
                rows,
                output.display()
            ),
            Err(e) => {
                failed += 1;
                eprintln!("{}: {}: {}", "Error".red().bold(), path.display(), e);
            }
        }
    }

    let converted = documents.len() - failed;
    if failed == 0 {
        println!("\n{} Conversion finished: {} converted.", "✓".green().bold(), converted);
    } else {
        println!(
            "\n{} Conversion finished: {} converted, {} failed.",
            "!".yellow().bold(),
            converted,
            failed
        );
    }
    Ok(failed)
}

fn print_banner() {
    println!("\n\t{}", "Word2Csv Converter".cyan().bold());
    println!("\t{}", "=".repeat(18));
    println!(
        "\n{}: Word documents must have all tracked changes ACCEPTED, or the conversion may fail.",
        "IMPORTANT".yellow().bold()
    );
}

/// Keep `.docx` inputs, reporting everything else.
fn select_documents(files: &[PathBuf]) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|path| {
            let keep = word2csv::is_docx_path(path);
            if !keep {
                println!("{} Not a Word file: {}", "!".yellow().bold(), path.display());
            }
            keep
        })
        .cloned()
        .collect()
}

fn csv_options(delimiter: Option<char>) -> Result<CsvOptions, Box<dyn std::error::Error>> {
    let mut options = CsvOptions::new();
    if let Some(c) = delimiter {
        let byte = u8::try_from(c)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| format!("delimiter must be a single ASCII character, got {:?}", c))?;
        options = options.with_delimiter(byte);
    }
    Ok(options)
}

fn convert_one(
    path: &Path,
    output_dir: &Path,
    options: &CsvOptions,
) -> Result<(usize, PathBuf), Box<dyn std::error::Error>> {
    let converter = Converter::open(path)?;

    let pb = create_progress_bar();
    let rows = converter.convert_with_progress(|done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    });
    pb.finish_and_clear();
    let rows = rows?;

    let output = word2csv::output_path_for(path, output_dir);
    word2csv::render::write_file(&rows, &output, options)?;
    Ok((rows.len(), output))
}

fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.blue} [{bar:40.cyan/blue}] {pos}/{len} nodes")
        .map(|s| s.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

/// Ask for a different output directory. `None` keeps the current one.
fn prompt_output_dir(current: &Path) -> io::Result<Option<PathBuf>> {
    loop {
        print!(
            "\nPress return to accept the output location, or enter a new path.\n\n[ {} ]: ",
            current.display()
        );
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let entered = line.trim();
        if entered.is_empty() {
            return Ok(None);
        }

        let candidate = PathBuf::from(entered);
        match check_writable(&candidate) {
            Ok(()) => return Ok(Some(candidate)),
            Err(e) => println!("--> '{}' is invalid: {}", candidate.display(), e),
        }
    }
}
