//! Moves finished firmware images into `.pio/build/out` under versioned names

use chrono::NaiveDate;
use clap::Parser;
use fwstamp::defaults::{
    DEFAULT_BASE_PATH, DEFAULT_HEADER_FILE, DEFAULT_LABEL, DEFAULT_RENAME_REPO_ROOT,
};
use fwstamp::{RenameOptions, Variant, exit_codes::*, rename_versioned_artifacts};
use std::{env, panic, path::PathBuf, process};

const VERSION: &str = fwstamp::version::VERSION;

#[derive(Parser, Debug)]
#[command(version = VERSION, about = "Rename firmware images into dated, versioned files")]
struct Args {
    /// Project directory containing the header and .pio/build
    #[arg(long, default_value = DEFAULT_BASE_PATH)]
    base: PathBuf,

    /// Version header, relative to --base
    #[arg(long, default_value = DEFAULT_HEADER_FILE)]
    header: PathBuf,

    /// Repository root to describe
    #[arg(long, default_value = DEFAULT_RENAME_REPO_ROOT)]
    repo_root: PathBuf,

    /// Label placed after the date stamp
    #[arg(long, default_value = DEFAULT_LABEL)]
    label: String,

    /// Date stamp as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Variant as <label>=<artifact path relative to --base>; repeatable,
    /// replaces the default esp8266 debug/release pair
    #[arg(long = "variant")]
    variants: Vec<Variant>,

    /// Show the planned names without creating or moving anything
    #[arg(long)]
    dry_run: bool,

    /// Print the rename report as JSON
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error, json[:level])
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
        process::exit(EXIT_PANIC);
    }));

    let result = panic::catch_unwind(run);

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(_) => {
            eprintln!("Fatal: Unhandled panic in fwstamp-rename");
            process::exit(EXIT_PANIC);
        }
    }
}

fn run() -> i32 {
    if env::args().nth(1).as_deref() == Some("--version") {
        println!("fwstamp-rename {}", fwstamp::version::full_version());
        return EXIT_SUCCESS;
    }

    let args = Args::parse();

    if let Some(ref level) = args.log_level {
        fwstamp::logger::JsonLogger::init_with_level(level, "CLI --log-level");
    } else {
        fwstamp::logger::JsonLogger::init();
    }

    let variants = if args.variants.is_empty() {
        Variant::defaults()
    } else {
        args.variants
    };

    let options = RenameOptions {
        base_path: args.base,
        header_file: args.header,
        repo_root: args.repo_root,
        label: args.label,
        date: args.date,
        variants,
        dry_run: args.dry_run,
    };

    let report = match rename_versioned_artifacts(options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_code_for(&e);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return EXIT_ERROR;
            }
        }
    } else {
        for artifact in &report.artifacts {
            let verb = if report.dry_run { "would move" } else { "moved" };
            println!(
                "{} {} -> {}",
                verb,
                artifact.source.display(),
                artifact.destination.display()
            );
        }
    }

    EXIT_SUCCESS
}
