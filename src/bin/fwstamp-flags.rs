//! Prints the firmware specifier build flags for the current repository
//!
//! Meant for a build tool's dynamic flags hook, e.g. in `platformio.ini`:
//! `build_flags = !fwstamp-flags --repo-root ..`

use clap::Parser;
use fwstamp::{FlagOptions, exit_codes::*, inject_version_flags};
use std::{env, panic, path::PathBuf, process};

const VERSION: &str = fwstamp::version::VERSION;

#[derive(Parser, Debug)]
#[command(version = VERSION, about = "Print git-derived firmware version build flags")]
struct Args {
    /// Repository root to describe
    #[arg(long, default_value = fwstamp::defaults::DEFAULT_FLAGS_REPO_ROOT)]
    repo_root: PathBuf,

    /// Build environment name (defaults to $PIOENV, then $FWSTAMP_ENV_NAME)
    #[arg(long)]
    env_name: Option<String>,

    /// Print the build configuration as JSON instead of raw flags
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
            eprintln!("Fatal: Unhandled panic in fwstamp-flags");
            process::exit(EXIT_PANIC);
        }
    }
}

fn run() -> i32 {
    if env::args().nth(1).as_deref() == Some("--version") {
        println!("fwstamp-flags {}", fwstamp::version::full_version());
        return EXIT_SUCCESS;
    }

    let args = Args::parse();

    if let Some(ref level) = args.log_level {
        fwstamp::logger::JsonLogger::init_with_level(level, "CLI --log-level");
    } else {
        fwstamp::logger::JsonLogger::init();
    }

    let config = inject_version_flags(FlagOptions {
        repo_root: args.repo_root,
        env_name: args.env_name,
    });

    if args.json {
        match serde_json::to_string_pretty(&config) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return EXIT_ERROR;
            }
        }
    } else {
        println!("{}", config.flags_line());
    }

    EXIT_SUCCESS
}
