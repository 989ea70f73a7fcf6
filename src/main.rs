//! CLI entry point for hereafter
//!
//! Plays a story in the terminal, checks story files, and dumps the
//! built-in story as JSON.

use std::path::PathBuf;
use std::process;

use hereafter::cli::{self, PlayConfig};
use hereafter::logging::{DebugConfig, DebugLogger};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Vec<String> = std::env::args().collect();

    let Some(command) = args.get(1) else {
        print_usage();
        process::exit(1);
    };

    match command.as_str() {
        "play" => {
            let options = match PlayOptions::parse(&args[2..]) {
                Ok(options) => options,
                Err(err) => {
                    eprintln!("Error: {err}");
                    eprintln!();
                    print_usage();
                    process::exit(1);
                }
            };
            if let Err(err) = run_play(options).await {
                eprintln!("Error: Player mode failed");
                eprintln!("Reason: {err:#}");
                process::exit(1);
            }
        }
        "check" => {
            let Some(path) = args.get(2) else {
                eprintln!("Error: Missing story file path");
                eprintln!();
                print_usage();
                process::exit(1);
            };
            run_check(PathBuf::from(path));
        }
        "dump" => match cli::dump() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Error: {err:#}");
                process::exit(1);
            }
        },
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Error: Unknown command '{command}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("hereafter - Interactive Story Engine");
    println!();
    println!("USAGE:");
    println!("    hereafter play [story.json] [--config <config.json>] [--debug]");
    println!("    hereafter check <story.json>");
    println!("    hereafter dump");
    println!();
    println!("COMMANDS:");
    println!("    play [file]       Play a story in the terminal (built-in story if omitted)");
    println!("    check <file>      Validate a story file");
    println!("    dump              Print the built-in story as JSON");
    println!("    --help, -h        Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>   Engine timings and key bindings");
    println!("    --debug           Log engine activity to stderr (also HEREAFTER_DEBUG)");
}

#[derive(Debug, Default)]
struct PlayOptions {
    story: Option<PathBuf>,
    config: Option<PathBuf>,
    debug: bool,
}

impl PlayOptions {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut options = Self::default();
        let mut args = args.iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--debug" => options.debug = true,
                "--config" => {
                    let path = args.next().ok_or("--config needs a file path")?;
                    options.config = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => return Err(format!("Unknown option '{flag}'")),
                path if options.story.is_none() => options.story = Some(PathBuf::from(path)),
                extra => return Err(format!("Unexpected argument '{extra}'")),
            }
        }
        Ok(options)
    }
}

async fn run_play(options: PlayOptions) -> anyhow::Result<()> {
    let debug = if options.debug {
        DebugConfig::verbose()
    } else {
        DebugConfig::default()
    };
    DebugLogger::install(debug)?;

    let config = match &options.config {
        Some(path) => PlayConfig::load(path)?,
        None => PlayConfig::default(),
    };
    let story = cli::load_story(options.story.as_deref())?;
    cli::play::run_play(story, config).await
}

fn run_check(path: PathBuf) {
    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(err) => {
            eprintln!("Error: Failed to read file '{}'", path.display());
            eprintln!("Reason: {err}");
            process::exit(1);
        }
    };

    match cli::run_check(&json) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(1);
        }
    }
}
