//! Serin CLI
//!
//! Generates serializable companions for `[SerializeInterface]` fields.

use std::io;

use serinc::commands::{explain_error, run_analyze, run_check, run_gen, Options};
use serinc::CliError;

fn main() {
    serinc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let result = match command.as_str() {
        "gen" | "generate" => with_options(&args[2..], |options, out| run_gen(options, out)),
        "check" => with_options(&args[2..], |options, out| run_check(options, out)),
        "analyze" => with_options(&args[2..], |options, out| run_analyze(options, out)),
        "explain" | "--explain" => {
            if args.len() < 3 {
                eprintln!("Usage: serin explain <ERROR_CODE>");
                eprintln!("Example: serin explain E2004");
                std::process::exit(1);
            }
            explain_error(&args[2]).map(|text| {
                println!("{text}");
                true
            })
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(true)
        }
        "version" | "--version" | "-V" => {
            println!("serin {}", env!("CARGO_PKG_VERSION"));
            Ok(true)
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    }
}

fn with_options(
    args: &[String],
    command: impl FnOnce(&Options, &mut io::StdoutLock<'static>) -> Result<bool, CliError>,
) -> Result<bool, CliError> {
    let options = Options::parse(args)?;
    command(&options, &mut io::stdout().lock())
}

fn print_usage() {
    println!("serin - companion generator for [SerializeInterface] fields");
    println!();
    println!("Usage: serin <command> [options] [paths...]");
    println!();
    println!("Commands:");
    println!("  gen [paths...]       Generate companion sources");
    println!("  check [paths...]     Analyze and report, without generating");
    println!("  analyze [paths...]   Print the analysis as JSON");
    println!("  explain <code>       Explain an error code (e.g., E2004)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Paths are .cs files or directories (searched recursively).");
    println!("The current directory is used when none are given.");
    println!();
    println!("Options:");
    println!("  -o, --out <dir>      Write generated units into <dir> (gen)");
    println!("  --no-parallel        Analyze classes sequentially");
    println!("  --no-helpers         Skip InstantiateInterface helpers");
    println!("  --no-cast-warnings   Drop failed casts silently at runtime");
    println!("  --quiet-skips        Do not warn about skipped marker fields");
    println!("  --marker=<name>      Marker attribute name (default: SerializeInterface)");
    println!("  --color=<mode>       auto, always or never");
    println!();
    println!("Environment:");
    println!("  RUST_LOG=serin_gen=debug   Trace the generator");
    println!("  SERIN_LOG_TREE=1           Hierarchical trace output");
    println!();
    println!("Examples:");
    println!("  serin gen Assets/Scripts -o Assets/Generated");
    println!("  serin check Assets --quiet-skips");
    println!("  serin analyze Player.cs > analysis.json");
    println!("  serin explain E4001");
}
