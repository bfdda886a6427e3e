//! latex-unicode CLI - replace LaTeX in text with Unicode

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use latex_unicode::host::{Command, Config, EngineState, InterceptionPoint};
use latex_unicode::{DatasetSource, StdDatasetSource};

#[derive(Parser)]
#[command(name = "latex-unicode")]
#[command(version)]
#[command(about = "Replace LaTeX commands and script notation with Unicode", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Cached dataset location (overrides the config file)
    #[arg(long, global = true)]
    cache_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace LaTeX in a file or stdin
    Replace {
        /// Input file path (reads from stdin if not provided)
        input: Option<String>,

        /// Output file path (writes to stdout if not provided)
        #[arg(short, long)]
        output: Option<String>,

        /// Interception point the text arrives at: input, send or print
        #[arg(short, long, value_parser = parse_point, default_value = "send")]
        point: InterceptionPoint,
    },

    /// Rebuild the table from the cached dataset
    Reload,

    /// Download the dataset again, then reload
    Redownload,

    /// Print the replacement table, or the symbol for one pattern
    Table {
        /// Pattern to look up, e.g. '\alpha'
        pattern: Option<String>,

        /// Only print the first N rules
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show version and dataset info
    Info,
}

fn parse_point(name: &str) -> Result<InterceptionPoint, String> {
    InterceptionPoint::from_name(name)
        .ok_or_else(|| format!("unknown point '{}' (expected input, send or print)", name))
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn load_config(cli: &Cli) -> Config {
    let mut config = match cli.config {
        Some(ref path) => Config::load(path).unwrap_or_else(|e| {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }),
        None => Config::default(),
    };
    if let Some(ref path) = cli.cache_file {
        config.dataset.cache_file = Some(path.clone());
    }
    config
}

fn read_input(input: Option<&str>) -> io::Result<Vec<u8>> {
    match input {
        Some(path) => fs::read(path),
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = load_config(&cli);
    let state: EngineState<StdDatasetSource> = EngineState::new(config.dataset.source(), config.settings);

    match run(&cli.command, &state) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: &Commands, state: &EngineState<StdDatasetSource>) -> io::Result<ExitCode> {
    match command {
        Commands::Replace {
            input,
            output,
            point,
        } => {
            if let Err(e) = state.initialize() {
                log::error!("{}", e);
                eprintln!("Error: {}", e);
                return Ok(ExitCode::FAILURE);
            }

            let raw = read_input(input.as_deref())?;
            let result = match state.intercept_bytes(*point, &raw) {
                Ok(bytes) => bytes,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return Ok(ExitCode::FAILURE);
                }
            };

            match output {
                Some(path) => {
                    fs::write(path, &result)?;
                    eprintln!("✓ Output written to: {}", path);
                }
                None => io::stdout().write_all(&result)?,
            }
        }

        Commands::Reload | Commands::Redownload => {
            let cmd = match command {
                Commands::Redownload => Command::Redownload,
                _ => Command::Reload,
            };
            if !state.execute(cmd).is_ok() {
                eprintln!("✗ {} failed (run with -v for details)", cmd);
                return Ok(ExitCode::FAILURE);
            }
            eprintln!(
                "✓ {}: {} rules from {}",
                cmd,
                state.table().len(),
                state.source().describe()
            );
        }

        Commands::Table { pattern, limit } => {
            if let Err(e) = state.reload() {
                eprintln!("Error: {}", e);
                return Ok(ExitCode::FAILURE);
            }
            let table = state.table();
            if let Some(pattern) = pattern {
                return Ok(match table.lookup(pattern) {
                    Some(symbol) => {
                        println!("{}", symbol);
                        ExitCode::SUCCESS
                    }
                    None => {
                        eprintln!("✗ no rule for {}", pattern);
                        ExitCode::FAILURE
                    }
                });
            }
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let shown = limit.unwrap_or(table.len());
            for rule in table.rules().iter().take(shown) {
                writeln!(out, "{}\t{}", rule.pattern, rule.replacement)?;
            }
        }

        Commands::Info => {
            println!("latex-unicode - LaTeX to Unicode replacement");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Dataset:");
            println!("  URL:   {}", state.source().url());
            println!("  Cache: {}", state.source().describe());
            match state.reload() {
                Ok(report) => {
                    println!("  Rules: {}", report.rules);
                    println!(
                        "         ({} mnemonic, {} command, {} ranges skipped)",
                        report.stats.mnemonic_rules,
                        report.stats.command_rules,
                        report.stats.ranges_skipped
                    );
                }
                Err(e) => println!("  Rules: unavailable ({})", e),
            }
            println!();
            println!("Hooks:");
            for point in InterceptionPoint::ALL {
                let mark = if state.hooks().contains(point) { "✓" } else { "✗" };
                println!("  {} {}", mark, point);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
