//! play-bench - Play PBN boards out with AI players
//!
//! Reads a PBN file, plays every board with a contract from the opening lead
//! to the last trick, and writes a JSON report comparing declarer's tricks
//! with each board's [Result] tag, along with search counters.
//!
//! Usage: play-bench --input <file.pbn> [--declarer minimax:8] [--defenders heuristic]

use bridge_play::{parse_boards, run_boards, AiVariant, Difficulty, PlayConfig, Report};
use clap::Parser;
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "play-bench")]
#[command(about = "Play PBN boards with AI players and report trick results")]
#[command(version)]
struct Args {
    /// Input PBN file
    #[arg(short = 'i', long = "input", required = true)]
    input: String,

    /// Output JSON report (if not specified, writes to stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Player for the declaring side: heuristic, minimax:<depth>, or a
    /// difficulty name
    #[arg(short = 'd', long = "declarer", default_value = "advanced")]
    declarer: String,

    /// Player for the defending side
    #[arg(short = 'D', long = "defenders", default_value = "heuristic")]
    defenders: String,

    /// JSON engine configuration
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    /// Print the player each difficulty resolves to and exit
    #[arg(long = "list-players")]
    list_players: bool,

    /// Verbose output - log each board and search
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => PlayConfig::from_path(path)?,
        None => PlayConfig::default(),
    };

    if args.list_players {
        for difficulty in Difficulty::ALL {
            println!("{:<12} {}", difficulty.name(), difficulty.variant(&config.tiers));
        }
        return Ok(());
    }

    let declarer = AiVariant::parse(&args.declarer, &config.tiers)?;
    let defenders = AiVariant::parse(&args.defenders, &config.tiers)?;

    let content = fs::read_to_string(&args.input)
        .map_err(|e| format!("reading input file '{}': {e}", args.input))?;
    let boards = parse_boards(&content)?;
    info!(boards = boards.len(), %declarer, %defenders, "playing corpus");

    let report = run_boards(&boards, declarer, defenders, &config);
    summarize(&report);

    let json = serde_json::to_string_pretty(&report)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json + "\n")
                .map_err(|e| format!("writing output file '{path}': {e}"))?;
            info!(path = %path, "report written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn summarize(report: &Report) {
    let totals = &report.totals;
    info!(
        played = totals.played,
        errors = totals.errors,
        made = totals.made,
        matched = totals.matched_expected,
        with_expected = totals.with_expected,
        mean_difference = totals.mean_difference,
        nodes = totals.search.nodes,
        nps = totals.search.nodes_per_sec as u64,
        "corpus complete"
    );
}
