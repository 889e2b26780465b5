use clap::Parser;
use serde::Serialize;
use std::time::Instant;
use transport_solver::adapters::{handle_request, Payload};
use transport_solver::config::toml_config::{FailurePolicy, TomlConfig};
use transport_solver::core::SettingsProvider;
use transport_solver::utils::{logger, validation::Validate};
use transport_solver::{Method, SolverOptions, TransportEngine};

#[derive(Parser)]
#[command(name = "toml-solve")]
#[command(about = "Solve a batch of transportation problems described in a TOML file")]
struct Args {
    /// Path to TOML problem file
    #[arg(short, long, default_value = "problems.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the method for every problem
    #[arg(long)]
    method: Option<String>,

    /// Validate and list the problems without solving them
    #[arg(long)]
    dry_run: bool,
}

#[derive(Serialize)]
struct ProblemOutcome<'a> {
    name: &'a str,
    #[serde(flatten)]
    payload: Payload,
}

#[derive(Serialize)]
struct BatchSummary<'a> {
    batch: &'a str,
    total_problems: usize,
    solved: usize,
    failed: usize,
    total_cost: f64,
    elapsed_ms: u128,
    results: Vec<ProblemOutcome<'a>>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("Loading problem set from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config file '{}': {}", args.config, e);
            eprintln!("Make sure the file exists and is valid TOML");
            std::process::exit(1);
        }
    };

    // command line override applies to every problem
    if let Some(method) = &args.method {
        for problem in &mut config.problems {
            problem.method = Some(method.clone());
        }
        tracing::info!("Method overridden to: {}", method);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if args.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    let engine = TransportEngine::new(SolverOptions {
        trace: args.verbose || config.trace(),
    });
    let default_method = config.method().to_string();
    let started = Instant::now();

    let mut results = Vec::new();
    let mut stopped_early = false;
    for problem in config.enabled_problems() {
        tracing::info!("Solving problem '{}'", problem.name);
        let request = problem.to_request(&default_method);
        let payload = handle_request(&engine, &request, config.trim_dummy());

        let failed = matches!(payload, Payload::Failed(_));
        results.push(ProblemOutcome {
            name: &problem.name,
            payload,
        });

        if failed && config.failure_policy() == FailurePolicy::Stop {
            tracing::warn!("Stopping batch after failure in '{}'", problem.name);
            stopped_early = true;
            break;
        }
    }

    let solved = results
        .iter()
        .filter(|r| matches!(r.payload, Payload::Solved(_)))
        .count();
    let total_cost: f64 = results
        .iter()
        .filter_map(|r| match &r.payload {
            Payload::Solved(response) => Some(response.total_cost),
            Payload::Failed(_) => None,
        })
        .sum();

    let summary = BatchSummary {
        batch: &config.batch.name,
        total_problems: results.len(),
        solved,
        failed: results.len() - solved,
        total_cost,
        elapsed_ms: started.elapsed().as_millis(),
        results,
    };

    let json = if config.pretty_output() {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };

    if let Some(path) = config.summary_path() {
        std::fs::write(path, &json)?;
        tracing::info!("Summary saved to: {}", path);
    }
    println!("{}", json);

    tracing::info!(
        solved = summary.solved,
        failed = summary.failed,
        "Batch '{}' finished",
        summary.batch
    );

    if stopped_early || summary.failed > 0 {
        std::process::exit(2);
    }

    Ok(())
}

fn print_dry_run(config: &TomlConfig) {
    println!("Batch: {}", config.batch.name);
    if let Some(description) = &config.batch.description {
        println!("  {}", description);
    }
    println!("  Default method: {}", config.method());
    println!("  Trim dummy: {}", config.trim_dummy());
    println!(
        "  On failure: {}",
        match config.failure_policy() {
            FailurePolicy::Stop => "stop",
            FailurePolicy::Continue => "continue",
        }
    );
    println!();

    for problem in &config.problems {
        let method = problem
            .method
            .as_deref()
            .unwrap_or(config.method())
            .parse::<Method>()
            .map(|m| m.to_string())
            .unwrap_or_else(|e| e.to_string());
        let status = if problem.is_enabled() { "enabled" } else { "disabled" };
        println!("  - {} [{}] method={}", problem.name, status, method);
    }
}
