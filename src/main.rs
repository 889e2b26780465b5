use clap::Parser;
use transport_solver::adapters::{solve_request, ErrorResponse, Payload, SolveResponse};
use transport_solver::core::SettingsProvider;
use transport_solver::utils::error::{ErrorSeverity, SolverError};
use transport_solver::utils::{logger, validation::Validate};
use transport_solver::{CliConfig, SolverOptions, TransportEngine};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting transport-solver CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        fail(&e, config.pretty);
    }

    let engine = TransportEngine::new(SolverOptions {
        trace: config.trace(),
    });

    let outcome = config
        .to_request()
        .and_then(|request| solve_request(&engine, &request));

    match outcome {
        Ok(solution) => {
            tracing::info!(
                method = %solution.method,
                total_cost = solution.total_cost,
                unmet = solution.unmet(),
                "Allocation complete"
            );
            let payload = Payload::Solved(SolveResponse::from_solution(
                &solution,
                config.trim_dummy(),
            ));
            println!("{}", payload.to_json(config.pretty)?);
        }
        Err(e) => fail(&e, config.pretty),
    }

    Ok(())
}

fn fail(e: &SolverError, pretty: bool) -> ! {
    tracing::error!(
        "Solve failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    if let Ok(json) = Payload::Failed(ErrorResponse::from(e)).to_json(pretty) {
        println!("{}", json);
    }
    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::High => 1,    // rejected input
        ErrorSeverity::Medium => 2,  // infeasible problem
        ErrorSeverity::Critical => 3, // internal or I/O failure
    };
    std::process::exit(exit_code);
}
