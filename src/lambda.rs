use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use transport_solver::core::SettingsProvider;
use transport_solver::utils::logger;
use transport_solver::utils::validation::Validate;
use transport_solver::{handle_request, LambdaConfig, Payload, SolveRequest, SolverOptions, TransportEngine};

async fn function_handler(
    event: LambdaEvent<SolveRequest>,
    config: &LambdaConfig,
) -> Result<Payload, Error> {
    tracing::info!(request_id = %event.context.request_id, "Solve request received");

    let engine = TransportEngine::new(SolverOptions {
        trace: config.trace(),
    });
    let request = event.payload.with_default_method(config);
    let payload = handle_request(&engine, &request, config.trim_dummy());

    tracing::info!(status_code = payload.status_code(), "Solve request finished");
    Ok(payload)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;

    let config = &config;
    run(service_fn(move |event: LambdaEvent<SolveRequest>| async move {
        function_handler(event, config).await
    }))
    .await
}
