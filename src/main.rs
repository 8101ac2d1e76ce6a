use apig_lambda_handler::config::Config;
use apig_lambda_handler::handler::{Handler, function_handler};
use lambda_runtime::tracing::info;
use lambda_runtime::{Error, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Use Lambda runtime's built-in tracing subscriber for CloudWatch Logs
    lambda_runtime::tracing::init_default_subscriber();

    let config = Config::from_env()?;
    info!(
        style = %config.style,
        binary_path = %config.binary_path,
        "Loaded configuration"
    );

    let handler = Handler::from_config(&config);
    let handler = &handler;

    lambda_runtime::run(service_fn(move |event| async move {
        function_handler(handler, event).await
    }))
    .await
}
