use checkout_app::{backend, shell};
use checkout_core::application::CheckoutController;
use checkout_core::config::{Backend, Config};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for API_BASE_URL / CHECKOUT_BACKEND when present.
    let _ = dotenvy::dotenv();
    // stdout belongs to the shell.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let input = BufReader::new(tokio::io::stdin());
    let output = tokio::io::stdout();

    match config.backend {
        Backend::Http => {
            let (orders, coupons) = backend::http_clients(&config)?;
            shell::run(CheckoutController::new(orders, coupons), input, output).await
        }
        Backend::Memory => {
            let (orders, coupons) = backend::memory_services();
            shell::run(CheckoutController::new(orders, coupons), input, output).await
        }
    }
}
