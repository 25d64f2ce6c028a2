use anotrack_client::core::config::Config;
use anotrack_client::core::http::ApiClient;
use anotrack_client::features::admin::AdminService;
use anotrack_client::features::anomalies::{AnomalyList, AnomalyService};
use anotrack_client::features::auth::{AuthService, Route, SessionStore};
use anotrack_client::features::catalog::SelectionCascade;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(2)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded: api={}, request_timeout={:?}, tokio_worker_threads={}",
        config.api.base_url,
        config.api.request_timeout,
        worker_threads
    );

    let api = Arc::new(ApiClient::new(config.api.clone())?);
    let session = SessionStore::new();
    let auth_service = AuthService::new(api.clone(), session.clone());

    let Some(credentials) = config.credentials else {
        tracing::warn!("ANOTRACK_USERNAME / ANOTRACK_PASSWORD not set, nothing to do");
        return Ok(());
    };

    let route = match auth_service
        .sign_in(&credentials.username, &credentials.password)
        .await
    {
        Ok(route) => route,
        Err(e) => {
            tracing::error!("Sign in failed: {}", e.user_message());
            return Err(e.into());
        }
    };
    tracing::info!("Signed in as {}, next screen: {:?}", credentials.username, route);

    match route {
        Route::AdminDashboard => {
            let admin_service = AdminService::new(api.clone(), session.clone());
            let users = admin_service.list_employees().await?;
            tracing::info!("{} employee accounts registered", users.len());
        }
        Route::AnomalyList => {
            let mut cascade = SelectionCascade::new(api.clone(), session.clone());
            let blocs = cascade.load_blocs().await?.to_vec();
            tracing::info!("{} blocs available", blocs.len());

            if let Some(first) = blocs.into_iter().next() {
                let name = first.name.clone();
                let machines = cascade.choose_bloc(first).await?;
                tracing::info!("Bloc {} holds {} machines", name, machines.len());
            }

            let anomaly_service = AnomalyService::new(api.clone(), session.clone());
            let mut list = AnomalyList::new();
            let loaded = anomaly_service.load_unassigned(&mut list).await?;
            tracing::info!("{} unassigned anomalies", loaded);
        }
        Route::Login => tracing::warn!("Session ended before any screen was loaded"),
    }

    auth_service.sign_out().await;
    Ok(())
}
