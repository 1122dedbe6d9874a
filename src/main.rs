use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::{
    config::{Config, StoreBackend},
    memory::{HaikuStore, InMemoryHaikuStore, MongodbHaikuStore},
    scheduler::Scheduler,
    server::AppState,
    services::openai::{ChatCompletionsClient, ChatCompletionsConfig},
};

mod config;
mod environment;
mod error;
mod memory;
mod prompts;
mod renderer;
mod scheduler;
mod sensors;
mod server;
mod services;
mod text_processor;
mod types;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Use simulated sensor data instead of Raspberry Pi pins, even with ENVIRONMENT=pi
    #[arg(long)]
    test: bool,

    /// Address to serve HTTP on, overrides LISTEN_ADDR
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Args::parse()).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), anyhow::Error> {
    if dotenv::dotenv().is_err() {
        info!("No .env file found, using environment variables");
    }

    let config = Config::from_env()?;
    info!(?config, "Configuration loaded");

    let (store, mongo): (Arc<dyn HaikuStore>, Option<Arc<MongodbHaikuStore>>) =
        match config.store_backend {
            StoreBackend::Mongodb => {
                let mongo = MongodbHaikuStore::connect(&config.mongodb_uri, &config.mongodb_database)
                    .await?;
                mongo.ping().await?;
                info!("Successfully connected and pinged MongoDB");

                let mongo = Arc::new(mongo);
                let store: Arc<dyn HaikuStore> = mongo.clone();
                (store, Some(mongo))
            }
            StoreBackend::Memory => {
                info!("Using in-memory haiku store, haikus will not survive a restart");
                let store: Arc<dyn HaikuStore> = Arc::new(InMemoryHaikuStore::new());
                (store, None)
            }
        };

    let generator = Arc::new(ChatCompletionsClient::new(ChatCompletionsConfig::from(&config))?);
    let sensor = sensors::reader_for(config.environment, args.test);

    let scheduler = Scheduler::new(
        sensor,
        generator,
        store.clone(),
        config.poll_interval,
        config.max_records,
    )
    .spawn();

    let listen_addr = args.listen.unwrap_or_else(|| config.listen_addr.clone());
    let served = server::run(AppState::new(store), &listen_addr).await;

    scheduler.abort();
    let _ = scheduler.await;

    if let Some(mongo) = mongo.and_then(Arc::into_inner) {
        mongo.shutdown().await;
    }

    served
}
