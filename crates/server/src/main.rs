use anyhow::{Context, Result};
use carbon_chat::{AnsweringEngine, GeminiEngine, StubEngine};
use carbon_server::{app, AppState};
use carbon_store::CarbonContext;
use clap::{Parser, ValueEnum};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "carbon-server", version, about = "BIM carbon dashboard and chat service")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Allow binding a non-loopback address.
    #[arg(long)]
    public: bool,

    /// Answering engine backend.
    #[arg(long, value_enum, default_value = "gemini")]
    engine: EngineKind,

    /// Expose /api/debug/context.
    #[arg(long)]
    debug_routes: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EngineKind {
    /// Gemini generateContent API (requires GEMINI_API_KEY).
    Gemini,
    /// Deterministic local stub, no external calls.
    Stub,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();

    if !args.public && !args.bind.ip().is_loopback() {
        anyhow::bail!(
            "Refusing to bind non-loopback address {} without --public",
            args.bind
        );
    }

    // Load-then-freeze: the store is validated before the listener starts,
    // and any integrity failure aborts startup.
    let store = Arc::new(
        CarbonContext::load_default().context("carbon context failed its integrity checks")?,
    );

    let engine: Arc<dyn AnsweringEngine> = match args.engine {
        EngineKind::Gemini => {
            let api_key = env::var("GEMINI_API_KEY")
                .or_else(|_| env::var("API_KEY"))
                .unwrap_or_default();
            Arc::new(
                GeminiEngine::new(api_key)
                    .context("set GEMINI_API_KEY (or API_KEY) to use the gemini engine")?,
            )
        }
        EngineKind::Stub => Arc::new(StubEngine::with_reply(
            "Modo stub: nenhuma chamada externa foi feita.",
        )),
    };

    let state = AppState::new(store, engine, args.debug_routes);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    log::info!("carbon-server listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
