use anyhow::Result;
use clap::Parser;
use isolation_ai::{AiEngine, EngineAgent};
use isolation_arena::{run_tournament, Args, BookStorage};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("isolation_arena=debug".parse()?))
        .init();

    info!("Isolation 对战平台启动中...");

    let config = Args::parse().into_config()?;

    let storage = match &config.book_path {
        Some(path) => BookStorage::new(path.clone()),
        None => BookStorage::at_default_path()?,
    };
    let book = storage.load(config.board_size)?;

    let engine = AiEngine::new(config.engine.clone()).with_book(book);
    let mut agent = EngineAgent::new("engine", engine);

    let standings = run_tournament(&config, &mut agent)?;
    for standing in &standings {
        info!(
            "对 {}: {} 胜 {} 负（胜率 {:.0}%）",
            standing.opponent,
            standing.wins,
            standing.losses,
            standing.win_rate() * 100.0
        );
    }

    if let Some(book) = agent.engine_mut().take_book() {
        info!(hit_rate = book.stats().hit_rate(), "opening book usage");
        storage.save(&book)?;
    }

    Ok(())
}
