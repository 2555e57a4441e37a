use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use twenty48::best_score::{BestScore, BestScoreStore};
use twenty48::config::GameConfig;
use twenty48::game::Game;
use twenty48::game_loop::GameLoop;
use twenty48::ui::ConsoleUI;

#[derive(Parser, Debug)]
#[command(name = "twenty48", about = "2048 in the terminal")]
struct Args {
    /// Optional JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Where the best score is kept (overrides the config file).
    #[arg(long)]
    best_score_file: Option<PathBuf>,
}

fn init_logging(cfg: &GameConfig) -> anyhow::Result<()> {
    let file = File::create(&cfg.log_path)
        .with_context(|| format!("creating log file {}", cfg.log_path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(path) = args.best_score_file {
        cfg.best_score_path = path;
    }

    init_logging(&cfg)?;
    log::info!("config: {:?}", cfg);

    let best = BestScore::load(BestScoreStore::new(&cfg.best_score_path));
    let mut game_loop = GameLoop::new(Game::new(), best, cfg.game_over_pause());

    let mut ui = ConsoleUI::init(cfg.frame_interval()).context("initializing terminal")?;
    game_loop.run(&mut ui)?;
    Ok(())
}
