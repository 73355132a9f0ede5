use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use simplelog::LevelFilter;
use term_snake::game::GameConfig;
use term_snake::logging;
use term_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "term_snake")]
#[command(version, about = "Snake in the terminal, steered by keys, mouse or swipes")]
struct Cli {
    /// Board width in pixels
    #[arg(long, default_value = "600")]
    canvas_width: u32,

    /// Board height in pixels
    #[arg(long, default_value = "400")]
    canvas_height: u32,

    /// Edge length of one grid cell in pixels
    #[arg(long, default_value = "20")]
    cell_size: u32,

    /// Milliseconds between snake moves
    #[arg(long, default_value = "150")]
    tick_ms: u64,

    /// Touch-style controls: tap anywhere to steer instead of following the mouse
    #[arg(long)]
    touch: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        let config = GameConfig {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            cell_size: self.cell_size,
            tick_interval_ms: self.tick_ms,
            seed: self.seed,
            ..Default::default()
        };
        if self.touch {
            config.touch()
        } else {
            config
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli.game_config();
    config.validate()?;

    logging::init(&cli.log_file, cli.log_level)?;
    let grid = config.grid();
    info!(
        "Starting on a {}x{} grid, {}ms per tick",
        grid.width, grid.height, config.tick_interval_ms
    );

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
