mod config;
mod game_loop;
mod render;
mod simulate;

use std::time::Duration;

use clap::{Parser, Subcommand};
use tictactoe_engine::config::Validate;
use tictactoe_engine::games::SessionRng;
use tictactoe_engine::games::tictactoe::{Difficulty, GameSession};
use tictactoe_engine::{log, logger};
use tokio::io::BufReader;

use config::Config;
use game_loop::run_game_loop;
use simulate::run_simulation;

#[derive(Parser)]
#[command(name = "tictactoe", about = "Tic-tac-toe against a friend or the computer")]
struct Args {
    /// YAML config file; missing files fall back to defaults
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: String,

    /// pvp or bot
    #[arg(long)]
    mode: Option<String>,

    /// easy, medium or hard
    #[arg(long)]
    difficulty: Option<String>,

    /// player or bot
    #[arg(long)]
    first_turn: Option<String>,

    /// Mark played by the human in bot mode (X or O)
    #[arg(long)]
    mark: Option<String>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    bot_delay_ms: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Do not write log lines to stderr
    #[arg(long)]
    quiet: bool,

    /// Store the effective settings back into the config file
    #[arg(long)]
    save_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play interactively (default)
    Play,
    /// Play bots against each other and print the tally
    Simulate {
        #[arg(long, default_value_t = 100)]
        games: u32,
        /// Difficulty of the X bot
        #[arg(long, default_value = "hard")]
        x: String,
        /// Difficulty of the O bot
        #[arg(long, default_value = "hard")]
        o: String,
    },
}

fn apply_overrides(mut config: Config, args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    if let Some(mode) = &args.mode {
        config.game.mode = mode.parse()?;
    }
    if let Some(difficulty) = &args.difficulty {
        config.game.difficulty = difficulty.parse()?;
    }
    if let Some(first_turn) = &args.first_turn {
        config.game.first_turn = first_turn.parse()?;
    }
    if let Some(mark) = &args.mark {
        config.game.player_mark = mark.parse()?;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(bot_delay_ms) = args.bot_delay_ms {
        config.bot_delay_ms = bot_delay_ms;
    }
    config.use_log_prefix |= args.use_log_prefix;
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = config::get_config_manager(&args.config);
    let config = apply_overrides(config_manager.get_config()?, &args)?;

    if !args.quiet {
        let prefix = config.use_log_prefix.then(|| "TicTacToe".to_string());
        logger::init_logger(prefix);
    }

    if args.save_config {
        config_manager.set_config(&config)?;
        log!("Saved settings to {}", args.config);
    }

    let rng = match config.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Using seed {}", rng.seed());

    match args.command.unwrap_or(Command::Play) {
        Command::Play => {
            let mut session = GameSession::new(config.game, rng);
            let input = BufReader::new(tokio::io::stdin());
            let mut output = std::io::stdout();
            run_game_loop(
                &mut session,
                input,
                &mut output,
                Duration::from_millis(config.bot_delay_ms),
            )
            .await?;
        }
        Command::Simulate { games, x, o } => {
            let x_difficulty: Difficulty = x.parse()?;
            let o_difficulty: Difficulty = o.parse()?;
            let summary = run_simulation(games, x_difficulty, o_difficulty, rng)?;
            println!("{}", summary);
        }
    }

    Ok(())
}
