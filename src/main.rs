use botgrid::{ArenaConfig, Game, Outcome, Renderer, RobotRegistry, config, logging};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Arena config file of whitespace-separated `key value` pairs.
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Robots to load, comma-separated, in load order. Defaults to every built-in robot.
    #[arg(long, value_delimiter = ',')]
    robots: Vec<String>,

    /// Seed for hazard placement and damage rolls. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between rounds even if the config file does not ask for it.
    #[arg(long)]
    watch: bool,

    /// List the built-in robots and exit.
    #[arg(long)]
    list_robots: bool,

    /// Debug filter to specify log topics (e.g., "drive,weapon")
    /// Available topics: robot, drive, weapon, scan, round
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Err(e) = logging::init_logger(logging::parse_level(&args.log_level), args.debug_filter) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    let registry = RobotRegistry::with_builtin();
    if args.list_robots {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut arena_config = match ArenaConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}. Using default settings.", e);
            ArenaConfig::default()
        }
    };
    arena_config.watch_live |= args.watch;

    let names: Vec<String> = if args.robots.is_empty() {
        registry.names().into_iter().map(String::from).collect()
    } else {
        args.robots
            .into_iter()
            .filter(|name| {
                let known = registry.contains(name);
                if !known {
                    warn!("Unknown robot {:?}, see --list-robots.", name);
                }
                known
            })
            .collect()
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Seed {}.", seed);

    let mut game = Game::new(arena_config, &registry, &names, seed);
    let mut renderer = Renderer::stdout();
    match game.run(&mut renderer)? {
        Outcome::Winner { index, round } => {
            info!("{} won after {} round(s).", game.roster[index].name, round + 1)
        }
        Outcome::Timeout { last_round } => info!("No winner after {} rounds.", last_round + 1),
        Outcome::NoRobots => info!("Nothing to simulate."),
    }
    info!("Exiting botgrid.");
    Ok(())
}
