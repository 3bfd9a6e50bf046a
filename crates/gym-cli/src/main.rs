mod clock;
mod config;
mod console;
mod interrupt;
mod menu;
mod render;

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use gym_db::MemberStore;

use clock::LocalClock;
use config::GymConfig;
use console::Console;
use menu::Menu;

#[derive(Parser)]
#[command(name = "gym", about = "Gym membership roster manager")]
struct Cli {
    /// Roster file (overrides GYM_DATA_FILE env var)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Name greeted on the main menu (overrides GYM_OWNER env var)
    #[arg(long, global = true)]
    owner: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a gym config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { force }) => cmd_init(cli.data_file, cli.owner, force),
        None => run_menu(cli.data_file, cli.owner),
    }
}

/// Execute `gym init`: write the config file.
fn cmd_init(data_file: Option<PathBuf>, owner: Option<String>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let data_file = data_file.unwrap_or_else(|| PathBuf::from(gym_db::StoreConfig::DEFAULT_PATH));
    let owner = owner.unwrap_or_else(|| config::DEFAULT_OWNER.to_string());

    let cfg = config::ConfigFile {
        store: config::StoreSection {
            data_file: Some(data_file.clone()),
        },
        display: config::DisplaySection {
            owner: Some(owner.clone()),
        },
    };
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  store.data_file = {}", data_file.display());
    println!("  display.owner = {owner}");

    Ok(())
}

/// Load the roster and run the interactive menu until the operator leaves.
fn run_menu(data_file: Option<PathBuf>, owner: Option<String>) -> anyhow::Result<()> {
    let resolved = GymConfig::resolve(data_file, owner);
    interrupt::install();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let clear_screens = stdout.is_terminal();
    let mut console = Console::new(stdin.lock(), stdout.lock(), clear_screens);

    let (store, status) = MemberStore::open(&resolved.store_config);
    if let Some(notice) = render::load_notice(&status) {
        writeln!(console, "{notice}").context("failed to write to terminal")?;
        console.pause().context("failed to read from terminal")?;
    }

    let mut menu = Menu::new(store, resolved.owner, LocalClock);
    menu.run(&mut console).context("terminal I/O failed")?;
    Ok(())
}
