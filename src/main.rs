//! Entry point for the **snapcycle** command-line tool.
//!
//! Exposes the direction catalog and the keybinding registry for manual
//! use and scripting.  Bindings are stored in
//! `$XDG_CONFIG_HOME/snapcycle/config.json` unless `--config` is given.

use clap::{Parser, Subcommand};
use log::{error, info};
use snapcycle::catalog::{next_direction, Family};
use snapcycle::direction::Direction;
use snapcycle::keybind::{Chord, Keybinding};
use snapcycle::registry::KeybindRegistry;
use snapcycle::store::FileStore;
use snapcycle::traits::WindowMover;
use snapcycle::trigger::Dispatcher;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "snapcycle", version, about = "Window-snapping direction and keybinding tool")]
struct Cli {
    /// Settings file (defaults to $XDG_CONFIG_HOME/snapcycle/config.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the successors of a direction in the repeat cycle.
    Next {
        direction: Direction,
        #[arg(long, default_value_t = 1)]
        steps: usize,
    },
    /// Print the sibling families in order.
    Families,
    /// Print every direction with its display name.
    Names,
    /// Print the keybinding for a direction.
    Get { direction: Direction },
    /// Set the keybinding for a direction, e.g. `set top-half 55+18,56+19`.
    Set {
        direction: Direction,
        chords: Keybinding,
    },
    /// Resolve a pressed chord, e.g. `press 55+18`, and snap to it.
    Press { chord: Chord },
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/snapcycle`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("snapcycle")
}

//  Logging window mover

/// Stands in for the platform window mover: logs what would happen.
struct LogMover;

#[derive(Debug, thiserror::Error)]
#[error("log mover")]
struct LogMoverError;

impl WindowMover for LogMover {
    type Error = LogMoverError;

    fn snap(&self, direction: Direction, family: Option<Family>) -> Result<(), LogMoverError> {
        match family {
            Some(family) => info!("snap to {} ({})", direction, family),
            None => info!("snap to {}", direction),
        }
        println!("{}", direction);
        Ok(())
    }
}

//  Main

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("snapcycle: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Cmd::Next { direction, steps } => {
            let mut d = direction;
            for _ in 0..steps {
                d = next_direction(d);
                println!("{}", d);
            }
        }

        Cmd::Families => {
            for family in Family::ALL {
                let members: Vec<String> = family.members().iter().map(|d| d.to_string()).collect();
                println!("{}: {}", family, members.join(" "));
            }
        }

        Cmd::Names => {
            for d in Direction::ALL {
                println!("{:<24} {}", d, d.display_name().unwrap_or("-"));
            }
        }

        Cmd::Get { direction } => {
            let registry = open_registry(cli.config)?;
            println!("{}", registry.get_keybind(direction)?);
        }

        Cmd::Set { direction, chords } => {
            let registry = open_registry(cli.config)?;
            if !KeybindRegistry::<FileStore>::is_bindable(direction) {
                println!("{} cannot be bound; nothing changed", direction);
            }
            registry.set_keybind(direction, chords)?;
        }

        Cmd::Press { chord } => {
            let registry = open_registry(cli.config)?;
            let mut dispatcher = Dispatcher::new(registry, LogMover);
            if dispatcher.press(&chord)?.is_none() {
                println!("{} is not bound", chord);
            }
        }
    }
    Ok(())
}

fn open_registry(path: Option<PathBuf>) -> Result<KeybindRegistry<FileStore>, Box<dyn std::error::Error>> {
    let path = path.unwrap_or_else(|| config_dir().join("config.json"));
    let store = FileStore::open(&path)?;
    info!("using keybinds from {}", store.path().display());
    Ok(KeybindRegistry::new(store))
}
