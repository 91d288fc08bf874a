//! GhostLink terminal remote control
//!
//! Opens the serial port, then either runs the interactive menu tree or,
//! with `--send`, a single command cycle whose output goes to stdout.

mod cli;
mod clock;
mod config;
mod error;
mod oneshot;
mod serial_port;
mod storage;
mod terminal;

use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::Parser;
use ghostlink_core::menu::{ghost_esp, MenuId};
use ghostlink_core::{Bridge, BridgeError, Controller};
use ghostlink_protocol::{Action, Catalog, Command};
use log::{debug, error, info};

use crate::cli::Cli;
use crate::clock::StdClock;
use crate::config::HostConfig;
use crate::error::HostError;
use crate::oneshot::StreamSurface;
use crate::serial_port::SerialLink;
use crate::storage::DirStore;
use crate::terminal::{spawn_stdin_reader, Terminal};

/// Read when no `--config` is given and the file exists
const DEFAULT_CONFIG: &str = "ghostlink.toml";

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("ghostlink: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<HostConfig> {
    let config = match &cli.config {
        Some(path) => HostConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG).is_file() => {
            HostConfig::load(Path::new(DEFAULT_CONFIG))?
        }
        None => HostConfig::default(),
    };
    Ok(config.merge(cli))
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    let catalog = config.catalog().context("building command catalog")?;

    if cli.list_actions {
        for action in Action::ALL {
            println!("{:<24} {}", action.key(), catalog.spelling(*action));
        }
        return Ok(());
    }

    let port = config.port()?;
    let link = SerialLink::open(port, &config.link.uart())?;
    let clock = StdClock::new();

    if let Some(text) = &cli.send {
        let command = resolve(text, &catalog)?;
        let mut bridge = Bridge::new(link, clock, config.session.bridge);
        let mut surface = StreamSurface::new(io::stdout(), Duration::from_millis(cli.listen_ms));
        let cycle = bridge
            .send_command(&command, MenuId::ROOT, &mut surface)
            .map_err(|BridgeError::Transport(e)| anyhow!(e))
            .with_context(|| format!("writing '{command}' to {port}"))?;
        info!("{} bytes in {} reads", surface.bytes(), cycle.reads);
        return Ok(());
    }

    let tree = ghost_esp().map_err(HostError::from)?;
    let mut controller = Controller::from_config(link, clock, tree, catalog, &config.session);
    let ansi = io::stdout().is_terminal();
    let mut terminal = Terminal::new(spawn_stdin_reader(), io::stdout(), ansi);
    let mut store = DirStore::new(&config.payloads.root);
    debug!("payloads from {}", store.root().display());

    let summary = controller.run(&mut terminal, &mut store);
    info!(
        "{} cycles, {} rejected inputs, {} write failures",
        summary.cycles, summary.rejected_inputs, summary.transport_errors
    );
    debug!("last response was {} bytes", terminal.log().byte_count());
    Ok(())
}

/// An action key goes through the catalog; anything else is sent verbatim
fn resolve(text: &str, catalog: &Catalog) -> anyhow::Result<Command> {
    let command = match Action::from_key(text) {
        Some(action) => catalog.command(action, None),
        None => Command::new(text),
    };
    Ok(command.map_err(HostError::from)?)
}
