#[allow(dead_code)]
mod replay;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use heckstats_core::config::EngineConfig;

use replay::{ReplayError, Replayer};

const USAGE: &str = "usage: heckstats-replay <events.jsonl> [--json] [--config=<path>]";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut path = None;
    let mut json = false;
    let mut config_path = None;
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else if let Some(p) = arg.strip_prefix("--config=") {
            config_path = Some(p.to_string());
        } else if path.is_none() && !arg.starts_with("--") {
            path = Some(arg);
        } else {
            eprintln!("unexpected argument: {arg}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    }
    let Some(path) = path else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    let config = match config_path {
        Some(p) => match std::fs::read_to_string(&p)
            .map_err(|e| e.to_string())
            .and_then(|content| EngineConfig::from_toml_str(&content).map_err(|e| e.to_string()))
        {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("failed to load {p}: {e}");
                return ExitCode::FAILURE;
            },
        },
        None => EngineConfig::load(),
    };

    match run(&path, config, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{path}: {e}");
            ExitCode::FAILURE
        },
    }
}

fn run(path: &str, config: EngineConfig, json: bool) -> Result<(), ReplayError> {
    let content = std::fs::read_to_string(path)?;
    let events = replay::parse_log(&content)?;
    tracing::info!("Replaying {} events from {path}", events.len());

    let mut replayer = Replayer::new(config);
    let snapshots = replayer.run(&events);
    if snapshots.is_empty() {
        tracing::warn!("No session completed in {path}");
    }
    for snapshot in &snapshots {
        if json {
            println!("{}", snapshot.to_json()?);
        } else {
            print!("{}", replay::format_awards(snapshot));
        }
    }
    Ok(())
}
