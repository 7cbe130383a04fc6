use std::io::{self, Write};
use std::path::Path;
use std::{env, fs};

use anyhow::{anyhow, Context};
use clap::Parser;
use dock_interact::cli::{Cli, Sub};
use dock_interact::replay::{parse_trace, Replayer};
use dock_interact::utils::config_path;
use dock_interact_config::Config;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "dock_interact=debug";

fn main() -> anyhow::Result<()> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    match cli.subcommand {
        Sub::Replay {
            trace,
            config,
            strict,
        } => {
            let config = load_config(config_path(config).as_deref(), strict)?;

            let text = fs::read_to_string(&trace)
                .with_context(|| format!("error reading trace {trace:?}"))?;
            let entries = parse_trace(&text)?;
            info!("replaying {} events from {trace:?}", entries.len());

            let output = Replayer::run(&config, entries)?;

            let mut stdout = io::stdout().lock();
            for intent in output {
                let line = serde_json::to_string(&intent)?;
                writeln!(stdout, "{line}")?;
            }
        }
        Sub::CheckConfig { config } => {
            let path = config_path(config).context("no config path; pass --config")?;
            Config::load(&path).map_err(|err| anyhow!("{err:?}"))?;
            info!("config is valid");
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, strict: bool) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    if !path.exists() {
        if strict {
            return Err(anyhow!("config file {path:?} does not exist"));
        }
        info!("{path:?} does not exist, using the default config");
        return Ok(Config::default());
    }

    match Config::load(path) {
        Ok(config) => Ok(config),
        Err(err) if strict => Err(anyhow!("{err:?}")),
        Err(err) => {
            warn!("{err:?}");
            warn!("using the default config");
            Ok(Config::default())
        }
    }
}
