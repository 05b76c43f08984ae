//! SkillRep CLI: deploy a ledger and its privacy endorser, replay
//! operations against them, inspect profiles.

mod config;
mod ops;
mod store;

use anyhow::{bail, Context};
use clap::Parser;
use config::DeploymentConfig;
use ops::Operation;
use serde_json::{json, Value};
use skillrep_ledger::ProfileLedger;
use skillrep_privacy::PrivacyEndorser;
use skillrep_types::Address;
use std::path::PathBuf;
use store::DataDir;

#[derive(Parser)]
#[command(name = "skillrep", about = "Identity-gated skill reputation ledger")]
struct Cli {
    /// Path to a TOML configuration file. CLI flags and env vars override
    /// its settings.
    #[arg(long, env = "SKILLREP_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory holding the deployment.
    #[arg(long, env = "SKILLREP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "SKILLREP_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create a fresh deployment in the data directory.
    Deploy,
    /// Replay a JSON array of operations, saving only if all succeed.
    Apply {
        /// Path to the operations file.
        ops: PathBuf,
    },
    /// Print one participant's profile.
    Show {
        address: Address,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => DeploymentConfig::from_toml_file(path)?,
        None => DeploymentConfig::default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }

    skillrep_utils::init_logging(config.log_format, &config.log_level);
    if let Some(ref path) = cli.config {
        tracing::info!(path = %path.display(), "loaded config");
    }

    let output = match cli.command {
        Command::Deploy => deploy(&config)?,
        Command::Apply { ops } => {
            let json = std::fs::read_to_string(&ops)
                .with_context(|| format!("reading {}", ops.display()))?;
            let ops: Vec<Operation> = serde_json::from_str(&json)
                .with_context(|| format!("parsing {}", ops.display()))?;
            apply(&config, &ops)?
        }
        Command::Show { address } => show(&config, &address)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn deploy(config: &DeploymentConfig) -> anyhow::Result<Value> {
    let data = DataDir::new(&config.data_dir);
    let mut ledger = ProfileLedger::new(config.ledger_config());
    ledger.set_config_id(&config.admin, config.config_id)?;
    ledger.set_privacy_endorser(&config.admin, config.privacy_endorser)?;
    ledger.drain_events();

    let mut endorser = PrivacyEndorser::new(config.endorser_config(), ledger);
    endorser.set_config_id(&config.admin, config.config_id)?;

    let info = data.deploy(endorser.sink(), endorser.state(), config.privacy_endorser)?;
    tracing::info!(
        data_dir = %data.root().display(),
        admin = %info.admin,
        privacy_endorser = %info.privacy_endorser,
        "deployment created"
    );
    Ok(serde_json::to_value(info)?)
}

fn open(config: &DeploymentConfig) -> anyhow::Result<(DataDir, PrivacyEndorser<ProfileLedger>)> {
    let data = DataDir::new(&config.data_dir);
    if !data.is_deployed() {
        bail!(
            "{} holds no deployment; run `skillrep deploy` first",
            data.root().display()
        );
    }
    let ledger = data.load_ledger()?;
    let state = data.load_endorser()?;
    let endorser = PrivacyEndorser::with_state(config.endorser_config(), state, ledger);
    Ok((data, endorser))
}

fn apply(config: &DeploymentConfig, ops: &[Operation]) -> anyhow::Result<Value> {
    let (data, mut endorser) = open(config)?;

    if let Err((idx, err)) = ops::apply_all(&mut endorser, ops) {
        tracing::warn!(idx, error = %err, "operation rejected; nothing saved");
        bail!("operation {idx} failed: {err}");
    }

    let events = endorser.sink_mut().drain_events();
    let snapshot = data.commit(endorser.sink(), endorser.state())?;
    tracing::info!(applied = ops.len(), events = events.len(), "operations saved");

    Ok(json!({
        "applied": ops.len(),
        "events": events,
        "summary": endorser.sink().summary(),
        "snapshot_hash": hex::encode(snapshot.hash),
    }))
}

fn show(config: &DeploymentConfig, address: &Address) -> anyhow::Result<Value> {
    let (data, endorser) = open(config)?;
    let deployment = data.load_info()?;
    let ledger = endorser.sink();
    let matrix: Vec<_> = ledger
        .get_super_endorsed_matrix(address)
        .into_iter()
        .filter(|cell| !cell.is_empty())
        .collect();

    if !ledger.is_verified(address) {
        return Ok(json!({
            "address": address,
            "verified": false,
            "super_endorsements": matrix,
            "deployment": deployment,
        }));
    }

    Ok(json!({
        "address": address,
        "verified": true,
        "profile_uri": ledger.get_profile_uri(address)?,
        "skills": ledger.get_skills(address)?,
        "super_endorsements": matrix,
        "authored_super_endorsements": ledger.super_endorsements_by(address),
        "deployment": deployment,
    }))
}
