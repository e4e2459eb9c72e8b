mod args;
mod config;
mod dirs;
mod logging;

use std::io;

use quota_app::{AppPaths, AppState, ensure_app_data_dir};
use serde::Serialize;
use tracing::info;

use crate::args::Command;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::parse_args().map_err(|err| {
        eprintln!("{err}");
        args::print_help();
        io::Error::new(io::ErrorKind::InvalidInput, "invalid arguments")
    })?;

    let config_dir = dirs::resolve_config_dir().map_err(io::Error::other)?;
    let config = config::load_or_create(&config_dir, args.config.as_deref())
        .map_err(io::Error::other)?;
    logging::init(config.config.log_json);
    if config.created {
        info!(path = %config.paths.file.display(), "created default config");
    }

    let paths = AppPaths::new(config.paths.dir.clone());
    ensure_app_data_dir(&paths).map_err(|err| io::Error::other(err.to_string()))?;

    let app_state = AppState::from_config(config.app_config(args.db.clone()))
        .map_err(|err| io::Error::other(format!("failed to load plan catalog: {}", err)))?;
    app_state
        .initialize()
        .map_err(|err| io::Error::other(format!("failed to initialize database: {}", err)))?;

    run(&app_state, args.command).map_err(|err| io::Error::other(err.to_string()))?;
    Ok(())
}

fn run(app_state: &AppState, command: Command) -> quota_app::Result<()> {
    let quota = &app_state.services.quota;
    match command {
        Command::Plans => print_json(quota.catalog()),
        Command::Cap { plan } => print_json(&serde_json::json!({
            "plan": quota_core::PlanTier::new(&plan),
            "cap": quota.get_cap(&plan)?,
        })),
        Command::Usage { tenant } => print_json(&quota.get_usage(&tenant)?),
        Command::Remaining { tenant } => print_json(&serde_json::json!({
            "tenant": tenant,
            "remaining": quota.get_remaining_capacity(&tenant)?,
        })),
        Command::Check { tenant, incoming } => {
            print_json(&quota.check_admission(&tenant, incoming)?)
        }
        Command::PlanDeletions { tenant, target_cap } => {
            print_json(&quota.calculate_deletions_for_cap(&tenant, target_cap)?)
        }
        Command::Candidates { tenant, count } => {
            print_json(&quota.get_oldest_candidates(&tenant, count)?)
        }
        Command::Enforce { tenant, target_cap } => {
            info!(tenant = %tenant, target_cap, "enforcing cap on operator request");
            print_json(&quota.enforce_cap(&tenant, target_cap)?)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> quota_app::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
