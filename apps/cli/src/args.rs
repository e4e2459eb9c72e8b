use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Plans,
    Cap { plan: String },
    Usage { tenant: String },
    Remaining { tenant: String },
    Check { tenant: String, incoming: u64 },
    PlanDeletions { tenant: String, target_cap: i64 },
    Candidates { tenant: String, count: i64 },
    Enforce { tenant: String, target_cap: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub db: Option<PathBuf>,
    pub command: Command,
}

pub fn parse_args() -> Result<CliArgs, String> {
    parse_from(env::args().skip(1))
}

pub fn parse_from(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut args = args.into_iter();
    let mut config = None;
    let mut db = None;
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_string())?;
                config = Some(PathBuf::from(value));
            }
            "--db" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --db".to_string())?;
                db = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown argument: {arg}"));
            }
            _ => positional.push(arg),
        }
    }

    let command = parse_command(&positional)?;
    Ok(CliArgs {
        config,
        db,
        command,
    })
}

fn parse_command(positional: &[String]) -> Result<Command, String> {
    let Some((name, rest)) = positional.split_first() else {
        return Err("missing command".to_string());
    };
    let command = match (name.as_str(), rest) {
        ("plans", []) => Command::Plans,
        ("cap", [plan]) => Command::Cap { plan: plan.clone() },
        ("usage", [tenant]) => Command::Usage {
            tenant: tenant.clone(),
        },
        ("remaining", [tenant]) => Command::Remaining {
            tenant: tenant.clone(),
        },
        ("check", [tenant, incoming]) => Command::Check {
            tenant: tenant.clone(),
            incoming: parse_number("incoming", incoming)?,
        },
        ("plan-deletions", [tenant, target]) => Command::PlanDeletions {
            tenant: tenant.clone(),
            target_cap: parse_number("target-cap", target)?,
        },
        ("candidates", [tenant, count]) => Command::Candidates {
            tenant: tenant.clone(),
            count: parse_number("count", count)?,
        },
        ("enforce", [tenant, target]) => Command::Enforce {
            tenant: tenant.clone(),
            target_cap: parse_number("target-cap", target)?,
        },
        (
            "plans" | "cap" | "usage" | "remaining" | "check" | "plan-deletions" | "candidates"
            | "enforce",
            _,
        ) => return Err(format!("wrong number of arguments for {name}")),
        _ => return Err(format!("unknown command: {name}")),
    };
    Ok(command)
}

fn parse_number<T: std::str::FromStr>(label: &str, value: &str) -> Result<T, String> {
    value
        .parse::<T>()
        .map_err(|_| format!("invalid {label} value: {value}"))
}

pub fn print_help() {
    println!(
        "Quota CLI\n\n\
Usage:\n  quota [--config <path>] [--db <path>] <command>\n\n\
Commands:\n  plans                            List plan tiers and caps\n  cap <plan>                       Cap for a plan tier\n  usage <tenant>                   Record counts per source\n  remaining <tenant>               Records the tenant can still add\n  check <tenant> <incoming>        Admission check for a batch\n  plan-deletions <tenant> <cap>    How many records exceed a target cap\n  candidates <tenant> <count>      Oldest records, merged across sources\n  enforce <tenant> <cap>           Delete oldest records down to a target cap\n\n\
Options:\n  --config <path>  Config file to use instead of the default\n  --db <path>      Database to use for this run only\n  -h, --help       Show this help message\n"
    );
}
