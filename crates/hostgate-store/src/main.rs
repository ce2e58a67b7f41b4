//! hostgate admin binary.
//!
//! Inspect and edit stored request rules, or ask for the effective decision
//! of one fetch.

use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use hostgate_core::error::{HostGateError, Result};
use hostgate_core::{Permission, RequestKind};
use hostgate_store::{app_state::AppState, config};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Store config file
    #[arg(long, env = "HOSTGATE_CONFIG", default_value = "hostgate.yaml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stored row of a host pair
    Get { frame_host: String, request_host: String },

    /// Store one slot of a host pair
    Set {
        frame_host: String,
        request_host: String,
        /// `global` or a request kind (image, css, script, ...)
        slot: Slot,
        /// allow | deny | undecided
        permission: Permission,
    },

    /// Print the effective decision for one fetch
    Check {
        frame_host: String,
        request_host: String,
        kind: RequestKind,
    },
}

/// Target slot of a write; `global` addresses slot 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot(Option<RequestKind>);

impl FromStr for Slot {
    type Err = HostGateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "global" => Ok(Slot(None)),
            kind => Ok(Slot(Some(kind.parse()?))),
        }
    }
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error [{}]: {e}", e.code().as_str());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = config::load_from_file(&cli.config)?;
    let state = AppState::new(&cfg)?;
    let policy = state.policy();

    match cli.command {
        Command::Get { frame_host, request_host } => {
            let row = policy.row(&frame_host, &request_host)?;
            println!("global: {}", row.global);
            for kind in RequestKind::ALL {
                println!("{kind}: {}", row.get(Some(kind)));
            }
        }
        Command::Set {
            frame_host,
            request_host,
            slot,
            permission,
        } => {
            policy.decide(&frame_host, &request_host, slot.0, permission)?;
            tracing::info!(
                frame_host = %frame_host,
                request_host = %request_host,
                slot = ?slot.0,
                %permission,
                "rule updated"
            );
        }
        Command::Check {
            frame_host,
            request_host,
            kind,
        } => {
            println!("{}", policy.check(&frame_host, &request_host, kind)?.as_str());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use super::*;

    #[test]
    fn parses_set_with_kind_slot() {
        let cli = Cli::try_parse_from([
            "hostgate", "--config", "rules.yaml", "set", "example.com", "ads.example.com", "script", "deny",
        ])
        .unwrap();
        assert_eq!(cli.config, "rules.yaml");
        match cli.command {
            Command::Set { slot, permission, .. } => {
                assert_eq!(slot, Slot(Some(RequestKind::Script)));
                assert_eq!(permission, Permission::Deny);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_global_slot() {
        let cli = Cli::try_parse_from(["hostgate", "set", "*", "", "global", "allow"]).unwrap();
        match cli.command {
            Command::Set { slot, request_host, .. } => {
                assert_eq!(slot, Slot(None));
                assert_eq!(request_host, "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_check() {
        let cli = Cli::try_parse_from(["hostgate", "check", "a.example", "b.example", "unsecured_http"]).unwrap();
        match cli.command {
            Command::Check { kind, .. } => assert_eq!(kind, RequestKind::UnsecuredHttp),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_kind_and_permission() {
        assert!(Cli::try_parse_from(["hostgate", "check", "a", "b", "font"]).is_err());
        assert!(Cli::try_parse_from(["hostgate", "set", "a", "b", "image", "maybe"]).is_err());
    }
}
