//! Family Router CLI
//!
//! Entry point for the `family-router` binary: one-shot resolution of a
//! snapshot, JSON Lines replay through a navigation host, and a live
//! stdin-fed host driven by tokio.

mod cli;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use family_router::config::{self, OutputFormat, RouterConfig};
use family_router::host::{self, NavigationEvent, NavigationHost};
use family_router::routing::{decision_table, DecisionRow};
use family_router::{derive_persona, logging, resolve_route, version, AuthState, Error, Profile, Result};

use crate::cli::{Cli, Commands, ConfigSubcommand};

fn main() {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Version { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&version::build_info())?);
            } else {
                version::print_version();
            }
            Ok(())
        }
        Commands::Config { subcommand } => {
            // Config commands use minimal logging
            logging::init_simple(tracing::Level::WARN)?;
            handle_config_command(subcommand)
        }
        Commands::Resolve { input, json } => {
            logging::init_simple(simple_level(cli.verbose, cli.quiet))?;
            resolve_snapshot(input.as_deref(), json)
        }
        Commands::Persona { input } => {
            logging::init_simple(simple_level(cli.verbose, cli.quiet))?;
            print_persona(input.as_deref())
        }
        Commands::Matrix { ready_only, json } => {
            logging::init_simple(simple_level(cli.verbose, cli.quiet))?;
            print_matrix(ready_only, json)
        }
        Commands::Replay { input, config, json } => {
            let config = RouterConfig::load(config.as_deref())?;
            // The guards must be kept alive until output is done
            let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;
            log_startup();

            let format = if json { OutputFormat::Json } else { config.host.output };
            replay(&config, input.as_deref(), format)
        }
        Commands::Follow { config } => {
            let config = RouterConfig::load(config.as_deref())?;
            let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;
            log_startup();

            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(|e| Error::Internal(format!("Failed to create runtime: {}", e)))?;
            let result = rt.block_on(follow_stdin(config));

            // A stdin read still parked on a blocking thread would keep a
            // plain runtime drop waiting until the next line arrives.
            rt.shutdown_background();
            result
        }
    }
}

/// Log level for commands that run without loading configuration.
fn simple_level(verbose: u8, quiet: bool) -> tracing::Level {
    match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::WARN,
        (false, 1) => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

fn log_startup() {
    let build = version::build_info();
    info!(
        version = %build.full_version(),
        target = %build.target,
        profile = %build.profile,
        "Starting family router"
    );
}

// ─────────────────────────────────────────────────────────────────
// One-shot commands
// ─────────────────────────────────────────────────────────────────

fn read_single_snapshot(input: Option<&str>) -> Result<AuthState> {
    let text = host::read_input(input)?;
    let state = host::parse_snapshot(&text)?;

    for issue in state.consistency_issues() {
        warn!(issue = %issue, "Inconsistent snapshot");
    }

    Ok(state)
}

fn resolve_snapshot(input: Option<&str>, json: bool) -> Result<()> {
    let state = read_single_snapshot(input)?;
    let decision = resolve_route(&state);
    debug!(decision = ?decision, "Resolved");

    if json {
        println!("{}", serde_json::to_string(&decision)?);
    } else {
        match decision {
            Some(decision) => println!("{}", decision),
            None => println!("wait"),
        }
    }

    Ok(())
}

fn print_persona(input: Option<&str>) -> Result<()> {
    let state = read_single_snapshot(input)?;

    match derive_persona(&state) {
        Some(persona) => println!("{}", persona),
        None => println!("none"),
    }

    Ok(())
}

fn print_matrix(ready_only: bool, json: bool) -> Result<()> {
    let rows = decision_table()
        .into_iter()
        .filter(|row| !ready_only || row.state.is_ready());

    if !json {
        println!(
            "{:<7} {:<22} {:<6} {:<7} {:<5} {:<5} {:<17} DECISION",
            "SESSION", "PROFILE", "FAMILY", "PENDING", "AUTH", "STORE", "PERSONA"
        );
    }

    for row in rows {
        if json {
            println!("{}", serde_json::to_string(&row)?);
        } else {
            println!("{}", format_row(&row));
        }
    }

    Ok(())
}

fn format_row(row: &DecisionRow) -> String {
    let state = &row.state;
    let persona = row.persona.map(|p| p.slug()).unwrap_or("none");
    let decision = match &row.decision {
        Some(decision) => decision.to_string(),
        None => "wait".to_string(),
    };

    format!(
        "{:<7} {:<22} {:<6} {:<7} {:<5} {:<5} {:<17} {}",
        state.session,
        describe_profile(state.profile.as_ref()),
        state.family.is_some(),
        state.pending_join_request,
        state.auth_ready,
        state.store_ready,
        persona,
        decision
    )
}

/// Compact profile shape, e.g. "kid+passcode+family_id".
fn describe_profile(profile: Option<&Profile>) -> String {
    let Some(profile) = profile else {
        return "-".to_string();
    };

    let mut shape = profile.role.slug().to_string();
    if profile.passcode.is_some() {
        shape.push_str("+passcode");
    }
    if profile.family_id.is_some() {
        shape.push_str("+family_id");
    }
    shape
}

// ─────────────────────────────────────────────────────────────────
// Navigation host commands
// ─────────────────────────────────────────────────────────────────

fn emit(event: &NavigationEvent, report_idle: bool, format: OutputFormat) -> Result<()> {
    if report_idle || !event.outcome.is_idle() {
        println!("{}", event.render(format)?);
    }
    Ok(())
}

/// Apply a JSON Lines file to a fresh host, in order.
fn replay(config: &RouterConfig, input: Option<&str>, format: OutputFormat) -> Result<()> {
    let text = host::read_input(input)?;
    let snapshots = host::parse_snapshot_stream(&text)?;
    info!(count = snapshots.len(), "Replaying snapshots");

    let mut nav = NavigationHost::new(config.host.consistency);
    for snapshot in snapshots {
        let event = nav.apply(snapshot)?;
        emit(&event, config.host.report_idle, format)?;
    }

    let stats = nav.stats();
    info!(
        applied = stats.applied,
        navigations = stats.navigations,
        holds = stats.holds,
        unchanged = stats.unchanged,
        "Replay finished"
    );

    Ok(())
}

/// Feed stdin into the async host driver until EOF or Ctrl+C.
async fn follow_stdin(config: RouterConfig) -> Result<()> {
    let (snapshot_tx, snapshot_rx) = watch::channel(None);
    let (event_tx, mut event_rx) = mpsc::channel(64);

    let driver = tokio::spawn(host::follow(
        NavigationHost::new(config.host.consistency),
        snapshot_rx,
        event_tx,
    ));
    let reader = tokio::spawn(publish_stdin(snapshot_tx));

    // Set up graceful shutdown on Ctrl+C
    let shutdown_signal = tokio::signal::ctrl_c();
    tokio::pin!(shutdown_signal);

    info!("Following snapshots on stdin");

    loop {
        tokio::select! {
            // Polled first so the handler is registered before any event is printed
            biased;

            _ = &mut shutdown_signal => {
                info!("Shutdown signal received");
                break;
            }

            event = event_rx.recv() => match event {
                Some(event) => emit(&event, config.host.report_idle, config.host.output)?,
                None => break,
            },
        }
    }

    // Dropping the publisher and the event receiver lets the driver finish.
    reader.abort();
    drop(event_rx);
    match reader.await {
        Ok(result) => result?,
        Err(e) if e.is_cancelled() => debug!("Stdin reader cancelled"),
        Err(e) => return Err(Error::Internal(format!("Stdin reader failed: {}", e))),
    }

    let nav = driver
        .await
        .map_err(|e| Error::Internal(format!("Host driver failed: {}", e)))?;

    let stats = nav.stats();
    info!(
        applied = stats.applied,
        navigations = stats.navigations,
        rejected = stats.rejected,
        current = ?nav.current(),
        "Follow finished"
    );

    Ok(())
}

/// Publish each stdin line as the latest snapshot. Malformed lines are
/// logged and skipped so a live feed survives a bad producer.
async fn publish_stdin(tx: watch::Sender<Option<AuthState>>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_no = 0;

    while let Some(line) = lines.next_line().await.map_err(|e| Error::IoRead {
        path: "<stdin>".into(),
        source: e,
    })? {
        line_no += 1;
        match host::parse_snapshot_line(line_no, &line) {
            Ok(Some(snapshot)) => {
                tx.send_replace(Some(snapshot));
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e.format_for_log(), "Skipping snapshot"),
        }
    }

    debug!(lines = line_no, "Stdin closed");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────
// Config commands
// ─────────────────────────────────────────────────────────────────

fn handle_config_command(subcommand: ConfigSubcommand) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show { config } => {
            let cfg = RouterConfig::load(config.as_deref())?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            let created = config::init_config(path.as_deref(), force)?;
            println!("Created configuration file: {}", created.display());
        }
        ConfigSubcommand::Validate { config } => {
            RouterConfig::load(config.as_deref())?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use family_router::types::Family;

    #[test]
    fn test_simple_level() {
        assert_eq!(simple_level(0, false), tracing::Level::WARN);
        assert_eq!(simple_level(1, false), tracing::Level::DEBUG);
        assert_eq!(simple_level(3, false), tracing::Level::TRACE);
        assert_eq!(simple_level(2, true), tracing::Level::ERROR);
    }

    #[test]
    fn test_describe_profile() {
        assert_eq!(describe_profile(None), "-");
        assert_eq!(describe_profile(Some(&Profile::guardian("g1"))), "guardian");
        assert_eq!(
            describe_profile(Some(&Profile::kid("k1").with_passcode("1").with_family_id("f1"))),
            "kid+passcode+family_id"
        );
    }

    #[test]
    fn test_format_row_wait() {
        let row = DecisionRow {
            state: AuthState::new().with_family(Family::new("f1")),
            persona: None,
            decision: None,
        };
        let line = format_row(&row);
        assert!(line.starts_with("false"));
        assert!(line.ends_with("wait"));
    }
}
