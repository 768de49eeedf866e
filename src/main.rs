use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use warden::config::WatchdogConfig;
use warden::session::TmuxHost;
use warden::task::TaskDir;
use warden::validation::{validate_session_name, validate_task_dir};
use warden::watchdog::{Outcome, SystemClock, Watchdog};

#[derive(Parser)]
#[command(name = "warden")]
#[command(about = "Watchdog for hosted coding-agent sessions", long_about = None)]
#[command(version)]
struct Cli {
    /// tmux session hosting the agent
    session: String,

    /// Task directory containing the pid/done/exit_code contract files
    task_dir: PathBuf,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    validate_session_name(&cli.session)?;
    validate_task_dir(&cli.task_dir)?;

    println!(
        "Watching session '{}' (task dir: {})",
        cli.session.bold(),
        cli.task_dir.display()
    );

    let mut watchdog = Watchdog::new(
        WatchdogConfig::default(),
        TmuxHost::new(cli.session.clone()),
        SystemClock,
        TaskDir::new(&cli.task_dir),
    );

    match watchdog.run()? {
        Outcome::Completed(code) => {
            println!("{} Agent completed (exit code: {code})", "✓".green().bold());
        }
        Outcome::SessionGone => {
            println!(
                "{} Session '{}' no longer exists, stopping",
                "✗".red().bold(),
                cli.session
            );
        }
        Outcome::DeadlineExceeded => {
            println!(
                "{} Wall-clock budget exhausted before completion, giving up",
                "!".yellow().bold()
            );
        }
    }

    Ok(())
}
