//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `roster_core` linkage with a deterministic ping.
//! - Print the statistics snapshot of the configured store.
//!
//! Usage: `roster [config.toml]`. `ROSTER_*` variables override the file.
//! Logs go to stderr unless `log_dir` (`ROSTER_LOG_DIR`, absolute) is set.

use log::info;
use roster_core::{
    flush_logs, init_logging, ConnectionProvider, LogSettings, SqliteStudentRepository,
    StoreConfig, StudentService,
};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("roster_core ping={}", roster_core::ping());
    println!("roster_core version={}", roster_core::core_version());

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let log_settings = LogSettings::load(config_path.as_deref()).unwrap_or_else(|err| {
        eprintln!("invalid logging configuration, using stderr: {err}");
        LogSettings::stderr()
    });
    if let Err(err) = init_logging(&log_settings) {
        eprintln!("logging disabled: {err}");
    }

    let config = match StoreConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("store driver={} address={}", config.driver, config.address);

    let provider = ConnectionProvider::new(config);
    let service = StudentService::new(SqliteStudentRepository::new(&provider));
    let stats = service.statistics();
    info!(
        "event=cli_stats module=cli status={:?} total={}",
        stats.status(),
        stats.value().total
    );

    let snapshot = stats.value();
    println!("total={}", snapshot.total);
    println!("highest={:.2}", snapshot.highest);
    println!("lowest={:.2}", snapshot.lowest);
    println!("average={:.2}", snapshot.average);
    provider.release();
    flush_logs();

    if stats.is_failed() {
        eprintln!("store unavailable; values above are sentinels");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
