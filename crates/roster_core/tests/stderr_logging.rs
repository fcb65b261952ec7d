use log::error;
use roster_core::{flush_logs, init_logging, logging_status, LogSettings};

#[test]
fn logging_without_a_directory_goes_to_stderr() {
    let settings = LogSettings {
        level: "warn".to_string(),
        ..LogSettings::stderr()
    };
    assert_eq!(settings.log_dir, None);

    init_logging(&settings).unwrap();
    init_logging(&settings).unwrap();
    error!("event=stderr_logging_test module=tests status=error");
    flush_logs();

    let (level, log_dir) = logging_status().unwrap();
    assert_eq!(level, "warn");
    assert_eq!(log_dir, None);

    let to_file = LogSettings {
        level: "warn".to_string(),
        log_dir: Some(std::env::temp_dir().join("roster-stderr-switch")),
    };
    assert!(init_logging(&to_file)
        .unwrap_err()
        .contains("refusing to switch"));
}
