use log::Log;
use sr_base::logging::{init_file_logger, init_stdout_logger, FileLogger, StdoutLogger};
use std::fs;

fn record_at(level: log::Level, line: u32, args: std::fmt::Arguments<'_>) -> log::Record<'_> {
    log::RecordBuilder::new()
        .level(level)
        .target("test")
        .file(Some("frame.rs"))
        .line(Some(line))
        .args(args)
        .build()
}

#[test]
fn test_stdout_logger_accepts_records() {
    let logger = StdoutLogger;
    let metadata = log::MetadataBuilder::new()
        .level(log::Level::Debug)
        .target("test")
        .build();
    assert!(logger.enabled(&metadata));

    logger.log(&record_at(log::Level::Info, 7, format_args!("LR shape: [1, 1, 64, 64]")));
    logger.flush();
}

#[test]
fn test_file_logger_writes_formatted_line() {
    let test_dir = std::env::temp_dir().join(format!("sr-log-test-{}-write", std::process::id()));
    let _ = fs::remove_dir_all(&test_dir);

    let logger = FileLogger::new(&test_dir).expect("Failed to create FileLogger");
    logger.log(&record_at(log::Level::Error, 100, format_args!("inference failed")));
    logger.flush();

    let entries: Vec<_> = fs::read_dir(&test_dir)
        .expect("Failed to read test directory")
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(entries.len(), 1, "Should have exactly one log file");

    let content = fs::read_to_string(entries[0].path()).expect("Failed to read log file");
    assert!(content.contains("[ERROR]"));
    assert!(content.contains("thread:"));
    assert!(content.contains("frame.rs:100"));
    assert!(content.contains("inference failed"));
    assert!(content.ends_with('\n'));

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn test_init_stdout_logger_is_idempotent() {
    init_stdout_logger();
    init_stdout_logger();
    log::info!("Model loaded.");
}

#[test]
fn test_init_file_logger_invalid_dir_returns_error() {
    let result = init_file_logger("/proc/nonexistent/path");
    assert!(result.is_err());
}
