//! Integration tests for the logging pipeline
//!
//! These tests exercise:
//! - Logger and per-sink level gates working independently
//! - Per-sink formatters rendering the same message differently
//! - Auto-flush pushing buffered file output to disk
//! - Size-based rotation end to end through a logger
//! - The process-wide registry and factory helpers

use patternlog::sinks::{FileSink, RotatingFileSink, Sink, SinkRef};
use patternlog::{Level, Logger, LoggerError, PatternFormatter};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn file_sink(path: &std::path::Path, pattern: &str) -> SinkRef {
    let sink = FileSink::new(path, false).expect("failed to create file sink");
    sink.set_formatter(Box::new(PatternFormatter::new(pattern)));
    Arc::new(sink)
}

#[test]
fn test_fan_out_independence() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let strict_path = temp_dir.path().join("strict.log");
    let verbose_path = temp_dir.path().join("verbose.log");

    let strict = file_sink(&strict_path, "%v");
    strict.set_level(Level::Warn);
    let verbose = file_sink(&verbose_path, "%v");
    verbose.set_level(Level::Trace);

    let logger = Logger::with_sinks("fanout", vec![strict, verbose]);
    logger.set_level(Level::Trace);

    logger.debug("debug only for the verbose sink");
    logger.error("error for both sinks");
    logger.flush();

    let strict_content = fs::read_to_string(&strict_path).unwrap();
    let verbose_content = fs::read_to_string(&verbose_path).unwrap();

    assert_eq!(strict_content, "error for both sinks\n");
    assert_eq!(
        verbose_content,
        "debug only for the verbose sink\nerror for both sinks\n"
    );
}

#[test]
fn test_logger_gate_rejects_before_sinks() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let path = temp_dir.path().join("gated.log");

    let sink = file_sink(&path, "%v");
    sink.set_level(Level::Trace);

    let logger = Logger::with_sink("gated", sink);
    logger.set_level(Level::Warn);

    logger.info("rejected by the logger despite a permissive sink");
    logger.warn("accepted");
    logger.flush();

    assert_eq!(fs::read_to_string(&path).unwrap(), "accepted\n");
}

#[test]
fn test_per_sink_formatters() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let brief_path = temp_dir.path().join("brief.log");
    let tagged_path = temp_dir.path().join("tagged.log");

    let brief = file_sink(&brief_path, "%v");
    let tagged = file_sink(&tagged_path, "[%l][%n] %v");

    let logger = Logger::with_sinks("fmt", vec![brief, tagged]);
    logger.warn("same message");
    logger.flush();

    assert_eq!(fs::read_to_string(&brief_path).unwrap(), "same message\n");
    assert_eq!(
        fs::read_to_string(&tagged_path).unwrap(),
        "[W][fmt] same message\n"
    );
}

#[test]
fn test_auto_flush_threshold_hits_disk() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let path = temp_dir.path().join("autoflush.log");

    let logger = Logger::with_sink("autoflush", file_sink(&path, "%v"));
    logger.flush_on(Level::Error);

    logger.info("sits in the writer buffer");
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "",
        "info must not auto-flush below the threshold"
    );

    logger.error("forces every sink to flush");
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "sits in the writer buffer\nforces every sink to flush\n"
    );
}

#[test]
fn test_rotation_through_logger() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let path = temp_dir.path().join("rotated.log");

    let sink = RotatingFileSink::new(&path, 100, 2).expect("failed to create rotating sink");
    sink.set_formatter(Box::new(PatternFormatter::new("%v")));
    let logger = Logger::with_sink("rotated", Arc::new(sink));

    for i in 0..30 {
        logger.info(format!("entry {:02} {}", i, "payload ".repeat(8)));
    }
    logger.flush();

    let log_files = fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("rotated"))
        .count();
    assert!(
        (2..=3).contains(&log_files),
        "expected live file plus at most 2 backups, found {}",
        log_files
    );
    assert!(path.exists());
    assert!(!temp_dir.path().join("rotated.3.log").exists());
}

#[test]
fn test_rotating_sink_rejects_bad_config() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let path = temp_dir.path().join("bad.log");

    assert!(matches!(
        RotatingFileSink::new(&path, 0, 2),
        Err(LoggerError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        RotatingFileSink::new(&path, 1024, 0),
        Err(LoggerError::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_shared_sink_between_loggers() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let path = temp_dir.path().join("shared.log");

    let sink = file_sink(&path, "[%n] %v");
    let app = Logger::with_sink("app", sink.clone());
    let db = Logger::with_sink("db", sink);

    app.info("starting");
    db.info("connected");
    app.flush();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[app] starting\n[db] connected\n"
    );
}

#[test]
fn test_concurrent_loggers_shared_sink() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let path = temp_dir.path().join("concurrent.log");

    let sink = file_sink(&path, "%v");
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let sink = sink.clone();
            std::thread::spawn(move || {
                let logger = Logger::with_sink(format!("worker-{}", t), sink);
                for i in 0..100 {
                    logger.info(format!("worker {} message {}", t, i));
                }
                logger.flush();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 400);
    assert!(lines.iter().all(|l| l.starts_with("worker ")));
}

#[test]
fn test_registry_round_trip() {
    let logger = Arc::new(Logger::new("registry-round-trip"));
    patternlog::register_logger(logger.clone()).expect("first registration");

    let found = patternlog::get_logger("registry-round-trip").expect("lookup after register");
    assert!(Arc::ptr_eq(&found, &logger));

    let err = patternlog::register_logger(Arc::new(Logger::new("registry-round-trip")))
        .expect_err("duplicate must fail");
    assert!(matches!(err, LoggerError::DuplicateLogger { .. }));

    patternlog::drop_logger("registry-round-trip");
    assert!(patternlog::get_logger("registry-round-trip").is_none());
}

#[test]
fn test_default_logger_present() {
    let default = patternlog::default_logger();
    // The initial default is an unnamed console logger; another test may
    // have replaced it, but one must always exist.
    default.info("default logger smoke message");
    patternlog::flush_all();
}

#[test]
fn test_global_logging_through_default_logger() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let path = temp_dir.path().join("global.log");

    let logger = Arc::new(Logger::with_sink("global-api", file_sink(&path, "%v")));
    patternlog::set_default_logger(logger);

    patternlog::info("info through the default logger");
    patternlog::warn("warn through the default logger");
    patternlog::off("off through the default logger");
    patternlog::flush_all();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("info through the default logger"));
    assert!(content.contains("warn through the default logger"));
    assert!(content.contains("off through the default logger"));

    // Dropping the installed default resets it to a console logger.
    patternlog::drop_logger("global-api");
    assert!(patternlog::get_logger("global-api").is_none());
}

#[test]
fn test_factory_helpers() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let file_logger = patternlog::basic_logger(
        "factory-file",
        temp_dir.path().join("factory.log"),
        false,
    )
    .expect("basic_logger");
    file_logger.info("hello from the factory");
    file_logger.flush();
    assert!(patternlog::get_logger("factory-file").is_some());

    let rotating = patternlog::rotating_logger(
        "factory-rotating",
        temp_dir.path().join("factory-rot.log"),
        1024,
        3,
    )
    .expect("rotating_logger");
    rotating.info("rotating factory logger");
    rotating.flush();

    let content = fs::read_to_string(temp_dir.path().join("factory.log")).unwrap();
    assert!(content.contains("hello from the factory"));

    patternlog::drop_logger("factory-file");
    patternlog::drop_logger("factory-rotating");
}
