use luthier_logger::{LevelFilter, Logger};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn json_file_logging_writes_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .name("luthier-file-logging")
        .console(false)
        .level(LevelFilter::INFO)
        .directory(&log_dir)
        .json(true)
        .init()?;

    assert!(logger.guard().is_some());
    tracing::info!(namespace = "dimensions", loaded = 3, "Namespace loaded");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(log_file)?;
    assert!(contents.contains("\"namespace\":\"dimensions\""), "json fields expected: {contents}");

    Ok(())
}
