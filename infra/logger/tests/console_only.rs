use luthier_logger::{LevelFilter, Logger};

#[test]
fn console_only_logger_has_no_file_guard() {
    let logger = Logger::builder()
        .name("luthier-console-only")
        .console(true)
        .resolution_spans(true)
        .level(LevelFilter::DEBUG)
        .init()
        .expect("logger should initialize");

    let span = tracing::debug_span!("resolve", namespace = "dimensions", name = "gender");
    span.in_scope(|| tracing::debug!("building"));

    assert!(logger.guard().is_none(), "console-only logger should not create a file guard");
}
