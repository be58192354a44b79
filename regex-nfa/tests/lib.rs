mod properties;

/// Installs a logger for the `logging` feature's output. Safe to call from
/// every test.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
