//! Test suite for the runtime configuration store
//!
//! - Fixtures for configurations and layered sources
//! - Unit and property tests for path lookup and URL composition
//! - Integration tests from file/environment layers to the built store

pub mod fixtures;

/// Test configuration and utilities
pub mod config {
    use crate::config::{AppConfig, ConfigStore};
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex, Once};

    static INIT: Once = Once::new();

    /// Initialize test environment
    pub fn init() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter("debug")
                .with_test_writer()
                .try_init();
        });
    }

    /// Run `f` under a scoped subscriber and return what it logged
    pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = CaptureWriter(Arc::clone(&buffer));

        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8_lossy(&buffer.lock().expect("log buffer lock")).into_owned();
        (result, logs)
    }

    #[derive(Clone)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log buffer lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Store built from defaults for the given runtime environment tag
    pub fn store_for(tag: &str) -> ConfigStore {
        init();
        ConfigStore::new(AppConfig::default().with_runtime_env(tag))
            .expect("default configuration builds a store")
    }
}

/// Test result types
pub type TestResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
