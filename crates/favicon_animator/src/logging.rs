//! `tracing` subscriber setup.
//!
//! In the browser, formatted events go to the devtools console at a matching
//! level. Elsewhere they go to stderr.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Filter used when the caller's directive does not parse.
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Later calls are ignored.
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let formatting_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .without_time();

    #[cfg(target_arch = "wasm32")]
    let formatting_layer = formatting_layer.with_writer(console::ConsoleMakeWriter);
    #[cfg(not(target_arch = "wasm32"))]
    let formatting_layer = formatting_layer.with_writer(std::io::stderr);

    let subscriber = Registry::default()
        .with(env_filter)
        .with(formatting_layer);
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Initialize logging for tests.
///
/// Output is captured by the test harness and only shown for failures.
pub fn init_test() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let formatting_layer = fmt::layer().with_target(true).with_test_writer();

        let subscriber = Registry::default()
            .with(env_filter)
            .with(formatting_layer);

        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    /// Hands each formatted event to `console.*` as a single line.
    pub struct ConsoleMakeWriter;

    pub struct ConsoleWriter {
        level: Level,
        buffer: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let line = String::from_utf8_lossy(&self.buffer);
            let message = JsValue::from_str(line.trim_end());
            match self.level {
                Level::ERROR => web_sys::console::error_1(&message),
                Level::WARN => web_sys::console::warn_1(&message),
                Level::INFO => web_sys::console::info_1(&message),
                _ => web_sys::console::debug_1(&message),
            }
        }
    }

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter {
                level: Level::INFO,
                buffer: Vec::new(),
            }
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter {
                level: *meta.level(),
                buffer: Vec::new(),
            }
        }
    }
}
