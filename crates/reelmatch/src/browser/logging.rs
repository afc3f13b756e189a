//! `tracing` output routed to the browser console.

use std::io;
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

/// Collects one formatted event and hands it to `console.log` when dropped.
#[derive(Debug, Default)]
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        web_sys::console::log_1(&JsValue::from_str(line.trim_end()));
    }
}

/// [`MakeWriter`] producing a fresh [`ConsoleWriter`] per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::default()
    }
}

/// Install the panic hook and a console subscriber. Safe to call twice.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // No clock in the formatter: `SystemTime` is unavailable on wasm32.
    let installed = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
    if installed.is_ok() {
        tracing::debug!("console logging ready");
    }
}
