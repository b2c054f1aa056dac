//! Integration tests for signal instrumentation.

use std::io;
use std::sync::Arc;

use keylist_core::logging::targets;
use keylist_core::Signal;
use parking_lot::Mutex;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture<F: FnOnce()>(f: F) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.text()
}

#[test]
fn blocked_emit_is_traced() {
    let output = capture(|| {
        let signal = Signal::<u8>::new();
        signal.set_blocked(true);
        signal.emit(1);
    });

    assert!(output.contains("signal blocked, skipping emit"), "{output}");
    assert!(output.contains(targets::SIGNAL), "{output}");
}

#[test]
fn emit_records_connection_count() {
    let output = capture(|| {
        let signal = Signal::<u8>::new();
        signal.connect(|_| {});
        signal.connect(|_| {});
        signal.emit(1);
    });

    assert!(output.contains("connection_count=2"), "{output}");
}
