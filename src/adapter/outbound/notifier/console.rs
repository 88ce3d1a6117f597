//! Line-oriented alert output on stdout.

use std::io::{self, Write};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::AlertRecord;
use crate::error::{Error, Result};
use crate::port::AlertSink;

const BANNER: &str = "!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!";

/// Writes each alert's text between banner lines.
pub struct ConsoleSink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }
}

#[async_trait]
impl AlertSink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    async fn send(&self, alert: &AlertRecord) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| Error::Connection("console writer poisoned".into()))?;
        writeln!(out, "{BANNER}")?;
        writeln!(out, "{}", alert.text())?;
        writeln!(out, "{BANNER}")?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SpreadResult;
    use crate::testkit::domain::market;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn alert() -> AlertRecord {
        AlertRecord::new(SpreadResult::new(
            market("Will it rain?", "1", "2", dec!(10000)),
            Some(dec!(0.48)),
            Some(dec!(0.49)),
            Utc::now(),
        ))
    }

    #[tokio::test]
    async fn writes_alert_text_between_banners() {
        let buffer = SharedBuffer::default();
        let sink = ConsoleSink::with_writer(buffer.clone());

        sink.send(&alert()).await.unwrap();

        let written = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.first(), Some(&BANNER));
        assert_eq!(lines.last(), Some(&BANNER));
        assert!(written.contains("spread 3.0000%"));
        assert!(written.contains("Will it rain?"));
    }

    #[tokio::test]
    async fn write_failure_is_reported() {
        let sink = ConsoleSink::with_writer(BrokenPipe);
        assert!(matches!(sink.send(&alert()).await, Err(Error::Io(_))));
    }
}
