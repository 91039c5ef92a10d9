//! Writing received values out.

use crate::StopFlag;
use std::io::{self, Write};
use tracing::{info, warn};

/// Writes `value` on its own line.
///
/// A broken pipe means the reader went away (e.g. piped into `head`), so the
/// run is stopped. Any other write error is logged and the value is lost.
pub fn write_value<W: Write>(out: &mut W, value: i32, stop: &StopFlag) {
    match writeln!(out, "{}", value) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            if !stop.is_stopped() {
                info!("output closed, stopping");
            }
            stop.stop();
        }
        Err(e) => warn!(error = %e, value, "failed to write value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingWriter(io::ErrorKind);

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(self.0))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_one_value_per_line() {
        let stop = StopFlag::new();
        let mut out = Vec::new();
        write_value(&mut out, 7, &stop);
        write_value(&mut out, 42, &stop);
        assert_eq!(out, b"7\n42\n");
        assert!(!stop.is_stopped());
    }

    #[test]
    fn test_broken_pipe_stops_run() {
        let stop = StopFlag::new();
        write_value(&mut FailingWriter(io::ErrorKind::BrokenPipe), 1, &stop);
        assert!(stop.is_stopped());
    }

    #[test]
    fn test_other_errors_keep_running() {
        let stop = StopFlag::new();
        write_value(&mut FailingWriter(io::ErrorKind::Other), 1, &stop);
        assert!(!stop.is_stopped());
    }
}
