//! Buffered request reader with one-line pushback
//!
//! Wraps any `BufRead` source of request lines and adds the single piece of
//! state the protocol needs: a pushback buffer, so the engine can peek one
//! line ahead (the login lookahead) and return it to the stream unconsumed.
//!
//! # End of stream
//!
//! Exhaustion is reported as `None`, never as an error or panic; the driver
//! loop and every consumption helper treat `None` as a plain sentinel.

use std::collections::VecDeque;
use std::io::BufRead;

/// Line reader over a request stream
///
/// `next_line` drains the pushback buffer before pulling from the underlying
/// reader; `push_back` prepends, so the last line pushed back is the next
/// line returned.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    pushback: VecDeque<String>,
}

impl<R: BufRead> LineReader<R> {
    /// Wrap a buffered reader.
    pub fn new(inner: R) -> Self {
        LineReader {
            inner,
            pushback: VecDeque::new(),
        }
    }

    /// Take the next line, with its trailing line terminator stripped.
    ///
    /// Returns `None` once the pushback buffer and the underlying stream are
    /// both exhausted. Read errors are treated as end of stream: the request
    /// protocol has no way to report them mid-transaction, and a torn stream
    /// must look like a finished one.
    pub fn next_line(&mut self) -> Option<String> {
        if let Some(line) = self.pushback.pop_front() {
            return Some(line);
        }

        let mut line = String::new();
        match self.inner.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(line)
            }
        }
    }

    /// Return a line to the stream so the next `next_line` yields it.
    ///
    /// The end-of-stream sentinel is skipped: pushing back `None` is a no-op,
    /// which lets a peek-and-restore pair run unconditionally at exhaustion.
    pub fn push_back(&mut self, line: Option<String>) {
        if let Some(line) = line {
            self.pushback.push_front(line);
        }
    }

    /// Discard the next `n` lines, honoring pushback.
    ///
    /// Used to keep the stream aligned when a transaction is rejected before
    /// its parameter lines have any other consumer.
    pub fn consume(&mut self, n: usize) {
        for _ in 0..n {
            let _ = self.next_line();
        }
    }

    /// Take the next `n` lines as trimmed parameter fields.
    ///
    /// Lines past end of stream come back as empty strings so the caller
    /// always receives exactly `n` fields and the empty-field rejection can
    /// do its job.
    pub fn take_params(&mut self, n: usize) -> Vec<String> {
        (0..n)
            .map(|_| {
                self.next_line()
                    .map(|line| line.trim().to_string())
                    .unwrap_or_default()
            })
            .collect()
    }
}
