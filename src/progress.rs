// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A cosmetic progress ticker: a thread that prints a dot at a fixed
//! interval until it is told the render is over.

use crossbeam::channel::{bounded, RecvTimeoutError, Sender};
use std::io::{self, Write};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Interval between dots.
pub const TICK: Duration = Duration::from_millis(100);

/// A running ticker.  Dropping it without calling
/// [`finish`](Progress::finish) also stops the thread.
pub struct Progress {
    done: Sender<String>,
    ticker: JoinHandle<usize>,
}

impl Progress {
    /// Starts printing dots to stdout every `interval`.
    pub fn start(interval: Duration) -> Progress {
        Progress::start_with(interval, io::stdout())
    }

    /// Starts printing dots to `out` every `interval`.
    pub fn start_with<W: Write + Send + 'static>(interval: Duration, mut out: W) -> Progress {
        let (done, finished) = bounded::<String>(1);
        let ticker = thread::spawn(move || {
            let mut dots = 0;
            loop {
                match finished.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        dots += 1;
                        let _ = write!(out, ".").and_then(|_| out.flush());
                    }
                    Ok(message) => {
                        let _ = writeln!(out, "\n\n{}", message);
                        return dots;
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        let _ = writeln!(out);
                        return dots;
                    }
                }
            }
        });
        Progress { done, ticker }
    }

    /// Stops the ticker, prints `message` on a line of its own, and
    /// returns how many dots were printed.
    pub fn finish(self, message: &str) -> usize {
        let _ = self.done.send(message.to_string());
        self.ticker.join().unwrap_or(0)
    }

    /// Stops the ticker without a message.  Only the line of dots is
    /// ended, so a diagnostic on stderr follows it directly.
    pub fn abort(self) -> usize {
        let Progress { done, ticker } = self;
        drop(done);
        ticker.join().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn ticks_until_finished() {
        let out = Captured::default();
        let progress = Progress::start_with(Duration::from_millis(5), out.clone());
        thread::sleep(Duration::from_millis(60));
        let dots = progress.finish("done");
        assert!(dots > 0);
        let text = String::from_utf8(out.0.lock().unwrap().clone()).unwrap();
        assert!(text.starts_with('.'));
        assert!(text.ends_with("\n\ndone\n"));
        assert_eq!(text.matches('.').count(), dots);
    }

    #[test]
    fn aborting_ends_the_line_without_blank_lines() {
        let out = Captured::default();
        let dots = Progress::start_with(Duration::from_secs(60), out.clone()).abort();
        assert_eq!(dots, 0);
        assert_eq!(String::from_utf8(out.0.lock().unwrap().clone()).unwrap(), "\n");
    }

    #[test]
    fn finishing_immediately_prints_only_the_message() {
        let out = Captured::default();
        let dots = Progress::start_with(Duration::from_secs(60), out.clone()).finish("bye");
        assert_eq!(dots, 0);
        assert_eq!(String::from_utf8(out.0.lock().unwrap().clone()).unwrap(), "\n\nbye\n");
    }
}
