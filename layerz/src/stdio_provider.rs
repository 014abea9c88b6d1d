//! Stdio front end: reads and writes the core's fixed-size `Event` record
//! directly on standard input/output, so `layerz` can sit in a pipeline
//! behind `intercept` and in front of `uinput`.

use std::io::{self, Read, Write};

use layerz_core::{Event, EventProvider};

pub struct StdioProvider {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl StdioProvider {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl EventProvider for StdioProvider {
    /// `timeout_ms` is ignored: stdin has no notion of a poll timeout here,
    /// and the core only ever calls this with `0` (block indefinitely).
    fn read_event(&mut self, _timeout_ms: u32) -> Option<Event> {
        let mut buf = [0u8; Event::SIZE];
        let mut filled = 0;
        while filled < buf.len() {
            match self.stdin.read(&mut buf[filled..]) {
                Ok(0) => {
                    if filled == 0 {
                        return None; // clean end-of-stream
                    }
                    log::error!("short read on stdin: got {filled} of {} bytes", buf.len());
                    std::process::exit(1);
                }
                Ok(n) => filled += n,
                Err(err) => {
                    log::error!("read error on stdin: {err}");
                    std::process::exit(1);
                }
            }
        }
        Event::from_bytes(&buf)
    }

    fn write_event(&mut self, event: Event) {
        if let Err(err) = self.stdout.write_all(event.as_bytes()) {
            log::error!("write error on stdout: {err}");
            std::process::exit(1);
        }
        if let Err(err) = self.stdout.flush() {
            log::error!("flush error on stdout: {err}");
            std::process::exit(1);
        }
    }
}
