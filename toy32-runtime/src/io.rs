//! I/O handling
//!
//! The engine talks to the outside world only through [`IoDevices`]:
//! blocking byte and line input, byte output, clearing the output device,
//! and a timed delay.

use std::collections::VecDeque;
use std::io::{self, BufRead, Read, Write};
use std::time::Duration;

/// ANSI sequence that clears a terminal and homes the cursor
pub const CLEAR_SEQUENCE: &[u8] = b"\x1b[2J\x1b[H";

/// Device collaborators used by IO and CTL/SLEEP instructions
pub trait IoDevices {
    /// Block until exactly `n` bytes are available
    fn read_bytes(&mut self, n: usize) -> io::Result<Vec<u8>>;

    /// Read one line without its terminator; `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>>;

    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;

    fn clear(&mut self) -> io::Result<()>;

    fn delay(&mut self, duration: Duration);
}

impl<T: IoDevices + ?Sized> IoDevices for &mut T {
    fn read_bytes(&mut self, n: usize) -> io::Result<Vec<u8>> {
        (**self).read_bytes(n)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line()
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write(bytes)
    }

    fn clear(&mut self) -> io::Result<()> {
        (**self).clear()
    }

    fn delay(&mut self, duration: Duration) {
        (**self).delay(duration)
    }
}

/// Process stdin/stdout and the real clock
#[derive(Debug, Default)]
pub struct StdIo;

impl IoDevices for StdIo {
    fn read_bytes(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut buf = vec![0; n];
        io::stdin().lock().read_exact(&mut buf)?;
        Ok(buf)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        self.write(CLEAR_SEQUENCE)
    }

    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// In-memory devices: scripted input, captured output, recorded delays
#[derive(Debug, Clone, Default)]
pub struct IOHandler {
    input: VecDeque<u8>,
    output: Vec<u8>,
    clears: usize,
    delays: Vec<Duration>,
}

impl IOHandler {
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        IOHandler {
            input: input.into().into(),
            ..Self::default()
        }
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Output decoded lossily as UTF-8
    pub fn output_string(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Number of times the output device was cleared
    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    /// Bytes not yet consumed
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl IoDevices for IOHandler {
    fn read_bytes(&mut self, n: usize) -> io::Result<Vec<u8>> {
        if self.input.len() < n {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("needed {} input bytes, {} available", n, self.input.len()),
            ));
        }
        Ok(self.input.drain(..n).collect())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        if self.input.is_empty() {
            return Ok(None);
        }
        let end = self
            .input
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.input.len(), |i| i + 1);
        let bytes: Vec<u8> = self.input.drain(..end).collect();
        let line = String::from_utf8_lossy(&bytes);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.output.clear();
        self.clears += 1;
        Ok(())
    }

    fn delay(&mut self, duration: Duration) {
        self.delays.push(duration);
    }
}
