//! File Log Reader
//!
//! Tails a file and turns every new line into a console entry. Lines may use
//! the `::group id=..::` command syntax to open and close groups.
//!
//! A truncated file means the producer started a fresh run, so the console is
//! reset before the new lines go in.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use visual_console_layout::ConsoleHandle;
use visual_console_model::parse_line;

/// How often the tailing thread looks for new content
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Reads a file with tailing support
pub struct FileLogReader {
    path: PathBuf,
    last_position: u64,
    /// Bytes of an unterminated last line, kept until its newline arrives
    partial: Vec<u8>,
}

/// Result of one poll
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReadBatch {
    /// The file shrank since the last poll and was read from the start
    pub restarted: bool,
    /// New complete lines, without line endings
    pub lines: Vec<String>,
}

impl FileLogReader {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            last_position: 0,
            partial: Vec::new(),
        }
    }

    /// Poll for new complete lines (non-blocking)
    ///
    /// Invalid UTF-8 is replaced rather than reported, so one bad line never
    /// stalls the tail.
    pub fn poll_new_lines(&mut self) -> std::io::Result<ReadBatch> {
        let mut file = File::open(&self.path)?;
        let current_size = file.metadata()?.len();

        let mut batch = ReadBatch::default();
        if current_size < self.last_position {
            // Truncated or replaced: start over
            log::info!("{} was truncated, reading from the start", self.path.display());
            self.last_position = 0;
            self.partial.clear();
            batch.restarted = true;
        }
        if current_size == self.last_position {
            return Ok(batch); // No new content
        }

        file.seek(SeekFrom::Start(self.last_position))?;
        let mut reader = BufReader::new(file);

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf)?;
            if read == 0 {
                break;
            }
            self.last_position += read as u64;

            if buf.last() != Some(&b'\n') {
                self.partial.extend_from_slice(&buf);
                break;
            }
            let mut bytes = std::mem::take(&mut self.partial);
            bytes.extend_from_slice(&buf);
            let line = String::from_utf8_lossy(&bytes);
            batch
                .lines
                .push(line.trim_end_matches(['\n', '\r']).to_string());
        }

        Ok(batch)
    }
}

/// Queue a batch of lines, resetting the console first on a fresh run
fn forward(batch: ReadBatch, handle: &ConsoleHandle) {
    if batch.restarted {
        handle.reset();
    }
    for line in batch.lines.iter().filter(|l| !l.trim().is_empty()) {
        handle.submit(parse_line(line, handle.palette()));
    }
}

/// Spawn a thread that tails `path` into the console until the process exits
pub fn spawn_tail(path: PathBuf, handle: ConsoleHandle) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        log::info!("Tailing {}", path.display());
        let mut reader = FileLogReader::new(path);
        let mut failing = false;

        loop {
            match reader.poll_new_lines() {
                Ok(batch) => {
                    failing = false;
                    forward(batch, &handle);
                }
                Err(e) => {
                    // Report once per outage, not once per poll
                    if !failing {
                        log::warn!("Failed to read {}: {}", reader.path.display(), e);
                    }
                    failing = true;
                }
            }
            thread::sleep(POLL_INTERVAL);
        }
    })
}
