//! Append-only, line-delimited event log.
//!
//! Events buffer in memory (batch size 10 by default) and flush on
//! buffer-full, on the periodic aggregate save, and on shutdown. A
//! write failure is logged and the buffer cleared so it cannot grow
//! without bound; in-memory state stays authoritative. Reads tolerate a
//! torn final line from a crashed writer.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tilelab_types::MoveEvent;

/// Default number of events buffered before an automatic flush.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Buffered writer for the journal's JSONL file. Single writer only.
#[derive(Debug)]
pub struct EventLog {
    path: PathBuf,
    buffer: Vec<MoveEvent>,
    batch_size: usize,
}

impl EventLog {
    /// Create a log writer; the file itself is created on first flush.
    pub fn new(path: impl Into<PathBuf>, batch_size: usize) -> Self {
        Self {
            path: path.into(),
            buffer: Vec::new(),
            batch_size: batch_size.max(1),
        }
    }

    /// The log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of buffered, unflushed events.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Buffer events, flushing when the batch size is reached.
    pub fn append(&mut self, events: &[MoveEvent]) {
        self.buffer.extend_from_slice(events);
        if self.buffer.len() >= self.batch_size {
            self.flush();
        }
    }

    /// Write all buffered events to disk. The buffer empties whether or
    /// not the write succeeds; a failure loses the affected events.
    pub fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let drained = std::mem::take(&mut self.buffer);
        if let Err(e) = write_lines(&self.path, &drained) {
            tracing::warn!(
                path = %self.path.display(),
                count = drained.len(),
                error = %e,
                "event log write failed, events dropped"
            );
        }
    }

    /// Read every well-formed event from a log file, oldest first.
    ///
    /// A torn final line (crashed writer) is discarded silently;
    /// malformed interior lines are skipped with a warning. A missing
    /// file reads as empty.
    pub fn read_all(path: &Path) -> Vec<MoveEvent> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };
        let lines: Vec<&str> = contents.lines().collect();
        let mut events = Vec::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<MoveEvent>(line) {
                Ok(event) => events.push(event),
                Err(e) if i + 1 == lines.len() => {
                    tracing::debug!(error = %e, "discarding torn final log line");
                }
                Err(e) => {
                    tracing::warn!(line = i + 1, error = %e, "skipping malformed log line");
                }
            }
        }
        events
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        self.flush();
    }
}

fn write_lines(path: &Path, events: &[MoveEvent]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for event in events {
        let line = serde_json::to_string(event)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
    }
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tilelab_types::{EventId, MoveEventType, SessionId};

    fn event(word: &str) -> MoveEvent {
        MoveEvent {
            id: EventId::new(),
            session_id: SessionId::new(),
            monotonic_timestamp: 1,
            event_type: MoveEventType::WordAdded,
            player_id: String::from("player_0"),
            player_index: 0,
            word: word.to_owned(),
            word_length: word.len(),
            frequency_score: 0.0,
            letters_used: MoveEvent::letters_of(word),
        }
    }

    #[test]
    fn events_buffer_until_batch_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.jsonl");
        let mut log = EventLog::new(&path, 3);

        log.append(&[event("cat"), event("dog")]);
        assert_eq!(log.buffered(), 2);
        assert!(!path.exists(), "nothing flushed below batch size");

        log.append(&[event("sun")]);
        assert_eq!(log.buffered(), 0);
        assert_eq!(EventLog::read_all(&path).len(), 3);
    }

    #[test]
    fn explicit_flush_writes_partial_batches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.jsonl");
        let mut log = EventLog::new(&path, 10);
        log.append(&[event("cat")]);
        log.flush();
        assert_eq!(EventLog::read_all(&path).len(), 1);
    }

    #[test]
    fn appends_across_instances_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.jsonl");
        {
            let mut log = EventLog::new(&path, 1);
            log.append(&[event("cat")]);
        }
        {
            let mut log = EventLog::new(&path, 1);
            log.append(&[event("dog")]);
        }
        let words: Vec<String> = EventLog::read_all(&path)
            .into_iter()
            .map(|e| e.word)
            .collect();
        assert_eq!(words, vec!["cat".to_owned(), "dog".to_owned()]);
    }

    #[test]
    fn torn_final_line_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.jsonl");
        let mut log = EventLog::new(&path, 1);
        log.append(&[event("cat")]);

        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b"{\"id\":\"trunc").unwrap();
        drop(file);

        let events = EventLog::read_all(&path);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].word, "cat");
    }

    #[test]
    fn missing_file_reads_empty() {
        assert!(EventLog::read_all(Path::new("/nonexistent/log.jsonl")).is_empty());
    }

    #[test]
    fn drop_flushes_remaining_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.jsonl");
        {
            let mut log = EventLog::new(&path, 100);
            log.append(&[event("cat")]);
        }
        assert_eq!(EventLog::read_all(&path).len(), 1);
    }
}
