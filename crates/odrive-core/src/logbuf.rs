use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// A traffic log the caller can keep reading while a client writes to it.
pub type SharedTrafficLog = Arc<Mutex<TrafficLog>>;

#[derive(Debug, Clone)]
pub struct TrafficEntry {
    pub timestamp_ms: u64,
    pub direction: Direction,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    Rx,
    Tx,
}

/// Bounded transcript of the lines exchanged with the controller.
pub struct TrafficLog {
    entries: Vec<TrafficEntry>,
    max_entries: usize,
}

impl TrafficLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    pub fn shared(max_entries: usize) -> SharedTrafficLog {
        Arc::new(Mutex::new(Self::new(max_entries)))
    }

    pub fn push(&mut self, direction: Direction, data: Vec<u8>) {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        self.entries.push(TrafficEntry {
            timestamp_ms,
            direction,
            data,
        });

        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
    }

    pub fn entries(&self) -> &[TrafficEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Render the log one entry per line, `TX: ` or `RX: ` prefixed.
    ///
    /// Timestamps are UTC `hh:mm:ss.mmm`. In text mode trailing newlines are
    /// stripped from each entry and an empty RX entry is shown as `<timeout>`.
    pub fn to_text(&self, show_timestamp: bool, show_hex: bool) -> String {
        let mut result = String::new();
        for entry in &self.entries {
            if show_timestamp {
                let secs = entry.timestamp_ms / 1000;
                let millis = entry.timestamp_ms % 1000;
                let hours = (secs / 3600) % 24;
                let minutes = (secs / 60) % 60;
                let seconds = secs % 60;
                result.push_str(&format!("[{hours:02}:{minutes:02}:{seconds:02}.{millis:03}] "));
            }

            result.push_str(match entry.direction {
                Direction::Rx => "RX: ",
                Direction::Tx => "TX: ",
            });

            if show_hex {
                let hex: Vec<String> = entry.data.iter().map(|b| format!("{b:02X}")).collect();
                result.push_str(&hex.join(" "));
            } else if entry.data.is_empty() && entry.direction == Direction::Rx {
                result.push_str("<timeout>");
            } else {
                let text = String::from_utf8_lossy(&entry.data);
                result.push_str(text.trim_end_matches('\n'));
            }
            result.push('\n');
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_oldest_beyond_capacity() {
        let mut log = TrafficLog::new(2);
        log.push(Direction::Tx, b"f 0\n".to_vec());
        log.push(Direction::Rx, b"1.0 2.0".to_vec());
        log.push(Direction::Tx, b"sc\n".to_vec());

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].direction, Direction::Rx);
        assert_eq!(log.entries()[1].data, b"sc\n");
    }

    #[test]
    fn text_transcript() {
        let mut log = TrafficLog::new(10);
        log.push(Direction::Tx, b"r vbus_voltage\n".to_vec());
        log.push(Direction::Rx, b"24.013".to_vec());
        log.push(Direction::Tx, b"f 0\n".to_vec());
        log.push(Direction::Rx, Vec::new());

        assert_eq!(
            log.to_text(false, false),
            "TX: r vbus_voltage\nRX: 24.013\nTX: f 0\nRX: <timeout>\n"
        );
    }

    #[test]
    fn hex_transcript() {
        let mut log = TrafficLog::new(10);
        log.push(Direction::Tx, b"sc\n".to_vec());
        assert_eq!(log.to_text(false, true), "TX: 73 63 0A\n");

        let stamped = log.to_text(true, false);
        assert!(stamped.starts_with('['));
        assert!(stamped.ends_with("] TX: sc\n"));
    }
}
