use std::time::Duration;

use odrive_proto::{AxisId, DEFAULT_AXIS};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Axis used by the single-axis calls.
    pub axis: AxisId,
    /// How long to wait for a reply line.
    pub reply_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            axis: DEFAULT_AXIS,
            reply_timeout: Duration::from_millis(10),
        }
    }
}

impl ClientConfig {
    pub fn with_axis(mut self, axis: AxisId) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = timeout;
        self
    }
}
