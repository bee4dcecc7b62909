use log::{debug, trace, warn};
use std::fmt::Display;
use std::time::{Duration, Instant};

use odrive_proto::{
    encode_batch, parse_float_lenient, parse_float_strict, parse_int_lenient, parse_int_strict,
    AxisId, AxisState, Command, DualFeedback, Feedback, CURRENT_STATE_PATH, LINE_TERMINATOR,
    REQUESTED_STATE_PATH,
};

use crate::config::ClientConfig;
use crate::error::OdriveError;
use crate::logbuf::{Direction, SharedTrafficLog};
use crate::transport::ByteTransport;

/// Client for one controller on a borrowed byte transport.
///
/// Every call is synchronous and at most one request is outstanding. Calls
/// that expect a reply block until a full line arrives or the reply timeout
/// passes.
///
/// The plain calls never report failure: write errors are logged and
/// dropped, and a missing or malformed reply reads as zero (or an empty
/// string). The `try_*` and `send*` calls return [`OdriveError`] instead.
pub struct OdriveUart<'a, T: ByteTransport + ?Sized> {
    transport: &'a mut T,
    config: ClientConfig,
    traffic: Option<SharedTrafficLog>,
}

impl<'a, T: ByteTransport + ?Sized> OdriveUart<'a, T> {
    pub fn new(transport: &'a mut T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: &'a mut T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            traffic: None,
        }
    }

    /// Record every line sent and received into `log`.
    pub fn with_traffic_log(mut self, log: SharedTrafficLog) -> Self {
        self.traffic = Some(log);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn traffic_log(&self) -> Option<&SharedTrafficLog> {
        self.traffic.as_ref()
    }

    // ---- motion ----

    pub fn clear_errors(&mut self) {
        self.send_lossy(&[Command::ClearErrors]);
    }

    pub fn set_position(&mut self, position: f32) {
        self.set_position_ff(position, 0.0, 0.0);
    }

    pub fn set_position_ff(&mut self, position: f32, velocity_ff: f32, torque_ff: f32) {
        let axis = self.config.axis;
        self.send_lossy(&[Command::Position {
            axis,
            position,
            velocity_ff,
            torque_ff,
        }]);
    }

    pub fn set_velocity(&mut self, velocity: f32) {
        self.set_velocity_ff(velocity, 0.0);
    }

    pub fn set_velocity_ff(&mut self, velocity: f32, torque_ff: f32) {
        let axis = self.config.axis;
        self.send_lossy(&[Command::Velocity {
            axis,
            velocity,
            torque_ff,
        }]);
    }

    /// Command two axes in one write. The axes are not checked.
    pub fn set_velocity_pair(
        &mut self,
        velocity1: f32,
        velocity2: f32,
        torque_ff: f32,
        axis1: AxisId,
        axis2: AxisId,
    ) {
        self.send_lossy(&[
            Command::Velocity {
                axis: axis1,
                velocity: velocity1,
                torque_ff,
            },
            Command::Velocity {
                axis: axis2,
                velocity: velocity2,
                torque_ff,
            },
        ]);
    }

    pub fn set_torque(&mut self, torque: f32) {
        let axis = self.config.axis;
        self.send_lossy(&[Command::Torque { axis, torque }]);
    }

    /// Move to `position` through the controller's own trajectory planner.
    pub fn trapezoidal_move(&mut self, position: f32) {
        let axis = self.config.axis;
        self.send_lossy(&[Command::TrapezoidalMove { axis, position }]);
    }

    // ---- feedback ----

    pub fn feedback(&mut self) -> Feedback {
        self.feedback_for(self.config.axis)
    }

    pub fn feedback_for(&mut self, axis: AxisId) -> Feedback {
        Feedback::parse(&self.request(&Command::Feedback { axis }))
    }

    /// Two back-to-back feedback exchanges, `axis1` first.
    ///
    /// Each half falls back to zero on its own. Nothing holds the line
    /// between the two exchanges, so the halves may describe different
    /// instants.
    pub fn feedback_pair(&mut self, axis1: AxisId, axis2: AxisId) -> DualFeedback {
        let first = self.feedback_for(axis1);
        let second = self.feedback_for(axis2);
        DualFeedback::from_halves(first, second)
    }

    pub fn try_feedback(&mut self) -> Result<Feedback, OdriveError> {
        self.try_feedback_for(self.config.axis)
    }

    pub fn try_feedback_for(&mut self, axis: AxisId) -> Result<Feedback, OdriveError> {
        self.discard_pending()?;
        self.send(&Command::Feedback { axis })?;
        let line = self.try_read_line(self.config.reply_timeout)?;
        Ok(Feedback::try_parse(&line)?)
    }

    // ---- parameters ----

    /// The reply line exactly as received, or `""` on timeout.
    pub fn parameter_as_string(&mut self, path: &str) -> String {
        self.send_lossy(&[Command::Read {
            path: path.to_string(),
        }]);
        self.read_line_default()
    }

    pub fn parameter_as_int(&mut self, path: &str) -> i64 {
        parse_int_lenient(&self.parameter_as_string(path))
    }

    pub fn parameter_as_float(&mut self, path: &str) -> f32 {
        parse_float_lenient(&self.parameter_as_string(path))
    }

    pub fn try_parameter_as_string(&mut self, path: &str) -> Result<String, OdriveError> {
        self.send(&Command::Read {
            path: path.to_string(),
        })?;
        self.try_read_line(self.config.reply_timeout)
    }

    pub fn try_parameter_as_int(&mut self, path: &str) -> Result<i64, OdriveError> {
        Ok(parse_int_strict(&self.try_parameter_as_string(path)?)?)
    }

    pub fn try_parameter_as_float(&mut self, path: &str) -> Result<f32, OdriveError> {
        Ok(parse_float_strict(&self.try_parameter_as_string(path)?)?)
    }

    pub fn set_parameter(&mut self, path: &str, value: impl Display) {
        self.send_lossy(&[Command::Write {
            path: path.to_string(),
            value: value.to_string(),
        }]);
    }

    // ---- state ----

    pub fn set_state(&mut self, requested: AxisState) {
        self.set_parameter(REQUESTED_STATE_PATH, requested.raw());
    }

    pub fn state(&mut self) -> AxisState {
        AxisState::from_raw(self.parameter_as_int(CURRENT_STATE_PATH))
    }

    pub fn try_state(&mut self) -> Result<AxisState, OdriveError> {
        self.try_parameter_as_int(CURRENT_STATE_PATH)
            .map(AxisState::from_raw)
    }

    // ---- raw exchange ----

    /// Write `command` as one line.
    pub fn send(&mut self, command: &Command) -> Result<(), OdriveError> {
        self.send_batch(std::slice::from_ref(command))
    }

    /// Write all `commands` in a single transport write.
    pub fn send_batch(&mut self, commands: &[Command]) -> Result<(), OdriveError> {
        let line = encode_batch(commands);
        trace!("tx {:?}", line);
        self.transport.write_all(line.as_bytes())?;
        self.record(Direction::Tx, line.as_bytes());
        Ok(())
    }

    /// Drop stale input, send `command` and return the reply line.
    ///
    /// Returns whatever arrived before the timeout, possibly `""`.
    /// `command` must be one the controller answers.
    pub fn request(&mut self, command: &Command) -> String {
        debug_assert!(command.expects_reply(), "{command} has no reply");
        if let Err(e) = self.discard_pending() {
            warn!("discarding stale input failed: {e}");
        }
        self.send_lossy(std::slice::from_ref(command));
        self.read_line_default()
    }

    pub fn read_line_default(&mut self) -> String {
        self.read_line(self.config.reply_timeout)
    }

    /// Read up to the next `\n`, waiting at most `timeout` overall.
    ///
    /// The terminator is not returned; every other byte, `\r` included, is.
    /// On timeout or transport failure the bytes gathered so far are
    /// returned.
    pub fn read_line(&mut self, timeout: Duration) -> String {
        match self.read_line_inner(timeout) {
            (line, Ok(true)) => line,
            (line, Ok(false)) => {
                warn!("reply timed out after {timeout:?} (partial {line:?})");
                line
            }
            (line, Err(e)) => {
                warn!("reading reply failed: {e}");
                line
            }
        }
    }

    pub fn try_read_line(&mut self, timeout: Duration) -> Result<String, OdriveError> {
        match self.read_line_inner(timeout) {
            (line, Ok(true)) => Ok(line),
            (partial, Ok(false)) => Err(OdriveError::Timeout { partial }),
            (_, Err(e)) => Err(e.into()),
        }
    }

    /// Returns the bytes read so far and whether a terminator was seen.
    fn read_line_inner(&mut self, timeout: Duration) -> (String, std::io::Result<bool>) {
        let deadline = Instant::now() + timeout;
        let mut buf = Vec::new();
        let complete = loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.transport.read_byte(remaining) {
                Ok(Some(LINE_TERMINATOR)) => break Ok(true),
                Ok(Some(byte)) => buf.push(byte),
                Ok(None) => break Ok(false),
                Err(e) => break Err(e),
            }
        };

        trace!("rx {:?}", String::from_utf8_lossy(&buf));
        self.record(Direction::Rx, &buf);
        (String::from_utf8_lossy(&buf).into_owned(), complete)
    }

    fn discard_pending(&mut self) -> std::io::Result<()> {
        let dropped = self.transport.discard_input()?;
        if dropped > 0 {
            debug!("discarded {dropped} stale bytes");
        }
        Ok(())
    }

    fn send_lossy(&mut self, commands: &[Command]) {
        if let Err(e) = self.send_batch(commands) {
            warn!("write failed: {e}");
        }
    }

    fn record(&self, direction: Direction, data: &[u8]) {
        if let Some(log) = &self.traffic {
            log.lock().push(direction, data.to_vec());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io;

    /// Replies become readable only after a write, like a real controller.
    #[derive(Default)]
    struct Echo {
        written: Vec<u8>,
        rx: VecDeque<u8>,
        replies: VecDeque<&'static str>,
    }

    impl ByteTransport for Echo {
        fn bytes_available(&mut self) -> io::Result<usize> {
            Ok(self.rx.len())
        }

        fn read_byte(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
            Ok(self.rx.pop_front())
        }

        fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
            self.written.extend_from_slice(data);
            if let Some(reply) = self.replies.pop_front() {
                self.rx.extend(reply.bytes());
            }
            Ok(())
        }
    }

    #[test]
    fn single_axis_calls_use_configured_axis() {
        let mut t = Echo::default();
        let mut client = OdriveUart::with_config(&mut t, ClientConfig::default().with_axis(1));
        client.set_position(2.0);
        client.set_torque(0.5);
        drop(client);
        assert_eq!(
            String::from_utf8(t.written).unwrap(),
            "p 1 2.0000 0.0000 0.0000\nc 1 0.5000\n"
        );
    }

    #[test]
    fn read_line_keeps_carriage_return() {
        let mut t = Echo::default();
        t.rx.extend(b"12\r\nrest".iter().copied());
        let mut client = OdriveUart::new(&mut t);
        assert_eq!(client.read_line(Duration::from_millis(5)), "12\r");
        assert_eq!(client.read_line(Duration::ZERO), "rest");
    }

    #[test]
    fn strict_read_reports_partial_line() {
        let mut t = Echo::default();
        t.rx.extend(b"1.0 2".iter().copied());
        let mut client = OdriveUart::new(&mut t);
        match client.try_read_line(Duration::ZERO) {
            Err(OdriveError::Timeout { partial }) => assert_eq!(partial, "1.0 2"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "has no reply")]
    fn request_needs_a_query() {
        let mut t = Echo::default();
        OdriveUart::new(&mut t).request(&Command::ClearErrors);
    }

    #[test]
    fn state_is_written_as_integer() {
        let mut t = Echo::default();
        t.replies.push_back("");
        t.replies.push_back("8\n");
        let mut client = OdriveUart::new(&mut t);
        client.set_state(AxisState::ClosedLoopControl);
        assert_eq!(client.state(), AxisState::ClosedLoopControl);
        drop(client);
        assert_eq!(
            String::from_utf8(t.written).unwrap(),
            "w axis0.requested_state 8\nr axis0.current_state\n"
        );
    }
}
