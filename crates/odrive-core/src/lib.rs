//! Blocking client for motor controllers speaking the ODrive ASCII protocol over a UART.

pub mod client;
pub mod config;
pub mod error;
pub mod logbuf;
pub mod serial;
pub mod transport;

pub use client::OdriveUart;
pub use config::ClientConfig;
pub use error::OdriveError;
pub use logbuf::{Direction, SharedTrafficLog, TrafficEntry, TrafficLog};
pub use serial::SerialLink;
pub use transport::ByteTransport;

pub use odrive_proto::{AxisId, AxisState, Command, DualFeedback, Feedback, ParseError};
