//! Wire grammar of the ODrive ASCII protocol: command lines out, reply lines in.
//!
//! Nothing here touches a byte stream; see `odrive-core` for the client.

pub mod command;
pub mod number;
pub mod reply;
pub mod state;

pub use command::{encode_batch, AxisId, Command, DEFAULT_AXIS, FLOAT_PRECISION};
pub use number::{parse_float_lenient, parse_float_strict, parse_int_lenient, parse_int_strict};
pub use reply::{DualFeedback, Feedback, ParseError};
pub use state::{AxisState, CURRENT_STATE_PATH, REQUESTED_STATE_PATH};

/// Every line on the wire ends with this byte.
pub const LINE_TERMINATOR: u8 = b'\n';
