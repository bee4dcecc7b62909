use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a motor/encoder channel on the controller.
pub type AxisId = u8;

/// Axis addressed by the single-axis convenience calls.
pub const DEFAULT_AXIS: AxisId = 0;

/// Fractional digits used for every float on an outbound line.
pub const FLOAT_PRECISION: usize = 4;

/// One outbound protocol line.
///
/// Values are written as given: no clamping, no range checks, no escaping.
/// A `path` or `value` containing a space or newline corrupts the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    ClearErrors,
    Position {
        axis: AxisId,
        position: f32,
        velocity_ff: f32,
        torque_ff: f32,
    },
    Velocity {
        axis: AxisId,
        velocity: f32,
        torque_ff: f32,
    },
    Torque {
        axis: AxisId,
        torque: f32,
    },
    TrapezoidalMove {
        axis: AxisId,
        position: f32,
    },
    Feedback {
        axis: AxisId,
    },
    Read {
        path: String,
    },
    Write {
        path: String,
        value: String,
    },
}

impl Command {
    /// Whether the controller answers this command with a line.
    pub fn expects_reply(&self) -> bool {
        matches!(self, Command::Feedback { .. } | Command::Read { .. })
    }

    /// The full line, terminator included.
    pub fn encode(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::ClearErrors => f.write_str("sc"),
            Command::Position {
                axis,
                position,
                velocity_ff,
                torque_ff,
            } => write!(
                f,
                "p {axis} {} {} {}",
                Fixed(*position),
                Fixed(*velocity_ff),
                Fixed(*torque_ff)
            ),
            Command::Velocity {
                axis,
                velocity,
                torque_ff,
            } => write!(f, "v {axis} {} {}", Fixed(*velocity), Fixed(*torque_ff)),
            Command::Torque { axis, torque } => write!(f, "c {axis} {}", Fixed(*torque)),
            Command::TrapezoidalMove { axis, position } => {
                write!(f, "t {axis} {}", Fixed(*position))
            }
            Command::Feedback { axis } => write!(f, "f {axis}"),
            Command::Read { path } => write!(f, "r {path}"),
            Command::Write { path, value } => write!(f, "w {path} {value}"),
        }
    }
}

/// A float in wire form: fixed point with [`FLOAT_PRECISION`] digits.
///
/// Negative zero goes out as `0.0000` and NaN as `nan`, matching the
/// controller-side printer. Infinities keep Rust's `inf`/`-inf`.
struct Fixed(f32);

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            return f.write_str("nan");
        }
        // adding +0.0 turns -0.0 into 0.0 and leaves everything else alone
        let value = self.0 + 0.0;
        write!(f, "{value:.prec$}", prec = FLOAT_PRECISION)
    }
}

/// Concatenate several commands so they leave in a single write.
pub fn encode_batch(commands: &[Command]) -> String {
    commands.iter().map(Command::encode).collect()
}
