use serde::{Deserialize, Serialize};

/// Parameter written to request a state change.
pub const REQUESTED_STATE_PATH: &str = "axis0.requested_state";
/// Parameter read to learn the current state.
pub const CURRENT_STATE_PATH: &str = "axis0.current_state";

/// Operating state of an axis.
///
/// The tag set belongs to the firmware. Integers this enum does not name are
/// kept in [`AxisState::Other`] so any reported value survives a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisState {
    Undefined,
    Idle,
    StartupSequence,
    FullCalibrationSequence,
    MotorCalibration,
    EncoderIndexSearch,
    EncoderOffsetCalibration,
    ClosedLoopControl,
    LockinSpin,
    EncoderDirFind,
    Homing,
    EncoderHallPolarityCalibration,
    EncoderHallPhaseCalibration,
    AnticoggingCalibration,
    Other(i64),
}

impl AxisState {
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            0 => AxisState::Undefined,
            1 => AxisState::Idle,
            2 => AxisState::StartupSequence,
            3 => AxisState::FullCalibrationSequence,
            4 => AxisState::MotorCalibration,
            6 => AxisState::EncoderIndexSearch,
            7 => AxisState::EncoderOffsetCalibration,
            8 => AxisState::ClosedLoopControl,
            9 => AxisState::LockinSpin,
            10 => AxisState::EncoderDirFind,
            11 => AxisState::Homing,
            12 => AxisState::EncoderHallPolarityCalibration,
            13 => AxisState::EncoderHallPhaseCalibration,
            14 => AxisState::AnticoggingCalibration,
            other => AxisState::Other(other),
        }
    }

    pub fn raw(self) -> i64 {
        match self {
            AxisState::Undefined => 0,
            AxisState::Idle => 1,
            AxisState::StartupSequence => 2,
            AxisState::FullCalibrationSequence => 3,
            AxisState::MotorCalibration => 4,
            AxisState::EncoderIndexSearch => 6,
            AxisState::EncoderOffsetCalibration => 7,
            AxisState::ClosedLoopControl => 8,
            AxisState::LockinSpin => 9,
            AxisState::EncoderDirFind => 10,
            AxisState::Homing => 11,
            AxisState::EncoderHallPolarityCalibration => 12,
            AxisState::EncoderHallPhaseCalibration => 13,
            AxisState::AnticoggingCalibration => 14,
            AxisState::Other(raw) => raw,
        }
    }
}

impl From<i64> for AxisState {
    fn from(raw: i64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<AxisState> for i64 {
    fn from(state: AxisState) -> Self {
        state.raw()
    }
}
