use crate::error::{HandError, HandResult};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Named registers of the hand controller, keyed by the names the device
/// manual uses.
#[derive(Debug, EnumIter, EnumString, Display, IntoStaticStr, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Register {
    #[strum(serialize = "ID")]
    Id,
    #[strum(serialize = "baudrate")]
    BaudRate,
    #[strum(serialize = "clearErr")]
    ClearError,
    #[strum(serialize = "forceClb")]
    ForceCalibration,
    #[strum(serialize = "angleSet")]
    AngleSet,
    #[strum(serialize = "forceSet")]
    ForceSet,
    #[strum(serialize = "speedSet")]
    SpeedSet,
    #[strum(serialize = "angleAct")]
    AngleActual,
    #[strum(serialize = "forceAct")]
    ForceActual,
    #[strum(serialize = "errCode")]
    ErrorCode,
    #[strum(serialize = "statusCode")]
    StatusCode,
    #[strum(serialize = "temp")]
    Temperature,
    #[strum(serialize = "actionSeq")]
    ActionSequence,
    #[strum(serialize = "actionRun")]
    ActionRun,
}

/// Size of one per-actuator cell in a register block.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CellWidth {
    Byte,
    Word,
}

impl Register {
    pub const fn address(self) -> u16 {
        match self {
            Register::Id => 1000,
            Register::BaudRate => 1001,
            Register::ClearError => 1004,
            Register::ForceCalibration => 1009,
            Register::AngleSet => 1486,
            Register::ForceSet => 1498,
            Register::SpeedSet => 1522,
            Register::AngleActual => 1546,
            Register::ForceActual => 1582,
            Register::ErrorCode => 1606,
            Register::StatusCode => 1612,
            Register::Temperature => 1618,
            Register::ActionSequence => 2320,
            Register::ActionRun => 2322,
        }
    }

    pub const fn width(self) -> CellWidth {
        match self {
            Register::AngleSet
            | Register::ForceSet
            | Register::SpeedSet
            | Register::AngleActual
            | Register::ForceActual => CellWidth::Word,
            Register::Id
            | Register::BaudRate
            | Register::ClearError
            | Register::ForceCalibration
            | Register::ErrorCode
            | Register::StatusCode
            | Register::Temperature
            | Register::ActionSequence
            | Register::ActionRun => CellWidth::Byte,
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn from_name(name: &str) -> Option<Register> {
        Register::from_str(name).ok()
    }
}

/// Resolves a register name to its register, or `UnknownRegister`.
pub fn lookup(name: &str) -> HandResult<Register> {
    Register::from_name(name).ok_or_else(|| HandError::UnknownRegister(name.to_string()))
}

/// Resolves a register name to its 16-bit address.
pub fn address_of(name: &str) -> HandResult<u16> {
    lookup(name).map(Register::address)
}
