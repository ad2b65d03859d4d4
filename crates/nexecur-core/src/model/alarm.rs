use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Order sent to the panel. The discriminant is the wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum AlarmCommand {
    Disarm = 0,
    /// Arm partition SP1.
    PartialArm = 1,
    /// Arm partition SP2.
    TotalArm = 2,
}

impl AlarmCommand {
    /// Value of the `status` field in the panel-status request body.
    pub fn wire_value(self) -> u8 {
        match self {
            Self::Disarm => 0,
            Self::PartialArm => 1,
            Self::TotalArm => 2,
        }
    }

    /// Present participle used in error messages ("Error while disabling ...").
    pub fn action(self) -> &'static str {
        match self {
            Self::Disarm => "disabling",
            Self::PartialArm => "enabling partial",
            Self::TotalArm => "enabling total",
        }
    }
}

/// Panel state as reported by `panel_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlarmStatus {
    Disabled = 0,
    PartialAlarm = 1,
    TotalAlarm = 2,
}

impl TryFrom<i64> for AlarmStatus {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Disabled),
            1 => Ok(Self::PartialAlarm),
            2 => Ok(Self::TotalAlarm),
            other => Err(other),
        }
    }
}

impl AlarmStatus {
    pub fn is_armed(self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

impl std::fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Disabled => "Disabled",
            Self::PartialAlarm => "Partial alarm (SP1)",
            Self::TotalAlarm => "Total alarm (SP2)",
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn command_wire_values() {
        assert_eq!(AlarmCommand::Disarm.wire_value(), 0);
        assert_eq!(AlarmCommand::PartialArm.wire_value(), 1);
        assert_eq!(AlarmCommand::TotalArm.wire_value(), 2);
    }

    #[test]
    fn command_parses_from_kebab_case() {
        assert_eq!("total-arm".parse::<AlarmCommand>().unwrap(), AlarmCommand::TotalArm);
        assert_eq!(AlarmCommand::PartialArm.to_string(), "partial-arm");
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert_eq!(AlarmStatus::try_from(2), Ok(AlarmStatus::TotalAlarm));
        assert_eq!(AlarmStatus::try_from(7), Err(7));
        assert!(!AlarmStatus::Disabled.is_armed());
    }
}
