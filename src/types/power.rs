//! Power mode for light control.

use serde::{Deserialize, Serialize};

/// Power state for a light or group, sent on the wire as `1`/`0`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(from = "u8", into = "u8")]
pub enum PowerMode {
    /// Turn the light on
    On,
    /// Turn the light off
    Off,
}

impl From<u8> for PowerMode {
    fn from(value: u8) -> Self {
        if value == 0 {
            PowerMode::Off
        } else {
            PowerMode::On
        }
    }
}

impl From<PowerMode> for u8 {
    fn from(power: PowerMode) -> Self {
        match power {
            PowerMode::On => 1,
            PowerMode::Off => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_value() {
        assert_eq!(serde_json::to_string(&PowerMode::On).unwrap(), "1");
        assert_eq!(serde_json::from_str::<PowerMode>("0").unwrap(), PowerMode::Off);
    }
}
