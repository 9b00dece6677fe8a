//! Color temperature control.

use serde::{Deserialize, Serialize};

use crate::convert::{self, MIRED_MAX, MIRED_MIN};

/// Color temperature in Kelvin.
///
/// Any value can be held, but the gateway only renders 2200K to 4000K; the
/// conversion to [`Mired`] saturates outside that range.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Kelvin {
    pub(crate) kelvin: u16,
}

impl Kelvin {
    /// Warmest white the gateway renders.
    pub const WARM: Kelvin = Kelvin { kelvin: 2200 };
    /// Coldest white the gateway renders.
    pub const COLD: Kelvin = Kelvin { kelvin: 4000 };

    pub fn new(kelvin: u16) -> Self {
        Kelvin { kelvin }
    }

    pub fn kelvin(&self) -> u16 {
        self.kelvin
    }

    /// Approximate black-body color of this temperature as fractional RGB.
    pub fn to_rgb(&self) -> (f64, f64, f64) {
        convert::kelvin_to_rgb(self.kelvin)
    }
}

/// Color temperature in mired, always within `[250, 454]`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Mired {
    pub(crate) value: u16,
}

impl Mired {
    /// Create a mired value, clamping it into the gateway range.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradfri_rs::Mired;
    ///
    /// assert_eq!(Mired::clamped(300).value(), 300);
    /// assert_eq!(Mired::clamped(100).value(), 250);
    /// assert_eq!(Mired::clamped(600).value(), 454);
    /// ```
    pub fn clamped(value: u16) -> Self {
        Mired {
            value: value.clamp(MIRED_MIN, MIRED_MAX),
        }
    }

    /// Returns `None` if value is outside the gateway range (250-454).
    ///
    /// # Examples
    ///
    /// ```
    /// use tradfri_rs::Mired;
    ///
    /// assert!(Mired::create(249).is_none());
    /// assert!(Mired::create(250).is_some());
    /// assert!(Mired::create(454).is_some());
    /// assert!(Mired::create(455).is_none());
    /// ```
    pub fn create(value: u16) -> Option<Self> {
        if (MIRED_MIN..=MIRED_MAX).contains(&value) {
            Some(Mired { value })
        } else {
            None
        }
    }

    pub fn value(&self) -> u16 {
        self.value
    }
}

impl From<Kelvin> for Mired {
    /// # Examples
    ///
    /// ```
    /// use tradfri_rs::{Kelvin, Mired};
    ///
    /// assert_eq!(Mired::from(Kelvin::new(2900)).value(), 345);
    /// ```
    fn from(kelvin: Kelvin) -> Self {
        Mired {
            value: convert::kelvin_to_mired(kelvin.kelvin),
        }
    }
}

impl From<Mired> for Kelvin {
    fn from(mired: Mired) -> Self {
        Kelvin {
            kelvin: convert::mired_to_kelvin(mired.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_round_trip() {
        assert_eq!(Mired::from(Kelvin::WARM).value(), 454);
        assert_eq!(Mired::from(Kelvin::COLD).value(), 250);
        assert_eq!(Kelvin::from(Mired::clamped(250)), Kelvin::COLD);
    }
}
