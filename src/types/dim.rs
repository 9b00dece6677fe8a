//! Brightness control.

use serde::{Deserialize, Serialize};

use crate::convert::{self, DIM_MAX};

/// The gateway's native brightness unit, from 0 to 254.
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Dim {
    pub(crate) value: u8,
}

impl Dim {
    pub fn max() -> Self {
        Dim { value: DIM_MAX }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Returns None if value is outside valid range (0-254).
    ///
    /// # Examples
    ///
    /// ```
    /// use tradfri_rs::Dim;
    ///
    /// assert!(Dim::create(0).is_some());
    /// assert!(Dim::create(254).is_some());
    /// assert!(Dim::create(255).is_none());
    /// ```
    pub fn create(value: u8) -> Option<Self> {
        (value <= DIM_MAX).then_some(Dim { value })
    }

    /// Create a dim level from a brightness percentage (0-100, saturating).
    ///
    /// # Examples
    ///
    /// ```
    /// use tradfri_rs::Dim;
    ///
    /// assert_eq!(Dim::from_percentage(100).value(), 254);
    /// assert_eq!(Dim::from_percentage(50).value(), 127);
    /// ```
    pub fn from_percentage(percentage: u8) -> Self {
        Dim {
            value: convert::percentage_to_dim(percentage),
        }
    }

    pub fn percentage(&self) -> u8 {
        convert::dim_to_percentage(self.value)
    }
}
