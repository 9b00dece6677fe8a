//! Hex RGB and CIE xy color representations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::convert;
use crate::errors::Error;

/// CIE xy chromaticity in the gateway's integer coordinate space (0-65535).
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ColorXY {
    pub x: u16,
    pub y: u16,
}

impl ColorXY {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// A validated 6 digit hex RGB color such as `f1e0b5`.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The gateway xy coordinates of this color and its brightness as a
    /// percentage (0-100).
    pub fn to_xy_dim(&self) -> (ColorXY, u8) {
        // Validated on construction.
        convert::hex_rgb_to_color_xy_dim(&self.0).unwrap_or_default()
    }
}

impl FromStr for HexColor {
    type Err = Error;

    /// Parse from a hex string, with or without a leading `#`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::str::FromStr;
    /// use tradfri_rs::HexColor;
    ///
    /// assert_eq!(HexColor::from_str("#FF8000").unwrap().as_str(), "ff8000");
    /// assert!(HexColor::from_str("ff80").is_err());
    /// assert!(HexColor::from_str("zz8000").is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Error> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        convert::hex_rgb_to_color_xy_dim(hex)?;
        Ok(HexColor(hex.to_ascii_lowercase()))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_xy_dim() {
        let color = HexColor::from_str("0000ff").unwrap();
        assert_eq!(color.to_xy_dim(), (ColorXY::new(8880, 2613), 4));
    }
}
