//! Light control settings, as read from and written to the gateway.

use serde::{Deserialize, Serialize};

use crate::convert;
use crate::types::{ColorXY, Dim, HexColor, Kelvin, Mired, PowerMode};

/// The settings of one light source on a device.
///
/// The same structure is returned in [`Device::light_control`](crate::Device)
/// and sent by [`Client::set_device`](crate::Client::set_device). Only the
/// fields that are set end up in the request body.
///
/// # Creating settings
///
/// 1. **From a single attribute** using the [`From`] trait:
///    ```
///    use tradfri_rs::{LightControl, PowerMode};
///    let control = LightControl::from(PowerMode::Off);
///    ```
///
/// 2. **Builder pattern** for combining multiple attributes:
///    ```
///    use tradfri_rs::{Kelvin, LightControl, PowerMode};
///    let control = LightControl::new()
///        .power(PowerMode::On)
///        .brightness(80)
///        .kelvin(Kelvin::new(2700))
///        .transition_ms(500);
///    assert!(control.is_valid());
///    ```
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LightControl {
    #[serde(rename = "5706")]
    pub color: Option<String>,
    #[serde(rename = "5707")]
    pub color_hue: Option<i32>,
    #[serde(rename = "5708")]
    pub color_saturation: Option<i32>,
    #[serde(rename = "5709")]
    pub color_x: Option<u16>,
    #[serde(rename = "5710")]
    pub color_y: Option<u16>,
    #[serde(rename = "5850")]
    pub power: Option<PowerMode>,
    /// Dimmer value in the range [0, 254]; not a percentage.
    #[serde(rename = "5851")]
    pub dim: Option<u8>,
    /// Color temperature in mired, [250, 454].
    #[serde(rename = "5711")]
    pub mireds: Option<u16>,
    #[serde(rename = "5712")]
    pub transition_time: Option<u32>,
    /// Energy used, in Wh. Read-only.
    #[serde(rename = "5805")]
    pub cumulative_active_power: Option<f64>,
    /// Seconds the light has been on. Writing 0 resets the counter.
    #[serde(rename = "5852")]
    pub on_time: Option<u32>,
    #[serde(rename = "5820")]
    pub power_factor: Option<f64>,
    #[serde(rename = "5701")]
    pub sensor_unit: Option<String>,
    #[serde(rename = "9003")]
    pub id: Option<u32>,
}

impl LightControl {
    /// Create empty settings.
    ///
    /// At least one writable attribute must be set for the settings to be valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradfri_rs::LightControl;
    ///
    /// assert_eq!(LightControl::new().is_valid(), false);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if these settings change anything on a light.
    ///
    /// A transition time alone is not valid; it must accompany a change.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradfri_rs::{Dim, LightControl};
    ///
    /// let control = LightControl::new().transition_ms(1000);
    /// assert_eq!(control.is_valid(), false);
    ///
    /// let control = control.dim(Dim::max());
    /// assert_eq!(control.is_valid(), true);
    /// ```
    pub fn is_valid(&self) -> bool {
        self.power.is_some()
            || self.dim.is_some()
            || self.mireds.is_some()
            || self.color.is_some()
            || (self.color_x.is_some() && self.color_y.is_some())
            || self.color_hue.is_some()
            || self.color_saturation.is_some()
            || self.on_time.is_some()
    }

    pub fn power(mut self, power: PowerMode) -> Self {
        self.power = Some(power);
        self
    }

    pub fn dim(mut self, dim: Dim) -> Self {
        self.dim = Some(dim.value);
        self
    }

    /// Set the brightness as a percentage (0-100).
    ///
    /// # Examples
    ///
    /// ```
    /// use tradfri_rs::LightControl;
    ///
    /// assert_eq!(LightControl::new().brightness(100).dim, Some(254));
    /// ```
    pub fn brightness(self, percentage: u8) -> Self {
        self.dim(Dim::from_percentage(percentage))
    }

    pub fn mireds(mut self, mired: Mired) -> Self {
        self.mireds = Some(mired.value);
        self
    }

    /// Set the color temperature, clamped to what the gateway supports.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradfri_rs::{Kelvin, LightControl};
    ///
    /// assert_eq!(LightControl::new().kelvin(Kelvin::new(2900)).mireds, Some(345));
    /// assert_eq!(LightControl::new().kelvin(Kelvin::new(6500)).mireds, Some(250));
    /// ```
    pub fn kelvin(self, kelvin: Kelvin) -> Self {
        self.mireds(Mired::from(kelvin))
    }

    pub fn xy(mut self, xy: ColorXY) -> Self {
        self.color_x = Some(xy.x);
        self.color_y = Some(xy.y);
        self
    }

    /// Set the color from hex RGB, as xy coordinates plus the brightness
    /// derived from the color.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::str::FromStr;
    /// use tradfri_rs::{HexColor, LightControl};
    ///
    /// let control = LightControl::new().hex_color(&HexColor::from_str("ff0000").unwrap());
    /// assert_eq!((control.color_x, control.color_y), (Some(44506), Some(21022)));
    /// assert_eq!(control.dim, Some(79));
    /// ```
    pub fn hex_color(self, color: &HexColor) -> Self {
        let (xy, percentage) = color.to_xy_dim();
        self.xy(xy).brightness(percentage)
    }

    /// Set the duration of the transition to the new settings.
    pub fn transition_ms(mut self, ms: u32) -> Self {
        self.transition_time = Some(convert::ms_to_duration(ms));
        self
    }

    /// Current color temperature in Kelvin, if reported.
    pub fn temperature(&self) -> Option<Kelvin> {
        self.mireds.map(|m| Kelvin::from(Mired::clamped(m)))
    }

    /// Current brightness as a percentage, if reported.
    pub fn brightness_percentage(&self) -> Option<u8> {
        self.dim.map(convert::dim_to_percentage)
    }
}

impl From<PowerMode> for LightControl {
    fn from(power: PowerMode) -> Self {
        LightControl::new().power(power)
    }
}

impl From<Dim> for LightControl {
    fn from(dim: Dim) -> Self {
        LightControl::new().dim(dim)
    }
}

impl From<Kelvin> for LightControl {
    fn from(kelvin: Kelvin) -> Self {
        LightControl::new().kelvin(kelvin)
    }
}

impl From<&HexColor> for LightControl {
    fn from(color: &HexColor) -> Self {
        LightControl::new().hex_color(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_set_fields_only() {
        let control = LightControl::new()
            .power(PowerMode::On)
            .kelvin(Kelvin::new(2200))
            .transition_ms(1000);
        assert_eq!(
            serde_json::to_value(&control).unwrap(),
            json!({"5850": 1, "5711": 454, "5712": 100000})
        );
    }

    #[test]
    fn test_reads_gateway_entry() {
        let control: LightControl = serde_json::from_value(json!({
            "5706": "f1e0b5",
            "5709": 30140,
            "5710": 26909,
            "5850": 1,
            "5851": 127,
            "5711": 370,
            "9003": 0
        }))
        .unwrap();
        assert_eq!(control.power, Some(PowerMode::On));
        assert_eq!(control.brightness_percentage(), Some(50));
        assert_eq!(control.temperature(), Some(Kelvin::new(2703)));
        assert_eq!(control.color.as_deref(), Some("f1e0b5"));
    }
}
