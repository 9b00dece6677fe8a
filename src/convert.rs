//! Conversions between human light units and the gateway's wire units.
//!
//! All functions are pure. The gateway only accepts color temperatures in
//! mired within `[250, 454]` (about 4000K to 2200K), brightness as a dim level
//! in `[0, 254]`, and colors as CIE xy coordinates scaled to `[0, 65535]`.

use crate::errors::Error;
use crate::types::ColorXY;

type Result<T> = std::result::Result<T, Error>;

/// Coldest color temperature the gateway accepts, in mired.
pub const MIRED_MIN: u16 = 250;
/// Warmest color temperature the gateway accepts, in mired.
pub const MIRED_MAX: u16 = 454;
/// Highest dim level.
pub const DIM_MAX: u8 = 254;

const XY_SCALE: f64 = 65535.0;

/// Convert a color temperature in Kelvin to mired, clamped to the gateway range.
///
/// # Examples
///
/// ```
/// use tradfri_rs::convert::kelvin_to_mired;
///
/// assert_eq!(kelvin_to_mired(2900), 345);
/// assert_eq!(kelvin_to_mired(2100), 454);
/// assert_eq!(kelvin_to_mired(5000), 250);
/// ```
pub fn kelvin_to_mired(kelvin: u16) -> u16 {
    if kelvin == 0 {
        return MIRED_MAX;
    }
    let mired = (1_000_000.0 / f64::from(kelvin)).round();
    mired.clamp(f64::from(MIRED_MIN), f64::from(MIRED_MAX)) as u16
}

/// Convert mired to Kelvin. Out of range mired values saturate.
///
/// # Examples
///
/// ```
/// use tradfri_rs::convert::mired_to_kelvin;
///
/// assert_eq!(mired_to_kelvin(345), 2899);
/// assert_eq!(mired_to_kelvin(500), 2203);
/// assert_eq!(mired_to_kelvin(220), 4000);
/// ```
pub fn mired_to_kelvin(mired: u16) -> u16 {
    let mired = mired.clamp(MIRED_MIN, MIRED_MAX);
    (1_000_000.0 / f64::from(mired)).round() as u16
}

/// Approximate the color of a black body at `kelvin` as fractional RGB.
///
/// Each channel is in `[0, 1]`. 6600K is pure white; warmer temperatures
/// lose green and blue, cooler ones lose red and green.
pub fn kelvin_to_rgb(kelvin: u16) -> (f64, f64, f64) {
    let temp = f64::from(kelvin) / 100.0;

    let red = if temp <= 66.0 {
        255.0
    } else {
        329.698727446 * (temp - 60.0).powf(-0.1332047592)
    };

    let green = if temp <= 66.0 {
        99.4708025861 * temp.ln() - 161.1195681661
    } else {
        288.1221695283 * (temp - 60.0).powf(-0.0755148492)
    };

    let blue = if temp >= 66.0 {
        255.0
    } else if temp <= 19.0 {
        0.0
    } else {
        138.5177312231 * (temp - 10.0).ln() - 305.0447927307
    };

    (unit(red), unit(green), unit(blue))
}

fn unit(channel: f64) -> f64 {
    (channel / 255.0).clamp(0.0, 1.0)
}

/// Convert a 6 digit hex RGB string to gateway xy coordinates and a
/// brightness percentage.
///
/// # Examples
///
/// ```
/// use tradfri_rs::convert::hex_rgb_to_color_xy_dim;
///
/// let (xy, dim) = hex_rgb_to_color_xy_dim("ff0000").unwrap();
/// assert_eq!((xy.x, xy.y, dim), (44506, 21022, 31));
/// assert!(hex_rgb_to_color_xy_dim("#ff0000").is_err());
/// ```
pub fn hex_rgb_to_color_xy_dim(hex: &str) -> Result<(ColorXY, u8)> {
    let [red, green, blue] = parse_hex_rgb(hex)?;
    let (red, green, blue) = (linearize(red), linearize(green), linearize(blue));

    // Wide gamut transform as calibrated by the gateway.
    let x = red * 0.664511 + green * 0.154324 + blue * 0.162028;
    let y = red * 0.313881 + green * 0.668433 + blue * 0.047685;
    let z = red * 0.000088 + green * 0.072310 + blue * 0.986039;

    let sum = (x + y + z).max(f64::EPSILON);
    let xy = ColorXY {
        x: (x / sum * XY_SCALE) as u16,
        y: (y / sum * XY_SCALE) as u16,
    };
    let dim = (y * 100.0).min(100.0) as u8;

    Ok((xy, dim))
}

fn parse_hex_rgb(hex: &str) -> Result<[u8; 3]> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::Format(format!(
            "expected 6 hexadecimal digits, got {hex:?}"
        )));
    }
    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|e| Error::Format(e.to_string()))?;
    }
    Ok(rgb)
}

/// sRGB gamma expansion.
fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

/// Rescale a dim level (0-254) to a percentage (0-100).
///
/// # Examples
///
/// ```
/// use tradfri_rs::convert::dim_to_percentage;
///
/// assert_eq!(dim_to_percentage(0), 0);
/// assert_eq!(dim_to_percentage(127), 50);
/// assert_eq!(dim_to_percentage(254), 100);
/// ```
pub fn dim_to_percentage(dim: u8) -> u8 {
    let dim = dim.min(DIM_MAX);
    (f64::from(dim) * 100.0 / f64::from(DIM_MAX)).round() as u8
}

/// Rescale a percentage (0-100) to a dim level (0-254).
pub fn percentage_to_dim(percentage: u8) -> u8 {
    let percentage = percentage.min(100);
    (f64::from(percentage) * f64::from(DIM_MAX) / 100.0).round() as u8
}

/// Convert milliseconds to the value of a transition duration field.
pub fn ms_to_duration(ms: u32) -> u32 {
    ms.saturating_mul(100)
}
