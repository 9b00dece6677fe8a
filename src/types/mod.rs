//! Value types for light control parameters.

mod color;
mod dim;
mod kelvin;
mod power;

pub use color::{ColorXY, HexColor};
pub use dim::Dim;
pub use kelvin::{Kelvin, Mired};
pub use power::PowerMode;
