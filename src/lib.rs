//! # tradfri_rs
//!
//! An async Rust client for IKEA Trådfri gateways.
//!
//! The gateway speaks CoAP over DTLS with pre-shared keys. This crate provides
//! the protocol layer on top of such a channel: credential exchange, typed
//! resource operations for the gateway, devices, groups and moods, typed
//! streams of observed changes, and the color conversions needed to express
//! light settings in the gateway's units.
//!
//! The DTLS transport is not part of this crate. Plug in your own by
//! implementing [`Connector`] and [`SecureChannel`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use tradfri_rs::{Client, ClientConfig, HexColor, LightControl};
//!
//! // Works with any async runtime!
//! async fn paint_it_red<C: tradfri_rs::Connector>(connector: C) -> Result<(), tradfri_rs::Error> {
//!     let config = ClientConfig::new("192.168.1.20", "SECURITYCODE").identity("my-app");
//!     let client = Client::new(config, connector);
//!
//!     // The first call exchanges the security code for a pre-shared key.
//!     let red: HexColor = "#ff0000".parse()?;
//!     client.set_device(65537, &LightControl::from(&red)).await?;
//!
//!     // Keep it to skip the exchange next time.
//!     let psk = client.psk().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Runtime Agnostic**: Works with tokio, async-std, or smol async runtimes
//! - **Sessions**: Pre-shared key exchange handled by [`Client`], or reuse a stored key
//! - **Devices, Groups, Moods**: List, read, change, create and remove gateway entities
//! - **Light Settings**: Compose writes with [`LightControl`]
//! - **Color Temperature**: Kelvin to mired with [`Kelvin`] and [`Mired`]
//! - **Colors**: Hex RGB to CIE xy and brightness with [`HexColor`]
//! - **Observation**: Typed streams of pushed changes via [`Client::device_events`]
//! - **Conversions**: The raw conversion functions live in [`convert`]
//!
//! ## Communication
//!
//! Gateways listen on UDP port 5684 (CoAPS). Listings fetch entities one at a
//! time with a short pause in between, as the gateway drops requests that
//! arrive too quickly.
//!
//! ## Runtime Selection
//!
//! This library is runtime-agnostic. Select your preferred runtime using feature flags:
//!
//! ### Using tokio (default)
//!
//! ```toml
//! [dependencies]
//! tradfri-rs = "0.1"
//! tokio = { version = "1", features = ["rt-multi-thread", "macros"] }
//! ```
//!
//! ### Using async-std
//!
//! ```toml
//! [dependencies]
//! tradfri-rs = { version = "0.1", default-features = false, features = ["runtime-async-std"] }
//! async-std = { version = "1.12", features = ["attributes"] }
//! ```
//!
//! ### Using smol
//!
//! ```toml
//! [dependencies]
//! tradfri-rs = { version = "0.1", default-features = false, features = ["runtime-smol"] }
//! smol = "2"
//! ```
//!
//! ## Feature Flags
//!
//! - `runtime-tokio` (default): Use the tokio async runtime
//! - `runtime-async-std`: Use the async-std runtime
//! - `runtime-smol`: Use the smol runtime

mod channel;
mod client;
mod codec;
mod config;
pub mod convert;
mod errors;
mod light_control;
mod model;
mod observe;
mod path;
pub mod runtime;
mod session;
#[cfg(test)]
mod testing;
mod types;

// Re-export public API
pub use channel::{
    Connector, Method, Notification, NotificationStream, Request, Response, ResponseCode,
    SecureChannel,
};
pub use client::Client;
pub use config::ClientConfig;
pub use errors::Error;
pub use light_control::LightControl;
pub use model::{
    AccessoryLink, Device, DeviceInfo, DeviceType, Gateway, Group, GroupUpdate, LinkedItems, Mood,
    MoodParent, PowerSource,
};
pub use observe::EventStream;
pub use path::ResourcePath;
pub use session::{BOOTSTRAP_IDENTITY, SessionState};
pub use types::{ColorXY, Dim, HexColor, Kelvin, Mired, PowerMode};
