//! Gateway entities: devices, groups, moods and the gateway itself.
//!
//! Field names follow the gateway's numeric keys (IPSO object and resource ids
//! where they exist). Read structs default every field, so entities with
//! missing keys still decode.

use serde::{Deserialize, Serialize};

use crate::convert;
use crate::light_control::LightControl;
use crate::types::{Dim, PowerMode};

/// The application type of a device.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(from = "u8", into = "u8")]
pub enum DeviceType {
    Remote,
    Dimmer,
    #[default]
    Light,
    Sensor,
    #[strum(to_string = "Unknown")]
    Unknown(u8),
}

impl From<u8> for DeviceType {
    fn from(value: u8) -> Self {
        match value {
            0 => DeviceType::Remote,
            1 => DeviceType::Dimmer,
            2 => DeviceType::Light,
            4 => DeviceType::Sensor,
            other => DeviceType::Unknown(other),
        }
    }
}

impl From<DeviceType> for u8 {
    fn from(kind: DeviceType) -> Self {
        match kind {
            DeviceType::Remote => 0,
            DeviceType::Dimmer => 1,
            DeviceType::Light => 2,
            DeviceType::Sensor => 4,
            DeviceType::Unknown(other) => other,
        }
    }
}

/// Available power sources, as defined in IPSO object 3.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(from = "u8", into = "u8")]
pub enum PowerSource {
    #[default]
    #[strum(serialize = "DC")]
    Dc,
    #[strum(serialize = "Internal Battery")]
    InternalBattery,
    #[strum(serialize = "External Battery")]
    ExternalBattery,
    Battery,
    #[strum(serialize = "Power over Ethernet")]
    PoE,
    #[strum(serialize = "USB")]
    Usb,
    #[strum(serialize = "AC")]
    Ac,
    Solar,
    #[strum(to_string = "Unknown")]
    Unknown(u8),
}

impl From<u8> for PowerSource {
    fn from(value: u8) -> Self {
        match value {
            0 => PowerSource::Dc,
            1 => PowerSource::InternalBattery,
            2 => PowerSource::ExternalBattery,
            3 => PowerSource::Battery,
            4 => PowerSource::PoE,
            5 => PowerSource::Usb,
            6 => PowerSource::Ac,
            7 => PowerSource::Solar,
            other => PowerSource::Unknown(other),
        }
    }
}

impl From<PowerSource> for u8 {
    fn from(source: PowerSource) -> Self {
        match source {
            PowerSource::Dc => 0,
            PowerSource::InternalBattery => 1,
            PowerSource::ExternalBattery => 2,
            PowerSource::Battery => 3,
            PowerSource::PoE => 4,
            PowerSource::Usb => 5,
            PowerSource::Ac => 6,
            PowerSource::Solar => 7,
            PowerSource::Unknown(other) => other,
        }
    }
}

/// Manufacturer information of a device (IPSO object 3). Read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceInfo {
    #[serde(rename = "0")]
    pub manufacturer: String,
    #[serde(rename = "1")]
    pub model_number: String,
    #[serde(rename = "2")]
    pub serial: String,
    #[serde(rename = "3")]
    pub firmware_version: String,
    #[serde(rename = "6")]
    pub power_source: PowerSource,
    /// Battery level as a percentage.
    #[serde(rename = "9")]
    pub battery_level: u8,
}

/// A device paired with the gateway: a bulb, remote, dimmer or sensor.
///
/// Every field but the id may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "3", default)]
    pub info: DeviceInfo,
    #[serde(rename = "3311", default)]
    pub light_control: Vec<LightControl>,
    #[serde(rename = "5750", default)]
    pub kind: DeviceType,
    #[serde(rename = "9001", default)]
    pub name: String,
    /// Unix timestamp (seconds) of pairing.
    #[serde(rename = "9002", default)]
    pub created_at: i64,
    #[serde(rename = "9003")]
    pub id: u32,
    #[serde(rename = "9019", default)]
    pub reachable: u8,
    /// Unix timestamp (seconds).
    #[serde(rename = "9020", default)]
    pub last_seen: i64,
    #[serde(rename = "9054", default)]
    pub ota_update_state: i32,
}

impl Device {
    pub fn is_reachable(&self) -> bool {
        self.reachable != 0
    }
}

/// Body of a device update.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct DeviceUpdate<'a> {
    #[serde(rename = "3311")]
    pub light_control: [&'a LightControl; 1],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedItems {
    #[serde(rename = "9003")]
    pub device_ids: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessoryLink {
    #[serde(rename = "15002")]
    pub linked_items: LinkedItems,
}

/// A group of devices on the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    #[serde(rename = "5850")]
    pub power: u8,
    /// Dimmer value in the range [0, 254].
    #[serde(rename = "5851")]
    pub dim: u8,
    #[serde(rename = "9001")]
    pub name: String,
    #[serde(rename = "9002")]
    pub created_at: i64,
    #[serde(rename = "9003")]
    pub id: u32,
    #[serde(rename = "9018")]
    pub accessory_link: AccessoryLink,
    /// The currently active mood, if any.
    #[serde(rename = "9039")]
    pub mood_id: u32,
}

impl Group {
    pub fn device_ids(&self) -> &[u32] {
        &self.accessory_link.linked_items.device_ids
    }
}

/// Fields to change on a group. Unset fields are left untouched.
///
/// # Examples
///
/// ```
/// use tradfri_rs::{Dim, GroupUpdate, PowerMode};
///
/// let update = GroupUpdate::new().power(PowerMode::On).dim(Dim::max());
/// assert_eq!(update.dim, Some(254));
/// ```
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupUpdate {
    #[serde(rename = "5850")]
    pub power: Option<PowerMode>,
    #[serde(rename = "5851")]
    pub dim: Option<u8>,
    #[serde(rename = "9001")]
    pub name: Option<String>,
    #[serde(rename = "9039")]
    pub mood_id: Option<u32>,
    #[serde(rename = "5712")]
    pub transition_time: Option<u32>,
}

impl GroupUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the update changes anything. A transition time alone does not.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradfri_rs::{GroupUpdate, PowerMode};
    ///
    /// assert!(!GroupUpdate::new().transition_ms(500).is_valid());
    /// assert!(GroupUpdate::new().power(PowerMode::On).is_valid());
    /// ```
    pub fn is_valid(&self) -> bool {
        self.power.is_some() || self.dim.is_some() || self.name.is_some() || self.mood_id.is_some()
    }

    pub fn power(mut self, power: PowerMode) -> Self {
        self.power = Some(power);
        self
    }

    pub fn dim(mut self, dim: Dim) -> Self {
        self.dim = Some(dim.value());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Activate a mood on the group.
    pub fn mood(mut self, mood_id: u32) -> Self {
        self.mood_id = Some(mood_id);
        self
    }

    pub fn transition_ms(mut self, ms: u32) -> Self {
        self.transition_time = Some(convert::ms_to_duration(ms));
        self
    }
}

/// Body of a group creation request.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub(crate) struct NewGroup<'a> {
    #[serde(rename = "9003")]
    pub device_ids: Option<&'a [u32]>,
    #[serde(rename = "9001")]
    pub name: &'a str,
}

/// A mood: a stored set of light settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mood {
    #[serde(rename = "9003")]
    pub id: u32,
    #[serde(rename = "9002")]
    pub created_at: i64,
    #[serde(rename = "9001")]
    pub name: String,
    /// Whether the mood ships with the gateway or was created by a user.
    #[serde(rename = "9068")]
    pub is_predefined: u8,
    #[serde(rename = "9057")]
    pub index: i32,
    #[serde(rename = "9058")]
    pub is_active: u8,
    #[serde(rename = "15013")]
    pub light_controls: Vec<LightControl>,
    #[serde(rename = "9070")]
    pub use_current_light_settings: u8,
}

/// Body of a mood creation request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct NewMood<'a> {
    #[serde(rename = "9001")]
    pub name: &'a str,
    #[serde(rename = "9058")]
    pub is_active: u8,
}

/// The synthetic parent all moods live under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodParent(pub u32);

/// Gateway information. Only the id (`9081`) is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gateway {
    #[serde(rename = "9081")]
    pub id: String,
    #[serde(rename = "9023", default)]
    pub ntp_server: String,
    #[serde(rename = "9029", default)]
    pub firmware_version: String,
    /// Current time as a Unix timestamp.
    #[serde(rename = "9059", default)]
    pub current_timestamp: i64,
    /// Current time formatted as `YYYY-MM-DDTHH:MM:SS.MMM`.
    #[serde(rename = "9060", default)]
    pub current_time_utc: String,
    /// Seconds during which new devices may pair; 0 when not commissioning.
    #[serde(rename = "9061", default)]
    pub commissioning_mode: u32,
    #[serde(rename = "9056", default)]
    pub release_notes_url: String,
    #[serde(rename = "9035", default)]
    pub name: String,
    #[serde(rename = "9071", default)]
    pub time_source: i32,
    #[serde(rename = "9054", default)]
    pub ota_update_state: i32,
    #[serde(rename = "9055", default)]
    pub update_progress: i32,
}

/// Fields to change on the gateway.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct GatewaySettings<'a> {
    #[serde(rename = "9023")]
    pub ntp_server: Option<&'a str>,
    #[serde(rename = "9061")]
    pub commissioning_mode: Option<u32>,
}

/// Credential exchange request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PskRequest<'a> {
    #[serde(rename = "9090")]
    pub identity: &'a str,
}

/// Credential exchange response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PskResponse {
    #[serde(rename = "9091")]
    pub psk: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_bulb() {
        let device: Device = serde_json::from_value(json!({
            "3": {"0": "IKEA of Sweden", "1": "TRADFRI bulb E27 WS opal 980lm", "3": "1.2.214", "6": 1},
            "3311": [{"5850": 1, "5851": 254, "5711": 454, "9003": 0}],
            "5750": 2,
            "9001": "Hallway",
            "9002": 1507220606,
            "9003": 65537,
            "9019": 1,
            "9020": 1507411380,
            "9054": 0
        }))
        .unwrap();

        assert_eq!(device.id, 65537);
        assert_eq!(device.kind, DeviceType::Light);
        assert_eq!(device.info.power_source, PowerSource::InternalBattery);
        assert!(device.is_reachable());
        assert_eq!(device.light_control[0].dim, Some(254));
    }

    #[test]
    fn test_entity_without_id_is_rejected() {
        assert!(serde_json::from_str::<Device>("[]").is_err());
        assert!(serde_json::from_str::<Device>("{}").is_err());
        assert!(serde_json::from_str::<Device>(r#"{"9001": "Hallway"}"#).is_err());
        assert!(serde_json::from_str::<Gateway>("{}").is_err());

        let gateway: Gateway = serde_json::from_str(r#"{"9081": "7e0000"}"#).unwrap();
        assert_eq!(gateway.id, "7e0000");
        assert_eq!(gateway.commissioning_mode, 0);
    }

    #[test]
    fn test_device_type_display() {
        assert_eq!(DeviceType::from(0).to_string(), "Remote");
        assert_eq!(DeviceType::from(9).to_string(), "Unknown");
        assert_eq!(PowerSource::from(4).to_string(), "Power over Ethernet");
        assert_eq!(u8::from(PowerSource::from(12)), 12);
    }

    #[test]
    fn test_decode_group() {
        let group: Group = serde_json::from_value(json!({
            "5850": 1,
            "5851": 0,
            "9001": "Living room",
            "9003": 131073,
            "9018": {"15002": {"9003": [65536, 65537]}},
            "9039": 196608
        }))
        .unwrap();
        assert_eq!(group.device_ids(), &[65536, 65537]);
        assert_eq!(group.mood_id, 196608);
    }

    #[test]
    fn test_group_update_body() {
        let update = GroupUpdate::new().name("Kitchen").power(PowerMode::Off);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"5850": 0, "9001": "Kitchen"})
        );
    }

    #[test]
    fn test_new_group_body() {
        let ids = [65536, 65537];
        let body = NewGroup {
            device_ids: Some(&ids),
            name: "Bedroom",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"9003": [65536, 65537], "9001": "Bedroom"})
        );
    }
}
