//! Resource operations against a gateway.

use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::channel::{Connector, Method, Request, Response, SecureChannel};
use crate::codec;
use crate::config::ClientConfig;
use crate::errors::Error;
use crate::light_control::LightControl;
use crate::model::{
    Device, DeviceUpdate, Gateway, GatewaySettings, Group, GroupUpdate, Mood, MoodParent, NewGroup,
    NewMood,
};
use crate::path::ResourcePath;
use crate::runtime;
use crate::session::{SessionManager, SessionState};

type Result<T> = std::result::Result<T, Error>;

/// A client for one Trådfri gateway.
///
/// Every operation establishes the session on first use, sends a single
/// request (listings send one per entity) and waits for the gateway's answer.
/// Nothing is cached: each read is a live round trip.
///
/// # Example
///
/// ```ignore
/// use tradfri_rs::{Client, ClientConfig, LightControl, PowerMode};
///
/// async fn lights_off<C: tradfri_rs::Connector>(connector: C) -> Result<(), tradfri_rs::Error> {
///     let client = Client::new(ClientConfig::new("192.168.1.20", "SECURITYCODE"), connector);
///     for device in client.list_devices().await? {
///         if !device.light_control.is_empty() {
///             client
///                 .set_device(device.id, &LightControl::from(PowerMode::Off))
///                 .await?;
///         }
///     }
///     Ok(())
/// }
/// ```
pub struct Client<C: Connector> {
    config: ClientConfig,
    session: SessionManager<C>,
}

impl<C: Connector> Client<C> {
    pub fn new(config: ClientConfig, connector: C) -> Self {
        let session = SessionManager::new(&config, connector);
        Client { config, session }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Establish the session now instead of on first use.
    ///
    /// With a pre-shared key already known the channel is reopened without a
    /// new credential exchange.
    pub async fn connect(&self) -> Result<()> {
        self.session.connect().await.map(|_| ())
    }

    /// The pre-shared key issued to this client's identity. Persist it
    /// together with the identity to skip the exchange next time.
    pub async fn psk(&self) -> Option<String> {
        self.session.psk().await
    }

    pub async fn state(&self) -> SessionState {
        self.session.state().await
    }

    pub(crate) async fn channel(&self) -> Result<Arc<C::Channel>> {
        self.session.channel().await
    }

    /// Fetch and decode the resource at `path`.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &ResourcePath) -> Result<T> {
        let response = self.send(Method::Get, path, None).await?;
        codec::decode(&response.payload)
    }

    /// Replace fields of the resource at `path` with those set in `body`.
    pub async fn replace<B>(&self, path: &ResourcePath, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let payload = codec::encode(body)?;
        self.send(Method::Put, path, Some(payload)).await.map(|_| ())
    }

    /// Create a resource at `path` from `body`.
    pub async fn create<B>(&self, path: &ResourcePath, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let payload = codec::encode(body)?;
        self.send(Method::Post, path, Some(payload)).await.map(|_| ())
    }

    pub async fn delete(&self, path: &ResourcePath) -> Result<()> {
        self.send(Method::Delete, path, None).await.map(|_| ())
    }

    async fn trigger(&self, path: &ResourcePath) -> Result<()> {
        self.send(Method::Post, path, None).await.map(|_| ())
    }

    async fn send(
        &self,
        method: Method,
        path: &ResourcePath,
        payload: Option<Vec<u8>>,
    ) -> Result<Response> {
        let channel = self.session.channel().await?;

        debug!("{} {}", method, path);
        let response = channel
            .send(Request::new(method, path.clone(), payload))
            .await?;
        debug!("{} {} -> {}", method, path, response.code);

        if !response.code.is_success() {
            return Err(Error::rejected(path, response.code));
        }
        Ok(response)
    }

    /// Fetch every id in turn, pausing between fetches. The first failure
    /// aborts the whole listing.
    async fn enumerate<T, F>(&self, ids: &[u32], path: F) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
        F: Fn(u32) -> ResourcePath + Sync,
    {
        let mut entities = Vec::with_capacity(ids.len());
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                runtime::sleep(self.config.list_delay).await;
            }
            entities.push(self.fetch(&path(id)).await?);
        }
        debug!("Listed {} entities", entities.len());
        Ok(entities)
    }

    // Gateway

    pub async fn get_gateway(&self) -> Result<Gateway> {
        self.fetch(&ResourcePath::gateway_info()).await
    }

    pub async fn set_ntp_server(&self, server: &str) -> Result<()> {
        let settings = GatewaySettings {
            ntp_server: Some(server),
            ..Default::default()
        };
        self.replace(&ResourcePath::gateway_info(), &settings).await
    }

    /// Allow new devices to pair for the next `seconds`.
    pub async fn set_commissioning_mode(&self, seconds: u32) -> Result<()> {
        let settings = GatewaySettings {
            commissioning_mode: Some(seconds),
            ..Default::default()
        };
        self.replace(&ResourcePath::gateway_info(), &settings).await
    }

    pub async fn reboot(&self) -> Result<()> {
        self.trigger(&ResourcePath::gateway_reboot()).await
    }

    /// Erase all pairings and settings on the gateway.
    pub async fn factory_reset(&self) -> Result<()> {
        self.trigger(&ResourcePath::gateway_factory_reset()).await
    }

    // Devices

    pub async fn list_device_ids(&self) -> Result<Vec<u32>> {
        self.fetch(&ResourcePath::devices()).await
    }

    pub async fn get_device(&self, id: u32) -> Result<Device> {
        self.fetch(&ResourcePath::device(id)).await
    }

    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        let ids = self.list_device_ids().await?;
        self.enumerate(&ids, ResourcePath::device).await
    }

    /// Apply `control` to the light of device `id`.
    pub async fn set_device(&self, id: u32, control: &LightControl) -> Result<()> {
        if !control.is_valid() {
            return Err(Error::Validation("no light attribute set".into()));
        }
        let update = DeviceUpdate {
            light_control: [control],
        };
        self.replace(&ResourcePath::device(id), &update).await
    }

    pub async fn remove_device(&self, id: u32) -> Result<()> {
        self.delete(&ResourcePath::device(id)).await
    }

    // Groups

    pub async fn list_group_ids(&self) -> Result<Vec<u32>> {
        self.fetch(&ResourcePath::groups()).await
    }

    pub async fn get_group(&self, id: u32) -> Result<Group> {
        self.fetch(&ResourcePath::group(id)).await
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        let ids = self.list_group_ids().await?;
        self.enumerate(&ids, ResourcePath::group).await
    }

    /// Create a group named `name` containing `device_ids`.
    ///
    /// The gateway accepts identifiers of devices it does not know, so every
    /// id is checked against the device index first. Unknown ids fail with
    /// [`Error::Validation`] before anything is written.
    pub async fn add_group(&self, device_ids: &[u32], name: &str) -> Result<()> {
        let known = self.list_device_ids().await?;
        if let Some(missing) = device_ids.iter().find(|id| !known.contains(id)) {
            warn!("Not creating group {name}: device {missing} does not exist");
            return Err(Error::Validation("nonexistent identifiers".into()));
        }

        let group = NewGroup {
            device_ids: (!device_ids.is_empty()).then_some(device_ids),
            name,
        };
        self.create(&ResourcePath::group_add(), &group).await
    }

    pub async fn set_group(&self, id: u32, update: &GroupUpdate) -> Result<()> {
        if !update.is_valid() {
            return Err(Error::Validation("no group attribute set".into()));
        }
        self.replace(&ResourcePath::group(id), update).await
    }

    pub async fn remove_group(&self, id: u32) -> Result<()> {
        self.delete(&ResourcePath::group(id)).await
    }

    // Moods

    /// Resolve the parent all moods live under.
    pub async fn mood_parent(&self) -> Result<MoodParent> {
        let root: Vec<u32> = self.fetch(&ResourcePath::mood_root()).await?;
        root.first().copied().map(MoodParent).ok_or(Error::NoMoodParent)
    }

    async fn resolve(&self, parent: Option<MoodParent>) -> Result<MoodParent> {
        match parent {
            Some(parent) => Ok(parent),
            None => self.mood_parent().await,
        }
    }

    /// Pass a parent from [`mood_parent`](Self::mood_parent) to skip the
    /// lookup; `None` resolves it first.
    pub async fn list_mood_ids(&self, parent: Option<MoodParent>) -> Result<Vec<u32>> {
        let parent = self.resolve(parent).await?;
        self.fetch(&ResourcePath::moods(parent.0)).await
    }

    pub async fn get_mood(&self, id: u32, parent: Option<MoodParent>) -> Result<Mood> {
        let parent = self.resolve(parent).await?;
        self.fetch(&ResourcePath::mood(parent.0, id)).await
    }

    pub async fn list_moods(&self, parent: Option<MoodParent>) -> Result<Vec<Mood>> {
        let MoodParent(parent) = self.resolve(parent).await?;
        let ids: Vec<u32> = self.fetch(&ResourcePath::moods(parent)).await?;
        self.enumerate(&ids, |id| ResourcePath::mood(parent, id)).await
    }

    pub async fn add_mood(&self, name: &str, parent: Option<MoodParent>) -> Result<()> {
        let parent = self.resolve(parent).await?;
        let mood = NewMood { name, is_active: 1 };
        self.create(&ResourcePath::moods(parent.0), &mood).await
    }

    pub async fn remove_mood(&self, id: u32, parent: Option<MoodParent>) -> Result<()> {
        let parent = self.resolve(parent).await?;
        self.delete(&ResourcePath::mood(parent.0, id)).await
    }
}
