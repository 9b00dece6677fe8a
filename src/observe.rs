//! Typed event streams for observed resources.
//!
//! The gateway pushes a notify frame whenever an observed resource changes.
//! Each event stream is backed by its own forwarding task that decodes the
//! frames of one resource and hands them to the receiver. Frames that fail to
//! decode are dropped so one bad notification cannot end the stream.

use futures::channel::mpsc;
use futures::{SinkExt, StreamExt};
use log::debug;
use serde::de::DeserializeOwned;

use crate::channel::{Connector, NotificationStream, SecureChannel};
use crate::client::Client;
use crate::codec;
use crate::errors::Error;
use crate::model::{Device, Gateway};
use crate::path::ResourcePath;
use crate::runtime;

type Result<T> = std::result::Result<T, Error>;

/// Decoded entities pushed by the gateway.
///
/// The stream ends when the channel's notifications end, e.g. when the
/// connection is torn down. Dropping it stops its forwarding task.
pub type EventStream<T> = mpsc::Receiver<T>;

/// Decoded events buffered per stream before the forwarder waits on the consumer.
const EVENT_BUFFER: usize = 16;

impl<C: Connector> Client<C> {
    /// Ask the gateway to push changes of its own resource.
    pub async fn observe_gateway(&self) -> Result<()> {
        self.observe(&ResourcePath::gateway_info()).await
    }

    /// Ask the gateway to push changes of device `id`.
    pub async fn observe_device(&self, id: u32) -> Result<()> {
        self.observe(&ResourcePath::device(id)).await
    }

    async fn observe(&self, path: &ResourcePath) -> Result<()> {
        let channel = self.channel().await?;
        debug!("Observing {}", path);
        channel.observe(path).await
    }

    /// Gateway updates, once [`observe_gateway`](Self::observe_gateway) has
    /// been called.
    ///
    /// Every call starts a new forwarding task with its own stream; call it
    /// once per logical consumer.
    pub async fn gateway_events(&self) -> Result<EventStream<Gateway>> {
        self.events(ResourcePath::gateway_info()).await
    }

    /// Updates of device `id`, once [`observe_device`](Self::observe_device)
    /// has been called for it.
    ///
    /// Every call starts a new forwarding task with its own stream.
    pub async fn device_events(&self, id: u32) -> Result<EventStream<Device>> {
        self.events(ResourcePath::device(id)).await
    }

    async fn events<T>(&self, path: ResourcePath) -> Result<EventStream<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let frames = self.channel().await?.notifications();
        let (sender, receiver) = mpsc::channel(EVENT_BUFFER);
        runtime::spawn(forward(frames, path, sender));
        Ok(receiver)
    }
}

async fn forward<T>(
    mut frames: NotificationStream,
    path: ResourcePath,
    mut events: mpsc::Sender<T>,
) where
    T: DeserializeOwned + Send + 'static,
{
    while let Some(frame) = frames.next().await {
        if frame.path != path {
            continue;
        }
        let event = match codec::decode::<T>(&frame.payload) {
            Ok(event) => event,
            Err(e) => {
                debug!("Dropping notification for {}: {}", path, e);
                continue;
            }
        };
        if events.send(event).await.is_err() {
            debug!("Event stream for {} dropped", path);
            return;
        }
    }
    debug!("Notifications for {} ended", path);
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::ClientConfig;
    use crate::testing::FakeGateway;

    fn client(gateway: &FakeGateway) -> Client<FakeGateway> {
        let config = ClientConfig::new("gw.local", "SECURITYCODE").psk("secret");
        Client::new(config, gateway.clone())
    }

    fn device(id: u32, name: &str) -> Vec<u8> {
        json!({"9003": id, "9001": name}).to_string().into_bytes()
    }

    #[tokio::test]
    async fn test_malformed_frame_is_skipped() {
        let gateway = FakeGateway::new();
        let path = ResourcePath::device(65537);
        gateway.push_frame(&path, device(65537, "Desk"));
        gateway.push_frame(&path, &b"{\"9003\": "[..]);
        gateway.push_frame(&path, device(65537, "Desk lamp"));

        let events = client(&gateway).device_events(65537).await.unwrap();
        let names: Vec<String> = events.map(|d| d.name).collect().await;

        assert_eq!(names, vec!["Desk", "Desk lamp"]);
    }

    #[tokio::test]
    async fn test_one_good_one_malformed() {
        let gateway = FakeGateway::new();
        let path = ResourcePath::device(65537);
        gateway.push_frame(&path, device(65537, "Desk"));
        gateway.push_frame(&path, &b"not json"[..]);

        let events = client(&gateway).device_events(65537).await.unwrap();
        let received: Vec<Device> = events.collect().await;

        assert_eq!(received.len(), 1);
        assert_eq!(received[0].id, 65537);
    }

    #[tokio::test]
    async fn test_frame_without_id_is_skipped() {
        let gateway = FakeGateway::new();
        let path = ResourcePath::device(65537);
        gateway.push_frame(&path, &b"{}"[..]);
        gateway.push_frame(&path, &b"[]"[..]);
        gateway.push_frame(&path, device(65537, "Desk"));

        let events = client(&gateway).device_events(65537).await.unwrap();
        let received: Vec<Device> = events.collect().await;

        assert_eq!(received.len(), 1);
        assert_eq!(received[0].name, "Desk");
    }

    #[tokio::test]
    async fn test_frames_are_routed_by_resource() {
        let gateway = FakeGateway::new();
        gateway.push_frame(&ResourcePath::device(1), device(1, "One"));
        gateway.push_frame(&ResourcePath::device(2), device(2, "Two"));
        gateway.push_frame(
            &ResourcePath::gateway_info(),
            json!({"9081": "7e0000", "9029": "1.3.14"}).to_string(),
        );
        let client = client(&gateway);

        let devices: Vec<Device> = client.device_events(2).await.unwrap().collect().await;
        let gateways: Vec<Gateway> = client.gateway_events().await.unwrap().collect().await;

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name, "Two");
        assert_eq!(gateways.len(), 1);
        assert_eq!(gateways[0].firmware_version, "1.3.14");
    }

    #[tokio::test]
    async fn test_each_call_gets_its_own_stream() {
        let gateway = FakeGateway::new();
        gateway.push_frame(&ResourcePath::device(7), device(7, "Porch"));
        let client = client(&gateway);

        let first = client.device_events(7).await.unwrap();
        let second = client.device_events(7).await.unwrap();

        assert_eq!(first.collect::<Vec<_>>().await.len(), 1);
        assert_eq!(second.collect::<Vec<_>>().await.len(), 1);
    }

    #[tokio::test]
    async fn test_observe_registers_paths() {
        let gateway = FakeGateway::new();
        let client = client(&gateway);

        client.observe_gateway().await.unwrap();
        client.observe_device(65537).await.unwrap();

        assert_eq!(
            gateway.observed(),
            vec![ResourcePath::gateway_info(), ResourcePath::device(65537)]
        );
        assert!(gateway.requests().is_empty());
    }
}
