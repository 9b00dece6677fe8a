//! Session establishment and pre-shared key acquisition.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::channel::{Connector, Method, Request, ResponseCode, SecureChannel};
use crate::codec;
use crate::config::ClientConfig;
use crate::errors::Error;
use crate::model::{PskRequest, PskResponse};
use crate::path::ResourcePath;
use crate::runtime::Mutex;

type Result<T> = std::result::Result<T, Error>;

/// Identity the gateway accepts together with its printed security code.
pub const BOOTSTRAP_IDENTITY: &str = "Client_identity";

/// Where a session is in its lifecycle.
///
/// `Connected` is terminal: a failed transport is not re-authenticated, the
/// client has to be rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionState {
    Unauthenticated,
    AcquiringKey,
    Authenticated,
    Connected,
}

struct Slot<T> {
    state: SessionState,
    psk: Option<String>,
    channel: Option<Arc<T>>,
}

/// Owns the one secure channel of a client.
///
/// All establishment goes through a single async mutex, so concurrent callers
/// that find no session wait for the first one to finish and then share its
/// channel. At most one credential exchange is ever in flight.
pub struct SessionManager<C: Connector> {
    connector: C,
    address: String,
    key: String,
    identity: String,
    slot: Mutex<Slot<C::Channel>>,
}

impl<C: Connector> SessionManager<C> {
    pub fn new(config: &ClientConfig, connector: C) -> Self {
        let state = if config.psk.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        };
        SessionManager {
            connector,
            address: config.address(),
            key: config.key.clone(),
            identity: config.identity.clone(),
            slot: Mutex::new(Slot {
                state,
                psk: config.psk.clone(),
                channel: None,
            }),
        }
    }

    pub async fn state(&self) -> SessionState {
        self.slot.lock().await.state
    }

    /// The pre-shared key issued for this client's identity, once known.
    pub async fn psk(&self) -> Option<String> {
        self.slot.lock().await.psk.clone()
    }

    /// Open the operational channel, acquiring a pre-shared key first if none
    /// is cached. With a cached key the channel is reopened directly.
    pub async fn connect(&self) -> Result<Arc<C::Channel>> {
        let mut slot = self.slot.lock().await;
        self.open(&mut slot).await
    }

    /// The established channel, establishing it on first use.
    pub async fn channel(&self) -> Result<Arc<C::Channel>> {
        let mut slot = self.slot.lock().await;
        match &slot.channel {
            Some(channel) => Ok(Arc::clone(channel)),
            None => self.open(&mut slot).await,
        }
    }

    async fn open(&self, slot: &mut Slot<C::Channel>) -> Result<Arc<C::Channel>> {
        info!("Connecting to gateway: {}", self.address);

        let psk = match &slot.psk {
            Some(psk) => psk.clone(),
            None => {
                slot.state = SessionState::AcquiringKey;
                match self.acquire_psk().await {
                    Ok(psk) => {
                        slot.psk = Some(psk.clone());
                        slot.state = SessionState::Authenticated;
                        psk
                    }
                    Err(e) => {
                        warn!("Credential exchange with {} failed: {}", self.address, e);
                        slot.state = SessionState::Unauthenticated;
                        return Err(e);
                    }
                }
            }
        };

        let channel = Arc::new(
            self.connector
                .dial(&self.address, &self.identity, &psk)
                .await?,
        );
        slot.channel = Some(Arc::clone(&channel));
        slot.state = SessionState::Connected;
        info!("Connected to {} as {}", self.address, self.identity);
        Ok(channel)
    }

    async fn acquire_psk(&self) -> Result<String> {
        debug!("Requesting PSK for identity {}", self.identity);

        let bootstrap = self
            .connector
            .dial(&self.address, BOOTSTRAP_IDENTITY, &self.key)
            .await
            .map_err(|e| Error::AuthenticationFailed(e.to_string()))?;

        let body = codec::encode(&PskRequest {
            identity: &self.identity,
        })?;
        let request = Request::new(
            Method::Post,
            ResourcePath::credential_exchange(),
            Some(body),
        );
        let response = bootstrap
            .send(request)
            .await
            .map_err(|e| Error::AuthenticationFailed(e.to_string()))?;

        if response.code != ResponseCode::CREATED {
            return Err(Error::AuthenticationFailed(format!(
                "gateway answered {}",
                response.code
            )));
        }

        let issued: PskResponse = codec::decode(&response.payload)
            .map_err(|e| Error::AuthenticationFailed(e.to_string()))?;
        if issued.psk.is_empty() {
            return Err(Error::AuthenticationFailed("no pre-shared key issued".into()));
        }

        debug!("Obtained PSK for identity {}", self.identity);
        Ok(issued.psk)
    }
}
