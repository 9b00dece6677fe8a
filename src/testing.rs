//! In-memory gateway used by the unit tests.

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use futures::StreamExt;
use serde_json::{Value, json};

use crate::channel::{
    Connector, Method, Notification, NotificationStream, Request, Response, ResponseCode,
    SecureChannel,
};
use crate::errors::Error;
use crate::path::ResourcePath;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Default)]
struct State {
    responses: Mutex<HashMap<ResourcePath, Response>>,
    broken: Mutex<HashSet<ResourcePath>>,
    requests: Mutex<Vec<(Request, Instant)>>,
    dials: Mutex<Vec<(String, String)>>,
    observed: Mutex<Vec<ResourcePath>>,
    frames: Mutex<Vec<Notification>>,
    fail_dials: AtomicBool,
}

/// A scripted gateway that is both the [`Connector`] and, through
/// [`FakeChannel`], every channel it hands out.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeGateway {
    state: Arc<State>,
}

impl FakeGateway {
    pub const PSK: &'static str = "issued-psk";

    pub fn new() -> Self {
        let gateway = Self::default();
        gateway.respond(
            &ResourcePath::credential_exchange(),
            Response::new(
                ResponseCode::CREATED,
                json!({"9091": Self::PSK}).to_string(),
            ),
        );
        gateway
    }

    /// Answer every request on `path` with `response`.
    pub fn respond(&self, path: &ResourcePath, response: Response) {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert(path.clone(), response);
    }

    /// Answer fetches of `path` with `body` as content.
    pub fn respond_json(&self, path: &ResourcePath, body: Value) {
        self.respond(
            path,
            Response::new(ResponseCode::CONTENT, body.to_string()),
        );
    }

    /// Fail every request on `path` with a transport error.
    pub fn break_path(&self, path: &ResourcePath) {
        self.state.broken.lock().unwrap().insert(path.clone());
    }

    pub fn fail_dials(&self) {
        self.state.fail_dials.store(true, Ordering::SeqCst);
    }

    /// Queue a frame served by every notification stream.
    pub fn push_frame(&self, path: &ResourcePath, payload: impl Into<Vec<u8>>) {
        self.state.frames.lock().unwrap().push(Notification {
            path: path.clone(),
            payload: payload.into(),
        });
    }

    pub fn requests(&self) -> Vec<Request> {
        let requests = self.state.requests.lock().unwrap();
        requests.iter().map(|(r, _)| r.clone()).collect()
    }

    pub fn request_times(&self) -> Vec<Instant> {
        let requests = self.state.requests.lock().unwrap();
        requests.iter().map(|(_, at)| *at).collect()
    }

    /// Requests other than fetches.
    pub fn writes(&self) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != Method::Get)
            .collect()
    }

    pub fn dials(&self) -> Vec<(String, String)> {
        self.state.dials.lock().unwrap().clone()
    }

    pub fn observed(&self) -> Vec<ResourcePath> {
        self.state.observed.lock().unwrap().clone()
    }

    fn answer(&self, request: &Request) -> Result<Response> {
        if self.state.broken.lock().unwrap().contains(&request.path) {
            return Err(Error::transport(
                "send",
                io::Error::new(io::ErrorKind::TimedOut, "no response"),
            ));
        }
        if let Some(response) = self.state.responses.lock().unwrap().get(&request.path) {
            return Ok(response.clone());
        }
        let code = match request.method {
            Method::Get => ResponseCode::NOT_FOUND,
            Method::Put => ResponseCode::CHANGED,
            Method::Post => ResponseCode::CREATED,
            Method::Delete => ResponseCode::DELETED,
        };
        Ok(Response::new(code, Vec::new()))
    }
}

#[derive(Debug)]
pub(crate) struct FakeChannel {
    gateway: FakeGateway,
}

impl SecureChannel for FakeChannel {
    async fn send(&self, request: Request) -> Result<Response> {
        let response = self.gateway.answer(&request);
        self.gateway
            .state
            .requests
            .lock()
            .unwrap()
            .push((request, Instant::now()));
        response
    }

    async fn observe(&self, path: &ResourcePath) -> Result<()> {
        self.gateway
            .state
            .observed
            .lock()
            .unwrap()
            .push(path.clone());
        Ok(())
    }

    fn notifications(&self) -> NotificationStream {
        let frames = self.gateway.state.frames.lock().unwrap().clone();
        futures::stream::iter(frames).boxed()
    }
}

impl Connector for FakeGateway {
    type Channel = FakeChannel;

    async fn dial(&self, _address: &str, identity: &str, key: &str) -> Result<FakeChannel> {
        self.state
            .dials
            .lock()
            .unwrap()
            .push((identity.to_string(), key.to_string()));
        if self.state.fail_dials.load(Ordering::SeqCst) {
            return Err(Error::transport(
                "dial",
                io::Error::new(io::ErrorKind::ConnectionRefused, "handshake failed"),
            ));
        }
        Ok(FakeChannel {
            gateway: self.clone(),
        })
    }
}
