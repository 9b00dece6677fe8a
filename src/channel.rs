//! The secure datagram channel the client talks through.
//!
//! The DTLS transport itself lives outside this crate. Implement [`Connector`]
//! and [`SecureChannel`] over your CoAP/DTLS stack of choice and hand the
//! connector to [`Client::new`](crate::Client::new).

use std::fmt;
use std::future::Future;

use futures::stream::BoxStream;

use crate::errors::Error;
use crate::path::ResourcePath;

type Result<T> = std::result::Result<T, Error>;

/// A raw stream of notify frames for observed resources.
pub type NotificationStream = BoxStream<'static, Notification>;

/// Request verbs used by the gateway protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Method {
    /// Fetch a resource. No body.
    #[strum(serialize = "GET")]
    Get,
    /// Replace fields of an existing resource.
    #[strum(serialize = "PUT")]
    Put,
    /// Create a resource or trigger an action.
    #[strum(serialize = "POST")]
    Post,
    /// Delete a resource. No body.
    #[strum(serialize = "DELETE")]
    Delete,
}

/// A CoAP response code, `class.detail` (e.g. `2.05`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseCode {
    pub class: u8,
    pub detail: u8,
}

impl ResponseCode {
    pub const CREATED: ResponseCode = ResponseCode::new(2, 1);
    pub const DELETED: ResponseCode = ResponseCode::new(2, 2);
    pub const CHANGED: ResponseCode = ResponseCode::new(2, 4);
    pub const CONTENT: ResponseCode = ResponseCode::new(2, 5);
    pub const BAD_REQUEST: ResponseCode = ResponseCode::new(4, 0);
    pub const UNAUTHORIZED: ResponseCode = ResponseCode::new(4, 1);
    pub const NOT_FOUND: ResponseCode = ResponseCode::new(4, 4);

    pub const fn new(class: u8, detail: u8) -> Self {
        ResponseCode { class, detail }
    }

    pub fn is_success(&self) -> bool {
        self.class == 2
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.class, self.detail)
    }
}

/// A single request sent over a [`SecureChannel`].
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: ResourcePath,
    pub payload: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, path: ResourcePath, payload: Option<Vec<u8>>) -> Self {
        Request {
            method,
            path,
            payload,
        }
    }
}

/// The gateway's answer to a [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub code: ResponseCode,
    pub payload: Vec<u8>,
}

impl Response {
    pub fn new(code: ResponseCode, payload: impl Into<Vec<u8>>) -> Self {
        Response {
            code,
            payload: payload.into(),
        }
    }
}

/// A notify frame pushed by the gateway for an observed resource.
///
/// Frames carry the same entity encoding as fetch responses.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub path: ResourcePath,
    pub payload: Vec<u8>,
}

/// An established, authenticated session with a gateway.
///
/// Implementations own retransmission and any timeout policy; the client
/// waits on [`send`](SecureChannel::send) for as long as it takes.
pub trait SecureChannel: Send + Sync + 'static {
    /// Send a request and wait for its response.
    fn send(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;

    /// Register an observation on `path`.
    ///
    /// Notifications for it are delivered through
    /// [`notifications`](SecureChannel::notifications).
    fn observe(&self, path: &ResourcePath) -> impl Future<Output = Result<()>> + Send;

    /// A fresh stream of notify frames for all observed resources.
    ///
    /// The stream ends when the channel is torn down.
    fn notifications(&self) -> NotificationStream;
}

/// Opens secure channels to a gateway.
pub trait Connector: Send + Sync + 'static {
    type Channel: SecureChannel;

    /// Perform the DTLS-PSK handshake with `address` using `identity` and `key`.
    fn dial(
        &self,
        address: &str,
        identity: &str,
        key: &str,
    ) -> impl Future<Output = Result<Self::Channel>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_code_display() {
        assert_eq!(ResponseCode::CREATED.to_string(), "2.01");
        assert_eq!(ResponseCode::NOT_FOUND.to_string(), "4.04");
    }

    #[test]
    fn test_response_code_success() {
        assert!(ResponseCode::CONTENT.is_success());
        assert!(ResponseCode::CHANGED.is_success());
        assert!(!ResponseCode::BAD_REQUEST.is_success());
        assert!(!ResponseCode::new(5, 0).is_success());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
