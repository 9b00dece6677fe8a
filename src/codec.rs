//! Payload encoding.
//!
//! Entities use the gateway's numeric field keys as their serde names; this is
//! the only place the wire serializer is named.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

pub(crate) fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(Error::Encode)
}

pub(crate) fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T> {
    serde_json::from_slice(payload).map_err(Error::Decode)
}
