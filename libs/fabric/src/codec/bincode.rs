use bincode::Options;
use serde::{Deserialize, Serialize};

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::frame::MAX_BODY_LEN;

/// Bincode codec for message bodies
///
/// Fixed-width little-endian integers, the layout the agent decodes. A body
/// must fit in one datagram and decode with no bytes left over.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl BincodeCodec {
    fn options() -> impl Options {
        bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .with_limit(MAX_BODY_LEN as u64)
            .reject_trailing_bytes()
    }
}

impl Codec for BincodeCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        Self::options()
            .serialize(value)
            .map_err(|e| Error::Codec(e.to_string()))
    }

    fn decode<T: for<'de> Deserialize<'de>>(&self, bytes: &[u8]) -> Result<T> {
        Self::options()
            .deserialize(bytes)
            .map_err(|e| Error::Codec(e.to_string()))
    }
}
