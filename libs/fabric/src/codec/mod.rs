use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod bincode;

pub use self::bincode::BincodeCodec;

/// Serialization of frame bodies
pub trait Codec: Send + Sync {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>>;

    fn decode<T: for<'de> Deserialize<'de>>(&self, bytes: &[u8]) -> Result<T>;
}
