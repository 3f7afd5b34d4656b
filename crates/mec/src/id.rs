use std::{error::Error, fmt, str::FromStr};

use base64::Engine;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::serialization::DeserializeFromStr;

const PREFIX: &str = "obj_";

/// Length of the base64 part of a rendered ID: 16 bytes without padding.
const ENCODED_LEN: usize = 22;

/// Unique identity of an object.
///
/// IDs are random, so two objects never share one, even across sessions and saved files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId([u8; 16]);

impl ObjectId {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let mut bytes = [0; 16];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn generate() -> Self {
        Self::new(&mut rand::thread_rng())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PREFIX)?;
        let mut buffer = [b'A'; ENCODED_LEN];
        base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode_slice(self.0, &mut buffer)
            .map_err(|_| fmt::Error)?;
        f.write_str(std::str::from_utf8(&buffer).map_err(|_| fmt::Error)?)
    }
}

impl FromStr for ObjectId {
    type Err = InvalidObjectId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b64 = s.strip_prefix(PREFIX).ok_or(InvalidObjectId)?;
        if b64.len() != ENCODED_LEN {
            return Err(InvalidObjectId);
        }

        // Slack for decoders that size the output by whole 4-character groups.
        let mut bytes = [0; 18];
        let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode_slice(b64, &mut bytes)
            .map_err(|_| InvalidObjectId)?;
        if decoded != 16 {
            return Err(InvalidObjectId);
        }

        let mut id = [0; 16];
        id.copy_from_slice(&bytes[..16]);
        Ok(Self(id))
    }
}

impl Serialize for ObjectId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(DeserializeFromStr::new("object ID"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidObjectId;

impl fmt::Display for InvalidObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid object ID")
    }
}

impl Error for InvalidObjectId {}

/// Anything that lives in a workspace: it has a stable ID and a name that can change at any time.
pub trait Named {
    fn id(&self) -> ObjectId;
    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);
}
