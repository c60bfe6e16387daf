//! Wire types of the JSON-RPC API.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Byte string carried as `0x`-prefixed hex.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HexBytes(pub Vec<u8>);

impl HexBytes {
    /// Take the inner bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl Serialize for HexBytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(&self.0)))
    }
}

impl<'de> Deserialize<'de> for HexBytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(s)
            .map(HexBytes)
            .map_err(|_| de::Error::custom("invalid hex bytes"))
    }
}

/// Result of `da_submit`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitResponse {
    /// One identifier per blob, completion order.
    pub ids: Vec<HexBytes>,
    /// One proof per blob, same order as `ids`.
    pub proofs: Vec<HexBytes>,
}

/// Convert a list of byte vectors to wire form.
pub fn to_hex_list(items: Vec<Vec<u8>>) -> Vec<HexBytes> {
    items.into_iter().map(HexBytes).collect()
}

/// Convert wire bytes back to byte vectors.
pub fn from_hex_list(items: Vec<HexBytes>) -> Vec<Vec<u8>> {
    items.into_iter().map(HexBytes::into_vec).collect()
}
