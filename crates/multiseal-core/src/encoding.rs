//! String encodings for binary fields.
//!
//! Envelope records cross process and storage boundaries as text, so every
//! binary field (ciphertext, IV, wrapped keys) is written as standard Base64
//! when the serializer is human readable. Binary formats such as CBOR get
//! raw byte strings instead.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserializer, Serializer};

/// Encode bytes as standard Base64.
pub fn to_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Keep the first `max_chars` characters of `s`, appending an ellipsis
/// when something was cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars).collect();
    out.push('…');
    out
}

/// Serde adapter for `Vec<u8>` fields: Base64 text or raw bytes depending
/// on the format.
///
/// Use with `#[serde(with = "multiseal_core::encoding::base64_bytes")]`.
pub mod base64_bytes {
    use super::*;

    pub fn serialize<S, T>(bytes: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<[u8]>,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&BASE64.encode(bytes.as_ref()))
        } else {
            serializer.serialize_bytes(bytes.as_ref())
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(BytesVisitor)
        } else {
            deserializer.deserialize_bytes(BytesVisitor)
        }
    }
}

struct BytesVisitor;

impl<'de> Visitor<'de> for BytesVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a base64 string or a byte string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        BASE64
            .decode(v)
            .map_err(|e| E::custom(format!("invalid base64: {e}")))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<Self::Value, E> {
        Ok(v.to_vec())
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> std::result::Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
        let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(b) = seq.next_element::<u8>()? {
            out.push(b);
        }
        Ok(out)
    }
}
