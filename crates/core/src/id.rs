// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Proxy identifiers (C7): the bare 32-character hex ID, the fully
//! qualified proxy URI, and the short/tiny hashes derived from an ID.

use std::fmt;

use uuid::Uuid;

/// Length in ASCII characters of a proxy ID: a UUID rendered as 32
/// lowercase hexadecimal characters without hyphens.
pub const PROXY_ID_LEN: usize = 32;

/// The bare `<uuid32>` component of a proxy URI.
///
/// Always exactly [`PROXY_ID_LEN`] lowercase hex ASCII bytes; constructing
/// one from an arbitrary string can fail, which is why [`ProxyId::parse`]
/// returns an `Option` rather than panicking.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProxyId([u8; PROXY_ID_LEN]);

impl ProxyId {
    /// Mint a fresh ID from a random (v4) UUID.
    ///
    /// Uniqueness is what matters here, not the UUID version; v4 is used
    /// because it requires no coordination and leaks no information about
    /// the `hint_uri` that `generate` is invoked with (see `spindle-repo`).
    #[must_use]
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        let mut bytes = [0_u8; PROXY_ID_LEN];
        let rendered = uuid.simple().to_string();
        debug_assert_eq!(rendered.len(), PROXY_ID_LEN);
        bytes.copy_from_slice(rendered.as_bytes());
        Self(bytes)
    }

    /// Parse a bare 32-character lowercase hex ID. Returns `None` unless
    /// the input is exactly [`PROXY_ID_LEN`] hex digits, already lowercase.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() != PROXY_ID_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        if s.bytes().any(|b| b.is_ascii_uppercase()) {
            return None;
        }
        let mut bytes = [0_u8; PROXY_ID_LEN];
        bytes.copy_from_slice(s.as_bytes());
        Some(Self(bytes))
    }

    /// Derive an ID from an arbitrary external or proxy URI (§4.7):
    /// take the substring after the last `/`, lowercase it, keep only hex
    /// digits, stopping at the first `#`. The result must be exactly
    /// [`PROXY_ID_LEN`] characters, otherwise this returns `None`, a
    /// skip-condition for callers, never an error (§7).
    #[must_use]
    pub fn from_external_uri(uri: &str) -> Option<Self> {
        let tail = uri.rsplit('/').next().unwrap_or(uri);
        let tail = tail.split('#').next().unwrap_or(tail);
        let mut hex = String::with_capacity(PROXY_ID_LEN);
        for ch in tail.chars() {
            if ch.is_ascii_hexdigit() {
                hex.push(ch.to_ascii_lowercase());
            }
        }
        Self::parse(&hex)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        // Safety-free: constructors only ever store ASCII hex bytes.
        std::str::from_utf8(&self.0).expect("ProxyId bytes are always ASCII hex")
    }

    /// The unsigned 32-bit integer obtained by hex-decoding the first 8
    /// characters of the ID (§3.1).
    #[must_use]
    pub fn short_hash(&self) -> u32 {
        u32::from_str_radix(&self.as_str()[..8], 16).expect("first 8 chars are valid hex")
    }

    /// `short_hash() mod 256` (§3.1).
    #[must_use]
    pub fn tiny_hash(&self) -> u8 {
        (self.short_hash() % 256) as u8
    }
}

impl Default for ProxyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProxyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ProxyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProxyId").field(&self.as_str()).finish()
    }
}

impl std::str::FromStr for ProxyId {
    type Err = ProxyUriParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(ProxyUriParseError::InvalidId)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ProxyId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ProxyId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| serde::de::Error::custom("invalid 32-character proxy id"))
    }
}

/// A fully-qualified, locally-minted proxy URI: `<root>/<uuid32>#id`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ProxyUri(String);

/// The fixed fragment convention for a proxy URI (§3.1).
pub const PROXY_URI_FRAGMENT: &str = "#id";

impl ProxyUri {
    /// Join `root`, `/`, `id`, `#id`, inserting exactly one `/` between
    /// `root` and `id` regardless of whether `root` already ends in one
    /// (§4.7).
    #[must_use]
    pub fn from_id(root: &str, id: ProxyId) -> Self {
        let mut uri = String::with_capacity(root.len() + 1 + PROXY_ID_LEN + PROXY_URI_FRAGMENT.len());
        uri.push_str(root.trim_end_matches('/'));
        uri.push('/');
        uri.push_str(id.as_str());
        uri.push_str(PROXY_URI_FRAGMENT);
        Self(uri)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Recover the bare ID from this proxy URI. Always succeeds for a
    /// `ProxyUri` that was actually constructed by [`ProxyUri::from_id`].
    #[must_use]
    pub fn id(&self) -> Option<ProxyId> {
        ProxyId::from_external_uri(&self.0)
    }

    /// `true` iff `uri` has `root` as a prefix (§4.7).
    #[must_use]
    pub fn is_local(root: &str, uri: &str) -> bool {
        uri.starts_with(root)
    }
}

impl fmt::Display for ProxyUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ProxyUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProxyUri").field(&self.0).finish()
    }
}

impl AsRef<str> for ProxyUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Copy, Clone, Debug, thiserror::Error)]
pub enum ProxyUriParseError {
    #[error("not exactly 32 lowercase hex characters")]
    InvalidId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_uri_and_back() {
        let id = ProxyId::new();
        let uri = ProxyUri::from_id("http://example.org/", id);
        assert_eq!(uri.id(), Some(id));
    }

    #[test]
    fn joins_root_with_exactly_one_slash() {
        let id = ProxyId::parse(&"a".repeat(32)).unwrap();
        assert_eq!(
            ProxyUri::from_id("http://example.org", id).as_str(),
            "http://example.org/aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa#id"
        );
        assert_eq!(
            ProxyUri::from_id("http://example.org/", id).as_str(),
            "http://example.org/aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa#id"
        );
    }

    #[test]
    fn extracts_id_from_uri_lowercasing_and_stopping_at_fragment() {
        let uri = "http://example.org/AABBCCDD00112233445566778899AABB#id";
        let id = ProxyId::from_external_uri(uri).unwrap();
        assert_eq!(id.as_str(), "aabbccdd00112233445566778899aabb");
    }

    #[test]
    fn rejects_ids_of_the_wrong_length() {
        assert!(ProxyId::from_external_uri("http://example.org/short#id").is_none());
    }

    #[test]
    fn short_and_tiny_hash_are_derived_from_the_first_eight_hex_chars() {
        let id = ProxyId::parse("000000ff000000000000000000000000").unwrap();
        assert_eq!(id.short_hash(), 0x0000_00ff);
        assert_eq!(id.tiny_hash(), 0xff);
    }

    #[test]
    fn is_local_checks_a_plain_prefix() {
        assert!(ProxyUri::is_local(
            "http://example.org/",
            "http://example.org/abc#id"
        ));
        assert!(!ProxyUri::is_local(
            "http://example.org/",
            "http://elsewhere.example/abc#id"
        ));
    }
}
