//! Canonical hashing and seed derivation.
//!
//! This module implements the determinism policy for tripsaber:
//! - JSON canonicalization using RFC 8785 (JCS)
//! - BLAKE3 hashing for song identities and package contents
//! - Seed derivation for the jitter stream

use serde::{Deserialize, Serialize};

use crate::config::MappingConfig;

/// Identity of one conversion: which map, converted with which settings.
///
/// The song id is written into the output document; the seed drives the
/// jitter stream. Both are pure functions of the map hash and the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongIdentity {
    /// 64-character lowercase hex string.
    pub song_id: String,
    /// Jitter stream seed.
    pub seed: u64,
}

impl SongIdentity {
    /// Derives the identity of converting `map_hash` under `config`.
    ///
    /// ```text
    /// song_id = hex(BLAKE3(JCS({"config": config, "map_hash": map_hash})))
    /// seed    = truncate_u64_be(BLAKE3(song_id))
    /// ```
    ///
    /// # Example
    /// ```
    /// use tripsaber_format::{MappingConfig, SongIdentity};
    ///
    /// let config = MappingConfig::default();
    /// let a = SongIdentity::derive("4d2be", &config).unwrap();
    /// let b = SongIdentity::derive("4d2bf", &config).unwrap();
    /// assert_ne!(a.seed, b.seed);
    /// ```
    pub fn derive(map_hash: &str, config: &MappingConfig) -> Result<Self, serde_json::Error> {
        let material = serde_json::json!({
            "map_hash": map_hash,
            "config": config.to_value()?,
        });
        let song_id = canonical_value_hash(&material);
        let seed = seed_from_str(&song_id);
        Ok(Self { song_id, seed })
    }
}

/// Computes the canonical BLAKE3 hash of a JSON value.
///
/// # Returns
/// * A 64-character lowercase hexadecimal string
pub fn canonical_value_hash(value: &serde_json::Value) -> String {
    let canonical = canonicalize_json(value);
    blake3_hash(canonical.as_bytes())
}

/// Canonicalizes a JSON value according to RFC 8785 (JCS).
///
/// This produces a deterministic JSON string where:
/// - Object keys are sorted lexicographically
/// - No whitespace between tokens
/// - Numbers are formatted per IEEE 754
/// - Strings use minimal escaping
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => format_jcs_number(n),
        serde_json::Value::String(s) => format_jcs_string(s),
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonicalize_json).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let pairs: Vec<String> = entries
                .into_iter()
                .map(|(k, v)| format!("{}:{}", format_jcs_string(k), canonicalize_json(v)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

/// Formats a number according to JCS rules.
fn format_jcs_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => {
            if f == 0.0 {
                return "0".to_string();
            }
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return format!("{}", f as i64);
            }
            // Rust's shortest round-trip formatting, without trailing zeros
            let s = format!("{}", f);
            if s.contains('.') && !s.contains('e') {
                return s.trim_end_matches('0').trim_end_matches('.').to_string();
            }
            s
        }
        _ => "null".to_string(),
    }
}

/// Formats a string according to JCS rules.
fn format_jcs_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c < '\x20' => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

/// Derives a 64-bit seed from a string.
///
/// ```text
/// seed = truncate_u64_be(BLAKE3(s))
/// ```
pub fn seed_from_str(s: &str) -> u64 {
    seed_from_bytes(s.as_bytes())
}

/// Derives a 64-bit seed from arbitrary bytes (first 8 bytes of the
/// BLAKE3 digest, big-endian).
pub fn seed_from_bytes(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_be_bytes(bytes)
}

/// Computes a BLAKE3 hash of arbitrary data.
///
/// # Returns
/// * A 64-character lowercase hexadecimal string
pub fn blake3_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
