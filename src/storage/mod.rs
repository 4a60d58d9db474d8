//! JSON (de)serialization of authored dialogue sets
//!
//! The on-disk shape mirrors the in-memory model one-to-one, so authored
//! sets round-trip losslessly. Loading validates; a set that fails its
//! authoring invariants is rejected here, before anything can run it.

use crate::types::tree::DialogueSet;

/// Serialize a dialogue set to pretty-printed JSON bytes.
pub fn save(set: &DialogueSet) -> anyhow::Result<Vec<u8>> {
    let json = serde_json::to_string_pretty(set)?;
    Ok(json.into_bytes())
}

/// Deserialize and validate a dialogue set from JSON bytes.
pub fn load(bytes: &[u8]) -> anyhow::Result<DialogueSet> {
    let set: DialogueSet = serde_json::from_slice(bytes)?;
    set.validate()?;
    Ok(set)
}
