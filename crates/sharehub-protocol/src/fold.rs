//! Case-insensitive JSON objects.
//!
//! Callers send keys in any casing (`Services`, `SERVICES`, `services`), so
//! every object on the wire is read with its keys lower-cased before the
//! fields are matched. When two keys fold to the same name the later one wins.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;

/// A JSON object with lower-cased keys and undecoded values.
#[derive(Debug, Default)]
pub struct FoldedObject(BTreeMap<String, Box<RawValue>>);

impl FoldedObject {
    /// Raw value under `key` (already lower-case). A JSON `null` is returned
    /// as-is; only an absent key yields `None`.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.0.get(key).map(|v| &**v)
    }

    pub fn remove(&mut self, key: &str) -> Option<Box<RawValue>> {
        self.0.remove(key)
    }

    /// Decode into a struct whose field names are lower-case.
    ///
    /// `null` members are dropped first, so they leave the field at its
    /// default instead of failing the decode.
    pub fn decode<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        let present: BTreeMap<&str, &RawValue> = self
            .0
            .iter()
            .filter(|(_, v)| !is_null(v))
            .map(|(k, v)| (k.as_str(), &**v))
            .collect();
        serde_json::from_str(&serde_json::to_string(&present)?)
    }
}

/// True when the raw value is the JSON literal `null`.
pub fn is_null(raw: &RawValue) -> bool {
    raw.get().trim() == "null"
}

impl<'de> Deserialize<'de> for FoldedObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FoldedVisitor;

        impl<'de> Visitor<'de> for FoldedVisitor {
            type Value = FoldedObject;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = BTreeMap::new();
                while let Some((key, value)) = map.next_entry::<String, Box<RawValue>>()? {
                    entries.insert(key.to_lowercase(), value);
                }
                Ok(FoldedObject(entries))
            }
        }

        deserializer.deserialize_map(FoldedVisitor)
    }
}
