//! Rewriting `meta.globalKey` so resubmitted documents do not clash with
//! contract keys already on the ledger.

use rand::rngs::ThreadRng;
use rand::Rng;
use serde_json::{Map, Value};
use uuid::{Builder, Uuid};

use crate::error::ConvertError;

const META: &str = "meta";
const GLOBAL_KEY: &str = "globalKey";

/// Source of fresh global keys.
pub trait KeyGenerator {
    fn next_key(&mut self) -> String;
}

/// Random (version 4) UUIDs drawn from `R`.
pub struct RandomKeys<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomKeys<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn next_uuid(&mut self) -> Uuid {
        Builder::from_random_bytes(self.rng.gen()).into_uuid()
    }
}

impl Default for RandomKeys<ThreadRng> {
    fn default() -> Self {
        Self::from_rng(rand::thread_rng())
    }
}

impl<R: Rng> KeyGenerator for RandomKeys<R> {
    fn next_key(&mut self) -> String {
        self.next_uuid().hyphenated().to_string()
    }
}

/// What to do when the document has no `meta.globalKey` to overwrite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingKeyPolicy {
    /// Report a missing-field error.
    #[default]
    Fail,
    /// Create `meta` and `globalKey` as needed.
    Insert,
}

/// Replace `meta.globalKey` in `doc` with a fresh key and return that key.
pub fn rewrite_global_key<K: KeyGenerator + ?Sized>(
    doc: &mut Value,
    keys: &mut K,
    policy: MissingKeyPolicy,
) -> Result<String, ConvertError> {
    let root = doc.as_object_mut().ok_or(ConvertError::NotAnObject("$"))?;
    if !root.contains_key(META) {
        match policy {
            MissingKeyPolicy::Fail => return Err(ConvertError::MissingField(META)),
            MissingKeyPolicy::Insert => {
                root.insert(META.to_string(), Value::Object(Map::new()));
            }
        }
    }

    let meta = root
        .get_mut(META)
        .and_then(Value::as_object_mut)
        .ok_or(ConvertError::NotAnObject(META))?;
    if !meta.contains_key(GLOBAL_KEY) && policy == MissingKeyPolicy::Fail {
        return Err(ConvertError::MissingField("meta.globalKey"));
    }

    let key = keys.next_key();
    meta.insert(GLOBAL_KEY.to_string(), Value::String(key.clone()));
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_keys_are_version_4() {
        let mut keys = RandomKeys::from_rng(StdRng::seed_from_u64(7));
        let uuid = keys.next_uuid();
        assert_eq!(uuid.get_version_num(), 4);
        assert_ne!(uuid, keys.next_uuid());
    }

    #[test]
    fn seeded_generators_agree() {
        let mut a = RandomKeys::from_rng(StdRng::seed_from_u64(42));
        let mut b = RandomKeys::from_rng(StdRng::seed_from_u64(42));
        assert_eq!(a.next_key(), b.next_key());
    }
}
