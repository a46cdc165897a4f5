use serde::{de::DeserializeOwned, Deserialize};

/// One cached result set, stored as a single JSON document per
/// (data kind, owner) pair and overwritten on every successful fetch.
///
/// `updated_at` stays a string here: the stored representation is not
/// guaranteed to round-trip as a typed timestamp, so the freshness check
/// parses it leniently and treats unparseable values as stale.
#[derive(Debug, Clone, Deserialize)]
pub struct CachedCollection<T> {
    #[allow(dead_code)]
    pub owner_key: String,
    pub items: Vec<T>,
    pub updated_at: String,
}

impl<T: DeserializeOwned> CachedCollection<T> {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
