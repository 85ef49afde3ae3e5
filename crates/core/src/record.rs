//! Raw Records
//!
//! A raw record is whatever a producer handed us, tagged with where it came
//! from. The tag is attached at the transport boundary so the normalizer
//! never has to guess mid-logic.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys only the persistence backend emits.
const BACKEND_MARKER_KEYS: [&str; 2] = ["target_market", "created_at"];

/// Producer class of a raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Row returned by the task store; carries a backend-assigned id
    Persisted,
    /// Record built in-process (analysis result, mock, optimistic draft)
    ClientDraft,
}

impl Origin {
    /// Classify an untagged payload by key presence.
    ///
    /// Depends only on which keys exist, never on their order.
    pub fn detect(payload: &Value) -> Self {
        let persisted = payload
            .as_object()
            .is_some_and(|obj| BACKEND_MARKER_KEYS.iter().any(|k| obj.contains_key(*k)));
        if persisted {
            Origin::Persisted
        } else {
            Origin::ClientDraft
        }
    }

    /// Candidate keys for a field, preferred alias first.
    pub(crate) fn aliases<'a>(self, backend: &'a str, client: &'a str) -> [&'a str; 2] {
        match self {
            Origin::Persisted => [backend, client],
            Origin::ClientDraft => [client, backend],
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Persisted => write!(f, "persisted"),
            Origin::ClientDraft => write!(f, "client_draft"),
        }
    }
}

/// A producer payload plus its origin tag.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub origin: Origin,
    pub payload: Value,
}

impl RawRecord {
    pub fn new(origin: Origin, payload: Value) -> Self {
        Self { origin, payload }
    }

    /// A row from the task store.
    pub fn persisted(payload: Value) -> Self {
        Self::new(Origin::Persisted, payload)
    }

    /// A record built in-process.
    pub fn client_draft(payload: Value) -> Self {
        Self::new(Origin::ClientDraft, payload)
    }

    /// Tag a payload whose producer is unknown.
    pub fn detect(payload: Value) -> Self {
        let origin = Origin::detect(&payload);
        Self::new(origin, payload)
    }

    /// First non-null value among the origin's aliases for a field.
    pub(crate) fn field(&self, backend: &str, client: &str) -> Option<&Value> {
        self.origin
            .aliases(backend, client)
            .into_iter()
            .filter_map(|key| self.payload.get(key))
            .find(|v| !v.is_null())
    }
}
