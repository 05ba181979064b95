//! Account entities.
//!
//! An entity is one account read from the dataset. Its peer list is kept
//! exactly as declared, including ids that match no other entity; those
//! dangling references are dropped later when the relation graph is built.

use serde::{Deserialize, Serialize};

/// Stable account identifier as it appears in the dataset.
pub type EntityId = i64;

/// A single account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier from the dataset.
    pub id: EntityId,

    /// Display name, also used as a case-insensitive lookup key.
    pub name: String,

    /// Follower count.
    pub popularity: i64,

    /// Activity score.
    pub activity: f64,

    /// Free-text category label (a country in the stock dataset).
    pub category: String,

    /// Declared peer ids, in input order.
    pub peers: Vec<EntityId>,
}

impl Entity {
    /// Creates an entity with zeroed metrics and no peers.
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            popularity: 0,
            activity: 0.0,
            category: String::new(),
            peers: Vec::new(),
        }
    }

    pub fn with_metrics(mut self, popularity: i64, activity: f64) -> Self {
        self.popularity = popularity;
        self.activity = activity;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_peers(mut self, peers: Vec<EntityId>) -> Self {
        self.peers = peers;
        self
    }

    /// Number of declared connections, dangling ones included.
    pub fn connection_count(&self) -> usize {
        self.peers.len()
    }

    /// Whether this entity lists `id` among its declared peers.
    pub fn declares(&self, id: EntityId) -> bool {
        self.peers.contains(&id)
    }

    /// Builds an entity from a raw record, parsing its peer text.
    pub fn from_raw(raw: RawRecord, max_peers: usize) -> Self {
        let peers = parse_peer_ids(&raw.peers, max_peers);
        Self {
            id: raw.id,
            name: raw.name,
            popularity: raw.popularity,
            activity: raw.activity,
            category: raw.category,
            peers,
        }
    }
}

/// A record as produced by the loader, before peer parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: EntityId,
    pub name: String,
    pub popularity: i64,
    pub activity: f64,
    pub category: String,
    /// Whitespace-delimited peer ids.
    pub peers: String,
}

/// Parses whitespace-delimited peer ids.
///
/// Tokens that are not integers, or do not fit an [`EntityId`], are
/// skipped. At most `max_peers` ids are returned.
pub fn parse_peer_ids(text: &str, max_peers: usize) -> Vec<EntityId> {
    text.split_whitespace()
        .filter_map(|token| token.parse::<EntityId>().ok())
        .take(max_peers)
        .collect()
}
