//! Circle Core - Account records and the record store
//!
//! This crate holds the data side of Circle: the account entities read
//! from a dataset, the ordered store that owns them, and the loader and
//! configuration used to build that store at startup.
//!
//! # Example
//!
//! ```
//! use circle_core::{Entity, RecordStore};
//!
//! let alice = Entity::new(1, "Alice").with_peers(vec![2, 3]);
//! let bob = Entity::new(2, "Bob").with_peers(vec![1]);
//!
//! let store = RecordStore::from_entities(vec![alice, bob], 10).unwrap();
//!
//! assert_eq!(store.by_name("alice"), Some(0));
//! assert_eq!(store.by_id(2), Some(1));
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod loader;
pub mod store;

pub use config::Config;
pub use entity::{parse_peer_ids, Entity, EntityId, RawRecord};
pub use error::{ConfigError, LoadError, QueryError, QueryResult};
pub use loader::{build_store, load_store, parse_records};
pub use store::RecordStore;
