//! Circle Graph - Relation graph and the queries over it
//!
//! This crate builds the directed "declares as peer" graph over a record
//! store and answers the analytical queries: traversal, all-pairs hop
//! distances, ranking, mutual connections and friend recommendations.
//!
//! # Architecture
//!
//! The graph uses petgraph internally. Node `i` is entity `i` of the store
//! it was built from, so every engine works in store indexes and the
//! [`Network`] type maps names to indexes and back.
//!
//! # Example
//!
//! ```
//! use circle_core::{Entity, RecordStore};
//! use circle_graph::Network;
//!
//! let store = RecordStore::from_entities(
//!     vec![
//!         Entity::new(1, "Alice").with_peers(vec![2, 3]),
//!         Entity::new(2, "Bob").with_peers(vec![1]),
//!         Entity::new(3, "Carol").with_peers(vec![1]),
//!     ],
//!     10,
//! )
//! .unwrap();
//! let network = Network::new(store);
//!
//! let recs = network.recommend("Bob").unwrap();
//! assert_eq!(recs[0].0.name, "Carol");
//! ```

mod builder;
mod graph;
mod network;
pub mod overlap;
mod paths;
pub mod ranking;
pub mod traversal;
mod tree;

pub use builder::GraphBuilder;
pub use graph::{GraphEdge, GraphStats, RelationGraph};
pub use network::Network;
pub use overlap::{mutual_connections, recommend, Recommendation};
pub use paths::DistanceTable;
pub use ranking::{
    filter_by_category, filter_by_metric_threshold, ranked, top_by_metric, top_in_category, Metric,
};
pub use traversal::{breadth_first, depth_first, Traversal};
pub use tree::{connection_tree, TreeNode};
