//! Graph builder for constructing the relation graph from a record store.
//!
//! Every entity becomes a node first, then each declared peer id is
//! resolved through the store's id index. Ids that resolve nowhere are
//! dangling: they are counted and otherwise ignored.

use crate::graph::RelationGraph;
use circle_core::RecordStore;
use tracing::{debug, info};

/// Builds a RelationGraph from a record store.
pub struct GraphBuilder<'a> {
    store: &'a RecordStore,
}

impl<'a> GraphBuilder<'a> {
    /// Creates a builder over `store`.
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Resolves every declared peer and returns the finished graph.
    pub fn build(self) -> RelationGraph {
        let mut graph = RelationGraph::with_nodes(self.store.iter().map(|e| e.id));

        for (from, entity) in self.store.iter().enumerate() {
            for &peer in &entity.peers {
                match self.store.by_id(peer) {
                    Some(to) => {
                        graph.add_edge(from, to);
                    }
                    None => {
                        debug!("Dropping dangling peer {} declared by {}", peer, entity.id);
                        graph.dangling += 1;
                    }
                }
            }
        }

        info!(
            "Built relation graph: {} entities, {} edges, {} dangling references",
            graph.node_count(),
            graph.edge_count(),
            graph.dangling
        );

        graph
    }
}
