//! Core graph data structure.
//!
//! The RelationGraph wraps petgraph. Node `i` of the graph is entity `i`
//! of the record store it was built from, so every engine talks in store
//! indexes. Edges point from the entity that declared a peer to that peer.

use crate::builder::GraphBuilder;
use circle_core::{EntityId, RecordStore};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

/// Directed "declares as peer" relation over a record store.
///
/// Built once and never mutated afterwards. A store that changes needs a
/// fresh graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationGraph {
    /// Node weights are entity ids, kept for export.
    pub(crate) graph: DiGraph<EntityId, ()>,

    /// Declared peer ids that matched no entity.
    pub(crate) dangling: usize,
}

impl RelationGraph {
    /// Builds the graph for every entity in `store`.
    pub fn build(store: &RecordStore) -> Self {
        GraphBuilder::new(store).build()
    }

    /// Creates a graph with one node per id and no edges.
    pub(crate) fn with_nodes<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = EntityId>,
    {
        let mut graph = DiGraph::new();
        for id in ids {
            graph.add_node(id);
        }
        Self { graph, dangling: 0 }
    }

    /// Adds the edge `from -> to` unless it already exists.
    ///
    /// Returns false if the edge was already present.
    pub(crate) fn add_edge(&mut self, from: usize, to: usize) -> bool {
        let (a, b) = (NodeIndex::new(from), NodeIndex::new(to));
        if self.graph.contains_edge(a, b) {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    /// Entities that `index` points to, in ascending index order.
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        if index >= self.node_count() {
            return Vec::new();
        }

        let mut neighbors: Vec<usize> = self
            .graph
            .neighbors(NodeIndex::new(index))
            .map(|n| n.index())
            .collect();
        neighbors.sort_unstable();
        neighbors
    }

    /// Whether `from` declared `to` as a peer.
    pub fn are_adjacent(&self, from: usize, to: usize) -> bool {
        let n = self.node_count();
        from < n
            && to < n
            && self
                .graph
                .contains_edge(NodeIndex::new(from), NodeIndex::new(to))
    }

    /// Entity id of a node.
    pub fn id_of(&self, index: usize) -> Option<EntityId> {
        self.graph.node_weight(NodeIndex::new(index)).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All edges as `(from, to)` index pairs, sorted.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = self
            .graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// All edges with entity ids for export.
    pub fn export_edges(&self) -> Vec<GraphEdge> {
        self.edges()
            .into_iter()
            .filter_map(|(from, to)| {
                Some(GraphEdge {
                    source: self.id_of(from)?,
                    target: self.id_of(to)?,
                })
            })
            .collect()
    }
}

/// A simplified edge for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: EntityId,
    pub target: EntityId,
}

/// Graph statistics for the stats command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub entity_count: usize,
    pub edge_count: usize,
    pub dangling_references: usize,
    pub self_loops: usize,
}

impl RelationGraph {
    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            entity_count: self.node_count(),
            edge_count: self.edge_count(),
            dangling_references: self.dangling,
            self_loops: self
                .graph
                .edge_references()
                .filter(|e| e.source() == e.target())
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circle_core::Entity;

    fn store(entities: Vec<Entity>) -> RecordStore {
        RecordStore::from_entities(entities, 100).unwrap()
    }

    #[test]
    fn test_neighbors_ascending() {
        let store = store(vec![
            Entity::new(1, "a").with_peers(vec![4, 2, 3]),
            Entity::new(2, "b"),
            Entity::new(3, "c"),
            Entity::new(4, "d"),
        ]);
        let graph = RelationGraph::build(&store);

        assert_eq!(graph.neighbors(0), vec![1, 2, 3]);
        assert!(graph.neighbors(1).is_empty());
        assert!(graph.neighbors(99).is_empty());
    }

    #[test]
    fn test_edges_are_directed() {
        let store = store(vec![
            Entity::new(1, "a").with_peers(vec![2]),
            Entity::new(2, "b"),
        ]);
        let graph = RelationGraph::build(&store);

        assert!(graph.are_adjacent(0, 1));
        assert!(!graph.are_adjacent(1, 0));
        assert!(!graph.are_adjacent(0, 7));
    }

    #[test]
    fn test_self_loop_kept() {
        let store = store(vec![Entity::new(1, "loner").with_peers(vec![1])]);
        let graph = RelationGraph::build(&store);

        assert!(graph.are_adjacent(0, 0));
        assert_eq!(graph.neighbors(0), vec![0]);
        assert_eq!(graph.stats().self_loops, 1);
    }

    #[test]
    fn test_export_edges_uses_ids() {
        let store = store(vec![
            Entity::new(10, "a").with_peers(vec![20]),
            Entity::new(20, "b").with_peers(vec![10]),
        ]);
        let graph = RelationGraph::build(&store);

        assert_eq!(
            graph.export_edges(),
            vec![
                GraphEdge {
                    source: 10,
                    target: 20
                },
                GraphEdge {
                    source: 20,
                    target: 10
                },
            ]
        );
    }

    #[test]
    fn test_serializes() {
        let store = store(vec![
            Entity::new(1, "a").with_peers(vec![2]),
            Entity::new(2, "b"),
        ]);
        let graph = RelationGraph::build(&store);

        let json = serde_json::to_string(&graph).unwrap();
        let restored: RelationGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.edges(), graph.edges());
    }
}
