//! The queryable network: a record store plus the graph built from it.
//!
//! A Network is built once and only read afterwards. It has no methods
//! that change the store, so the graph can never go stale, and `&Network`
//! can be shared freely between threads.

use crate::graph::{GraphStats, RelationGraph};
use crate::overlap::{self, Recommendation};
use crate::paths::DistanceTable;
use crate::traversal;
use crate::tree::{self, TreeNode};
use circle_core::{Entity, QueryError, QueryResult, RecordStore};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Network {
    store: RecordStore,
    graph: RelationGraph,
}

impl Network {
    /// Takes ownership of a loaded store and builds its graph.
    pub fn new(store: RecordStore) -> Self {
        let graph = RelationGraph::build(&store);
        Self { store, graph }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn graph(&self) -> &RelationGraph {
        &self.graph
    }

    pub fn stats(&self) -> GraphStats {
        self.graph.stats()
    }

    /// Resolves a name to a store index.
    pub fn index_of(&self, name: &str) -> QueryResult<usize> {
        self.store
            .by_name(name)
            .ok_or_else(|| QueryError::NotFound(format!("user '{}'", name)))
    }

    /// Resolves a name to its entity.
    pub fn entity_by_name(&self, name: &str) -> QueryResult<&Entity> {
        let index = self.index_of(name)?;
        self.entity(index)
    }

    pub fn entity(&self, index: usize) -> QueryResult<&Entity> {
        self.store
            .get(index)
            .ok_or_else(|| QueryError::NotFound(format!("entity index {}", index)))
    }

    /// Depth-first visit order from the named entity.
    pub fn depth_first(&self, name: &str) -> QueryResult<Vec<&Entity>> {
        let start = self.index_of(name)?;
        debug!("DFS from {}", start);
        Ok(self.entities(traversal::depth_first(&self.graph, start)))
    }

    /// Breadth-first visit order from the named entity.
    pub fn breadth_first(&self, name: &str) -> QueryResult<Vec<&Entity>> {
        let start = self.index_of(name)?;
        debug!("BFS from {}", start);
        Ok(self.entities(traversal::breadth_first(&self.graph, start)))
    }

    /// All-pairs hop distances.
    pub fn distances(&self) -> DistanceTable {
        DistanceTable::compute(&self.graph)
    }

    /// Entities both named users declare as peers.
    pub fn mutual_connections(&self, a: &str, b: &str) -> QueryResult<Vec<&Entity>> {
        let a = self.index_of(a)?;
        let b = self.index_of(b)?;
        let mutual = overlap::mutual_connections(&self.store, a, b)?;
        Ok(self.entities(mutual))
    }

    /// Ranked recommendations for the named user.
    pub fn recommend(&self, name: &str) -> QueryResult<Vec<(&Entity, usize)>> {
        let index = self.index_of(name)?;
        let recommendations = overlap::recommend(&self.store, index)?;
        Ok(recommendations
            .into_iter()
            .filter_map(|Recommendation { index, shared }| {
                self.store.get(index).map(|e| (e, shared))
            })
            .collect())
    }

    /// Connection tree rooted at the named user.
    pub fn connection_tree(&self, name: &str, depth: usize, width: usize) -> QueryResult<TreeNode> {
        let root = self.index_of(name)?;
        tree::connection_tree(&self.store, root, depth, width)
            .ok_or_else(|| QueryError::NotFound(format!("user '{}'", name)))
    }

    fn entities(&self, indexes: Vec<usize>) -> Vec<&Entity> {
        indexes
            .into_iter()
            .filter_map(|i| self.store.get(i))
            .collect()
    }
}
