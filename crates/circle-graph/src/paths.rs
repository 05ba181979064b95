//! All-pairs shortest hop counts.
//!
//! Floyd-Warshall over the relation graph. Distances follow edge
//! direction, so `distance(i, j)` and `distance(j, i)` can differ.
//! Unreachable pairs hold a sentinel of N + 1, larger than any real path.

use crate::graph::RelationGraph;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

/// Full N x N table of minimum hop counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct DistanceTable {
    size: usize,
    /// Row-major distances.
    dist: Vec<usize>,
}

/// Unchecked wire form of a [`DistanceTable`].
#[derive(Deserialize)]
struct RawTable {
    size: usize,
    dist: Vec<usize>,
}

impl TryFrom<RawTable> for DistanceTable {
    type Error = String;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        let cells = raw
            .size
            .checked_mul(raw.size)
            .ok_or_else(|| format!("table size {} is too large", raw.size))?;
        if raw.dist.len() != cells {
            return Err(format!(
                "expected {} distances for size {}, found {}",
                cells,
                raw.size,
                raw.dist.len()
            ));
        }

        let sentinel = raw.size + 1;
        if let Some(bad) = raw.dist.iter().find(|&&d| d > sentinel) {
            return Err(format!("distance {} exceeds sentinel {}", bad, sentinel));
        }

        Ok(Self {
            size: raw.size,
            dist: raw.dist,
        })
    }
}

impl DistanceTable {
    /// Computes every pairwise distance. O(N^3).
    pub fn compute(graph: &RelationGraph) -> Self {
        let n = graph.node_count();
        let inf = n + 1;
        let mut dist = vec![inf; n * n];

        for i in 0..n {
            dist[i * n + i] = 0;
            for j in graph.neighbors(i) {
                if i != j {
                    dist[i * n + j] = 1;
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                let ik = dist[i * n + k];
                if ik == inf {
                    continue;
                }
                for j in 0..n {
                    let through = ik + dist[k * n + j];
                    if through < dist[i * n + j] {
                        dist[i * n + j] = through;
                    }
                }
            }
        }

        debug!("Computed distance table for {} entities", n);

        Self { size: n, dist }
    }

    /// Number of entities covered.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Value used for unreachable pairs.
    pub fn sentinel(&self) -> usize {
        self.size + 1
    }

    /// Hop count from `from` to `to`, or None if unreachable or out of range.
    pub fn distance(&self, from: usize, to: usize) -> Option<usize> {
        self.raw(from, to).filter(|&d| d != self.sentinel())
    }

    /// Stored value including the sentinel. None only when out of range.
    pub fn raw(&self, from: usize, to: usize) -> Option<usize> {
        if from >= self.size || to >= self.size {
            return None;
        }
        Some(self.dist[from * self.size + to])
    }

    /// All distances out of `from`, sentinel included.
    pub fn row(&self, from: usize) -> &[usize] {
        if from >= self.size {
            return &[];
        }
        &self.dist[from * self.size..(from + 1) * self.size]
    }

    /// A rectangular slice of the table.
    ///
    /// Ranges are clamped to the table size, so `0..20` on a smaller table
    /// returns the whole table.
    pub fn submatrix(&self, rows: Range<usize>, cols: Range<usize>) -> Vec<Vec<usize>> {
        let rows = clamp(rows, self.size);
        let cols = clamp(cols, self.size);
        rows.map(|i| self.row(i)[cols.clone()].to_vec()).collect()
    }
}

fn clamp(range: Range<usize>, size: usize) -> Range<usize> {
    let end = range.end.min(size);
    range.start.min(end)..end
}

#[cfg(test)]
mod tests {
    use super::*;
    use circle_core::{Entity, RecordStore};

    fn graph_of(peers: &[&[i64]]) -> RelationGraph {
        let entities = peers
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let id = i as i64 + 1;
                Entity::new(id, format!("e{id}")).with_peers(p.to_vec())
            })
            .collect::<Vec<_>>();
        RelationGraph::build(&RecordStore::from_entities(entities, 100).unwrap())
    }

    #[test]
    fn test_directed_chain() {
        // 1 -> 2 -> 3 -> 4
        let graph = graph_of(&[&[2], &[3], &[4], &[]]);
        let table = DistanceTable::compute(&graph);

        assert_eq!(table.distance(0, 3), Some(3));
        assert_eq!(table.distance(3, 0), None);
        assert_eq!(table.raw(3, 0), Some(table.sentinel()));
        assert_eq!(table.sentinel(), 5);
    }

    #[test]
    fn test_diagonal_zero_even_with_self_loop() {
        let graph = graph_of(&[&[1, 2], &[]]);
        let table = DistanceTable::compute(&graph);
        assert_eq!(table.distance(0, 0), Some(0));
        assert_eq!(table.distance(1, 1), Some(0));
    }

    #[test]
    fn test_one_iff_adjacent() {
        let graph = graph_of(&[&[2, 3], &[3], &[1], &[2]]);
        let table = DistanceTable::compute(&graph);

        for i in 0..table.len() {
            for j in 0..table.len() {
                if i != j {
                    assert_eq!(
                        table.distance(i, j) == Some(1),
                        graph.are_adjacent(i, j),
                        "pair ({i}, {j})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_triangle_inequality() {
        let graph = graph_of(&[&[2, 5], &[3], &[1, 4], &[6], &[4], &[1], &[]]);
        let table = DistanceTable::compute(&graph);
        let n = table.len();

        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    let ij = table.raw(i, j).unwrap();
                    let ik = table.raw(i, k).unwrap();
                    let kj = table.raw(k, j).unwrap();
                    assert!(ij <= ik + kj, "({i}, {j}) via {k}");
                }
            }
        }
    }

    #[test]
    fn test_shortcut_beats_long_way() {
        // 1 -> 2 -> 3 -> 4 and 1 -> 4
        let graph = graph_of(&[&[2, 4], &[3], &[4], &[]]);
        let table = DistanceTable::compute(&graph);
        assert_eq!(table.distance(0, 3), Some(1));
        assert_eq!(table.distance(1, 3), Some(2));
    }

    #[test]
    fn test_submatrix_clamps() {
        let graph = graph_of(&[&[2], &[3], &[]]);
        let table = DistanceTable::compute(&graph);

        let all = table.submatrix(0..20, 0..20);
        assert_eq!(all, vec![vec![0, 1, 2], vec![4, 0, 1], vec![4, 4, 0]]);

        let corner = table.submatrix(1..3, 2..9);
        assert_eq!(corner, vec![vec![1], vec![0]]);

        assert!(table.submatrix(5..9, 0..3).is_empty());
    }

    #[test]
    fn test_deserialize_round_trip() {
        let graph = graph_of(&[&[2], &[3], &[]]);
        let table = DistanceTable::compute(&graph);

        let json = serde_json::to_string(&table).unwrap();
        let back: DistanceTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_tables() {
        let short = serde_json::from_str::<DistanceTable>(r#"{"size":3,"dist":[0]}"#);
        assert!(short.is_err());

        let long = serde_json::from_str::<DistanceTable>(r#"{"size":1,"dist":[0,0]}"#);
        assert!(long.is_err());

        let past_sentinel = serde_json::from_str::<DistanceTable>(r#"{"size":1,"dist":[7]}"#);
        assert!(past_sentinel.is_err());

        let empty: DistanceTable = serde_json::from_str(r#"{"size":0,"dist":[]}"#).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.raw(0, 0), None);
    }

    #[test]
    fn test_out_of_range() {
        let graph = graph_of(&[&[]]);
        let table = DistanceTable::compute(&graph);
        assert_eq!(table.distance(0, 1), None);
        assert_eq!(table.raw(3, 0), None);
        assert!(table.row(4).is_empty());
    }

    #[test]
    fn test_empty_graph() {
        let graph = graph_of(&[]);
        let table = DistanceTable::compute(&graph);
        assert!(table.is_empty());
        assert!(table.submatrix(0..20, 0..20).is_empty());
    }
}
