//! Mutual connections and friend recommendations.
//!
//! Both work from declared peer lists resolved through the store, not from
//! graph edges in both directions. Recommendation scoring is directional:
//! a peer `p` of `a` counts toward candidate `c` only when `p` declares
//! `c`, whether or not `c` declares `p` back.

use circle_core::{QueryError, QueryResult, RecordStore};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Entities declared by both `a` and `b`, in store order.
///
/// The result is the same for `(a, b)` and `(b, a)`.
pub fn mutual_connections(store: &RecordStore, a: usize, b: usize) -> QueryResult<Vec<usize>> {
    for index in [a, b] {
        if index >= store.len() {
            return Err(QueryError::NotFound(format!("entity index {}", index)));
        }
    }

    let peers_a: HashSet<usize> = store.resolved_peers(a).into_iter().collect();
    let mut mutual: Vec<usize> = store
        .resolved_peers(b)
        .into_iter()
        .filter(|peer| peers_a.contains(peer))
        .collect();
    mutual.sort_unstable();

    Ok(mutual)
}

/// A suggested connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Store index of the suggested entity.
    pub index: usize,
    /// Peers of the subject that declare this entity.
    pub shared: usize,
}

/// Ranks entities `a` is not yet connected to by shared peers.
///
/// Candidates are every entity except `a` and its resolved peers. Entities
/// with no shared peers are left out. Highest score first, ties in store
/// order. Callers wanting the top few take a prefix.
pub fn recommend(store: &RecordStore, a: usize) -> QueryResult<Vec<Recommendation>> {
    if a >= store.len() {
        return Err(QueryError::NotFound(format!("entity index {}", a)));
    }

    let peers = store.resolved_peers(a);
    let mut excluded: HashSet<usize> = peers.iter().copied().collect();
    excluded.insert(a);

    let mut recommendations: Vec<Recommendation> = store
        .iter()
        .enumerate()
        .filter(|(candidate, _)| !excluded.contains(candidate))
        .filter_map(|(candidate, entity)| {
            let shared = peers
                .iter()
                .filter_map(|&p| store.get(p))
                .filter(|peer| peer.declares(entity.id))
                .count();
            (shared > 0).then_some(Recommendation {
                index: candidate,
                shared,
            })
        })
        .collect();

    recommendations.sort_by(|x, y| y.shared.cmp(&x.shared));

    Ok(recommendations)
}
