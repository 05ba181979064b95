//! Connection trees for display.
//!
//! A bounded expansion of an entity's peers: at each level, the most
//! popular resolved peers other than the node's parent become children.
//! Only the parent is excluded, so a cycle repeats until the depth bound
//! cuts it off.

use circle_core::RecordStore;
use serde::{Deserialize, Serialize};

/// One node of a connection tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Store index of the entity.
    pub index: usize,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Total nodes in this subtree, itself included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }

    /// Number of levels below this node.
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Expands `root` up to `max_depth` levels below it, `width` children each.
///
/// Returns None when `root` is not a store index.
pub fn connection_tree(
    store: &RecordStore,
    root: usize,
    max_depth: usize,
    width: usize,
) -> Option<TreeNode> {
    store.get(root)?;
    Some(expand(store, root, None, 0, max_depth, width))
}

fn expand(
    store: &RecordStore,
    index: usize,
    parent: Option<usize>,
    depth: usize,
    max_depth: usize,
    width: usize,
) -> TreeNode {
    if depth >= max_depth {
        return TreeNode {
            index,
            children: Vec::new(),
        };
    }

    let mut peers: Vec<usize> = store
        .resolved_peers(index)
        .into_iter()
        .filter(|&p| Some(p) != parent)
        .collect();
    peers.sort_by_key(|&p| std::cmp::Reverse(popularity(store, p)));
    peers.truncate(width);

    let children = peers
        .into_iter()
        .map(|child| expand(store, child, Some(index), depth + 1, max_depth, width))
        .collect();

    TreeNode { index, children }
}

fn popularity(store: &RecordStore, index: usize) -> i64 {
    store.get(index).map(|e| e.popularity).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use circle_core::Entity;

    fn store() -> RecordStore {
        RecordStore::from_entities(
            vec![
                Entity::new(1, "root").with_peers(vec![2, 3, 4, 5]),
                Entity::new(2, "low").with_metrics(10, 0.0).with_peers(vec![1, 6]),
                Entity::new(3, "high").with_metrics(300, 0.0).with_peers(vec![1]),
                Entity::new(4, "mid").with_metrics(200, 0.0),
                Entity::new(5, "mid2").with_metrics(200, 0.0),
                Entity::new(6, "leaf").with_metrics(5, 0.0).with_peers(vec![2]),
            ],
            10,
        )
        .unwrap()
    }

    fn indexes(node: &TreeNode) -> Vec<usize> {
        node.children.iter().map(|c| c.index).collect()
    }

    #[test]
    fn test_children_by_popularity_and_width() {
        let store = store();
        let tree = connection_tree(&store, 0, 3, 3).unwrap();

        // high, then the two 200s in store order; low is cut by width.
        assert_eq!(indexes(&tree), vec![2, 3, 4]);
    }

    #[test]
    fn test_parent_excluded() {
        let store = store();
        let tree = connection_tree(&store, 0, 3, 4).unwrap();

        let low = tree.children.iter().find(|c| c.index == 1).unwrap();
        assert_eq!(indexes(low), vec![5]);
        // leaf points back at low only, which is its parent.
        assert!(low.children[0].children.is_empty());
    }

    #[test]
    fn test_cycle_bounded_by_depth() {
        let store = RecordStore::from_entities(
            vec![
                Entity::new(1, "a").with_peers(vec![2]),
                Entity::new(2, "b").with_peers(vec![3]),
                Entity::new(3, "c").with_peers(vec![1]),
            ],
            10,
        )
        .unwrap();

        let tree = connection_tree(&store, 0, 3, 3).unwrap();
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.size(), 4);
    }

    #[test]
    fn test_zero_depth() {
        let store = store();
        let tree = connection_tree(&store, 0, 0, 3).unwrap();
        assert!(tree.children.is_empty());
    }

    #[test]
    fn test_unknown_root() {
        assert!(connection_tree(&store(), 42, 3, 3).is_none());
    }
}
