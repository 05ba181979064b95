//! Plain-text rendering of query results.
//!
//! Kept free of color so the layout can be tested; commands add color to
//! headers when printing.

use circle_core::{Entity, RecordStore};
use circle_graph::{DistanceTable, TreeNode};

const CELL: usize = 6;

/// One-line description of an entity.
pub fn entity_summary(entity: &Entity) -> String {
    format!(
        "{} (ID: {}) - F:{}, A:{:.2}, C:{}",
        entity.name, entity.id, entity.popularity, entity.activity, entity.category
    )
}

/// Visit order as `1 -> 2 -> 3`.
pub fn id_chain(entities: &[&Entity]) -> String {
    entities
        .iter()
        .map(|e| e.id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Tree drawn with box characters, root first.
pub fn tree_lines(store: &RecordStore, root: &TreeNode) -> Vec<String> {
    let mut lines = Vec::new();
    push_tree(store, root, "", None, &mut lines);
    lines
}

fn push_tree(
    store: &RecordStore,
    node: &TreeNode,
    prefix: &str,
    last: Option<bool>,
    lines: &mut Vec<String>,
) {
    let label = store
        .get(node.index)
        .map(entity_summary)
        .unwrap_or_else(|| format!("#{}", node.index));

    let (connector, child_prefix) = match last {
        None => ("", String::new()),
        Some(true) => ("└── ", format!("{}    ", prefix)),
        Some(false) => ("├── ", format!("{}│   ", prefix)),
    };
    lines.push(format!("{}{}{}", prefix, connector, label));

    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        push_tree(store, child, &child_prefix, Some(i + 1 == count), lines);
    }
}

/// Top-left `limit` x `limit` corner of a distance table, labelled by id.
pub fn table_lines(store: &RecordStore, table: &DistanceTable, limit: usize) -> Vec<String> {
    let shown = limit.min(table.len());
    let ids: Vec<String> = (0..shown)
        .map(|i| store.get(i).map(|e| e.id.to_string()).unwrap_or_default())
        .collect();

    let mut header = " ".repeat(CELL);
    for id in &ids {
        header.push_str(&format!("{:<width$}", id, width = CELL));
    }

    let mut lines = vec![header.trim_end().to_string()];
    for (i, row) in table.submatrix(0..shown, 0..shown).into_iter().enumerate() {
        let mut line = format!("{:<width$}", ids[i], width = CELL);
        for d in row {
            let cell = if d == table.sentinel() {
                "INF".to_string()
            } else {
                d.to_string()
            };
            line.push_str(&format!("{:<width$}", cell, width = CELL));
        }
        lines.push(line.trim_end().to_string());
    }

    lines
}
