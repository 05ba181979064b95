//! CLI command implementations.

use crate::render::{entity_summary, id_chain, table_lines, tree_lines};
use circle_core::config::CONFIG_DIR;
use circle_core::{load_store, Config, Entity, RecordStore};
use circle_graph::{
    filter_by_category, filter_by_metric_threshold, top_by_metric, top_in_category,
    DistanceTable, Metric, Network,
};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Settings shared by every query command.
pub struct Context {
    pub config: Config,
    pub data: Option<PathBuf>,
    pub json: bool,
}

impl Context {
    /// Reads config from `config_path`, or discovers it in the working directory.
    pub fn new(data: Option<PathBuf>, config_path: Option<&Path>, json: bool) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load(path)?,
            None => Config::discover(&std::env::current_dir()?)?,
        };
        debug!("Using config: {:?}", config);

        Ok(Self { config, data, json })
    }

    /// Loads the dataset and builds the network.
    pub fn network(&self) -> Result<Network> {
        let path = self
            .data
            .as_ref()
            .or(self.config.dataset.as_ref())
            .ok_or("no dataset given; pass --data or set `dataset` in .circle/config.json")?;

        let store = load_store(path, &self.config)?;
        Ok(Network::new(store))
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_entities(entities: &[&Entity]) {
    for entity in entities {
        println!("- {}", entity_summary(entity));
    }
}

/// Initialize Circle in a directory.
pub fn init(path: &Path, dataset: Option<&Path>) -> Result<()> {
    let config_path = Config::path_in(path);

    if config_path.exists() {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    let config = Config {
        dataset: dataset.map(Path::to_path_buf),
        ..Config::default()
    };
    config.save(&config_path)?;

    println!(
        "{} Initialized Circle in {}",
        "✓".green(),
        path.join(CONFIG_DIR).display()
    );
    if config.dataset.is_none() {
        println!(
            "  Set {} in the config or pass {} to run queries",
            "dataset".cyan(),
            "--data".cyan()
        );
    }

    Ok(())
}

/// Show dataset and graph statistics.
pub fn stats(ctx: &Context) -> Result<()> {
    let network = ctx.network()?;
    let stats = network.stats();

    if ctx.json {
        return print_json(&stats);
    }

    println!("{}", "Circle Status".cyan().bold());
    println!();
    println!("  {} {}", "Users:".dimmed(), stats.entity_count);
    println!("  {} {}", "Connections:".dimmed(), stats.edge_count);
    println!("  {} {}", "Dangling references:".dimmed(), stats.dangling_references);
    println!("  {} {}", "Self loops:".dimmed(), stats.self_loops);
    println!("  {} {}", "Capacity:".dimmed(), network.store().capacity());

    Ok(())
}

/// Show a user's connection count and activity score.
pub fn info(ctx: &Context, name: &str) -> Result<()> {
    let network = ctx.network()?;
    let entity = network.entity_by_name(name)?;

    if ctx.json {
        return print_json(&serde_json::json!({
            "user": entity,
            "connection_count": entity.connection_count(),
        }));
    }

    println!(
        "{} (ID: {}) has {} connections.",
        entity.name.cyan(),
        entity.id,
        entity.connection_count()
    );
    println!(
        "{} (ID: {}) has an activity score of {:.2}",
        entity.name.cyan(),
        entity.id,
        entity.activity
    );
    println!("  {}", entity_summary(entity).dimmed());

    Ok(())
}

/// Find mutual connections between two users.
pub fn mutuals(ctx: &Context, first: &str, second: &str) -> Result<()> {
    let network = ctx.network()?;
    let mutual = network.mutual_connections(first, second)?;

    if ctx.json {
        return print_json(&mutual);
    }

    println!(
        "{}",
        format!("Mutual connections between {} and {}:", first, second).cyan()
    );
    if mutual.is_empty() {
        println!("No mutual connections found.");
    } else {
        print_entities(&mutual);
    }

    Ok(())
}

/// List users whose metric is strictly above `min`.
pub fn above(ctx: &Context, min: f64, by: &str) -> Result<()> {
    let metric: Metric = by.parse()?;
    let network = ctx.network()?;
    let matches = filter_by_metric_threshold(network.store(), metric, min);

    if ctx.json {
        return print_json(&matches);
    }

    println!("{}", format!("Users with {} above {}:", metric, min).cyan());
    if matches.is_empty() {
        println!("No users above this threshold.");
    } else {
        print_entities(&matches);
    }

    Ok(())
}

/// Show the top `n` users by a metric.
pub fn top(ctx: &Context, n: i64, by: &str) -> Result<()> {
    let metric: Metric = by.parse()?;
    let network = ctx.network()?;
    let ranked = top_by_metric(network.store(), n, metric)?;

    if ctx.json {
        return print_json(&ranked);
    }

    println!("{}", format!("Top {} users by {}:", n, metric).yellow());
    for (i, entity) in ranked.iter().enumerate() {
        println!("{}. {}", i + 1, entity_summary(entity));
    }

    Ok(())
}

/// List users in a category.
pub fn category(ctx: &Context, label: &str) -> Result<()> {
    let network = ctx.network()?;
    let matches = filter_by_category(network.store(), label);

    if ctx.json {
        return print_json(&matches);
    }

    println!("{}", format!("Users from {}:", label).green());
    if matches.is_empty() {
        println!("No users found in this category.");
    } else {
        print_entities(&matches);
    }

    Ok(())
}

/// Traversal order for [`traverse`].
#[derive(Debug, Clone, Copy)]
pub enum Walk {
    DepthFirst,
    BreadthFirst,
}

/// Depth-first or breadth-first traversal from a user.
pub fn traverse(ctx: &Context, name: &str, walk: Walk) -> Result<()> {
    let network = ctx.network()?;
    let (label, order) = match walk {
        Walk::DepthFirst => ("DFS", network.depth_first(name)?),
        Walk::BreadthFirst => ("BFS", network.breadth_first(name)?),
    };

    if ctx.json {
        let ids: Vec<i64> = order.iter().map(|e| e.id).collect();
        return print_json(&ids);
    }

    let start = order.first().map(|e| e.id).unwrap_or_default();
    println!(
        "{}",
        format!("{} traversal starting from user ID {}:", label, start).yellow()
    );
    println!("{}", id_chain(&order));
    println!("{} users reached", order.len().to_string().cyan());

    Ok(())
}

/// All-pairs shortest hop distances.
pub fn distances(ctx: &Context, limit: Option<usize>) -> Result<()> {
    let network = ctx.network()?;
    let table = network.distances();

    if ctx.json {
        return print_json(&distances_json(network.store(), &table));
    }

    let limit = limit.unwrap_or(ctx.config.display_limit);
    println!(
        "{}",
        "Shortest path distances between users (IDs):".green()
    );
    for line in table_lines(network.store(), &table, limit) {
        println!("{}", line);
    }
    if table.len() > limit {
        println!(
            "{}",
            format!("(showing first {} of {} users)", limit, table.len()).dimmed()
        );
    }

    Ok(())
}

fn distances_json(store: &RecordStore, table: &DistanceTable) -> serde_json::Value {
    serde_json::json!({
        "ids": store.iter().map(|e| e.id).collect::<Vec<_>>(),
        "unreachable": table.sentinel(),
        "distances": table.submatrix(0..table.len(), 0..table.len()),
    })
}

/// Recommend new connections by shared peers.
pub fn recommend(ctx: &Context, name: &str, limit: Option<usize>) -> Result<()> {
    let network = ctx.network()?;
    let subject = network.entity_by_name(name)?;
    let limit = limit.unwrap_or(ctx.config.recommendation_limit);

    let recommendations: Vec<(&Entity, usize)> =
        network.recommend(name)?.into_iter().take(limit).collect();

    if ctx.json {
        return print_json(&recommendations_json(&recommendations));
    }

    println!(
        "{}",
        format!(
            "Friend recommendations for {} (ID: {}) based on mutual friends:",
            subject.name, subject.id
        )
        .yellow()
    );
    if recommendations.is_empty() {
        println!("No friend recommendations found based on mutual connections.");
    }
    for (entity, shared) in recommendations {
        println!(
            "- {} (ID: {}) - {} mutual friends",
            entity.name,
            entity.id,
            shared.to_string().cyan()
        );
    }

    Ok(())
}

fn recommendations_json(recommendations: &[(&Entity, usize)]) -> serde_json::Value {
    recommendations
        .iter()
        .map(|(entity, shared)| serde_json::json!({ "user": entity, "shared": shared }))
        .collect()
}

/// Show a user's connections as a tree.
pub fn tree(ctx: &Context, name: &str) -> Result<()> {
    let network = ctx.network()?;
    let root = network.connection_tree(name, ctx.config.tree_depth, ctx.config.tree_width)?;

    if ctx.json {
        return print_json(&root);
    }

    println!(
        "{}",
        format!(
            "Connection tree (max depth {}, width {}):",
            ctx.config.tree_depth, ctx.config.tree_width
        )
        .cyan()
    );
    for line in tree_lines(network.store(), &root) {
        println!("{}", line);
    }

    Ok(())
}

/// Show the most popular users of a category as a tree.
pub fn category_tree(ctx: &Context, label: &str) -> Result<()> {
    let network = ctx.network()?;
    let top = top_in_category(
        network.store(),
        label,
        Metric::Popularity,
        ctx.config.tree_width,
    );

    if ctx.json {
        return print_json(&top);
    }

    println!(
        "{}",
        format!("Top {} users from {}:", ctx.config.tree_width, label).yellow()
    );
    if top.is_empty() {
        println!("No users found in this category.");
    }
    for entity in top {
        println!("└── {}", entity_summary(entity));
    }

    Ok(())
}

/// Export the network to JSON.
pub fn export(ctx: &Context, output: &Path) -> Result<()> {
    let network = ctx.network()?;

    let export = serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "stats": network.stats(),
        "users": network.store().entities(),
        "edges": network.graph().export_edges(),
    });

    fs::write(output, serde_json::to_string_pretty(&export)?)?;
    println!("{} Exported to {}", "✓".green(), output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DATASET: &str = "\
id,name,followers,activity_score,country,connections
1,Alice,100,1.5,India,2 3
2,Bob,50,2.5,Peru,1
3,Carol,75,0.5,India,1
";

    fn context(dir: &Path) -> Context {
        let data = dir.join("people.csv");
        fs::write(&data, DATASET).unwrap();
        Context {
            config: Config::default(),
            data: Some(data),
            json: true,
        }
    }

    #[test]
    fn test_init_writes_config() {
        let dir = tempdir().unwrap();
        init(dir.path(), Some(Path::new("people.csv"))).unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.dataset, Some(PathBuf::from("people.csv")));

        // Second run leaves the file alone.
        init(dir.path(), None).unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.dataset, Some(PathBuf::from("people.csv")));
    }

    #[test]
    fn test_network_requires_dataset() {
        let ctx = Context {
            config: Config::default(),
            data: None,
            json: false,
        };
        assert!(ctx.network().is_err());
    }

    #[test]
    fn test_commands_run() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());

        stats(&ctx).unwrap();
        info(&ctx, "alice").unwrap();
        mutuals(&ctx, "Bob", "Carol").unwrap();
        above(&ctx, 60.0, "followers").unwrap();
        top(&ctx, 3, "activity").unwrap();
        category(&ctx, "india").unwrap();
        traverse(&ctx, "Alice", Walk::DepthFirst).unwrap();
        distances(&ctx, None).unwrap();
        recommend(&ctx, "Bob", None).unwrap();
        tree(&ctx, "Alice").unwrap();
        category_tree(&ctx, "India").unwrap();
    }

    #[test]
    fn test_recommendations_json() {
        let dir = tempdir().unwrap();
        let network = context(dir.path()).network().unwrap();

        let value = recommendations_json(&network.recommend("Bob").unwrap());
        assert_eq!(
            value,
            serde_json::json!([{
                "user": {
                    "id": 3,
                    "name": "Carol",
                    "popularity": 75,
                    "activity": 0.5,
                    "category": "India",
                    "peers": [1],
                },
                "shared": 1,
            }])
        );
        assert_eq!(recommendations_json(&[]), serde_json::json!([]));
    }

    #[test]
    fn test_distances_json() {
        let dir = tempdir().unwrap();
        let network = context(dir.path()).network().unwrap();

        let value = distances_json(network.store(), &network.distances());
        assert_eq!(value["ids"], serde_json::json!([1, 2, 3]));
        assert_eq!(value["unreachable"], 4);
        assert_eq!(
            value["distances"],
            serde_json::json!([[0, 1, 1], [1, 0, 2], [1, 2, 0]])
        );
    }

    #[test]
    fn test_query_errors_surface() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());

        assert!(info(&ctx, "nobody").is_err());
        assert!(top(&ctx, 0, "popularity").is_err());
        assert!(top(&ctx, 4, "popularity").is_err());
        assert!(top(&ctx, 1, "reach").is_err());
        assert!(mutuals(&ctx, "Alice", "nobody").is_err());
    }

    #[test]
    fn test_export() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());
        let output = dir.path().join("out.json");

        export(&ctx, &output).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value["stats"]["edge_count"], 4);
        assert_eq!(value["users"].as_array().unwrap().len(), 3);
        assert_eq!(value["edges"][0]["source"], 1);
    }
}
