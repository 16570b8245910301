mod app;
mod demo;
mod surface;

use anyhow::{Context, Result};
use hchart_core::ChartConfig;

/// One terminal row per node, no gaps.
fn terminal_defaults() -> ChartConfig {
    ChartConfig {
        node_selection_enabled: true,
        custom_node_height: Some(1.0),
        x_padding: 0.0,
        y_padding: 0.0,
        ..ChartConfig::default()
    }
}

fn load_config(path: Option<&str>) -> Result<ChartConfig> {
    let Some(path) = path else {
        return Ok(terminal_defaults());
    };
    let data = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let config = serde_json::from_str(&data).with_context(|| format!("parsing {path}"))?;
    Ok(config)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("Usage: hchart [chart-config.json]");
        std::process::exit(1);
    }

    let config = load_config(args.get(1).map(String::as_str))?;
    let tree = demo::synthetic_tree(0x5eed, 1_000_000, 24, 20_000);
    app::run(&tree, config)
}
