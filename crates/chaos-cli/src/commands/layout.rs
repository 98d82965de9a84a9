//! Layout inspection command

use anyhow::{bail, Context, Result};
use chaos_core::Vec3;
use chaos_runtime::ModelLayout;
use serde::Serialize;

#[derive(Serialize)]
struct LayoutSummary {
    points: usize,
    min: Vec3,
    max: Vec3,
    center: Vec3,
    diameter: f32,
}

pub fn run(path: &str, format: &str) -> Result<()> {
    let layout =
        ModelLayout::load(path).with_context(|| format!("Failed to load layout {}", path))?;
    let summary = summarize(&layout);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        "text" => {
            println!("Layout: {}", path);
            println!("  Points:   {}", summary.points);
            println!(
                "  Min:      ({:.3}, {:.3}, {:.3})",
                summary.min.x, summary.min.y, summary.min.z
            );
            println!(
                "  Max:      ({:.3}, {:.3}, {:.3})",
                summary.max.x, summary.max.y, summary.max.z
            );
            println!(
                "  Center:   ({:.3}, {:.3}, {:.3})",
                summary.center.x, summary.center.y, summary.center.z
            );
            println!("  Diameter: {:.3}", summary.diameter);
        }
        other => bail!("unknown format '{}'; valid values: text, json", other),
    }

    Ok(())
}

fn summarize(layout: &ModelLayout) -> LayoutSummary {
    let bounds = layout.bounding_box();
    LayoutSummary {
        points: layout.len(),
        min: bounds.min,
        max: bounds.max,
        center: bounds.center(),
        diameter: bounds.diameter(),
    }
}
