use std::fs;
use std::path::Path;

use crate::annotation::domain::graphics_item::GraphicsItem;

/// Reads annotation items from a JSON file.
///
/// Accepts either a bare array of items or an object with an `items` array,
/// as exported by upstream detection tasks.
pub fn read_annotations(path: &Path) -> Result<Vec<GraphicsItem>, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read annotations {}: {e}", path.display()))?;
    parse_annotations(&text)
}

pub fn parse_annotations(text: &str) -> Result<Vec<GraphicsItem>, Box<dyn std::error::Error>> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let items = match value {
        serde_json::Value::Object(mut map) => map
            .remove("items")
            .ok_or("Annotation object has no \"items\" array")?,
        other => other,
    };
    Ok(serde_json::from_value(items)?)
}
