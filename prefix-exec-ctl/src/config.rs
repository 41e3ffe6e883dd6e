use prefix_exec::ShimConfig;
use std::fs;
use std::path::Path;

/// Load a JSON configuration, or the defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<ShimConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(ShimConfig::default());
    };
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
    let config = serde_json::from_str(&text)
        .map_err(|e| format!("invalid config {}: {}", path.display(), e))?;
    Ok(config)
}
