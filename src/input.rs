use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Parses a JSON document; blank input means "no fields supplied".
pub fn parse_input<T>(text: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned + Default,
{
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(text).context("input is not a valid JSON object")
}

/// Reads JSON input from a file, or from stdin when the path is `-`.
/// Without a path every field takes its default.
pub fn read_input<T>(path: Option<&Path>) -> anyhow::Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = path else {
        return Ok(T::default());
    };

    let text = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read input from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    parse_input(&text)
}

/// Replaces a field only when the matching command-line flag was given.
pub fn overlay(field: &mut Option<f64>, flag: Option<f64>) {
    if flag.is_some() {
        *field = flag;
    }
}
