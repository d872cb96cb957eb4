use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use adas_repo::RawRate;

/// Returns `true` if stderr is a terminal (interactive).
pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

/// Returns `true` if stdin is a terminal (interactive).
pub fn stdin_is_tty() -> bool {
    io::stdin().is_terminal()
}

/// Reads a JSON object payload from a file, or from stdin when `path` is
/// `None`.
pub fn read_payload(path: Option<&Path>) -> Result<RawRate> {
    let (text, origin) = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .with_context(|| format!("Failed to read payload file: {}", p.display()))?;
            (text, p.display().to_string())
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read payload from stdin")?;
            (text, "stdin".to_string())
        }
    };

    parse_payload(&text).with_context(|| format!("Invalid rate payload in {origin}"))
}

pub fn parse_payload(text: &str) -> Result<RawRate> {
    if text.trim().is_empty() {
        bail!("payload is empty");
    }
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(RawRate::from(map)),
        other => bail!(
            "payload must be a JSON object of named fields, found {}",
            json_type(&other)
        ),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Writes `text` plus a trailing newline to a file, or to stdout.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(p) => {
            let file = File::create(p)
                .with_context(|| format!("Failed to create output file: {}", p.display()))?;
            let mut writer = BufWriter::new(file);
            writeln!(writer, "{text}")?;
            writer.flush()?;
        }
        None => {
            let mut writer = BufWriter::new(io::stdout().lock());
            writeln!(writer, "{text}")?;
            writer.flush()?;
        }
    }
    Ok(())
}
