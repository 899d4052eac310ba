use std::collections::HashMap;
use anyhow::{anyhow, Context, Result};

use crate::model::hour::Field;

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub positional: Vec<String>,
    pub metadata: HashMap<String, String>,
}

/// Raw values for one hour, before range validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourInput {
    pub program: u8,
    pub strength: u8,
    pub pain: u8,
}

pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut positional = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        positional.push(arg.clone());
    }

    ParsedInput { positional, metadata }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Reads `program:<n> strength:<n> pain:<n>` (keys may be shortened to any
/// unique prefix). All three are required.
pub fn parse_hour_input(args: &[String]) -> Result<HourInput> {
    let parsed = parse_args(args);
    if let Some(extra) = parsed.positional.first() {
        return Err(anyhow!("Unexpected argument: '{}'", extra));
    }

    let known_keys: Vec<&str> = Field::ALL.iter().map(Field::name).collect();
    let mut values = HashMap::new();
    for (key, raw) in &parsed.metadata {
        let full_key = expand_key(key, &known_keys)?;
        let value: u8 = raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {} value: '{}'", full_key, raw))?;
        if values.insert(full_key.clone(), value).is_some() {
            return Err(anyhow!("Duplicate key: '{}'", full_key));
        }
    }

    let mut take = |field: Field| {
        values
            .remove(field.name())
            .ok_or_else(|| anyhow!("Missing {} value", field))
    };
    Ok(HourInput {
        program: take(Field::Program)?,
        strength: take(Field::Strength)?,
        pain: take(Field::Pain)?,
    })
}
