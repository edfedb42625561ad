//! Word-list input parsing.
//!
//! Two formats are accepted: plain lines (`text,weight`, `text<TAB>weight`
//! or `text weight`, one word per line, `#` comments) and a JSON array of
//! `["text", weight]` / `["text", weight, {options}]` entries, where the
//! options object mirrors the per-word config fields.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::layout::{WordConfig, WordSpec};

static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<text>.+?)\s*[,\t]\s*(?P<weight>-?\d+(?:\.\d+)?)\s*$").unwrap()
});

pub fn parse_words(input: &str) -> Result<Vec<WordSpec>> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') {
        parse_json_words(trimmed)
    } else {
        parse_line_words(input)
    }
}

fn parse_line_words(input: &str) -> Result<Vec<WordSpec>> {
    let mut words = Vec::new();
    for (number, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(captures) = LINE_RE.captures(line) {
            let text = captures["text"].to_string();
            let weight: f32 = captures["weight"].parse()?;
            words.push(WordSpec::new(text, weight));
            continue;
        }
        // Fall back to "everything before the last whitespace token".
        if let Some((text, weight)) = line.rsplit_once(char::is_whitespace)
            && let Ok(weight) = weight.trim().parse::<f32>()
        {
            words.push(WordSpec::new(text.trim_end().to_string(), weight));
            continue;
        }
        anyhow::bail!("line {}: expected `text,weight`, got {line:?}", number + 1);
    }
    Ok(words)
}

fn parse_json_words(input: &str) -> Result<Vec<WordSpec>> {
    let value: Value = serde_json::from_str(input)?;
    let Value::Array(entries) = value else {
        anyhow::bail!("expected a JSON array of word entries");
    };
    let mut words = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        words.push(parse_json_entry(entry).ok_or_else(|| {
            anyhow::anyhow!("entry {index}: expected [\"text\", weight] or [\"text\", weight, {{options}}]")
        })?);
    }
    Ok(words)
}

fn parse_json_entry(entry: &Value) -> Option<WordSpec> {
    let Value::Array(parts) = entry else {
        return None;
    };
    let text = parts.first()?.as_str()?.to_string();
    let weight = parts.get(1)?.as_f64()? as f32;
    let config = match parts.get(2) {
        Some(Value::Object(options)) => word_config(options),
        Some(_) => return None,
        None => WordConfig::default(),
    };
    Some(WordSpec::with_config(text, weight, config))
}

fn word_config(options: &serde_json::Map<String, Value>) -> WordConfig {
    WordConfig {
        rotate: options
            .get("rotate")
            .and_then(Value::as_f64)
            .map(|value| value as f32),
        space: options
            .get("space")
            .and_then(Value::as_f64)
            .map(|value| value as f32),
        color: options
            .get("color")
            .and_then(Value::as_str)
            .map(str::to_string),
        font_family: options
            .get("fontFamily")
            .and_then(Value::as_str)
            .map(str::to_string),
        font_weight: options.get("fontWeight").map(json_string),
        font_style: options
            .get("fontStyle")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

// fontWeight may be a keyword ("bold") or a number (700).
fn json_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_lines() {
        let words = parse_words("rust,10\ncargo, 5\n").expect("parse");
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "rust");
        assert_eq!(words[0].weight, 10.0);
        assert_eq!(words[1].text, "cargo");
        assert_eq!(words[1].weight, 5.0);
    }

    #[test]
    fn parses_whitespace_separated_lines() {
        let words = parse_words("hello world 3\n").expect("parse");
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "hello world");
        assert_eq!(words[0].weight, 3.0);
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let words = parse_words("# header\n\nword,1\n").expect("parse");
        assert_eq!(words.len(), 1);
    }

    #[test]
    fn keeps_commas_inside_text() {
        let words = parse_words("a,b,2\n").expect("parse");
        assert_eq!(words[0].text, "a,b");
        assert_eq!(words[0].weight, 2.0);
    }

    #[test]
    fn rejects_weightless_lines() {
        assert!(parse_words("no weight here\n").is_err());
    }

    #[test]
    fn parses_json_pairs() {
        let words = parse_words(r#"[["rust", 10], ["cargo", 5.5]]"#).expect("parse");
        assert_eq!(words.len(), 2);
        assert_eq!(words[1].weight, 5.5);
    }

    #[test]
    fn parses_json_entry_options() {
        let words = parse_words(
            r##"[["rust", 10, {"rotate": -45, "color": "#ff0000", "fontWeight": 700}]]"##,
        )
        .expect("parse");
        assert_eq!(words[0].config.rotate, Some(-45.0));
        assert_eq!(words[0].config.color, Some("#ff0000".to_string()));
        assert_eq!(words[0].config.font_weight, Some("700".to_string()));
    }

    #[test]
    fn rejects_malformed_json_entries() {
        assert!(parse_words(r#"[["only text"]]"#).is_err());
        assert!(parse_words(r#"{"not": "an array"}"#).is_err());
    }
}
