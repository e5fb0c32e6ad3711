//! PostgreSQL configuration text substitution
//!
//! Pure string transforms for `postgresql.conf` and `pg_hba.conf`. Both are
//! idempotent: applying a transform to its own output changes nothing.

use std::sync::OnceLock;

use regex::Regex;

/// Result of a text substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edited {
    pub content: String,
    pub changed: bool,
}

impl Edited {
    fn unchanged(content: &str) -> Self {
        Self {
            content: content.to_string(),
            changed: false,
        }
    }
}

fn assignment_regex(key: &str) -> Regex {
    Regex::new(&format!(r"^\s*(#\s*)?{}\s*=", regex::escape(key)))
        .expect("escaped key is a valid pattern")
}

fn bare_value_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^-?\d+(\.\d+)?(kB|MB|GB|TB|ms|s|min|h|d)?$").expect("value regex is valid")
    })
}

/// Render a setting value the way `postgresql.conf` expects it
///
/// Numbers, numbers with units and booleans stay bare; anything else is
/// single-quoted with embedded quotes doubled.
pub fn render_value(value: &str) -> String {
    let trimmed = value.trim();
    let is_bool = matches!(
        trimmed.to_ascii_lowercase().as_str(),
        "on" | "off" | "true" | "false"
    );
    let is_quoted = trimmed.len() >= 2 && trimmed.starts_with('\'') && trimmed.ends_with('\'');
    if bare_value_regex().is_match(trimmed) || is_bool || is_quoted {
        trimmed.to_string()
    } else {
        format!("'{}'", trimmed.replace('\'', "''"))
    }
}

/// Strip a trailing `# comment`, ignoring `#` inside single quotes
fn strip_comment(value: &str) -> &str {
    let mut in_quotes = false;
    for (i, c) in value.char_indices() {
        match c {
            '\'' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &value[..i],
            _ => {}
        }
    }
    value
}

fn assigned_value(line: &str) -> Option<&str> {
    line.split_once('=')
        .map(|(_, rest)| strip_comment(rest).trim())
}

/// The effective value of `key`: the last uncommented assignment
pub fn current_value(content: &str, key: &str) -> Option<String> {
    let re = assignment_regex(key);
    content
        .lines()
        .filter(|line| {
            re.captures(line)
                .map(|c| c.get(1).is_none())
                .unwrap_or(false)
        })
        .last()
        .and_then(assigned_value)
        .map(str::to_string)
}

/// Set `key = value` in a `postgresql.conf` body
///
/// Replaces the last active assignment (the one PostgreSQL honours), or
/// else the first commented-out default, or appends a new line.
pub fn set_parameter(content: &str, key: &str, value: &str) -> Edited {
    let rendered = render_value(value);
    let desired = format!("{key} = {rendered}");
    let re = assignment_regex(key);

    let lines: Vec<&str> = content.lines().collect();
    let mut last_active = None;
    let mut first_commented = None;
    for (i, line) in lines.iter().enumerate() {
        if let Some(caps) = re.captures(line) {
            if caps.get(1).is_none() {
                last_active = Some(i);
            } else if first_commented.is_none() {
                first_commented = Some(i);
            }
        }
    }

    if let Some(i) = last_active {
        if assigned_value(lines[i]) == Some(rendered.as_str()) {
            return Edited::unchanged(content);
        }
    }

    let target = last_active.or(first_commented);
    let mut out: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
    match target {
        Some(i) => out[i] = desired,
        None => out.push(desired),
    }

    let mut joined = out.join("\n");
    joined.push('\n');
    Edited {
        content: joined,
        changed: true,
    }
}

/// Apply several settings in order
pub fn set_parameters<'a>(
    content: &str,
    settings: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Edited {
    let mut current = Edited::unchanged(content);
    for (key, value) in settings {
        let next = set_parameter(&current.content, key, value);
        current = Edited {
            changed: current.changed || next.changed,
            content: next.content,
        };
    }
    current
}

fn normalize_rule(line: &str) -> String {
    strip_comment(line).split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rules from `wanted` that `pg_hba.conf` does not contain yet
pub fn missing_hba_rules<'a>(content: &str, wanted: &'a [String]) -> Vec<&'a str> {
    let present: Vec<String> = content
        .lines()
        .filter(|l| !l.trim_start().starts_with('#'))
        .map(normalize_rule)
        .filter(|l| !l.is_empty())
        .collect();

    let mut missing: Vec<&str> = Vec::new();
    for rule in wanted {
        let normalized = normalize_rule(rule);
        if normalized.is_empty() {
            continue;
        }
        let already = present.contains(&normalized)
            || missing.iter().any(|m| normalize_rule(m) == normalized);
        if !already {
            missing.push(rule.as_str());
        }
    }
    missing
}

/// Append the missing rules to a `pg_hba.conf` body
pub fn append_hba_rules(content: &str, wanted: &[String]) -> Edited {
    let missing = missing_hba_rules(content, wanted);
    if missing.is_empty() {
        return Edited::unchanged(content);
    }

    let mut out = content.to_string();
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    for rule in missing {
        out.push_str(rule.trim());
        out.push('\n');
    }
    Edited {
        content: out,
        changed: true,
    }
}
