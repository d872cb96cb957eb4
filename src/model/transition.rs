use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid level or transition '{input}': {detail}")]
pub struct ParseLevelError {
    input: String,
    detail: &'static str,
}

impl ParseLevelError {
    fn new(input: &str, detail: &'static str) -> Self {
        Self {
            input: input.to_string(),
            detail,
        }
    }
}

/// Identifier of one atomic energy level.
///
/// Levels are either a plain integer index (typically the principal quantum
/// number), a free-form label such as `"2s"`, or a composite of other levels,
/// e.g. `(n, l)` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Level {
    Index(u32),
    Label(String),
    Composite(Vec<Level>),
}

impl From<u32> for Level {
    fn from(index: u32) -> Self {
        Level::Index(index)
    }
}

impl From<&str> for Level {
    fn from(label: &str) -> Self {
        Level::Label(label.to_string())
    }
}

impl From<String> for Level {
    fn from(label: String) -> Self {
        Level::Label(label)
    }
}

impl From<Vec<Level>> for Level {
    fn from(levels: Vec<Level>) -> Self {
        Level::Composite(levels)
    }
}

impl<A: Into<Level>, B: Into<Level>> From<(A, B)> for Level {
    fn from((a, b): (A, B)) -> Self {
        Level::Composite(vec![a.into(), b.into()])
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Index(i) => write!(f, "{i}"),
            Level::Label(s) => f.write_str(s),
            Level::Composite(levels) => {
                f.write_str("(")?;
                for (i, level) in levels.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{level}")?;
                }
                if levels.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Parses the textual form produced by [`Display`](fmt::Display):
    /// `3`, `2s`, `(3, 1)`, `((3, 1),)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseLevelError::new(s, "empty level"));
        }

        if let Some(inner) = trimmed.strip_prefix('(') {
            let inner = inner
                .strip_suffix(')')
                .ok_or_else(|| ParseLevelError::new(s, "unbalanced parentheses"))?;
            let parts = split_top_level(inner).ok_or_else(|| {
                ParseLevelError::new(s, "unbalanced parentheses")
            })?;

            let mut members = Vec::with_capacity(parts.len());
            for (i, part) in parts.iter().enumerate() {
                // A single trailing comma marks a one-member composite.
                if part.trim().is_empty() && i == parts.len() - 1 && i > 0 {
                    continue;
                }
                members.push(part.parse::<Level>()?);
            }
            if members.is_empty() {
                return Err(ParseLevelError::new(s, "empty composite level"));
            }
            return Ok(Level::Composite(members));
        }

        if trimmed.contains([')', ',']) {
            return Err(ParseLevelError::new(s, "unexpected delimiter in label"));
        }

        // "03" stays a label so that it reads back the key it was stored under.
        let canonical = !(trimmed.len() > 1 && trimmed.starts_with('0'));
        if canonical && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = trimmed.parse::<u32>() {
                return Ok(Level::Index(index));
            }
        }

        Ok(Level::Label(trimmed.to_string()))
    }
}

fn split_top_level(s: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(&s[start..]);
    Some(parts)
}

/// A radiative transition between two levels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    pub upper: Level,
    pub lower: Level,
}

impl Transition {
    pub fn new(upper: impl Into<Level>, lower: impl Into<Level>) -> Self {
        Self {
            upper: upper.into(),
            lower: lower.into(),
        }
    }
}

impl<A: Into<Level>, B: Into<Level>> From<(A, B)> for Transition {
    fn from((upper, lower): (A, B)) -> Self {
        Transition::new(upper, lower)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.upper, self.lower)
    }
}

impl FromStr for Transition {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (upper, lower) = s
            .split_once("->")
            .ok_or_else(|| ParseLevelError::new(s, "expected '<upper> -> <lower>'"))?;
        Ok(Transition::new(upper.parse::<Level>()?, lower.parse::<Level>()?))
    }
}
