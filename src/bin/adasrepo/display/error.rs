use std::io::{self, Write};

use anyhow::Error;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    let hints = hints_for(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

fn hints_for(err: &Error) -> Vec<String> {
    use adas_repo::Error as RepoError;

    let Some(repo_err) = err.chain().find_map(|e| e.downcast_ref::<RepoError>()) else {
        return fallback_hints(err);
    };

    let mut hints = Vec::new();
    match repo_err {
        RepoError::MissingField { field } => {
            hints.push(format!("Add a '{field}' entry to the JSON payload"));
            hints.push(required_fields_hint());
        }

        RepoError::InvalidNumeric { field, .. } => {
            hints.push(format!(
                "'{field}' must hold finite numbers in rectangular nested lists"
            ));
        }

        RepoError::InvalidRank { field, expected, .. } => {
            let shape = match expected {
                0 => "a single number".to_string(),
                1 => "a flat list".to_string(),
                n => format!("{n} levels of nested lists"),
            };
            hints.push(format!("Provide '{field}' as {shape}"));
        }

        RepoError::ShapeMismatch { table, expected, .. } => {
            hints.push(format!(
                "'{table}' needs one entry per axis point, i.e. shape {expected:?}"
            ));
            hints.push("Axes index the table in order: the first axis is the outer list".into());
        }

        RepoError::InvalidLevel { .. } => {
            hints.push("Levels are integers, plain labels such as '2s', or composites such as '(3, 1)'".into());
            hints.push("Labels may not contain parentheses, commas, slashes or '->'".into());
        }

        RepoError::InvalidPathSegment { .. } => {
            hints.push("Species symbols must be plain ASCII letters and digits".into());
        }

        RepoError::InvalidCharge { species, atomic_number, role, .. } => {
            if role.is_donor() {
                hints.push(format!(
                    "A {species} donor must keep an electron: use a charge from 0 to {}",
                    atomic_number.saturating_sub(1)
                ));
            } else {
                hints.push(format!("{species} charge states run from 0 to {atomic_number}"));
            }
        }

        RepoError::NotFound { path, .. } => {
            if path.exists() {
                hints.push("The document exists but has no entry for this transition".into());
            } else {
                hints.push(format!("No document at {}", path.display()));
                hints.push("Check --root, --config or ADAS_REPOSITORY_PATH".into());
            }
        }

        RepoError::MalformedEntry { path, .. } | RepoError::MalformedDocument { path, .. } => {
            hints.push(format!("Inspect {} for manual edits or truncation", path.display()));
            hints.push("Re-adding the affected rates rewrites the document".into());
        }

        RepoError::Io { source, .. } => io_hints(source, &mut hints),

        RepoError::Config(_) => {
            hints.push("The configuration file must be TOML, e.g. root = \"/data/adas\"".into());
        }
    }
    hints
}

fn required_fields_hint() -> String {
    "Required fields: PEC ne, te, rate; thermal CX ne, te, td, rate; \
     beam emission e, n, t, sen, st, eref, nref, tref, sref"
        .to_string()
}

fn io_hints(source: &io::Error, hints: &mut Vec<String>) {
    use std::io::ErrorKind;

    match source.kind() {
        ErrorKind::PermissionDenied => {
            hints.push("Permission denied accessing the repository".into());
            hints.push("Ensure you have write access to the repository root".into());
        }
        ErrorKind::StorageFull | ErrorKind::WriteZero => {
            hints.push("Failed to write data (disk full?)".into());
        }
        _ => {
            hints.push("Check the repository path, permissions, and disk space".into());
        }
    }
}

fn fallback_hints(err: &Error) -> Vec<String> {
    let msg = error_chain_text(err);

    if msg.contains("stdin is a terminal") {
        return vec!["Provide the payload via -i/--input or pipe JSON to stdin".into()];
    }
    if msg.contains("no such file") {
        return vec!["Check that the file path is correct".into()];
    }
    if msg.contains("expected value") || msg.contains("eof while parsing") {
        return vec!["The payload is not valid JSON".into()];
    }
    Vec::new()
}

fn error_chain_text(err: &Error) -> String {
    err.chain()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase()
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
