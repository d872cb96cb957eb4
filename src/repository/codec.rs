//! Transition key encoding.
//!
//! A transition `(upper, lower)` is stored under the key
//! `"<upper> -> <lower>"`, where composite levels render as parenthesised
//! tuples (`(3, 1)`, `((3, 1),)`). Labels are restricted so that the
//! rendering stays injective and never contains a path separator.

use super::error::Error;
use crate::model::transition::{Level, Transition};

const RESERVED: [char; 5] = ['(', ')', ',', '/', '\\'];

/// Encodes a transition into its document key.
pub fn encode_transition(transition: &Transition) -> Result<String, Error> {
    check_level(&transition.upper)?;
    check_level(&transition.lower)?;
    Ok(transition.to_string())
}

fn check_level(level: &Level) -> Result<(), Error> {
    match level {
        Level::Index(_) => Ok(()),
        Level::Label(label) => check_label(label),
        Level::Composite(members) => {
            if members.is_empty() {
                return Err(Error::invalid_level("()", "composite level has no members"));
            }
            members.iter().try_for_each(check_level)
        }
    }
}

fn check_label(label: &str) -> Result<(), Error> {
    if label.is_empty() {
        return Err(Error::invalid_level(label, "label is empty"));
    }
    if label.trim() != label {
        return Err(Error::invalid_level(
            label,
            "label has leading or trailing whitespace",
        ));
    }
    if label.contains(RESERVED) {
        return Err(Error::invalid_level(
            label,
            "label contains a reserved character ( ) , / \\",
        ));
    }
    if label.contains("->") {
        return Err(Error::invalid_level(label, "label contains '->'"));
    }
    if label.chars().any(char::is_control) {
        return Err(Error::invalid_level(label, "label contains control characters"));
    }
    Ok(())
}
