//! Input mode definitions.

use std::fmt;

/// How the set of media to acquire is selected for a run.
///
/// Exactly one mode is active per run. Explicit links or identifiers win over
/// the geospatial search whenever any are supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Resolve links and identifiers, then look each one up.
    Links,
    /// Query the map playlist around a point.
    Search,
}

impl InputMode {
    /// Pick the mode for the given collected inputs.
    pub fn for_inputs<S: AsRef<str>>(inputs: &[S]) -> Self {
        if inputs.is_empty() {
            InputMode::Search
        } else {
            InputMode::Links
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Links => write!(f, "links"),
            InputMode::Search => write!(f, "search"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_inputs_take_precedence() {
        assert_eq!(InputMode::for_inputs(&["https://t.snapchat.com/abc"]), InputMode::Links);
        assert_eq!(InputMode::for_inputs::<String>(&[]), InputMode::Search);
    }
}
