//! Shape of a parsed script as handed over by an external parser.
//!
//! The outline never parses source text itself. A parser (in-process or out-of-process via
//! JSON) produces a [`ScriptModel`] for every reconcile pass.

use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Insertion-ordered mapping from variable name to variable.
pub type VariableMap = IndexMap<String, ScriptVariable>;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VariableAssignment {
    pub start: usize,
    pub end: usize,
}

impl VariableAssignment {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScriptVariable {
    pub name: String,
    /// First assignment in source order; the outline points here.
    pub initial_assignment: VariableAssignment,
    #[serde(default)]
    pub reassignments: Vec<VariableAssignment>,
}

impl ScriptVariable {
    pub fn new(name: impl Into<String>, initial_assignment: VariableAssignment) -> Self {
        Self {
            name: name.into(),
            initial_assignment,
            reassignments: Vec::new(),
        }
    }

    pub fn with_reassignment(mut self, assignment: VariableAssignment) -> Self {
        self.reassignments.push(assignment);
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScriptFunction {
    pub name: String,
    /// Offset of the function declaration.
    pub position: usize,
    /// Distance from `position` to the end of the name token.
    pub length_to_name_end: usize,
    /// Offset of the closing extent of the body.
    pub end: usize,
    #[serde(default)]
    pub variables: VariableMap,
}

impl ScriptFunction {
    pub fn new(name: impl Into<String>, position: usize, length_to_name_end: usize, end: usize) -> Self {
        Self {
            name: name.into(),
            position,
            length_to_name_end,
            end,
            variables: VariableMap::new(),
        }
    }

    pub fn with_variable(mut self, variable: ScriptVariable) -> Self {
        self.variables.insert(variable.name.clone(), variable);
        self
    }
}

/// Token recorded by a parser running in debug mode.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ParseToken {
    pub start: usize,
    pub end: usize,
    pub text: String,
    /// Short human-readable description of the token type, e.g. `keyword`.
    pub type_description: String,
}

impl ParseToken {
    pub fn new(
        start: usize,
        end: usize,
        text: impl Into<String>,
        type_description: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            type_description: type_description.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub start: usize,
    pub end: usize,
    pub message: String,
}

impl ScriptError {
    pub fn new(start: usize, end: usize, message: impl Into<String>) -> Self {
        Self {
            start,
            end,
            message: message.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptModel {
    #[serde(default)]
    pub functions: Vec<ScriptFunction>,
    #[serde(default)]
    pub variables: VariableMap,
    /// `Some` only when the parser ran in debug mode.
    #[serde(default)]
    pub debug_tokens: Option<Vec<ParseToken>>,
    #[serde(default)]
    pub errors: Vec<ScriptError>,
}

impl ScriptModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn with_function(mut self, function: ScriptFunction) -> Self {
        self.functions.push(function);
        self
    }

    pub fn with_variable(mut self, variable: ScriptVariable) -> Self {
        self.variables.insert(variable.name.clone(), variable);
        self
    }

    pub fn with_debug_tokens(mut self, tokens: Vec<ParseToken>) -> Self {
        self.debug_tokens = Some(tokens);
        self
    }

    pub fn with_error(mut self, error: ScriptError) -> Self {
        self.errors.push(error);
        self
    }

    pub fn has_debug_tokens(&self) -> bool {
        self.debug_tokens.is_some()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn debug_tokens(&self) -> &[ParseToken] {
        self.debug_tokens.as_deref().unwrap_or(&[])
    }
}

impl fmt::Display for ScriptModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "script model ({} functions, {} variables, {} errors)",
            self.functions.len(),
            self.variables.len(),
            self.errors.len()
        )
    }
}
