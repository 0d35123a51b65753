//! Turns a [`ScriptModel`] into the ordered root sequence of an outline.

use shellscope_api::config::DEFAULT_DEBUG_LABEL_LIMIT;
use shellscope_api::{
    ItemKind, OutlineConfig, Result, ScriptModel, Span, SymbolItem, VariableMap,
};

pub const NO_FUNCTIONS_MESSAGE: &str = "Bash script does not contain any functions";
pub const CONTAINS_ERRORS_MESSAGE: &str = "Bash script contains errors.";
pub const TRUNCATION_MARKER: &str = "...";
const TYPE_SEPARATOR: &str = " :<- ";

/// The single item shown when a script has nothing to outline.
pub fn placeholder() -> SymbolItem {
    SymbolItem::meta(ItemKind::MetaInfo, NO_FUNCTIONS_MESSAGE)
}

/// Keeps the first `limit` characters of `text`, appending [`TRUNCATION_MARKER`] when anything
/// was cut.
pub fn shorten(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => {
            let mut short = String::with_capacity(byte_idx + TRUNCATION_MARKER.len());
            short.push_str(&text[..byte_idx]);
            short.push_str(TRUNCATION_MARKER);
            short
        }
        None => text.to_string(),
    }
}

/// Pure, total transformation from a script model to outline items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeBuilder {
    label_limit: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self {
            label_limit: DEFAULT_DEBUG_LABEL_LIMIT,
        }
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails when the config does not pass [`OutlineConfig::validate`].
    pub fn from_config(config: &OutlineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            label_limit: config.debug_label_limit,
        })
    }

    pub fn label_limit(&self) -> usize {
        self.label_limit
    }

    /// Never fails; the worst case is the single placeholder item.
    pub fn build(&self, model: &ScriptModel) -> Vec<SymbolItem> {
        let mut items = variable_items(&model.variables);

        for function in &model.functions {
            let span = Span::new(function.position, function.length_to_name_end, function.end);
            let item = SymbolItem::new(function.name.as_str(), ItemKind::Function, span)
                .with_children(variable_items(&function.variables));
            items.push(item);
        }

        if items.is_empty() {
            items.push(placeholder());
        }

        if model.has_debug_tokens() {
            if model.has_errors() {
                items.insert(0, SymbolItem::meta(ItemKind::MetaError, CONTAINS_ERRORS_MESSAGE));
            }
            for token in model.debug_tokens() {
                let name = format!(
                    "{}{}{}",
                    shorten(&token.text, self.label_limit),
                    TYPE_SEPARATOR,
                    token.type_description
                );
                let span = Span::new(token.start, token.text.chars().count(), token.end);
                items.push(SymbolItem::new(name, ItemKind::MetaDebug, span));
            }
        }

        items
    }
}

fn variable_items(variables: &VariableMap) -> Vec<SymbolItem> {
    variables
        .values()
        .map(|variable| {
            let initial = variable.initial_assignment;
            SymbolItem::new(
                variable.name.as_str(),
                ItemKind::GlobalVariable,
                Span::between(initial.start, initial.end),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shellscope_api::{
        OutlineError, ParseToken, ScriptError, ScriptFunction, ScriptVariable,
        VariableAssignment,
    };

    fn kinds(items: &[SymbolItem]) -> Vec<ItemKind> {
        items.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn test_empty_model_yields_placeholder() {
        let items = TreeBuilder::new().build(&ScriptModel::new());
        assert_eq!(items, vec![placeholder()]);
        assert_eq!(items[0].span, Span::EMPTY);
    }

    #[test]
    fn test_variables_precede_functions() {
        let model = ScriptModel::new()
            .with_function(ScriptFunction::new("deploy", 40, 15, 120))
            .with_variable(ScriptVariable::new("HOST", VariableAssignment::new(0, 12)));

        let items = TreeBuilder::new().build(&model);
        assert_eq!(kinds(&items), vec![ItemKind::GlobalVariable, ItemKind::Function]);
        assert_eq!(items[0].span, Span::new(0, 12, 12));
        assert_eq!(items[1].span, Span::new(40, 15, 120));
    }

    #[test]
    fn test_variable_span_uses_initial_assignment() {
        let variable = ScriptVariable::new("count", VariableAssignment::new(5, 12))
            .with_reassignment(VariableAssignment::new(30, 37));
        let items = TreeBuilder::new().build(&ScriptModel::new().with_variable(variable));
        assert_eq!(items[0].span, Span::between(5, 12));
    }

    #[test]
    fn test_function_children_keep_model_order() {
        let function = ScriptFunction::new("main", 0, 13, 200)
            .with_variable(ScriptVariable::new("zz", VariableAssignment::new(20, 25)))
            .with_variable(ScriptVariable::new("aa", VariableAssignment::new(30, 35)));
        let items = TreeBuilder::new().build(&ScriptModel::new().with_function(function));

        let names: Vec<&str> = items[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["zz", "aa"]);
        assert!(items[0].children.iter().all(|c| c.kind == ItemKind::GlobalVariable));
    }

    #[test]
    fn test_degenerate_function_is_tolerated() {
        let model = ScriptModel::new().with_function(ScriptFunction::new("", 50, 0, 10));
        let items = TreeBuilder::new().build(&model);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].span.start, 50);
        assert_eq!(items[0].span.length, 0);
        assert!(items[0].span.start <= items[0].span.end);
    }

    #[test]
    fn test_errors_without_debug_tokens_are_silent() {
        let model = ScriptModel::new().with_error(ScriptError::new(3, 4, "missing fi"));
        let items = TreeBuilder::new().build(&model);
        assert_eq!(kinds(&items), vec![ItemKind::MetaInfo]);
    }

    #[test]
    fn test_debug_tokens_and_error_ordering() {
        let model = ScriptModel::new()
            .with_variable(ScriptVariable::new("A", VariableAssignment::new(0, 3)))
            .with_function(ScriptFunction::new("f", 10, 10, 30))
            .with_error(ScriptError::new(25, 26, "unexpected token"))
            .with_debug_tokens(vec![
                ParseToken::new(10, 18, "function", "keyword"),
                ParseToken::new(19, 20, "f", "name"),
            ]);

        let items = TreeBuilder::new().build(&model);
        assert_eq!(
            kinds(&items),
            vec![
                ItemKind::MetaError,
                ItemKind::GlobalVariable,
                ItemKind::Function,
                ItemKind::MetaDebug,
                ItemKind::MetaDebug,
            ]
        );
        assert_eq!(items[0].name, CONTAINS_ERRORS_MESSAGE);
        assert_eq!(items[3].name, "function :<- keyword");
        assert_eq!(items[3].span, Span::new(10, 8, 18));
    }

    #[test]
    fn test_debug_only_model_keeps_placeholder() {
        let model = ScriptModel::new().with_debug_tokens(vec![ParseToken::new(0, 1, "#", "comment")]);
        let items = TreeBuilder::new().build(&model);
        assert_eq!(kinds(&items), vec![ItemKind::MetaInfo, ItemKind::MetaDebug]);
    }

    #[test]
    fn test_long_token_is_shortened() {
        let text = "x".repeat(100);
        let model =
            ScriptModel::new().with_debug_tokens(vec![ParseToken::new(0, 100, text, "string")]);
        let items = TreeBuilder::new().build(&model);

        let debug = &items[1];
        let expected = format!("{}{} :<- string", "x".repeat(40), TRUNCATION_MARKER);
        assert_eq!(debug.name, expected);
        assert_eq!(debug.span.length, 100);
    }

    #[test]
    fn test_label_limit_from_config() {
        let config = OutlineConfig {
            debug_label_limit: 4,
            ..OutlineConfig::default()
        };
        let builder = TreeBuilder::from_config(&config).unwrap();
        assert_eq!(builder.label_limit(), 4);

        let model = ScriptModel::new()
            .with_debug_tokens(vec![ParseToken::new(0, 9, "echo_this", "word")]);
        let items = builder.build(&model);
        assert_eq!(items[1].name, "echo... :<- word");
    }

    #[test]
    fn test_zero_label_limit_rejected() {
        let config = OutlineConfig {
            debug_label_limit: 0,
            ..OutlineConfig::default()
        };
        let err = TreeBuilder::from_config(&config).unwrap_err();
        assert!(matches!(err, OutlineError::InvalidConfig(_)));
    }

    #[test]
    fn test_variables_only_model_has_no_placeholder() {
        let model = ScriptModel::new()
            .with_variable(ScriptVariable::new("LANG", VariableAssignment::new(0, 10)));
        let items = TreeBuilder::new().build(&model);
        assert_eq!(kinds(&items), vec![ItemKind::GlobalVariable]);
        assert_eq!(items[0].name, "LANG");
    }

    #[test]
    fn test_shorten_counts_characters() {
        assert_eq!(shorten("héllo wörld", 5), "héllo...");
        assert_eq!(shorten("短い", 40), "短い");
        assert_eq!(shorten("abc", 3), "abc");
        assert_eq!(shorten("", 3), "");
    }
}
