use super::types::Dependency;
use regex::Regex;
use std::sync::OnceLock;

fn use_regex() -> &'static Regex {
    static RE_USE: OnceLock<Regex> = OnceLock::new();
    RE_USE.get_or_init(|| Regex::new(r"(?m)^use\s+[^;\r\n]+;").unwrap())
}

fn namespace_regex() -> &'static Regex {
    static RE_NAMESPACE: OnceLock<Regex> = OnceLock::new();
    RE_NAMESPACE.get_or_init(|| Regex::new(r"(?m)^namespace\s+[^;\r\n]+;").unwrap())
}

fn use_statement(import: &str) -> String {
    format!("use {};", import.trim_start_matches('\\'))
}

/// True when no import is configured or `source` already has its `use` statement.
pub fn has_import(source: &str, dependency: &Dependency) -> bool {
    match dependency.import.as_deref() {
        Some(import) => {
            let statement = use_statement(import);
            use_regex().find_iter(source).any(|m| m.as_str() == statement)
        }
        None => true,
    }
}

/// Add a top-level `use` statement for the dependency's class.
///
/// The statement is placed in alphabetical order among the existing top-level
/// imports, or after the `namespace` declaration when there are none.
/// Returns `None` when the dependency has no import, the import is already
/// present, or the file has neither imports nor a namespace.
pub fn add_import(source: &str, dependency: &Dependency) -> Option<String> {
    let import = dependency.import.as_deref()?;
    let statement = use_statement(import);

    let uses: Vec<_> = use_regex().find_iter(source).collect();
    if uses.iter().any(|m| m.as_str() == statement) {
        return None;
    }

    let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };

    let (position, insertion) =
        if let Some(next) = uses.iter().find(|m| m.as_str() > statement.as_str()) {
            (next.start(), format!("{statement}{newline}"))
        } else if let Some(last) = uses.last() {
            (last.end(), format!("{newline}{statement}"))
        } else {
            let namespace = namespace_regex().find(source)?;
            (namespace.end(), format!("{newline}{newline}{statement}"))
        };

    let mut output = String::with_capacity(source.len() + insertion.len());
    output.push_str(&source[..position]);
    output.push_str(&insertion);
    output.push_str(&source[position..]);
    Some(output)
}
