use super::types::Dependency;
use regex::Regex;
use std::sync::OnceLock;

/// Indentation used when the parameters share the constructor's line.
const DEFAULT_PARAMETER_INDENT: &str = "        ";

fn constructor_regex() -> &'static Regex {
    static RE_CONSTRUCTOR: OnceLock<Regex> = OnceLock::new();
    RE_CONSTRUCTOR.get_or_init(|| {
        Regex::new(
            r"(?P<head>public\s+function\s+__construct\s*\([^)]*?)(?P<sep>,[ \t]*\r?\n)(?P<close>[ \t]*\)\s*\{)",
        )
        .unwrap()
    })
}

/// Append `dependency` to a constructor whose parameter list ends with a trailing comma.
///
/// Only the first constructor in `source` is considered. Everything outside the
/// inserted line is preserved byte for byte, except that a closing `) {` sitting
/// at column zero is aligned with the parameters.
///
/// Returns `None` when there is no `__construct(` whose last parameter is
/// followed by `,` and a newline right before `) {`. The inserted parameter has
/// no trailing comma, so running this on its own output returns `None`.
pub fn extend_constructor(source: &str, dependency: &Dependency) -> Option<String> {
    let caps = constructor_regex().captures(source)?;
    let whole = caps.get(0)?;
    let head = caps.name("head")?.as_str();
    let sep = caps.name("sep")?.as_str();
    let close = caps.name("close")?.as_str();

    let indent = parameter_indent(head);
    let newline = if sep.ends_with("\r\n") { "\r\n" } else { "\n" };

    let mut output = String::with_capacity(source.len() + indent.len() * 2 + 64);
    output.push_str(&source[..whole.start()]);
    output.push_str(head);
    output.push_str(sep);
    output.push_str(indent);
    output.push_str(&dependency.parameter());
    output.push_str(newline);
    if close.starts_with(')') {
        output.push_str(indent);
    }
    output.push_str(close);
    output.push_str(&source[whole.end()..]);

    Some(output)
}

/// Leading whitespace of the last parameter line captured in `head`.
fn parameter_indent(head: &str) -> &str {
    match head.rfind('\n') {
        Some(pos) => {
            let line = &head[pos + 1..];
            let trimmed = line.trim_start_matches([' ', '\t']);
            &line[..line.len() - trimmed.len()]
        }
        None => DEFAULT_PARAMETER_INDENT,
    }
}
