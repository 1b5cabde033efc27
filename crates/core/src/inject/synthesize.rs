use super::types::Dependency;
use regex::Regex;
use std::sync::OnceLock;

fn class_header_regex() -> &'static Regex {
    static RE_CLASS_HEADER: OnceLock<Regex> = OnceLock::new();
    RE_CLASS_HEADER.get_or_init(|| {
        Regex::new(r"class\s+\w+Controller\s+extends\s+AbstractController\s*\{[ \t]*(?P<eol>\r?\n)")
            .unwrap()
    })
}

/// Constructor block taking `dependency` as its only parameter, followed by a blank line.
pub fn constructor_block(dependency: &Dependency, newline: &str) -> String {
    [
        "    public function __construct(".to_string(),
        format!("        {}", dependency.parameter()),
        "    ) {".to_string(),
        "    }".to_string(),
        String::new(),
        String::new(),
    ]
    .join(newline)
}

/// Insert a new constructor right after a `class <Name>Controller extends AbstractController {` header.
///
/// The opening brace may sit on the header line or on the line below it.
/// This does not look for an existing constructor: a class that already has
/// one ends up with two. Use [`super::inject`] for the guarded variant.
///
/// Returns `None` when no such header exists.
pub fn synthesize_constructor(source: &str, dependency: &Dependency) -> Option<String> {
    let caps = class_header_regex().captures(source)?;
    let header = caps.get(0)?;
    let newline = caps.name("eol")?.as_str();

    let block = constructor_block(dependency, newline);
    let mut output = String::with_capacity(source.len() + block.len());
    output.push_str(&source[..header.end()]);
    output.push_str(&block);
    output.push_str(&source[header.end()..]);

    Some(output)
}
