//! Structural lookups that must not be fooled by comments or string literals.
//!
//! The source is first masked: comment bodies and string contents become
//! spaces, so byte offsets in the masked text are offsets in the original.

use regex::bytes::Regex;
use std::ops::Range;
use std::sync::OnceLock;

fn constructor_regex() -> &'static Regex {
    static RE_CONSTRUCTOR: OnceLock<Regex> = OnceLock::new();
    RE_CONSTRUCTOR.get_or_init(|| Regex::new(r"\bfunction\s+__construct\s*\(").unwrap())
}

#[derive(Clone, Copy)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Quoted(u8),
}

/// Copy of `source` with comments and string contents blanked out.
///
/// Newlines are kept. `#[` starts an attribute, not a comment.
pub fn mask_non_code(source: &str) -> Vec<u8> {
    let bytes = source.as_bytes();
    let mut masked = bytes.to_vec();
    let mut state = State::Code;
    let mut i = 0;

    let blank = |masked: &mut Vec<u8>, at: usize| {
        if masked[at] != b'\n' {
            masked[at] = b' ';
        }
    };

    while i < bytes.len() {
        let byte = bytes[i];
        let next = bytes.get(i + 1).copied();

        match state {
            State::Code => match (byte, next) {
                (b'/', Some(b'/')) => {
                    state = State::LineComment;
                    blank(&mut masked, i);
                }
                (b'#', next) if next != Some(b'[') => {
                    state = State::LineComment;
                    blank(&mut masked, i);
                }
                (b'/', Some(b'*')) => {
                    state = State::BlockComment;
                    blank(&mut masked, i);
                    blank(&mut masked, i + 1);
                    i += 1;
                }
                (b'\'', _) | (b'"', _) => state = State::Quoted(byte),
                _ => {}
            },
            State::LineComment => {
                if byte == b'\n' {
                    state = State::Code;
                } else {
                    blank(&mut masked, i);
                }
            }
            State::BlockComment => {
                blank(&mut masked, i);
                if byte == b'*' && next == Some(b'/') {
                    blank(&mut masked, i + 1);
                    i += 1;
                    state = State::Code;
                }
            }
            State::Quoted(quote) => {
                if byte == quote {
                    state = State::Code;
                } else if byte == b'\\' && next.is_some() {
                    blank(&mut masked, i);
                    blank(&mut masked, i + 1);
                    i += 1;
                } else {
                    blank(&mut masked, i);
                }
            }
        }
        i += 1;
    }

    masked
}

/// Byte range of the class constructor's parameter list, between the parentheses.
///
/// Only a `function __construct(` sitting directly in a class body (one level
/// of braces deep) counts, so constructors of anonymous classes inside methods
/// and constructors mentioned in comments are ignored. Files using the braced
/// `namespace Foo { ... }` syntax put classes two levels deep and are not
/// recognized.
pub fn constructor_parameters(source: &str) -> Option<Range<usize>> {
    let masked = mask_non_code(source);

    constructor_regex()
        .find_iter(&masked)
        .filter(|m| brace_depth(&masked[..m.start()]) == 1)
        .find_map(|m| matching_paren(&masked, m.end()).map(|close| m.end()..close))
}

/// True when the class declares its own constructor.
pub fn has_constructor(source: &str) -> bool {
    constructor_parameters(source).is_some()
}

fn brace_depth(code: &[u8]) -> i64 {
    code.iter().fold(0, |depth, byte| match byte {
        b'{' => depth + 1,
        b'}' => depth - 1,
        _ => depth,
    })
}

/// Offset of the `)` closing a list that starts at `open` (just after its `(`).
fn matching_paren(code: &[u8], open: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, byte) in code[open..].iter().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}
