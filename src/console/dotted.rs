//! `ClassName.method(args)` normalization.
//!
//! Rewrites a dotted call into the words of the equivalent space-separated
//! command (`method ClassName args...`) so a single parser handles both forms.

use super::tokenizer::{self, Word};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DOTTED_CALL: Regex =
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\.([A-Za-z_][A-Za-z0-9_]*)\((.*)\)$")
            .expect("dotted call pattern is valid");
}

pub const DOTTED_METHODS: [&str; 5] = ["all", "count", "show", "destroy", "update"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// Not shaped like a dotted call; tokenize the line as usual
    Plain,
    /// Dotted call rewritten to command words
    Rewritten(Vec<Word>),
    /// Dotted shape but a method the console doesn't expose this way
    Unsupported,
}

pub fn normalize(line: &str) -> Normalized {
    let Some(caps) = DOTTED_CALL.captures(line.trim()) else {
        return Normalized::Plain;
    };

    let method = &caps[2];
    if !DOTTED_METHODS.contains(&method) {
        return Normalized::Unsupported;
    }

    let mut words = vec![Word::bare(method), Word::bare(&caps[1])];
    words.extend(split_arguments(&caps[3]).iter().map(|arg| tokenizer::unquote(arg)));
    Normalized::Rewritten(words)
}

/// Split on commas that sit outside quotes and braces; blank pieces dropped.
fn split_arguments(args: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (idx, c) in args.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                pieces.push(&args[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    pieces.push(&args[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}
