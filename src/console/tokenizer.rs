//! Quote-aware splitting of a console line into words.
//!
//! - whitespace separates words
//! - `"..."` and `'...'` group, quotes removed, `\"` / `\'` / `\\` unescaped
//! - a `{...}` run is kept verbatim as one word (mapping literal)
//! - an unterminated quote or brace runs to the end of the line

use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    /// Some part of the word was written inside quotes
    pub quoted: bool,
}

impl Word {
    pub fn bare(text: impl Into<String>) -> Self {
        Self { text: text.into(), quoted: false }
    }

    pub fn quoted(text: impl Into<String>) -> Self {
        Self { text: text.into(), quoted: true }
    }

    /// An unquoted word opening with `{`
    pub fn is_mapping_literal(&self) -> bool {
        !self.quoted && self.text.starts_with('{')
    }
}

pub fn split(line: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.peek() {
            None => break,
            Some('{') => words.push(Word::bare(take_braced(&mut chars))),
            Some(_) => words.push(take_word(&mut chars)),
        }
    }

    words
}

/// Turn one already-delimited argument into a word, stripping a single pair
/// of surrounding quotes if present.
pub fn unquote(arg: &str) -> Word {
    let arg = arg.trim();
    let mut chars = arg.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open @ ('"' | '\'')), Some(close)) if open == close && arg.len() >= 2 => {
            let mut inner = arg[1..arg.len() - 1].chars().peekable();
            let mut text = String::new();
            while let Some(c) = inner.next() {
                if c == '\\' {
                    if let Some(escaped) = inner.next_if(|n| *n == open || *n == '\\') {
                        text.push(escaped);
                        continue;
                    }
                }
                text.push(c);
            }
            Word::quoted(text)
        }
        _ => Word::bare(arg),
    }
}

fn take_word(chars: &mut Peekable<Chars<'_>>) -> Word {
    let mut text = String::new();
    let mut quoted = false;

    while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
        if c == '"' || c == '\'' {
            quoted = true;
            take_quoted(chars, c, &mut text);
        } else {
            text.push(c);
        }
    }

    Word { text, quoted }
}

fn take_quoted(chars: &mut Peekable<Chars<'_>>, quote: char, text: &mut String) {
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next_if(|n| *n == quote || *n == '\\') {
                Some(escaped) => text.push(escaped),
                None => text.push(c),
            },
            c if c == quote => return,
            c => text.push(c),
        }
    }
}

fn take_braced(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut raw = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in chars {
        raw.push(c);
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
            '}' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
    }

    raw
}
