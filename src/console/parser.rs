use super::command::{Command, Target, UpdateArgs};
use super::dotted::{self, Normalized};
use super::mapping::parse_mapping;
use super::tokenizer::{self, Word};
use crate::core::{HbnbError, Value};

/// Parse one console line. Never fails: anything unrecognized becomes
/// [`Command::Unknown`].
pub fn parse(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    let words = match dotted::normalize(line) {
        Normalized::Plain => tokenizer::split(line),
        Normalized::Rewritten(words) => words,
        Normalized::Unsupported => return Command::Unknown(line.to_string()),
    };

    from_words(words, line)
}

fn from_words(words: Vec<Word>, line: &str) -> Command {
    let mut words = words.into_iter();
    let Some(head) = words.next() else {
        return Command::Empty;
    };

    match head.text.as_str() {
        "create" => Command::Create(Target::new(next_text(&mut words), None)),
        "show" => Command::Show(target(&mut words)),
        "destroy" => Command::Destroy(target(&mut words)),
        "all" => Command::All(Target::new(next_text(&mut words), None)),
        "count" => Command::Count(Target::new(next_text(&mut words), None)),
        "update" => {
            let target = target(&mut words);
            Command::Update(target, update_args(words.collect(), line))
        }
        "help" => Command::Help(next_text(&mut words)),
        "quit" | "EOF" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

fn next_text(words: &mut impl Iterator<Item = Word>) -> Option<String> {
    words.next().map(|word| word.text)
}

fn target(words: &mut impl Iterator<Item = Word>) -> Target {
    let class = next_text(words);
    let id = next_text(words);
    Target::new(class, id)
}

/// A malformed mapping literal is carried as an unknown-syntax error so the
/// class and id are still validated first.
fn update_args(rest: Vec<Word>, line: &str) -> UpdateArgs {
    if let Some(first) = rest.first()
        && first.is_mapping_literal()
    {
        return match parse_mapping(&first.text) {
            Some(assignments) => {
                let missing = assignments.is_empty().then_some(HbnbError::MissingAttributeName);
                UpdateArgs { assignments, missing }
            }
            None => UpdateArgs {
                assignments: Vec::new(),
                missing: Some(HbnbError::UnrecognizedCommand(line.to_string())),
            },
        };
    }

    let mut assignments = Vec::with_capacity(rest.len() / 2);
    let mut missing = None;
    for pair in rest.chunks(2) {
        match pair {
            [name, value] => assignments.push((name.text.clone(), word_value(value))),
            _ => missing = Some(HbnbError::MissingAttributeValue),
        }
    }
    if rest.is_empty() {
        missing = Some(HbnbError::MissingAttributeName);
    }

    UpdateArgs { assignments, missing }
}

/// Quoted words are always text; bare words are typed by their shape.
fn word_value(word: &Word) -> Value {
    if word.quoted {
        Value::Text(word.text.clone())
    } else {
        Value::infer(&word.text)
    }
}
