//! Edit scripts: parsing command-line steps and replaying them against a
//! text-input surface.

use std::str::FromStr;

use anyhow::{Context, Result};
use editlog_core::{MemoryClipboard, TextInput};

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Type at the caret, replacing any selection.
    Type(String),
    Insert { index: usize, text: String },
    Delete { index: usize, length: usize },
    Replace { index: usize, length: usize, text: String },
    Select { anchor: usize, head: usize },
    Caret(usize),
    Backspace,
    Undo,
    Redo,
    Focus,
    Blur,
    Copy,
    Cut,
    Paste,
}

fn parse_num(field: Option<&str>, what: &str, step: &str) -> Result<usize> {
    let raw = field.with_context(|| format!("step '{step}' is missing {what}"))?;
    raw.parse()
        .with_context(|| format!("step '{step}': invalid {what} '{raw}'"))
}

fn rest(field: Option<&str>, step: &str) -> Result<String> {
    field
        .map(str::to_string)
        .with_context(|| format!("step '{step}' is missing its text"))
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, args) = s.split_once(':').unwrap_or((s, ""));
        let step = match name {
            "type" => Step::Type(args.to_string()),
            "insert" => {
                let mut parts = args.splitn(2, ':');
                Step::Insert {
                    index: parse_num(parts.next(), "index", s)?,
                    text: rest(parts.next(), s)?,
                }
            }
            "delete" => {
                let mut parts = args.splitn(2, ':');
                Step::Delete {
                    index: parse_num(parts.next(), "index", s)?,
                    length: parse_num(parts.next(), "length", s)?,
                }
            }
            "replace" => {
                let mut parts = args.splitn(3, ':');
                Step::Replace {
                    index: parse_num(parts.next(), "index", s)?,
                    length: parse_num(parts.next(), "length", s)?,
                    text: rest(parts.next(), s)?,
                }
            }
            "select" => {
                let mut parts = args.splitn(2, ':');
                Step::Select {
                    anchor: parse_num(parts.next(), "anchor", s)?,
                    head: parse_num(parts.next(), "head", s)?,
                }
            }
            "caret" => Step::Caret(parse_num(Some(args), "offset", s)?),
            "backspace" => Step::Backspace,
            "undo" => Step::Undo,
            "redo" => Step::Redo,
            "focus" => Step::Focus,
            "blur" => Step::Blur,
            "copy" => Step::Copy,
            "cut" => Step::Cut,
            "paste" => Step::Paste,
            other => anyhow::bail!("unknown step '{other}'"),
        };
        Ok(step)
    }
}

/// Parses every step, failing on the first invalid one.
pub fn parse_steps(raw: &[String]) -> Result<Vec<Step>> {
    raw.iter().map(|s| s.parse()).collect()
}

/// Applies `step` to `input`. Returns whether it changed anything.
///
/// Pastes resolve immediately against `clipboard`.
pub fn apply(input: &mut TextInput, clipboard: &MemoryClipboard, step: &Step) -> bool {
    match step {
        Step::Type(text) => input.insert_text(text),
        Step::Insert { index, text } => input.insert_at(*index, text),
        Step::Delete { index, length } => input.delete_range(*index, *length),
        Step::Replace {
            index,
            length,
            text,
        } => input.replace_range(*index, *length, text),
        Step::Select { anchor, head } => {
            input.select(*anchor, *head);
            true
        }
        Step::Caret(head) => {
            input.set_caret(*head);
            true
        }
        Step::Backspace => input.backspace(),
        Step::Undo => input.undo(),
        Step::Redo => input.redo(),
        Step::Focus => {
            input.focus();
            true
        }
        Step::Blur => {
            input.blur();
            true
        }
        Step::Copy => input.copy(),
        Step::Cut => input.cut(),
        Step::Paste => {
            if input.paste().is_none() {
                return false;
            }
            clipboard
                .take_completions()
                .into_iter()
                .fold(false, |changed, (ticket, text)| {
                    input.complete_paste(ticket, &text) || changed
                })
        }
    }
}
