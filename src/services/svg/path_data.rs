// src/services/svg/path_data.rs
// decodes a path's `d` attribute into PathTokens
//
// Supported grammar: `M<x> <y>` followed by letter-prefixed relative pairs
// (`m`, `l`, `c`). Unlettered pairs repeat the previous command. A `z` closes
// the subpath, either fused to the last number (`0z`) or as its own token.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::PathDataError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    MoveAbsolute,
    MoveRelative,
    LineRelative,
    CurveRelative,
    /// A well-formed command letter this crate does not draw.
    Unsupported(char),
}

impl Command {
    fn from_letter(letter: char) -> Self {
        match letter {
            'M' => Command::MoveAbsolute,
            'm' => Command::MoveRelative,
            'l' => Command::LineRelative,
            'c' => Command::CurveRelative,
            other => Command::Unsupported(other),
        }
    }

    /// The command an unlettered pair following this one stands for.
    fn implicit_successor(self) -> Self {
        match self {
            Command::MoveRelative => Command::LineRelative,
            // Implicit absolute lineto
            Command::MoveAbsolute => Command::Unsupported('L'),
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathToken {
    pub command: Command,
    pub x: f64,
    pub y: f64,
    /// Set on the last token of a subpath that ends in `z`.
    pub closes: bool,
}

impl PathToken {
    pub fn new(command: Command, x: f64, y: f64) -> Self {
        Self {
            command,
            x,
            y,
            closes: false,
        }
    }

    pub fn closing(mut self) -> Self {
        self.closes = true;
        self
    }
}

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // letter prefix, number body, optional fused close marker
        Regex::new(r"^(?P<cmd>[A-DF-Za-df-y])?(?P<num>[-+0-9.eE]*?)(?P<close>[zZ])?$")
            .expect("static path word pattern")
    })
}

/// Splits `d` into words, folding free-standing command letters into the
/// number that follows and free-standing close markers into the one before.
fn words(d: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut pending_letter: Option<String> = None;

    for raw in d.split(|c: char| c == ',' || c.is_whitespace()).filter(|s| !s.is_empty()) {
        if raw.eq_ignore_ascii_case("z") {
            match words.last_mut() {
                Some(last) if pending_letter.is_none() => last.push('z'),
                _ => words.push(raw.to_string()),
            }
            continue;
        }
        if raw.len() == 1 && raw.chars().all(|c| c.is_ascii_alphabetic()) {
            pending_letter = Some(raw.to_string());
            continue;
        }
        match pending_letter.take() {
            Some(letter) => words.push(letter + raw),
            None => words.push(raw.to_string()),
        }
    }
    if let Some(letter) = pending_letter {
        words.push(letter);
    }
    words
}

struct Word {
    letter: Option<char>,
    number: String,
    closes: bool,
}

fn split_word(word: &str) -> Result<Word, PathDataError> {
    let caps = word_pattern()
        .captures(word)
        .ok_or_else(|| PathDataError::NonNumeric(word.to_string()))?;
    Ok(Word {
        letter: caps.name("cmd").and_then(|m| m.as_str().chars().next()),
        number: caps.name("num").map_or("", |m| m.as_str()).to_string(),
        closes: caps.name("close").is_some(),
    })
}

fn parse_number(text: &str, word: &str) -> Result<f64, PathDataError> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PathDataError::NonNumeric(word.to_string()))
}

/// Decodes a full `d` attribute. Every structural problem is reported here,
/// so interpretation itself never fails.
pub fn parse_path_data(d: &str) -> Result<Vec<PathToken>, PathDataError> {
    let words = words(d);
    if words.len() % 2 != 0 {
        return Err(PathDataError::OddTokenCount(words.len()));
    }

    let mut tokens = Vec::with_capacity(words.len() / 2);
    let mut command = None;

    for (i, pair) in words.chunks(2).enumerate() {
        let first = split_word(&pair[0])?;
        let second = split_word(&pair[1])?;

        if second.letter.is_some() {
            return Err(PathDataError::NonNumeric(pair[1].clone()));
        }

        let this_command = match (i, first.letter) {
            (0, Some('M' | 'm')) => Command::MoveAbsolute,
            (0, _) => return Err(PathDataError::MissingStart(pair[0].clone())),
            (_, Some(letter)) => Command::from_letter(letter),
            (_, None) => command
                .map(Command::implicit_successor)
                .unwrap_or(Command::Unsupported('?')),
        };
        command = Some(this_command);

        let x = parse_number(&first.number, &pair[0])?;
        let y = parse_number(&second.number, &pair[1])?;
        let mut token = PathToken::new(this_command, x, y);
        if first.closes {
            return Err(PathDataError::NonNumeric(pair[0].clone()));
        }
        if second.closes {
            token = token.closing();
        }
        tokens.push(token);
    }

    if tokens.is_empty() {
        return Err(PathDataError::MissingStart(String::new()));
    }
    Ok(tokens)
}
