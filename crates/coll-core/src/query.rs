//! Path queries over dynamic values (a JSONPath subset).
//!
//! An expression is compiled once into a list of steps by [`Path::parse`] and
//! can then be evaluated against any number of values.
//!
//! # Syntax
//!
//! | Step | Matches |
//! |------|---------|
//! | `.name`, `['name']` | mapping entry `name` |
//! | `.*`, `[*]` | every mapping value (in key order) or sequence element |
//! | `[2]`, `[-1]` | sequence element by index, negative from the end |
//! | `..name`, `..*`, `..[sel]` | the selector applied at every depth, pre-order |
//!
//! The expression may start with `$` or `@` and may be wrapped in `{...}`.
//! A leading field name needs no dot (`values.one` is `.values.one`).
//! Objects are leaves: no step descends into them.
//!
//! # Results
//!
//! [`Path::query`] returns a single match directly, several matches as a
//! sequence in traversal order, and [`CollError::NoMatch`] when nothing
//! matches.
//!
//! # Example
//! ```
//! use coll_core::{query, Value};
//!
//! let config = Value::from_json(r#"{"values":{"one":"uno","four":{"a":"eh?"}}}"#).unwrap();
//! assert_eq!(query(".values..a", &config).unwrap(), Value::from("eh?"));
//! assert_eq!(query("$.values.*", &config).unwrap().as_sequence().unwrap().len(), 2);
//! ```

use crate::error::{CollError, Result};
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// What a single step selects at the current position.
#[derive(Debug, Clone, PartialEq)]
enum Selector {
    Field(String),
    Wildcard,
    Index(i64),
}

/// One compiled path step. `recursive` steps apply their selector to the
/// current node and all of its descendants.
#[derive(Debug, Clone, PartialEq)]
struct Step {
    selector: Selector,
    recursive: bool,
}

/// A compiled path expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    expression: String,
    steps: Vec<Step>,
}

impl Path {
    /// Compile `expression`.
    ///
    /// # Errors
    ///
    /// Returns [`CollError::InvalidPathExpression`] with the character offset
    /// of the first offending character.
    pub fn parse(expression: &str) -> Result<Self> {
        let steps = Parser::new(expression).parse()?;
        tracing::trace!(expression, steps = steps.len(), "compiled path");
        Ok(Self {
            expression: expression.to_string(),
            steps,
        })
    }

    /// The source text this path was compiled from.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// All positions in `data` matched by this path, in traversal order.
    pub fn select<'a>(&self, data: &'a Value) -> Vec<&'a Value> {
        let mut current = vec![data];
        for step in &self.steps {
            let mut next = Vec::new();
            for node in current {
                if step.recursive {
                    descend(node, &step.selector, &mut next);
                } else {
                    apply(node, &step.selector, &mut next);
                }
            }
            if next.is_empty() {
                return next;
            }
            current = next;
        }
        current
    }

    /// Evaluate against `data`: one match is returned as itself, several as
    /// a sequence.
    ///
    /// # Errors
    ///
    /// Returns [`CollError::NoMatch`] when nothing matches.
    pub fn query(&self, data: &Value) -> Result<Value> {
        let mut matches = self.select(data);
        tracing::debug!(expression = %self.expression, matches = matches.len(), "path query");
        match matches.len() {
            0 => Err(CollError::NoMatch {
                expression: self.expression.clone(),
            }),
            1 => Ok(matches.swap_remove(0).clone()),
            _ => Ok(Value::Sequence(matches.into_iter().cloned().collect())),
        }
    }
}

impl FromStr for Path {
    type Err = CollError;

    fn from_str(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Compile `expression` and evaluate it once against `data`.
///
/// Compile a [`Path`] instead when the same expression runs repeatedly.
///
/// # Errors
///
/// [`CollError::InvalidPathExpression`] for malformed syntax,
/// [`CollError::NoMatch`] when nothing matches.
pub fn query(expression: &str, data: &Value) -> Result<Value> {
    Path::parse(expression)?.query(data)
}

fn apply<'a>(node: &'a Value, selector: &Selector, out: &mut Vec<&'a Value>) {
    match (selector, node) {
        (Selector::Field(name), Value::Mapping(map)) => out.extend(map.get(name)),
        (Selector::Wildcard, Value::Mapping(map)) => out.extend(map.values()),
        (Selector::Wildcard, Value::Sequence(items)) => out.extend(items.iter()),
        (Selector::Index(index), Value::Sequence(items)) => {
            out.extend(resolve_index(*index, items.len()).and_then(|i| items.get(i)));
        }
        _ => {}
    }
}

/// Pre-order: the node itself first, then each child subtree in order.
fn descend<'a>(node: &'a Value, selector: &Selector, out: &mut Vec<&'a Value>) {
    apply(node, selector, out);
    match node {
        Value::Mapping(map) => {
            for child in map.values() {
                descend(child, selector, out);
            }
        }
        Value::Sequence(items) => {
            for child in items {
                descend(child, selector, out);
            }
        }
        _ => {}
    }
}

fn resolve_index(index: i64, len: usize) -> Option<usize> {
    if index >= 0 {
        usize::try_from(index).ok()
    } else {
        let back = usize::try_from(index.unsigned_abs()).ok()?;
        len.checked_sub(back)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}

/// Hand-written recursive-descent parser over the expression's characters.
/// Positions reported in errors are character offsets.
struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(expression: &str) -> Self {
        Self {
            chars: expression.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn error_at(&self, position: usize, message: impl Into<String>) -> CollError {
        CollError::InvalidPathExpression {
            position,
            message: message.into(),
        }
    }

    fn unexpected(&self) -> CollError {
        match self.peek() {
            Some(c) => self.error_at(self.pos, format!("unexpected character '{}'", c)),
            None => self.error_at(self.pos, "unexpected end of expression"),
        }
    }

    fn parse(mut self) -> Result<Vec<Step>> {
        let braced = self.peek() == Some('{');
        if braced {
            self.pos += 1;
        }
        if matches!(self.peek(), Some('$' | '@')) {
            self.pos += 1;
        } else if self.peek().is_some_and(is_name_char) {
            // Leading field without a dot.
            let name = self.name();
            return self.parse_steps(braced, vec![field_step(name, false)]);
        }
        self.parse_steps(braced, Vec::new())
    }

    fn parse_steps(&mut self, braced: bool, mut steps: Vec<Step>) -> Result<Vec<Step>> {
        loop {
            match self.peek() {
                None if braced => return Err(self.error_at(self.pos, "missing closing '}'")),
                None => return Ok(steps),
                Some('}') if braced => {
                    self.pos += 1;
                    if self.peek().is_some() {
                        return Err(self.unexpected());
                    }
                    return Ok(steps);
                }
                Some('.') => {
                    self.pos += 1;
                    steps.push(self.dot_step()?);
                }
                Some('[') => {
                    self.pos += 1;
                    let selector = self.bracket()?;
                    steps.push(Step {
                        selector,
                        recursive: false,
                    });
                }
                Some(_) => return Err(self.unexpected()),
            }
        }
    }

    /// After a `.`: `*`, a name, or a second `.` for recursive descent.
    fn dot_step(&mut self) -> Result<Step> {
        let recursive = self.peek() == Some('.');
        if recursive {
            self.pos += 1;
        }
        match self.peek() {
            Some('*') => {
                self.pos += 1;
                Ok(Step {
                    selector: Selector::Wildcard,
                    recursive,
                })
            }
            Some('[') if recursive => {
                self.pos += 1;
                Ok(Step {
                    selector: self.bracket()?,
                    recursive,
                })
            }
            Some(c) if is_name_char(c) => {
                let name = self.name();
                Ok(field_step(name, recursive))
            }
            Some(_) => Err(self.unexpected()),
            None => Err(self.error_at(self.pos, "expected a field name or '*'")),
        }
    }

    fn name(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_name_char) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    /// After a `[`: `*`, an integer or a quoted key, then `]`.
    fn bracket(&mut self) -> Result<Selector> {
        let selector = match self.peek() {
            Some('*') => {
                self.pos += 1;
                Selector::Wildcard
            }
            Some(quote @ ('\'' | '"')) => Selector::Field(self.quoted(quote)?),
            Some(c) if c == '-' || c.is_ascii_digit() => Selector::Index(self.integer()?),
            _ => return Err(self.unexpected()),
        };
        match self.bump() {
            Some(']') => Ok(selector),
            Some(_) => Err(self.error_at(self.pos - 1, "expected ']'")),
            None => Err(self.error_at(self.pos, "expected ']'")),
        }
    }

    fn quoted(&mut self, quote: char) -> Result<String> {
        let open = self.pos;
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some(c) => out.push(c),
                    None => return Err(self.error_at(open, "unterminated string")),
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
                None => return Err(self.error_at(open, "unterminated string")),
            }
        }
    }

    fn integer(&mut self) -> Result<i64> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        let digits_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == digits_start {
            return Err(self.unexpected());
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse()
            .map_err(|_| self.error_at(start, format!("index '{}' out of range", text)))
    }
}

fn field_step(name: String, recursive: bool) -> Step {
    Step {
        selector: Selector::Field(name),
        recursive,
    }
}
