//! The section-stack parser.
//!
//! Lines are read one at a time and classified by [`crate::line`]. The parser
//! keeps a *level stack*: entry `i` is the section currently open at depth
//! `i + 1`, and entry 0 is always the root. A line at depth `L` writes into the
//! section at stack position `L - 1`; a header at depth `L` also opens a fresh
//! section at position `L`, abandoning anything that was open at `L` or deeper.
//!
//! While parsing, sections live in an index arena and the stack holds arena
//! indices, so replacing a stack entry never disturbs a section that is already
//! bound into the tree. The arena is folded into an owned [`Section`] tree once
//! the input is exhausted.

use crate::line::{classify, Line, LineKind};
use crate::options::Options;
use crate::{Error, Result, Section, Value};
use indexmap::IndexMap;
use std::io::BufRead;

type SectionId = usize;

const ROOT: SectionId = 0;

/// A binding inside the arena; sections are referenced by index.
#[derive(Debug)]
enum Slot {
    Scalar(String),
    Nested(SectionId),
    List(Vec<SectionId>),
}

impl Slot {
    fn describe(&self) -> String {
        match self {
            Slot::Scalar(s) => Value::Scalar(s.clone()).to_string(),
            Slot::Nested(_) => "section".to_string(),
            Slot::List(ids) => format!("list of {} section(s)", ids.len()),
        }
    }
}

/// Single-use parser state.
///
/// [`Parser::parse`] consumes the parser, so every parse starts from an empty
/// root and a one-entry level stack.
#[derive(Debug)]
pub struct Parser {
    options: Options,
    arena: Vec<IndexMap<String, Slot>>,
    stack: Vec<SectionId>,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new(Options::default())
    }
}

impl Parser {
    #[must_use]
    pub fn new(options: Options) -> Self {
        Parser {
            options,
            arena: vec![IndexMap::new()],
            stack: vec![ROOT],
        }
    }

    /// Parses the whole stream and returns the root section.
    ///
    /// An unterminated final line is still processed. The first error stops
    /// the parse; no partial tree is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kitty::{Parser, Value};
    ///
    /// let root = Parser::default().parse("[a]\n k = v".as_bytes()).unwrap();
    /// assert_eq!(root.lookup("a.k"), Some(&Value::from("v")));
    /// ```
    pub fn parse<R: BufRead>(mut self, mut reader: R) -> Result<Section> {
        log::debug!("parsing kitty input");

        let mut row = String::new();
        let mut line = 0;
        loop {
            row.clear();
            let read = reader.read_line(&mut row)?;
            if read == 0 {
                break;
            }
            line += 1;

            let comment_prefix = self.options.comment_prefix;
            if let Some(classified) = classify(&row, line, comment_prefix)? {
                log::trace!("line {}: {:?}", line, classified);
                self.apply(classified, line)?;
            }
        }

        log::debug!(
            "parsed {} line(s) into {} section(s)",
            line,
            self.arena.len()
        );
        Ok(self.into_section())
    }

    fn apply(&mut self, classified: Line<'_>, line: usize) -> Result<()> {
        let depth = classified.depth;
        if depth > self.stack.len() {
            return Err(Error::indentation(line, depth, self.stack.len()));
        }
        let current = self.stack[depth - 1];

        match classified.kind {
            LineKind::ArrayHeader(key) => {
                if let Some(existing) = self.arena[current].get(key) {
                    if !matches!(existing, Slot::List(_)) {
                        return Err(Error::not_a_list(key, line, existing.describe()));
                    }
                }
                let opened = self.open_at(depth);
                log::debug!("line {}: appending to list `{}`", line, key);
                match self.arena[current].get_mut(key) {
                    Some(Slot::List(ids)) => ids.push(opened),
                    _ => {
                        self.arena[current].insert(key.to_string(), Slot::List(vec![opened]));
                    }
                }
            }
            LineKind::SectionHeader(key) => {
                if let Some(existing) = self.arena[current].get(key) {
                    return Err(Error::duplicate(key, line, existing.describe()));
                }
                let opened = self.open_at(depth);
                log::debug!("line {}: opening section `{}`", line, key);
                self.arena[current].insert(key.to_string(), Slot::Nested(opened));
            }
            LineKind::Assignment(key, value) => {
                if let Some(existing) = self.arena[current].get(key) {
                    return Err(Error::duplicate(key, line, existing.describe()));
                }
                self.arena[current].insert(key.to_string(), Slot::Scalar(value.to_string()));
            }
        }

        Ok(())
    }

    /// Allocates a fresh section and makes it the open section at `depth`.
    ///
    /// Callers have already checked `depth <= stack.len()`.
    fn open_at(&mut self, depth: usize) -> SectionId {
        let id = self.arena.len();
        self.arena.push(IndexMap::new());
        self.stack.truncate(depth);
        self.stack.push(id);
        id
    }

    fn into_section(mut self) -> Section {
        let mut arena: Vec<Option<IndexMap<String, Slot>>> =
            self.arena.drain(..).map(Some).collect();
        build(&mut arena, ROOT)
    }
}

/// Moves section `id` out of the arena, recursively resolving child indices.
///
/// Every id appears exactly once in the tree, so each entry is taken once.
fn build(arena: &mut [Option<IndexMap<String, Slot>>], id: SectionId) -> Section {
    let slots = arena[id].take().unwrap_or_default();
    let mut section = Section::with_capacity(slots.len());
    for (key, slot) in slots {
        let value = match slot {
            Slot::Scalar(s) => Value::Scalar(s),
            Slot::Nested(child) => Value::Nested(build(arena, child)),
            Slot::List(children) => Value::List(
                children
                    .into_iter()
                    .map(|child| build(arena, child))
                    .collect(),
            ),
        };
        section.insert(key, value);
    }
    section
}
