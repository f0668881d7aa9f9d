use std::iter::Peekable;
use std::str::Chars;

use regex_lite::Regex;

/// Which declaration shape a raw descriptor line has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `name:value` text substitution.
    Variable,
    /// `Entity(attr,attr,...)`.
    Entity,
    /// `source>destination,label,c:c`.
    Relation,
    /// Blank or `#`-prefixed line; skipped.
    Comment,
    /// Matches none of the three shapes.
    Unrecognized,
}

/// Structural classifier for descriptor lines.
///
/// The patterns are fixed shapes, not a grammar: a line either matches one
/// of them whole or is unrecognized. Variable declarations are tried first
/// so a line like `a.b:c` never falls through to the other shapes.
pub struct Classifier {
    variable: Regex,
    entity: Regex,
    relation: Regex,
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            variable: Regex::new(r"^[A-Za-z0-9 ._]+:[A-Za-z0-9 ._]+$").unwrap(),
            entity: Regex::new(r"^[A-Za-z0-9 ._^]+\([A-Za-z0-9, ._]+\)$").unwrap(),
            relation: Regex::new(
                r"^[A-Za-z0-9 ._]+>[A-Za-z0-9 ._]+,[A-Za-z0-9 ._()]+,[1mnMN] *: *[1mnMN]$",
            )
            .unwrap(),
        }
    }

    pub fn classify(&self, line: &str) -> LineKind {
        if line.is_empty() || line.starts_with('#') {
            LineKind::Comment
        } else if self.variable.is_match(line) {
            LineKind::Variable
        } else if self.entity.is_match(line) {
            LineKind::Entity
        } else if self.relation.is_match(line) {
            LineKind::Relation
        } else {
            LineKind::Unrecognized
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Delimiter-splitting cursor over a single line.
///
/// Each call to [`next`](Splitter::next) resumes where the previous one
/// stopped, so one `Splitter` walks a whole line token by token. A call
/// resuming mid-line absorbs the single delimiter that stopped the previous
/// token; a second consecutive delimiter ends the token instead, and an
/// empty token ends the iteration. The very first token of a line gets no
/// such tolerance: a delimiter at offset 0 stops it immediately.
pub struct Splitter<'a> {
    chars: Peekable<Chars<'a>>,
    pos: usize,
}

impl<'a> Splitter<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            chars: line.chars().peekable(),
            pos: 0,
        }
    }

    /// Next token delimited by any char in `delims`, with surrounding
    /// ASCII spaces (only `' '`) trimmed. `None` once the line is spent.
    pub fn next(&mut self, delims: &str) -> Option<String> {
        // No separator tolerance for a call starting at the line head.
        let mut absorbed = self.pos == 0;
        let mut tok = String::new();
        while let Some(&c) = self.chars.peek() {
            if delims.contains(c) {
                if !absorbed {
                    absorbed = true;
                    self.chars.next();
                    self.pos += 1;
                    continue;
                }
                break;
            }
            tok.push(c);
            self.chars.next();
            self.pos += 1;
        }
        if tok.is_empty() {
            return None;
        }
        Some(tok.trim_matches(' ').to_string())
    }
}
