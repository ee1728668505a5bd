//! Pluggable source reformatting.
//!
//! Extracted bundles are usually minified; a [`Reformatter`] turns them into
//! something readable. The only contract is that the output is the same
//! program text with different whitespace, and that an input the
//! reformatter cannot understand yields an error instead of garbage.

use thiserror::Error;

/// Why a source could not be reformatted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReformatError {
    /// A closing bracket with no matching opener.
    #[error("unbalanced `{found}` at line {line}")]
    Unbalanced {
        /// Offending closer
        found: char,
        /// 1-based input line
        line: usize,
    },

    /// Input ended while a bracket was still open.
    #[error("`{open}` opened at line {line} is never closed")]
    Unclosed {
        /// The opener
        open: char,
        /// 1-based input line of the opener
        line: usize,
    },

    /// Input ended inside a string, template, comment or regex literal.
    #[error("unterminated {kind} starting at line {line}")]
    Unterminated {
        /// Kind of literal
        kind: &'static str,
        /// 1-based input line where it starts
        line: usize,
    },
}

/// Post-processing step applied to script-family sources before they are
/// written.
pub trait Reformatter: Send + Sync {
    /// Returns the reformatted text of `source`.
    fn reformat(&self, source: &str) -> Result<String, ReformatError>;
}

/// Brace-aware JavaScript/TypeScript re-indenter.
///
/// Breaks lines after `{`, after `;` outside parentheses, and around `}`,
/// then indents by block depth. String, template, comment and regex
/// literals are copied untouched. Existing line breaks are kept (runs of
/// blank lines collapse).
#[derive(Debug, Clone)]
pub struct JsBeautifier {
    indent: String,
}

impl JsBeautifier {
    /// Beautifier indenting with `width` spaces per level.
    pub fn with_indent(width: usize) -> Self {
        Self {
            indent: " ".repeat(width),
        }
    }
}

impl Default for JsBeautifier {
    fn default() -> Self {
        Self::with_indent(2)
    }
}

impl Reformatter for JsBeautifier {
    fn reformat(&self, source: &str) -> Result<String, ReformatError> {
        Layout::new(source, &self.indent).run()
    }
}

/// Words after which a `/` starts a regex literal rather than a division.
const REGEX_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case", "do",
    "else", "yield", "await",
];

/// Operators and punctuation after which a `/` starts a regex literal.
const REGEX_PRECEDERS: &str = "(,=:[!&|?{};+-*%<>~^";

fn is_ident(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

struct Layout<'a> {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    indent: &'a str,
    out: String,
    /// Open brackets with the input line they were opened on. `$` marks a
    /// template substitution `${`.
    stack: Vec<(char, usize)>,
    at_line_start: bool,
    /// Last significant code character, for the regex heuristic
    prev: Option<char>,
    /// Identifier ending at `prev`, if any
    word: String,
}

impl<'a> Layout<'a> {
    fn new(source: &str, indent: &'a str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            indent,
            out: String::with_capacity(source.len() + source.len() / 4),
            stack: Vec::new(),
            at_line_start: true,
            prev: None,
            word: String::new(),
        }
    }

    fn run(mut self) -> Result<String, ReformatError> {
        while let Some(c) = self.peek(0) {
            match c {
                '\n' => {
                    self.bump();
                    self.newline();
                }
                '\r' => {
                    self.bump();
                }
                ' ' | '\t' => {
                    self.bump();
                    if !self.at_line_start {
                        self.out.push(c);
                    }
                }
                '"' | '\'' => self.string(c)?,
                '`' => {
                    self.bump();
                    self.emit('`');
                    self.template()?;
                }
                '/' => match self.peek(1) {
                    Some('/') => self.line_comment(),
                    Some('*') => self.block_comment()?,
                    _ if self.regex_allowed() => self.regex()?,
                    _ => {
                        self.bump();
                        self.code('/');
                    }
                },
                '{' => {
                    self.bump();
                    self.code('{');
                    self.stack.push(('{', self.line));
                    self.newline();
                }
                '}' => self.close_brace()?,
                '(' | '[' => {
                    self.bump();
                    self.code(c);
                    self.stack.push((c, self.line));
                }
                ')' | ']' => {
                    let open = if c == ')' { '(' } else { '[' };
                    match self.stack.pop() {
                        Some((o, _)) if o == open => {}
                        _ => return Err(self.unbalanced(c)),
                    }
                    self.bump();
                    self.code(c);
                }
                ';' => {
                    self.bump();
                    self.code(';');
                    if matches!(self.stack.last(), None | Some(('{', _))) {
                        self.newline();
                    }
                }
                _ => {
                    self.bump();
                    self.code(c);
                }
            }
        }

        if let Some(&(open, line)) = self.stack.last() {
            return Err(if open == '$' {
                ReformatError::Unterminated {
                    kind: "template literal",
                    line,
                }
            } else {
                ReformatError::Unclosed { open, line }
            });
        }

        let trimmed = self.out.trim_end().len();
        self.out.truncate(trimmed);
        self.out.push('\n');
        Ok(self.out)
    }

    fn peek(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn block_depth(&self) -> usize {
        self.stack.iter().filter(|(c, _)| *c == '{').count()
    }

    /// Writes `c`, indenting first if it opens a line.
    fn emit(&mut self, c: char) {
        if self.at_line_start {
            for _ in 0..self.block_depth() {
                self.out.push_str(self.indent);
            }
            self.at_line_start = false;
        }
        self.out.push(c);
    }

    /// Writes a significant code character and updates the regex heuristic.
    fn code(&mut self, c: char) {
        let continues_word = is_ident(c) && !self.at_line_start && self.out.ends_with(is_ident);
        self.emit(c);
        if is_ident(c) {
            if !continues_word {
                self.word.clear();
            }
            self.word.push(c);
        } else {
            self.word.clear();
        }
        self.prev = Some(c);
    }

    /// Ends the current output line unless it is already empty.
    fn newline(&mut self) {
        if self.at_line_start {
            return;
        }
        let trimmed = self.out.trim_end_matches([' ', '\t']).len();
        self.out.truncate(trimmed);
        self.out.push('\n');
        self.at_line_start = true;
    }

    fn unbalanced(&self, found: char) -> ReformatError {
        ReformatError::Unbalanced {
            found,
            line: self.line,
        }
    }

    fn close_brace(&mut self) -> Result<(), ReformatError> {
        match self.stack.pop() {
            Some(('$', _)) => {
                self.bump();
                self.emit('}');
                self.template()
            }
            Some(('{', _)) => {
                self.bump();
                self.newline();
                self.code('}');
                if !matches!(self.next_significant(), Some(';' | ',' | ')' | ']' | '.')) {
                    self.newline();
                }
                Ok(())
            }
            _ => Err(self.unbalanced('}')),
        }
    }

    fn next_significant(&self) -> Option<char> {
        self.chars[self.pos..]
            .iter()
            .copied()
            .find(|c| !c.is_whitespace())
    }

    fn regex_allowed(&self) -> bool {
        match self.prev {
            None => true,
            Some(p) if is_ident(p) => REGEX_KEYWORDS.contains(&self.word.as_str()),
            Some(p) => REGEX_PRECEDERS.contains(p),
        }
    }

    /// Appends literal or comment text verbatim.
    fn copy_raw(&mut self, c: char) {
        self.out.push(c);
    }

    fn string(&mut self, quote: char) -> Result<(), ReformatError> {
        let start = self.line;
        let unterminated = ReformatError::Unterminated {
            kind: "string literal",
            line: start,
        };
        self.bump();
        self.emit(quote);
        loop {
            match self.bump() {
                None | Some('\n') => return Err(unterminated),
                Some('\\') => {
                    self.copy_raw('\\');
                    match self.bump() {
                        Some(escaped) => self.copy_raw(escaped),
                        None => return Err(unterminated),
                    }
                }
                Some(c) if c == quote => {
                    self.copy_raw(c);
                    break;
                }
                Some(c) => self.copy_raw(c),
            }
        }
        self.word.clear();
        self.prev = Some(quote);
        Ok(())
    }

    /// Copies template text after a backtick or a closing `}` of a
    /// substitution, up to the closing backtick or the next `${`.
    fn template(&mut self) -> Result<(), ReformatError> {
        let start = self.line;
        loop {
            match self.bump() {
                None => {
                    return Err(ReformatError::Unterminated {
                        kind: "template literal",
                        line: start,
                    })
                }
                Some('\\') => {
                    self.copy_raw('\\');
                    if let Some(escaped) = self.bump() {
                        self.copy_raw(escaped);
                    }
                }
                Some('`') => {
                    self.copy_raw('`');
                    self.word.clear();
                    self.prev = Some('`');
                    return Ok(());
                }
                Some('$') if self.peek(0) == Some('{') => {
                    self.bump();
                    self.out.push_str("${");
                    self.stack.push(('$', self.line));
                    self.word.clear();
                    self.prev = Some('{');
                    return Ok(());
                }
                Some(c) => self.copy_raw(c),
            }
        }
    }

    fn line_comment(&mut self) {
        self.bump();
        self.bump();
        self.emit('/');
        self.copy_raw('/');
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                break;
            }
            self.bump();
            if c != '\r' {
                self.copy_raw(c);
            }
        }
    }

    fn block_comment(&mut self) -> Result<(), ReformatError> {
        let start = self.line;
        self.bump();
        self.bump();
        self.emit('/');
        self.copy_raw('*');
        loop {
            match self.bump() {
                None => {
                    return Err(ReformatError::Unterminated {
                        kind: "block comment",
                        line: start,
                    })
                }
                Some('*') if self.peek(0) == Some('/') => {
                    self.bump();
                    self.out.push_str("*/");
                    return Ok(());
                }
                Some(c) => self.copy_raw(c),
            }
        }
    }

    fn regex(&mut self) -> Result<(), ReformatError> {
        let unterminated = ReformatError::Unterminated {
            kind: "regex literal",
            line: self.line,
        };
        self.bump();
        self.emit('/');
        let mut in_class = false;
        loop {
            match self.bump() {
                None | Some('\n') => return Err(unterminated),
                Some('\\') => {
                    self.copy_raw('\\');
                    match self.bump() {
                        Some('\n') | None => return Err(unterminated),
                        Some(escaped) => self.copy_raw(escaped),
                    }
                }
                Some('[') => {
                    in_class = true;
                    self.copy_raw('[');
                }
                Some(']') => {
                    in_class = false;
                    self.copy_raw(']');
                }
                Some('/') if !in_class => {
                    self.copy_raw('/');
                    break;
                }
                Some(c) => self.copy_raw(c),
            }
        }
        self.word.clear();
        self.prev = Some('/');
        Ok(())
    }
}
