//! Parser for the embedded game list literal.
//!
//! Only the literal is read; the rest of the host document is never
//! interpreted. The literal is an ordered list of brace records:
//! ```text
//! var gamsList = [
//!   {title: "Unity", type: "section"},
//!   {name: "Slope"},
//!   {name: "Cookie Clicker", href: "g/g/cookie/index.html"},
//!   {name: "Terminal", href: "tools/term.html", type: "raw"},
//! ];
//! ```
//! Every record keeps its leading trivia, source text and comma so the
//! serializer can reproduce untouched records exactly.

use crate::error::{ParseError, line_number};
use crate::types::{Catalog, Game, LaunchType, Layout, Section};

/// Variable name of the list literal in a stock Gams document.
pub const DEFAULT_LIST_VARIABLE: &str = "gamsList";

/// Parse the `gamsList` literal out of a host document.
pub fn parse_catalog(text: &str) -> Result<Catalog, ParseError> {
    parse_catalog_with(text, DEFAULT_LIST_VARIABLE)
}

/// Parse the list literal assigned to `variable` out of a host document.
pub fn parse_catalog_with(text: &str, variable: &str) -> Result<Catalog, ParseError> {
    let body_start = find_list_start(text, variable)
        .ok_or_else(|| ParseError::ListNotFound(variable.to_string()))?;
    let unterminated = || ParseError::Unterminated {
        variable: variable.to_string(),
        line: line_number(text, body_start),
    };

    let mut cursor = Cursor::new(text, body_start);
    let mut sections: Vec<Section> = Vec::new();
    // Whether the previous record was followed by a comma; `None` before the first record.
    let mut prev_comma: Option<bool> = None;

    let (tail, body_end) = loop {
        let leading_start = cursor.pos;
        cursor.skip_trivia().map_err(|_| unterminated())?;
        let leading = &text[leading_start..cursor.pos];

        match cursor.peek() {
            None => return Err(unterminated()),
            Some(']') => break (leading.to_string(), cursor.pos),
            Some('{') => {
                if prev_comma == Some(false) {
                    return Err(ParseError::malformed(
                        text,
                        cursor.pos,
                        "missing `,` before entry",
                    ));
                }
                let object_start = cursor.pos;
                let fields = cursor.read_object()?;
                let source = &text[object_start..cursor.pos];
                let trailer = cursor.read_trailer();
                prev_comma = Some(!trailer.is_empty());

                let layout = Layout {
                    leading: leading.to_string(),
                    source: Some(source.to_string()),
                    trailer: trailer.to_string(),
                };
                match classify(fields, text, object_start)? {
                    Record::Marker(title) => sections.push(Section::new(title, layout)),
                    Record::Game(game) => {
                        let section = sections.last_mut().ok_or_else(|| {
                            ParseError::malformed(
                                text,
                                object_start,
                                "game entry before any section marker",
                            )
                        })?;
                        section.games.push(game.with_layout(layout));
                    }
                }
            }
            Some(',') => {
                return Err(ParseError::malformed(text, cursor.pos, "empty entry"));
            }
            Some(c) => {
                return Err(ParseError::malformed(
                    text,
                    cursor.pos,
                    format!("unexpected `{c}`"),
                ));
            }
        }
    };

    log::debug!(
        "parsed {} sections from `{variable}` (bytes {body_start}..{body_end})",
        sections.len()
    );

    Ok(Catalog {
        variable: variable.to_string(),
        sections,
        tail,
        span: body_start..body_end,
    })
}

/// Byte offset just past the `[` of `<variable> = [`.
fn find_list_start(text: &str, variable: &str) -> Option<usize> {
    if variable.is_empty() {
        return None;
    }
    text.match_indices(variable).find_map(|(at, _)| {
        let before = text[..at].chars().next_back();
        if before.is_some_and(is_ident_char) {
            return None;
        }
        let rest = &text[at + variable.len()..];
        let after_name = rest.trim_start();
        let after_eq = after_name.strip_prefix('=')?;
        if after_eq.starts_with('=') {
            return None;
        }
        let after_ws = after_eq.trim_start();
        after_ws.strip_prefix('[')?;
        Some(text.len() - after_ws.len() + 1)
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

// ── Records ─────────────────────────────────────────────────────────────────

#[derive(Debug)]
enum Value {
    Str(String),
    Bare(String),
}

impl Value {
    fn as_str(&self) -> &str {
        match self {
            Self::Str(s) | Self::Bare(s) => s,
        }
    }
}

enum Record {
    Marker(String),
    Game(Game),
}

fn classify(fields: Vec<(String, Value)>, text: &str, at: usize) -> Result<Record, ParseError> {
    let mut title = None;
    let mut name = None;
    let mut href = None;
    let mut img = None;
    let mut kind = None;
    let mut raw_flag = false;

    for (key, value) in fields {
        match key.as_str() {
            "title" => title = Some(value),
            "name" => name = Some(value),
            "href" => href = Some(value),
            "img" => img = Some(value),
            "type" => kind = Some(value),
            "raw" => raw_flag = value.as_str() == "true",
            other => log::debug!("ignoring key `{other}` on line {}", line_number(text, at)),
        }
    }

    let string_field = |field: &str, value: Value| match value {
        Value::Str(s) => Ok(s),
        Value::Bare(_) => Err(ParseError::malformed(
            text,
            at,
            format!("`{field}` must be a quoted string"),
        )),
    };

    match (title, name) {
        (Some(_), Some(_)) => Err(ParseError::malformed(
            text,
            at,
            "entry has both `name` and `title`",
        )),
        (Some(title), None) => {
            let title = string_field("title", title)?;
            match kind.as_ref().map(Value::as_str) {
                None | Some("section") => Ok(Record::Marker(title)),
                Some(other) => Err(ParseError::malformed(
                    text,
                    at,
                    format!("section marker has type `{other}`"),
                )),
            }
        }
        (None, Some(name)) => {
            let name = string_field("name", name)?;
            if name.trim().is_empty() {
                return Err(ParseError::malformed(text, at, "empty game name"));
            }
            let mut game = Game::new(name);
            if let Some(href) = href {
                game = game.with_file_path(string_field("href", href)?);
            }
            if let Some(img) = img {
                game = game.with_image_path(string_field("img", img)?);
            }
            let raw = raw_flag || matches!(kind.as_ref().map(Value::as_str), Some("raw" | "tool"));
            if raw {
                game = game.with_launch_type(LaunchType::Raw);
            }
            Ok(Record::Game(game))
        }
        (None, None) => Err(ParseError::malformed(
            text,
            at,
            "entry has neither `name` nor `title`",
        )),
    }
}

// ── Cursor ──────────────────────────────────────────────────────────────────

/// Marker error: end of input reached inside a comment.
struct Eof;

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skip whitespace, `// line` and `/* block */` comments.
    fn skip_trivia(&mut self) -> Result<(), Eof> {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") {
                self.pos += trimmed.find('\n').unwrap_or(trimmed.len());
            } else if let Some(body) = trimmed.strip_prefix("/*") {
                let close = body.find("*/").ok_or(Eof)?;
                self.pos += 2 + close + 2;
            } else {
                return Ok(());
            }
        }
    }

    /// Consume optional spaces/tabs and a `,`, plus a `// comment` on the
    /// same line. Returns the consumed text, or an empty string (consuming
    /// nothing) when no comma follows.
    fn read_trailer(&mut self) -> &'a str {
        let start = self.pos;
        let rest = self.rest();
        let trimmed = rest.trim_start_matches([' ', '\t']);
        if !trimmed.starts_with(',') {
            return "";
        }
        self.pos += rest.len() - trimmed.len() + 1;

        let after = self.rest();
        let spaced = after.trim_start_matches([' ', '\t']);
        if spaced.starts_with("//") {
            let line = &spaced[..spaced.find('\n').unwrap_or(spaced.len())];
            let comment = line.trim_end_matches('\r');
            self.pos += after.len() - spaced.len() + comment.len();
        }
        &self.text[start..self.pos]
    }

    /// Read a `{ key: value, ... }` record starting at `{`.
    fn read_object(&mut self) -> Result<Vec<(String, Value)>, ParseError> {
        let start = self.pos;
        let unterminated = |text: &str| ParseError::malformed(text, start, "unterminated entry");
        self.bump();

        let mut fields: Vec<(String, Value)> = Vec::new();
        loop {
            self.skip_trivia().map_err(|_| unterminated(self.text))?;
            match self.peek() {
                None => return Err(unterminated(self.text)),
                Some('}') => {
                    self.bump();
                    return Ok(fields);
                }
                _ => {}
            }

            let key_at = self.pos;
            let key = self.read_key()?;
            if fields.iter().any(|(k, _)| *k == key) {
                return Err(ParseError::malformed(
                    self.text,
                    key_at,
                    format!("duplicate key `{key}`"),
                ));
            }

            self.skip_trivia().map_err(|_| unterminated(self.text))?;
            if self.peek() != Some(':') {
                return Err(ParseError::malformed(
                    self.text,
                    self.pos,
                    format!("expected `:` after `{key}`"),
                ));
            }
            self.bump();
            self.skip_trivia().map_err(|_| unterminated(self.text))?;

            let value = self.read_value()?;
            fields.push((key, value));

            self.skip_trivia().map_err(|_| unterminated(self.text))?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {}
                None => return Err(unterminated(self.text)),
                Some(c) => {
                    return Err(ParseError::malformed(
                        self.text,
                        self.pos,
                        format!("expected `,` or `}}`, found `{c}`"),
                    ));
                }
            }
        }
    }

    fn read_key(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Some(q @ ('"' | '\'')) => self.read_string(q),
            _ => {
                let word = self.read_word();
                if word.is_empty() {
                    Err(ParseError::malformed(self.text, self.pos, "expected key"))
                } else {
                    Ok(word.to_string())
                }
            }
        }
    }

    fn read_value(&mut self) -> Result<Value, ParseError> {
        match self.peek() {
            Some(q @ ('"' | '\'')) => self.read_string(q).map(Value::Str),
            Some('{' | '[') => Err(ParseError::malformed(
                self.text,
                self.pos,
                "nested values are not supported",
            )),
            _ => {
                let word = self.read_word();
                if word.is_empty() {
                    Err(ParseError::malformed(self.text, self.pos, "expected value"))
                } else {
                    Ok(Value::Bare(word.to_string()))
                }
            }
        }
    }

    /// Read a run of identifier/number characters.
    fn read_word(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(is_ident_char(c) || matches!(c, '.' | '-' | '+')))
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Read a quoted string, decoding backslash escapes.
    fn read_string(&mut self, quote: char) -> Result<String, ParseError> {
        let start = self.pos;
        let unterminated = |text: &str| ParseError::malformed(text, start, "unterminated string");
        self.bump();

        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(unterminated(self.text)),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    None => return Err(unterminated(self.text)),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('0') => out.push('\0'),
                    Some('u') => {
                        let hex = self.rest().get(..4).unwrap_or("");
                        let decoded = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
                        match decoded {
                            Some(c) => {
                                out.push(c);
                                self.pos += 4;
                            }
                            None => {
                                return Err(ParseError::malformed(
                                    self.text,
                                    self.pos,
                                    "invalid \\u escape",
                                ));
                            }
                        }
                    }
                    // Line continuation.
                    Some('\n') => {}
                    Some(other) => out.push(other),
                },
                Some(c) => out.push(c),
            }
        }
    }
}
