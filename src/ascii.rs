//! Reader for the ASCII FBX encoding.
//!
//! ```text
//! ; comment
//! Objects:  {
//!     Geometry: 1000, "Geometry::Plane", "Mesh" {
//!         Vertices: *6 {
//!             a: 0,0,0,1,0,0
//!         }
//!     }
//! }
//! ```
//!
//! A record is `Name:` followed by comma separated values on the same line, optionally
//! followed by a braced child list. A trailing comma continues the value list on the next line.

use log::debug;

use crate::binary::{MAX_DEPTH, MIN_VERSION};
use crate::error::{Error, Result};
use crate::types::{DocNode, Document, Format, Property};

/// Version assumed when the header carries none.
const DEFAULT_VERSION: u32 = 7400;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Key(String),
    Word(String),
    Str(String),
    Int(i64),
    Float(f64),
    Comma,
    Star,
    LBrace,
    RBrace,
    Newline,
    Eof,
}

struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
    peeked: Option<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Lexer<'a> {
        Lexer {
            src: src.as_bytes(),
            pos: 0,
            line: 1,
            peeked: None,
        }
    }

    fn peek(&mut self) -> Result<&Token> {
        if self.peeked.is_none() {
            let token = self.lex()?;
            self.peeked = Some(token);
        }
        Ok(&*self.peeked.get_or_insert(Token::Eof))
    }

    fn next(&mut self) -> Result<Token> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.lex(),
        }
    }

    fn skip_newlines(&mut self) -> Result<()> {
        while *self.peek()? == Token::Newline {
            self.next()?;
        }
        Ok(())
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::syntax(self.line, message)
    }

    fn lex(&mut self) -> Result<Token> {
        loop {
            let c = match self.src.get(self.pos) {
                Some(&c) => c,
                None => return Ok(Token::Eof),
            };
            match c {
                b'\n' => {
                    self.pos += 1;
                    self.line += 1;
                    return Ok(Token::Newline);
                }
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b';' => {
                    while self.pos < self.src.len() && self.src[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                b',' => {
                    self.pos += 1;
                    return Ok(Token::Comma);
                }
                b'*' => {
                    self.pos += 1;
                    return Ok(Token::Star);
                }
                b'{' => {
                    self.pos += 1;
                    return Ok(Token::LBrace);
                }
                b'}' => {
                    self.pos += 1;
                    return Ok(Token::RBrace);
                }
                b'"' => return self.lex_string(),
                b'0'..=b'9' | b'-' | b'+' | b'.' => return self.lex_number(),
                c if c.is_ascii_alphabetic() || c == b'_' => return Ok(self.lex_word()),
                c => return Err(self.error(format!("unexpected character {:?}", c as char))),
            }
        }
    }

    fn lex_string(&mut self) -> Result<Token> {
        let start = self.pos + 1;
        let mut end = start;
        loop {
            match self.src.get(end) {
                Some(b'"') => break,
                Some(b'\n') => self.line += 1,
                Some(_) => {}
                None => return Err(self.error("unterminated string")),
            }
            end += 1;
        }
        self.pos = end + 1;
        let text = String::from_utf8_lossy(&self.src[start..end]).replace("&quot;", "\"");
        Ok(Token::Str(text))
    }

    fn lex_number(&mut self) -> Result<Token> {
        let start = self.pos;
        while let Some(&c) = self.src.get(self.pos) {
            if c.is_ascii_alphanumeric() || matches!(c, b'-' | b'+' | b'.' | b'#') {
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = String::from_utf8_lossy(&self.src[start..self.pos]);
        if let Ok(v) = text.parse::<i64>() {
            return Ok(Token::Int(v));
        }
        if let Ok(v) = text.parse::<f64>() {
            return Ok(Token::Float(v));
        }
        // Values written by MSVC runtimes, e.g. "-1.#IND" or "1.#INF".
        let upper = text.to_ascii_uppercase();
        if upper.contains("#IND") || upper.contains("NAN") {
            Ok(Token::Float(f64::NAN))
        } else if upper.contains("#INF") {
            let sign = if text.starts_with('-') { -1.0 } else { 1.0 };
            Ok(Token::Float(sign * f64::INFINITY))
        } else {
            Err(self.error(format!("invalid number '{}'", text)))
        }
    }

    fn lex_word(&mut self) -> Token {
        let start = self.pos;
        while let Some(&c) = self.src.get(self.pos) {
            if c.is_ascii_alphanumeric() || matches!(c, b'_' | b'|' | b'-') {
                self.pos += 1;
            } else {
                break;
            }
        }
        let word = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        if self.src.get(self.pos) == Some(&b':') {
            self.pos += 1;
            Token::Key(word)
        } else {
            Token::Word(word)
        }
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    /// Records up to the closing brace, or to the end of input at `depth` 0.
    fn parse_node_list(&mut self, depth: usize) -> Result<Vec<DocNode>> {
        let nested = depth > 0;
        let mut nodes = Vec::new();
        loop {
            self.lexer.skip_newlines()?;
            match self.lexer.next()? {
                Token::RBrace if nested => return Ok(nodes),
                Token::Eof if !nested => return Ok(nodes),
                Token::Key(name) => nodes.push(self.parse_node(name, depth)?),
                Token::RBrace => return Err(self.lexer.error("unmatched '}'")),
                Token::Eof => return Err(self.lexer.error("unexpected end of file, missing '}'")),
                other => {
                    return Err(self
                        .lexer
                        .error(format!("expected a record name, found {:?}", other)))
                }
            }
        }
    }

    fn parse_node(&mut self, name: String, depth: usize) -> Result<DocNode> {
        let mut node = DocNode::new(name);
        loop {
            match self.lexer.peek()?.clone() {
                Token::Newline | Token::Eof | Token::RBrace => break,
                Token::LBrace => {
                    if depth >= MAX_DEPTH {
                        return Err(self
                            .lexer
                            .error(format!("records nested deeper than {} levels", MAX_DEPTH)));
                    }
                    self.lexer.next()?;
                    node.children = self.parse_node_list(depth + 1)?;
                    break;
                }
                Token::Star => {
                    self.lexer.next()?;
                    node.properties.push(self.parse_array()?);
                }
                Token::Comma => {
                    self.lexer.next()?;
                    self.lexer.skip_newlines()?;
                }
                _ => {
                    let token = self.lexer.next()?;
                    node.properties.push(self.scalar(token)?);
                }
            }
        }
        Ok(node)
    }

    fn scalar(&self, token: Token) -> Result<Property> {
        match token {
            Token::Int(v) => Ok(Property::I64(v)),
            Token::Float(v) => Ok(Property::F64(v)),
            Token::Str(s) | Token::Word(s) => Ok(Property::String(s)),
            other => Err(self.lexer.error(format!("expected a value, found {:?}", other))),
        }
    }

    /// `*N { a: v, v, ... }`, the leading `*` already consumed.
    fn parse_array(&mut self) -> Result<Property> {
        let count = match self.lexer.next()? {
            Token::Int(n) if n >= 0 => n as usize,
            other => {
                return Err(self
                    .lexer
                    .error(format!("expected an array length, found {:?}", other)))
            }
        };
        self.lexer.skip_newlines()?;
        if self.lexer.next()? != Token::LBrace {
            return Err(self.lexer.error("expected '{' after array length"));
        }
        self.lexer.skip_newlines()?;

        // Every element takes at least one byte of input.
        let remaining = self.lexer.src.len() - self.lexer.pos;
        if count > remaining {
            return Err(self
                .lexer
                .error(format!("array length {} exceeds the document size", count)));
        }
        let mut ints = Vec::with_capacity(count);
        let mut floats: Option<Vec<f64>> = None;
        if *self.lexer.peek()? == Token::Key("a".to_string()) {
            self.lexer.next()?;
            loop {
                match self.lexer.next()? {
                    Token::Int(v) => match floats {
                        Some(ref mut f) => f.push(v as f64),
                        None => ints.push(v),
                    },
                    Token::Float(v) => {
                        let f = floats
                            .get_or_insert_with(|| ints.iter().map(|&i| i as f64).collect());
                        f.push(v);
                    }
                    Token::Newline => continue,
                    Token::RBrace => {
                        return Ok(self.finish_array(count, ints, floats));
                    }
                    Token::Comma => continue,
                    other => {
                        return Err(self.lexer.error(format!("unexpected {:?} in array", other)))
                    }
                }
            }
        }
        self.lexer.skip_newlines()?;
        if self.lexer.next()? != Token::RBrace {
            return Err(self.lexer.error("expected '}' to close array"));
        }
        Ok(self.finish_array(count, ints, floats))
    }

    fn finish_array(&self, count: usize, ints: Vec<i64>, floats: Option<Vec<f64>>) -> Property {
        let array = match floats {
            Some(f) => Property::F64Array(f),
            None => Property::I64Array(ints),
        };
        if array.array_len() != Some(count) {
            debug!(
                "line {}: array declares {} elements but holds {}",
                self.lexer.line,
                count,
                array.array_len().unwrap_or(0)
            );
        }
        array
    }
}

/// Version from `FBXHeaderExtension/FBXVersion`, falling back to the `; FBX 7.4.0 project file`
/// banner most exporters write on the first line.
fn detect_version(text: &str, nodes: &[DocNode]) -> u32 {
    let header = nodes
        .iter()
        .find(|n| n.name == "FBXHeaderExtension")
        .and_then(|h| h.child_property("FBXVersion"))
        .and_then(Property::as_i64);
    if let Some(v) = header {
        // Negative values end up rejected as unsupported.
        return u32::try_from(v).unwrap_or(0);
    }
    let banner = text
        .lines()
        .next()
        .and_then(|l| l.trim_start_matches(';').trim().strip_prefix("FBX "))
        .and_then(|rest| rest.split_whitespace().next())
        .map(|v| v.split('.').take(2).collect::<Vec<_>>());
    match banner.as_deref() {
        Some([major, minor]) => match (major.parse::<u32>(), minor.parse::<u32>()) {
            (Ok(major), Ok(minor)) => major
                .checked_mul(1000)
                .zip(minor.checked_mul(100))
                .and_then(|(major, minor)| major.checked_add(minor))
                .unwrap_or_else(|| {
                    debug!("ignoring out-of-range version banner {}.{}", major, minor);
                    DEFAULT_VERSION
                }),
            _ => DEFAULT_VERSION,
        },
        _ => DEFAULT_VERSION,
    }
}

/// Decode an ASCII FBX document.
pub fn decode_fbx(text: &str) -> Result<Document> {
    let mut parser = Parser {
        lexer: Lexer::new(text),
    };
    let nodes = parser.parse_node_list(0)?;
    if nodes.is_empty() {
        return Err(Error::UnrecognizedFormat);
    }
    let version = detect_version(text, &nodes);
    if version < MIN_VERSION {
        return Err(Error::UnsupportedVersion(version));
    }
    Ok(Document {
        format: Format::Ascii,
        version,
        nodes,
    })
}
