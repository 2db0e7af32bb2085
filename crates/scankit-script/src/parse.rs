//! Parsing of DSL source text into a small value tree.
//!
//! The DSL is the Python-call subset the scan commands use: nested function
//! calls with positional and keyword arguments, numbers, single- or
//! double-quoted strings, `True`/`False`, tuples and lists. Keyword
//! arguments may appear before positional ones (the concise register mixes
//! them), so no Python-style ordering rule is enforced here; argument
//! meaning is resolved later when a call is bound to a model.

use scankit_core::error::ParseError;

/// A literal or call in DSL source text.
#[derive(Debug, Clone, PartialEq)]
pub enum PyValue {
    /// Integer literal
    Int(i64),
    /// Floating-point literal
    Float(f64),
    /// String literal
    Str(String),
    /// `True` or `False`
    Bool(bool),
    /// Parenthesised tuple
    Tuple(Vec<PyValue>),
    /// Bracketed list
    List(Vec<PyValue>),
    /// Function call
    Call(PyCall),
}

impl PyValue {
    /// The value as an f64, accepting both numeric literal forms
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PyValue::Int(i) => Some(*i as f64),
            PyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// A short description of the value's kind, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            PyValue::Int(_) => "an integer",
            PyValue::Float(_) => "a number",
            PyValue::Str(_) => "a string",
            PyValue::Bool(_) => "a boolean",
            PyValue::Tuple(_) => "a tuple",
            PyValue::List(_) => "a list",
            PyValue::Call(_) => "a call",
        }
    }
}

/// A parsed function call.
#[derive(Debug, Clone, PartialEq)]
pub struct PyCall {
    /// The called function's name
    pub name: String,
    /// Positional arguments in source order
    pub args: Vec<PyValue>,
    /// Keyword arguments in source order
    pub kwargs: Vec<(String, PyValue)>,
}

impl PyCall {
    /// Look up a keyword argument by name
    pub fn kwarg(&self, name: &str) -> Option<&PyValue> {
        self.kwargs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

/// Parse one complete DSL expression; trailing input is an error.
pub fn parse_expression(source: &str) -> Result<PyValue, ParseError> {
    let mut parser = Parser::new(source);
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if parser.pos < parser.bytes.len() {
        return Err(parser.syntax("unexpected trailing input"));
    }
    Ok(value)
}

/// Parse a DSL expression that must be a function call.
pub fn parse_call(source: &str) -> Result<PyCall, ParseError> {
    match parse_expression(source)? {
        PyValue::Call(call) => Ok(call),
        other => Err(ParseError::Syntax {
            position: 0,
            reason: format!("expected a function call, found {}", other.kind()),
        }),
    }
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn syntax(&self, reason: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            position: self.pos,
            reason: reason.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.bytes.get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8) -> Result<(), ParseError> {
        match self.peek() {
            Some(found) if found == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(found) => Err(self.syntax(format!(
                "expected '{}', found '{}'",
                byte as char, found as char
            ))),
            None => Err(self.syntax(format!("expected '{}', found end of input", byte as char))),
        }
    }

    fn parse_value(&mut self) -> Result<PyValue, ParseError> {
        match self.peek() {
            Some(b'(') => self.parse_sequence(b'(', b')').map(PyValue::Tuple),
            Some(b'[') => self.parse_sequence(b'[', b']').map(PyValue::List),
            Some(b'\'') | Some(b'"') => self.parse_string().map(PyValue::Str),
            Some(c) if c == b'-' || c == b'+' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if c.is_ascii_alphabetic() || c == b'_' => self.parse_ident_or_call(),
            Some(c) => Err(self.syntax(format!("unexpected character '{}'", c as char))),
            None => Err(self.syntax("unexpected end of input")),
        }
    }

    fn parse_sequence(&mut self, open: u8, close: u8) -> Result<Vec<PyValue>, ParseError> {
        self.expect(open)?;
        let mut items = Vec::new();
        loop {
            match self.peek() {
                Some(found) if found == close => {
                    self.pos += 1;
                    return Ok(items);
                }
                Some(_) => {
                    items.push(self.parse_value()?);
                    match self.peek() {
                        Some(b',') => {
                            self.pos += 1;
                        }
                        Some(found) if found == close => {}
                        _ => return Err(self.syntax("expected ',' or closing bracket")),
                    }
                }
                None => return Err(self.syntax("unterminated sequence")),
            }
        }
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        let delimiter = self.peek().ok_or_else(|| self.syntax("expected string"))?;
        self.pos += 1;
        let mut text = String::new();
        loop {
            match self.bytes.get(self.pos).copied() {
                Some(b'\\') => {
                    // Only the two escapes the renderer produces
                    match self.bytes.get(self.pos + 1).copied() {
                        Some(escaped @ (b'\'' | b'"' | b'\\')) => {
                            text.push(escaped as char);
                            self.pos += 2;
                        }
                        _ => return Err(self.syntax("unsupported escape sequence")),
                    }
                }
                Some(found) if found == delimiter => {
                    self.pos += 1;
                    return Ok(text);
                }
                Some(_) => {
                    // Multibyte UTF-8 passes through untouched
                    let start = self.pos;
                    let mut end = start + 1;
                    while end < self.bytes.len() && (self.bytes[end] & 0xC0) == 0x80 {
                        end += 1;
                    }
                    text.push_str(std::str::from_utf8(&self.bytes[start..end]).map_err(|_| {
                        self.syntax("invalid UTF-8 in string literal")
                    })?);
                    self.pos = end;
                }
                None => return Err(self.syntax("unterminated string literal")),
            }
        }
    }

    fn parse_number(&mut self) -> Result<PyValue, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        if matches!(self.bytes.get(self.pos), Some(b'-') | Some(b'+')) {
            self.pos += 1;
        }
        let mut is_float = false;
        while let Some(&byte) = self.bytes.get(self.pos) {
            match byte {
                b'0'..=b'9' => self.pos += 1,
                b'.' => {
                    is_float = true;
                    self.pos += 1;
                }
                b'e' | b'E' => {
                    is_float = true;
                    self.pos += 1;
                    if matches!(self.bytes.get(self.pos), Some(b'-') | Some(b'+')) {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
        let text = std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|_| self.syntax("invalid number"))?;
        if is_float {
            text.parse::<f64>()
                .map(PyValue::Float)
                .map_err(|_| self.syntax(format!("invalid float literal '{text}'")))
        } else {
            text.parse::<i64>()
                .map(PyValue::Int)
                .map_err(|_| self.syntax(format!("invalid integer literal '{text}'")))
        }
    }

    fn parse_ident_or_call(&mut self) -> Result<PyValue, ParseError> {
        let name = self.parse_ident()?;
        match name.as_str() {
            "True" => return Ok(PyValue::Bool(true)),
            "False" => return Ok(PyValue::Bool(false)),
            _ => {}
        }
        if self.peek() != Some(b'(') {
            return Err(self.syntax(format!("bare identifier '{name}' is not a value")));
        }
        self.pos += 1;
        let mut args = Vec::new();
        let mut kwargs = Vec::new();
        loop {
            match self.peek() {
                Some(b')') => {
                    self.pos += 1;
                    return Ok(PyValue::Call(PyCall { name, args, kwargs }));
                }
                Some(_) => {
                    if let Some(key) = self.try_parse_kwarg_key()? {
                        kwargs.push((key, self.parse_value()?));
                    } else {
                        args.push(self.parse_value()?);
                    }
                    match self.peek() {
                        Some(b',') => {
                            self.pos += 1;
                        }
                        Some(b')') => {}
                        _ => return Err(self.syntax("expected ',' or ')' in argument list")),
                    }
                }
                None => return Err(self.syntax("unterminated argument list")),
            }
        }
    }

    /// Consume `name=` if the upcoming tokens form a keyword argument.
    fn try_parse_kwarg_key(&mut self) -> Result<Option<String>, ParseError> {
        self.skip_whitespace();
        let checkpoint = self.pos;
        let Some(&first) = self.bytes.get(self.pos) else {
            return Ok(None);
        };
        if !(first.is_ascii_alphabetic() || first == b'_') {
            return Ok(None);
        }
        let name = self.parse_ident()?;
        if self.peek() == Some(b'=') {
            self.pos += 1;
            Ok(Some(name))
        } else {
            self.pos = checkpoint;
            Ok(None)
        }
    }

    fn parse_ident(&mut self) -> Result<String, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(&byte) = self.bytes.get(self.pos) {
            if byte.is_ascii_alphanumeric() || byte == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.syntax("expected an identifier"));
        }
        Ok(std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|_| self.syntax("invalid identifier"))?
            .to_string())
    }
}
