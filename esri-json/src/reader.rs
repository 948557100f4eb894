//! Tolerant JSON reader.
//!
//! Accepts standard JSON plus the relaxations commonly found in hand-written service parameters:
//! unquoted object keys (`{ x: 1 }`), single-quoted strings (`'WKT'`), a leading `+` on numbers
//! and trailing commas in objects and arrays. The result is a [`serde_json::Value`] tree.

use crate::error::CodecError;
use serde_json::{Map, Number, Value};

/// Reads a JSON value from text. Trailing non-whitespace input is an error.
pub fn read_json(input: &str) -> Result<Value, CodecError> {
    let mut reader = Reader::new(input);
    let value = reader.parse_value()?;
    reader.skip_whitespace();
    if reader.peek().is_some() {
        return Err(reader.error("unexpected characters after the value"));
    }

    Ok(value)
}

/// Arrays and objects nested deeper than this are rejected.
const MAX_DEPTH: usize = 128;

struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
    depth: usize,
}

impl<'a> Reader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            position: 0,
            depth: 0,
        }
    }

    fn error(&self, message: &str) -> CodecError {
        CodecError::Syntax {
            position: self.position,
            message: message.to_string(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    fn next_byte(&mut self) -> Result<u8, CodecError> {
        let byte = self
            .peek()
            .ok_or_else(|| self.error("unexpected end of input"))?;
        self.position += 1;
        Ok(byte)
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.position += 1;
        }
    }

    fn parse_tag(&mut self, tag: &str) -> Result<(), CodecError> {
        for expected in tag.bytes() {
            if self.next_byte()? != expected {
                return Err(self.error(&format!("unexpected character while parsing '{tag}'")));
            }
        }
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Value, CodecError> {
        self.skip_whitespace();
        match self.peek() {
            Some(open @ (b'{' | b'[')) => {
                if self.depth >= MAX_DEPTH {
                    return Err(self.error("nesting too deep"));
                }
                self.depth += 1;
                let value = if open == b'{' {
                    self.parse_object()
                } else {
                    self.parse_array()
                };
                self.depth -= 1;
                value
            }
            Some(quote @ (b'"' | b'\'')) => self.parse_string(quote).map(Value::String),
            Some(b'0'..=b'9' | b'-' | b'+' | b'.') => self.parse_number(),
            Some(b't') => self.parse_tag("true").map(|_| Value::Bool(true)),
            Some(b'f') => self.parse_tag("false").map(|_| Value::Bool(false)),
            Some(b'n') => self.parse_tag("null").map(|_| Value::Null),
            Some(_) => Err(self.error("unexpected character")),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_object(&mut self) -> Result<Value, CodecError> {
        self.parse_tag("{")?;
        let mut map = Map::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(b'}') {
                self.position += 1;
                break;
            }

            let key = self.parse_key()?;
            self.skip_whitespace();
            if self.next_byte()? != b':' {
                return Err(self.error("expected ':' after object key"));
            }
            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_whitespace();
            match self.next_byte()? {
                b',' => {}
                b'}' => break,
                _ => return Err(self.error("expected ',' or '}' in object")),
            }
        }

        Ok(Value::Object(map))
    }

    fn parse_key(&mut self) -> Result<String, CodecError> {
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => self.parse_string(quote),
            Some(b) if b.is_ascii_alphabetic() || b == b'_' || b == b'$' => {
                let start = self.position;
                while let Some(b) = self.peek() {
                    if b.is_ascii_alphanumeric() || b == b'_' || b == b'$' {
                        self.position += 1;
                    } else {
                        break;
                    }
                }
                Ok(String::from_utf8_lossy(&self.bytes[start..self.position]).into_owned())
            }
            _ => Err(self.error("expected object key")),
        }
    }

    fn parse_array(&mut self) -> Result<Value, CodecError> {
        self.parse_tag("[")?;
        let mut values = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(b']') {
                self.position += 1;
                break;
            }

            values.push(self.parse_value()?);

            self.skip_whitespace();
            match self.next_byte()? {
                b',' => {}
                b']' => break,
                _ => return Err(self.error("expected ',' or ']' in array")),
            }
        }

        Ok(Value::Array(values))
    }

    fn parse_string(&mut self, quote: u8) -> Result<String, CodecError> {
        self.next_byte()?;
        let mut bytes = Vec::with_capacity(32);
        let mut utf16 = Vec::new();

        loop {
            let byte = self.next_byte()?;
            if byte != b'\\' || self.peek() != Some(b'u') {
                flush_utf16(&mut utf16, &mut bytes);
            }

            match byte {
                b if b == quote => break,
                b'\\' => match self.next_byte()? {
                    b'b' => bytes.push(b'\x08'),
                    b'f' => bytes.push(b'\x0C'),
                    b'n' => bytes.push(b'\n'),
                    b'r' => bytes.push(b'\r'),
                    b't' => bytes.push(b'\t'),
                    b'u' => {
                        let mut code = 0u16;
                        for _ in 0..4 {
                            let digit = (self.next_byte()? as char)
                                .to_digit(16)
                                .ok_or_else(|| self.error("invalid unicode escape"))?;
                            code = code * 16 + digit as u16;
                        }
                        utf16.push(code);
                    }
                    c => bytes.push(c),
                },
                c => bytes.push(c),
            }
        }

        String::from_utf8(bytes).map_err(|_| self.error("invalid UTF-8 in string"))
    }

    fn parse_number(&mut self) -> Result<Value, CodecError> {
        let start = self.position;
        if let Some(b'+' | b'-') = self.peek() {
            self.position += 1;
        }

        let mut digits = self.skip_digits();
        let mut is_float = false;
        if self.peek() == Some(b'.') {
            self.position += 1;
            is_float = true;
            digits += self.skip_digits();
        }
        if digits == 0 {
            return Err(self.error("expected digits in number"));
        }

        if let Some(b'e' | b'E') = self.peek() {
            self.position += 1;
            is_float = true;
            if let Some(b'+' | b'-') = self.peek() {
                self.position += 1;
            }
            if self.skip_digits() == 0 {
                return Err(self.error("expected digits after exponent"));
            }
        }

        let text = std::str::from_utf8(&self.bytes[start..self.position])
            .map_err(|_| self.error("invalid number"))?;

        if !is_float {
            if let Ok(value) = text.parse::<i64>() {
                return Ok(Value::Number(Number::from(value)));
            }
        }

        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| self.error("number out of range"))
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.position;
        while let Some(b'0'..=b'9') = self.peek() {
            self.position += 1;
        }
        self.position - start
    }
}

fn flush_utf16(utf16: &mut Vec<u16>, bytes: &mut Vec<u8>) {
    if utf16.is_empty() {
        return;
    }

    let decoded: String = char::decode_utf16(utf16.drain(..))
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    bytes.extend_from_slice(decoded.as_bytes());
}
