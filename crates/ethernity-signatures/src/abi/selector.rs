//! Recursive-descent parser for canonical signature strings.
//!
//! Grammar (whitespace allowed between tokens):
//!
//! ```text
//! signature := ident '(' [ param (',' param)* ] ')'
//! param     := type [ 'indexed' ] [ ident ]
//! type      := ( '(' component (',' component)* ')' | elementary ) array*
//! component := type [ ident ]
//! array     := '[' digits? ']'
//! ```

use ethernity_core::{Error, Result};
use serde::{Deserialize, Serialize};

use super::types::{ArrayDimension, Component, TypeDescriptor};

/// Tuples nested deeper than this are rejected.
pub const MAX_NESTING: usize = 64;

/// Argument of a method or event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    pub indexed: bool,
}

/// Result of parsing `name(type,...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSignature {
    pub name: String,
    pub inputs: Vec<Param>,
}

impl ParsedSignature {
    /// `name(type,...)` with parameter names and annotations dropped.
    pub fn canonical(&self) -> String {
        let types: Vec<String> = self.inputs.iter().map(|p| p.ty.to_string()).collect();
        format!("{}({})", self.name, types.join(","))
    }
}

/// Parses a canonical (or human-annotated) signature.
pub fn parse_signature(text: &str) -> Result<ParsedSignature> {
    let mut cursor = Cursor::new(text);
    let name = cursor.identifier()?;
    cursor.expect(b'(')?;

    let mut inputs = Vec::new();
    if !cursor.eat(b')') {
        loop {
            inputs.push(cursor.param()?);
            if cursor.eat(b',') {
                continue;
            }
            cursor.expect(b')')?;
            break;
        }
    }

    cursor.skip_ws();
    if !cursor.at_end() {
        return Err(cursor.error("trailing characters"));
    }
    Ok(ParsedSignature { name, inputs })
}

/// Parses a single type string such as `(uint256,address)[]`.
pub fn parse_type(text: &str) -> Result<TypeDescriptor> {
    let mut cursor = Cursor::new(text);
    let ty = cursor.ty(0)?;
    cursor.skip_ws();
    if !cursor.at_end() {
        return Err(Error::InvalidType(text.to_string()));
    }
    Ok(ty)
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn error(&self, what: &str) -> Error {
        Error::InvalidSignature(format!("{what} at {} in '{}'", self.pos, self.text))
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, byte: u8) -> bool {
        self.skip_ws();
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", byte as char)))
        }
    }

    /// `[A-Za-z_$][A-Za-z0-9_$]*`, or `None` when no identifier starts here.
    fn try_identifier(&mut self) -> Option<String> {
        self.skip_ws();
        let start = self.pos;
        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() || b == b'_' || b == b'$' => self.pos += 1,
            _ => return None,
        }
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_' || b == b'$') {
            self.pos += 1;
        }
        Some(self.text[start..self.pos].to_string())
    }

    fn identifier(&mut self) -> Result<String> {
        self.try_identifier().ok_or_else(|| self.error("expected identifier"))
    }

    fn param(&mut self) -> Result<Param> {
        let ty = self.ty(0)?;
        let mut indexed = false;
        let mut name = String::new();
        if let Some(word) = self.try_identifier() {
            if word == "indexed" {
                indexed = true;
                name = self.try_identifier().unwrap_or_default();
            } else {
                name = word;
            }
        }
        Ok(Param { name, ty, indexed })
    }

    fn ty(&mut self, depth: usize) -> Result<TypeDescriptor> {
        if depth > MAX_NESTING {
            return Err(self.error("nesting too deep"));
        }
        self.skip_ws();
        if self.eat(b'(') {
            let mut components = Vec::new();
            loop {
                let ty = self.ty(depth + 1)?;
                let name = self.try_identifier().unwrap_or_default();
                components.push(Component { name, ty });
                if self.eat(b',') {
                    continue;
                }
                self.expect(b')')?;
                break;
            }
            let dims = self.dimensions()?;
            TypeDescriptor::tuple(components, dims)
        } else {
            let base = self.elementary_token()?;
            let dims = self.dimensions()?;
            TypeDescriptor::elementary(base, dims)
        }
    }

    /// Alphanumeric run starting with a letter (`uint256`, `fixed128x18`).
    fn elementary_token(&mut self) -> Result<&'a str> {
        let text = self.text;
        let start = self.pos;
        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() => self.pos += 1,
            _ => return Err(self.error("expected type")),
        }
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric()) {
            self.pos += 1;
        }
        Ok(&text[start..self.pos])
    }

    fn dimensions(&mut self) -> Result<Vec<ArrayDimension>> {
        let text = self.text;
        let mut dims = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() != Some(b'[') {
                break;
            }
            self.pos += 1;
            self.skip_ws();
            let start = self.pos;
            while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                self.pos += 1;
            }
            let digits = &text[start..self.pos];
            self.skip_ws();
            if self.peek() != Some(b']') {
                return Err(self.error("expected ']'"));
            }
            self.pos += 1;
            if digits.is_empty() {
                dims.push(ArrayDimension::Dynamic);
            } else {
                let size = digits.parse().map_err(|_| self.error("array size out of range"))?;
                dims.push(ArrayDimension::Fixed(size));
            }
        }
        Ok(dims)
    }
}
