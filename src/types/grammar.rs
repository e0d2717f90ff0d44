//! Recursive descent parser for generic type names.
//!
//! ```text
//! type     := name ( '<' type ( ',' type )* '>' )?
//! name     := [A-Za-z0-9_]+
//! ```
//!
//! Names are matched case-insensitively and whitespace between tokens is ignored.

use alloc::vec::Vec;

use super::catalog::code_for;
use super::descriptor::TypeDescriptor;
use crate::errors::Error;

/// Nesting bound that keeps hostile input from exhausting the stack.
const MAX_DEPTH: usize = 512;

/// Parses a full type name into a descriptor tree.
pub(crate) fn parse_type_name(input: &str) -> Result<TypeDescriptor, Error> {
    let mut parser = Parser { input, pos: 0 };
    let descriptor = parser.parse_type(0)?;
    parser.skip_whitespace();
    if parser.pos != input.len() {
        return Err(parser.error("unexpected characters after type"));
    }
    tracing::trace!(name = input, parsed = %descriptor, "parsed type name");
    Ok(descriptor)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, reason: &'static str) -> Error {
        Error::InvalidTypeName {
            name: self.input.into(),
            reason,
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Consumes `expected` if it is the next non-blank character.
    fn eat(&mut self, expected: u8) -> bool {
        self.skip_whitespace();
        if self.input.as_bytes().get(self.pos) == Some(&expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_name(&mut self) -> Result<&'a str, Error> {
        self.skip_whitespace();
        let start = self.pos;
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len()
            && (bytes[self.pos].is_ascii_alphanumeric() || bytes[self.pos] == b'_')
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("expected a type name"));
        }
        Ok(&self.input[start..self.pos])
    }

    fn parse_type(&mut self, depth: usize) -> Result<TypeDescriptor, Error> {
        if depth > MAX_DEPTH {
            return Err(self.error("type nesting too deep"));
        }
        let name = self.parse_name()?;
        let code = code_for(name).map_err(|_| self.error("unknown type name"))?;

        if !self.eat(b'<') {
            return Ok(TypeDescriptor::new(code));
        }

        let mut subtypes = Vec::with_capacity(code.arity());
        loop {
            subtypes.push(self.parse_type(depth + 1)?);
            if self.eat(b',') {
                continue;
            }
            if self.eat(b'>') {
                break;
            }
            return Err(self.error("unbalanced '<' in type name"));
        }

        if code.arity() == 0 {
            return Err(self.error("scalar types take no subtypes"));
        }
        if subtypes.len() != code.arity() {
            return Err(self.error(if code.arity() == 2 {
                "map takes exactly a key and a value type"
            } else {
                "collection takes exactly one element type"
            }));
        }

        Ok(TypeDescriptor { code, subtypes })
    }
}
