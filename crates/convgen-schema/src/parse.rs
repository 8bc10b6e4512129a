//! Type-expression parser for schema files.
//!
//! Grammar:
//!
//! ```text
//! ty    := path ( '<' ty ( ',' ty )* '>' )?
//! path  := ident ( '::' ident )?
//! ```
//!
//! `Option<T>`, `Vec<T>` and `Map<K, V>` are the only generic forms. A bare
//! identifier that is not a primitive names a composite in the default
//! version; `version::Name` names one explicitly.

use crate::types::{Primitive, TypeKey, TypeRef};
use thiserror::Error as ThisError;

///
/// TypeParseError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TypeParseError {
    #[error("unexpected end of type expression '{input}'")]
    UnexpectedEnd { input: String },

    #[error("unexpected '{found}' at offset {offset} in type expression '{input}'")]
    Unexpected {
        input: String,
        offset: usize,
        found: char,
    },

    #[error("'{name}' takes {expected} type argument(s), got {found}")]
    Arity {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("'{name}' is not a generic type")]
    NotGeneric { name: String },

    #[error("composite type '{name}' must be qualified as 'version::{name}'")]
    Unqualified { name: String },
}

/// Parse a type expression, resolving bare composite names against
/// `default_version`. With no default version every composite must be
/// qualified.
pub fn parse_type(input: &str, default_version: Option<&str>) -> Result<TypeRef, TypeParseError> {
    let mut parser = Parser {
        input,
        pos: 0,
        default_version,
    };

    let ty = parser.ty()?;
    parser.skip_ws();
    if let Some(found) = parser.peek() {
        return Err(parser.unexpected(found));
    }

    Ok(ty)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    default_version: Option<&'a str>,
}

impl<'a> Parser<'a> {
    fn ty(&mut self) -> Result<TypeRef, TypeParseError> {
        let (qualifier, name) = self.path()?;

        self.skip_ws();
        let args = if self.peek() == Some('<') {
            self.bump();
            self.args()?
        } else {
            Vec::new()
        };

        if !args.is_empty() {
            return match qualifier {
                None => generic(name, args),
                Some(version) => Err(TypeParseError::NotGeneric {
                    name: format!("{version}::{name}"),
                }),
            };
        }

        if qualifier.is_none() {
            if let Some(p) = Primitive::from_name(name) {
                return Ok(TypeRef::Primitive(p));
            }
            if matches!(name, "Option" | "Vec" | "Map") {
                return Err(TypeParseError::Arity {
                    name: name.to_string(),
                    expected: if name == "Map" { 2 } else { 1 },
                    found: 0,
                });
            }
        }

        let Some(version) = qualifier.or(self.default_version) else {
            return Err(TypeParseError::Unqualified {
                name: name.to_string(),
            });
        };

        Ok(TypeRef::Named(TypeKey::new(version, name)))
    }

    // comma-separated arguments up to and including the closing '>'
    fn args(&mut self) -> Result<Vec<TypeRef>, TypeParseError> {
        let mut args = vec![self.ty()?];

        loop {
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                    args.push(self.ty()?);
                }
                Some('>') => {
                    self.bump();
                    return Ok(args);
                }
                Some(found) => return Err(self.unexpected(found)),
                None => return Err(self.end()),
            }
        }
    }

    fn path(&mut self) -> Result<(Option<&'a str>, &'a str), TypeParseError> {
        let first = self.ident()?;

        if self.input[self.pos..].starts_with("::") {
            self.pos += 2;
            let second = self.ident()?;
            return Ok((Some(first), second));
        }

        Ok((None, first))
    }

    fn ident(&mut self) -> Result<&'a str, TypeParseError> {
        let input = self.input;
        self.skip_ws();
        let start = self.pos;

        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            Some(found) => return Err(self.unexpected(found)),
            None => return Err(self.end()),
        }

        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.bump();
            } else {
                break;
            }
        }

        Ok(&input[start..self.pos])
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn unexpected(&self, found: char) -> TypeParseError {
        TypeParseError::Unexpected {
            input: self.input.to_string(),
            offset: self.pos,
            found,
        }
    }

    fn end(&self) -> TypeParseError {
        TypeParseError::UnexpectedEnd {
            input: self.input.to_string(),
        }
    }
}

fn generic(name: &str, mut args: Vec<TypeRef>) -> Result<TypeRef, TypeParseError> {
    let expected = match name {
        "Option" | "Vec" => 1,
        "Map" => 2,
        _ => {
            return Err(TypeParseError::NotGeneric {
                name: name.to_string(),
            });
        }
    };

    if args.len() != expected {
        return Err(TypeParseError::Arity {
            name: name.to_string(),
            expected,
            found: args.len(),
        });
    }

    let ty = match name {
        "Option" => TypeRef::pointer(args.remove(0)),
        "Vec" => TypeRef::slice(args.remove(0)),
        _ => {
            let value = args.remove(1);
            TypeRef::map(args.remove(0), value)
        }
    };

    Ok(ty)
}
