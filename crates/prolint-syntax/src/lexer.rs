//! Tokeniser for proto source text.
//!
//! Produces identifier, integer, string, and symbol tokens with source
//! positions. Qualified names (`google.protobuf.Empty`) lex as a single
//! identifier token. Line and block comments are skipped.

use std::iter::Peekable;
use std::path::Path;
use std::str::CharIndices;

use crate::ast::Position;
use crate::error::SyntaxError;

/// The payload of a single token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// An identifier, possibly dotted.
    Ident(String),
    /// An integer literal, sign included.
    IntLit(i64),
    /// A quoted string literal, quotes stripped.
    StrLit(String),
    /// Any single punctuation character.
    Symbol(char),
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Renders the token for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Ident(name) => format!("identifier '{name}'"),
            Self::IntLit(value) => format!("integer '{value}'"),
            Self::StrLit(value) => format!("string \"{value}\""),
            Self::Symbol(symbol) => format!("'{symbol}'"),
            Self::Eof => String::from("end of file"),
        }
    }
}

/// A token together with the position of its first character.
#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) pos: Position,
}

/// Streaming tokeniser over one source file.
pub(crate) struct Lexer<'a> {
    path: &'a Path,
    chars: Peekable<CharIndices<'a>>,
    source_len: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(path: &'a Path, source: &'a str) -> Self {
        Self {
            path,
            chars: source.char_indices().peekable(),
            source_len: source.len(),
            line: 1,
            column: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn peek2(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next().map(|(_, c)| c)
    }

    fn advance(&mut self) -> Option<char> {
        let (_, consumed) = self.chars.next()?;
        if consumed == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(consumed)
    }

    fn current_pos(&mut self) -> Position {
        let offset = self
            .chars
            .peek()
            .map_or(self.source_len, |&(index, _)| index);
        Position::new(offset, self.line, self.column)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek2() == Some('/') => {
                    while let Some(c) = self.advance() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                Some('/') if self.peek2() == Some('*') => {
                    self.advance();
                    self.advance();
                    loop {
                        match self.advance() {
                            Some('*') if self.peek() == Some('/') => {
                                self.advance();
                                break;
                            }
                            Some(_) => {}
                            None => break,
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Produces the next token, skipping whitespace and comments.
    pub(crate) fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_trivia();
        let pos = self.current_pos();

        let Some(first) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                pos,
            });
        };

        if first.is_ascii_alphabetic() || first == '_' {
            return Ok(Token {
                kind: TokenKind::Ident(self.lex_ident()),
                pos,
            });
        }
        if first.is_ascii_digit() || (first == '-' && self.peek2().is_some_and(|c| c.is_ascii_digit()))
        {
            return self.lex_int(pos);
        }
        if first == '"' || first == '\'' {
            return self.lex_string(pos);
        }

        self.advance();
        Ok(Token {
            kind: TokenKind::Symbol(first),
            pos,
        })
    }

    fn lex_ident(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    fn lex_int(&mut self, pos: Position) -> Result<Token, SyntaxError> {
        let mut text = String::new();
        if self.peek() == Some('-') {
            text.push('-');
            self.advance();
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let value = text.parse::<i64>().map_err(|_| SyntaxError::InvalidNumber {
            path: self.path.to_path_buf(),
            pos,
            text: text.clone(),
        })?;
        Ok(Token {
            kind: TokenKind::IntLit(value),
            pos,
        })
    }

    fn lex_string(&mut self, pos: Position) -> Result<Token, SyntaxError> {
        let Some(quote) = self.advance() else {
            return Err(self.unterminated(pos));
        };
        let mut text = String::new();
        loop {
            match self.advance() {
                Some('\\') => {
                    // Escapes are carried through verbatim; rules inspect
                    // names and paths, not decoded byte values.
                    match self.advance() {
                        Some(escaped) => text.push(escaped),
                        None => return Err(self.unterminated(pos)),
                    }
                }
                Some(c) if c == quote => break,
                Some(c) => text.push(c),
                None => return Err(self.unterminated(pos)),
            }
        }
        Ok(Token {
            kind: TokenKind::StrLit(text),
            pos,
        })
    }

    fn unterminated(&self, pos: Position) -> SyntaxError {
        SyntaxError::UnterminatedString {
            path: self.path.to_path_buf(),
            pos,
        }
    }
}
