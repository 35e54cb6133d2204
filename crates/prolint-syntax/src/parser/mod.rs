//! Recursive-descent parser for the proto grammar subset rules inspect.

use std::path::Path;

use crate::ast::{
    Enum, EnumField, Field, FieldLabel, Import, Message, Package, Position, Proto, ProtoOption,
    Rpc, Service, Syntax,
};
use crate::error::SyntaxError;
use crate::lexer::{Lexer, Token, TokenKind};

/// Reads and parses a proto file from disk.
///
/// The path is recorded verbatim in the returned tree's `filename`, so
/// failure records built from it always reflect the caller's own view of
/// the path.
///
/// # Errors
///
/// Returns [`SyntaxError::Read`] when the file cannot be read, or any
/// parse error from [`parse_source`].
pub fn parse_file(path: &Path) -> Result<Proto, SyntaxError> {
    let source = std::fs::read_to_string(path).map_err(|source| SyntaxError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(path, &source)
}

/// Parses proto source text, recording `path` as the tree's filename.
///
/// # Errors
///
/// Returns a [`SyntaxError`] describing the first token that does not fit
/// the grammar.
pub fn parse_source(path: &Path, source: &str) -> Result<Proto, SyntaxError> {
    Parser::new(path, source)?.parse()
}

struct Parser<'a> {
    path: &'a Path,
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    fn new(path: &'a Path, source: &'a str) -> Result<Self, SyntaxError> {
        let mut lexer = Lexer::new(path, source);
        let current = lexer.next_token()?;
        Ok(Self {
            path,
            lexer,
            current,
        })
    }

    fn advance(&mut self) -> Result<Token, SyntaxError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        SyntaxError::Unexpected {
            path: self.path.to_path_buf(),
            pos: self.current.pos,
            expected: expected.to_owned(),
            found: self.current.kind.describe(),
        }
    }

    fn at_symbol(&self, symbol: char) -> bool {
        self.current.kind == TokenKind::Symbol(symbol)
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Ident(word) if word == keyword)
    }

    fn expect_symbol(&mut self, symbol: char) -> Result<Token, SyntaxError> {
        if self.at_symbol(symbol) {
            self.advance()
        } else {
            Err(self.unexpected(&format!("'{symbol}'")))
        }
    }

    fn expect_ident(&mut self) -> Result<(String, Position), SyntaxError> {
        match self.current.kind.clone() {
            TokenKind::Ident(name) => {
                let token = self.advance()?;
                Ok((name, token.pos))
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    fn expect_int(&mut self) -> Result<i64, SyntaxError> {
        match self.current.kind {
            TokenKind::IntLit(value) => {
                self.advance()?;
                Ok(value)
            }
            _ => Err(self.unexpected("an integer")),
        }
    }

    fn expect_string(&mut self) -> Result<String, SyntaxError> {
        match self.current.kind.clone() {
            TokenKind::StrLit(text) => {
                self.advance()?;
                Ok(text)
            }
            _ => Err(self.unexpected("a string literal")),
        }
    }

    fn parse(mut self) -> Result<Proto, SyntaxError> {
        let mut proto = Proto::new(self.path.to_path_buf());
        loop {
            match self.current.kind.clone() {
                TokenKind::Eof => break,
                TokenKind::Symbol(';') => {
                    self.advance()?;
                }
                TokenKind::Ident(word) => match word.as_str() {
                    "syntax" => proto.syntax = Some(self.parse_syntax()?),
                    "package" => proto.package = Some(self.parse_package()?),
                    "import" => proto.imports.push(self.parse_import()?),
                    "option" => proto.options.push(self.parse_option()?),
                    "message" => proto.messages.push(self.parse_message()?),
                    "enum" => proto.enums.push(self.parse_enum()?),
                    "service" => proto.services.push(self.parse_service()?),
                    _ => return Err(self.unexpected("a top-level declaration")),
                },
                TokenKind::IntLit(_) | TokenKind::StrLit(_) | TokenKind::Symbol(_) => {
                    return Err(self.unexpected("a top-level declaration"));
                }
            }
        }
        Ok(proto)
    }

    fn parse_syntax(&mut self) -> Result<Syntax, SyntaxError> {
        let keyword = self.advance()?;
        self.expect_symbol('=')?;
        let version = self.expect_string()?;
        self.expect_symbol(';')?;
        Ok(Syntax {
            version,
            pos: keyword.pos,
        })
    }

    fn parse_package(&mut self) -> Result<Package, SyntaxError> {
        let keyword = self.advance()?;
        let (name, _) = self.expect_ident()?;
        self.expect_symbol(';')?;
        Ok(Package {
            name,
            pos: keyword.pos,
        })
    }

    fn parse_import(&mut self) -> Result<Import, SyntaxError> {
        let keyword = self.advance()?;
        if self.at_keyword("public") || self.at_keyword("weak") {
            self.advance()?;
        }
        let path = self.expect_string()?;
        self.expect_symbol(';')?;
        Ok(Import {
            path,
            pos: keyword.pos,
        })
    }

    fn parse_option(&mut self) -> Result<ProtoOption, SyntaxError> {
        let keyword = self.advance()?;
        let name = self.collect_text_until('=')?;
        self.expect_symbol('=')?;
        let value = self.collect_value_text()?;
        self.expect_symbol(';')?;
        Ok(ProtoOption {
            name,
            value,
            pos: keyword.pos,
        })
    }

    fn parse_message(&mut self) -> Result<Message, SyntaxError> {
        let keyword = self.advance()?;
        let (name, _) = self.expect_ident()?;
        self.expect_symbol('{')?;
        let mut message = Message {
            name,
            pos: keyword.pos,
            ..Message::default()
        };
        while !self.at_symbol('}') {
            match self.current.kind.clone() {
                TokenKind::Eof => return Err(self.unexpected("'}'")),
                TokenKind::Symbol(';') => {
                    self.advance()?;
                }
                TokenKind::Ident(word) => match word.as_str() {
                    "message" => message.messages.push(self.parse_message()?),
                    "enum" => message.enums.push(self.parse_enum()?),
                    "option" => message.options.push(self.parse_option()?),
                    "oneof" => self.parse_oneof(&mut message)?,
                    "reserved" | "extensions" | "extend" => self.skip_statement()?,
                    _ => message.fields.push(self.parse_field()?),
                },
                TokenKind::Symbol('.') => message.fields.push(self.parse_field()?),
                TokenKind::IntLit(_) | TokenKind::StrLit(_) | TokenKind::Symbol(_) => {
                    return Err(self.unexpected("a message element"));
                }
            }
        }
        self.expect_symbol('}')?;
        Ok(message)
    }

    fn parse_oneof(&mut self, message: &mut Message) -> Result<(), SyntaxError> {
        self.advance()?;
        self.expect_ident()?;
        self.expect_symbol('{')?;
        while !self.at_symbol('}') {
            if matches!(self.current.kind, TokenKind::Eof) {
                return Err(self.unexpected("'}'"));
            }
            if self.at_symbol(';') {
                self.advance()?;
            } else if self.at_keyword("option") {
                drop(self.parse_option()?);
            } else {
                message.fields.push(self.parse_field()?);
            }
        }
        self.expect_symbol('}')?;
        Ok(())
    }

    fn parse_field(&mut self) -> Result<Field, SyntaxError> {
        let pos = self.current.pos;
        let label = self.parse_field_label()?;
        let type_name = self.parse_type_name()?;
        let (name, _) = self.expect_ident()?;
        self.expect_symbol('=')?;
        let number = self.expect_int()?;
        if self.at_symbol('[') {
            self.skip_balanced('[', ']')?;
        }
        self.expect_symbol(';')?;
        Ok(Field {
            label,
            type_name,
            name,
            number,
            pos,
        })
    }

    fn parse_field_label(&mut self) -> Result<FieldLabel, SyntaxError> {
        let label = if self.at_keyword("repeated") {
            FieldLabel::Repeated
        } else if self.at_keyword("optional") {
            FieldLabel::Optional
        } else if self.at_keyword("required") {
            FieldLabel::Required
        } else {
            return Ok(FieldLabel::Singular);
        };
        self.advance()?;
        Ok(label)
    }

    fn parse_type_name(&mut self) -> Result<String, SyntaxError> {
        // `map` is also a valid message type name on its own; only a
        // following '<' makes it a map type.
        if self.at_keyword("map") {
            let (word, _) = self.expect_ident()?;
            if self.at_symbol('<') {
                let arguments = self.collect_balanced_text('<', '>')?;
                return Ok(format!("{word}<{arguments}>"));
            }
            return Ok(word);
        }
        let mut type_name = String::new();
        if self.at_symbol('.') {
            self.advance()?;
            type_name.push('.');
        }
        let (word, _) = self.expect_ident()?;
        type_name.push_str(&word);
        Ok(type_name)
    }

    fn parse_enum(&mut self) -> Result<Enum, SyntaxError> {
        let keyword = self.advance()?;
        let (name, _) = self.expect_ident()?;
        self.expect_symbol('{')?;
        let mut definition = Enum {
            name,
            pos: keyword.pos,
            ..Enum::default()
        };
        while !self.at_symbol('}') {
            match self.current.kind.clone() {
                TokenKind::Eof => return Err(self.unexpected("'}'")),
                TokenKind::Symbol(';') => {
                    self.advance()?;
                }
                TokenKind::Ident(word) => match word.as_str() {
                    "option" => definition.options.push(self.parse_option()?),
                    "reserved" => self.skip_statement()?,
                    _ => definition.fields.push(self.parse_enum_field()?),
                },
                TokenKind::IntLit(_) | TokenKind::StrLit(_) | TokenKind::Symbol(_) => {
                    return Err(self.unexpected("an enum value"));
                }
            }
        }
        self.expect_symbol('}')?;
        Ok(definition)
    }

    fn parse_enum_field(&mut self) -> Result<EnumField, SyntaxError> {
        let (name, pos) = self.expect_ident()?;
        self.expect_symbol('=')?;
        let number = self.expect_int()?;
        if self.at_symbol('[') {
            self.skip_balanced('[', ']')?;
        }
        self.expect_symbol(';')?;
        Ok(EnumField { name, number, pos })
    }

    fn parse_service(&mut self) -> Result<Service, SyntaxError> {
        let keyword = self.advance()?;
        let (name, _) = self.expect_ident()?;
        self.expect_symbol('{')?;
        let mut service = Service {
            name,
            pos: keyword.pos,
            ..Service::default()
        };
        while !self.at_symbol('}') {
            if matches!(self.current.kind, TokenKind::Eof) {
                return Err(self.unexpected("'}'"));
            }
            if self.at_symbol(';') {
                self.advance()?;
            } else if self.at_keyword("option") {
                drop(self.parse_option()?);
            } else if self.at_keyword("rpc") {
                service.rpcs.push(self.parse_rpc()?);
            } else {
                return Err(self.unexpected("an rpc declaration"));
            }
        }
        self.expect_symbol('}')?;
        Ok(service)
    }

    fn parse_rpc(&mut self) -> Result<Rpc, SyntaxError> {
        let keyword = self.advance()?;
        let (name, _) = self.expect_ident()?;
        self.expect_symbol('(')?;
        if self.at_keyword("stream") {
            self.advance()?;
        }
        let request_type = self.parse_type_name()?;
        self.expect_symbol(')')?;
        if !self.at_keyword("returns") {
            return Err(self.unexpected("'returns'"));
        }
        self.advance()?;
        self.expect_symbol('(')?;
        if self.at_keyword("stream") {
            self.advance()?;
        }
        let response_type = self.parse_type_name()?;
        self.expect_symbol(')')?;
        if self.at_symbol('{') {
            self.skip_balanced('{', '}')?;
        } else {
            self.expect_symbol(';')?;
        }
        Ok(Rpc {
            name,
            request_type,
            response_type,
            pos: keyword.pos,
        })
    }

    /// Consumes tokens through the terminating `;`, balancing any braces.
    fn skip_statement(&mut self) -> Result<(), SyntaxError> {
        let mut depth: usize = 0;
        loop {
            let token = self.advance()?;
            match token.kind {
                TokenKind::Symbol(';') if depth == 0 => return Ok(()),
                TokenKind::Symbol('{') => depth += 1,
                TokenKind::Symbol('}') => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok(());
                    }
                }
                TokenKind::Eof => return Err(self.unexpected("';'")),
                TokenKind::Ident(_)
                | TokenKind::IntLit(_)
                | TokenKind::StrLit(_)
                | TokenKind::Symbol(_) => {}
            }
        }
    }

    /// Consumes a balanced `open`..`close` region, current token included.
    fn skip_balanced(&mut self, open: char, close: char) -> Result<(), SyntaxError> {
        self.expect_symbol(open)?;
        let mut depth: usize = 1;
        while depth > 0 {
            let token = self.advance()?;
            match token.kind {
                TokenKind::Symbol(c) if c == open => depth += 1,
                TokenKind::Symbol(c) if c == close => depth -= 1,
                TokenKind::Eof => return Err(self.unexpected(&format!("'{close}'"))),
                TokenKind::Ident(_)
                | TokenKind::IntLit(_)
                | TokenKind::StrLit(_)
                | TokenKind::Symbol(_) => {}
            }
        }
        Ok(())
    }

    /// Renders a balanced `open`..`close` region to text, delimiters excluded.
    fn collect_balanced_text(&mut self, open: char, close: char) -> Result<String, SyntaxError> {
        self.expect_symbol(open)?;
        let mut depth: usize = 1;
        let mut pieces: Vec<String> = Vec::new();
        loop {
            match self.current.kind.clone() {
                TokenKind::Symbol(c) if c == open => depth += 1,
                TokenKind::Symbol(c) if c == close => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance()?;
                        return Ok(join_pieces(&pieces));
                    }
                }
                TokenKind::Eof => return Err(self.unexpected(&format!("'{close}'"))),
                TokenKind::Ident(_)
                | TokenKind::IntLit(_)
                | TokenKind::StrLit(_)
                | TokenKind::Symbol(_) => {}
            }
            let token = self.advance()?;
            pieces.push(token_text(&token.kind));
        }
    }

    /// Renders tokens to text up to, not including, the given symbol.
    fn collect_text_until(&mut self, stop: char) -> Result<String, SyntaxError> {
        let mut pieces: Vec<String> = Vec::new();
        while !self.at_symbol(stop) {
            if matches!(self.current.kind, TokenKind::Eof) {
                return Err(self.unexpected(&format!("'{stop}'")));
            }
            let token = self.advance()?;
            pieces.push(token_text(&token.kind));
        }
        Ok(join_pieces(&pieces))
    }

    /// Renders an option value to text, balancing aggregate braces.
    fn collect_value_text(&mut self) -> Result<String, SyntaxError> {
        let mut depth: usize = 0;
        let mut pieces: Vec<String> = Vec::new();
        loop {
            match self.current.kind.clone() {
                TokenKind::Symbol(';') if depth == 0 => return Ok(join_pieces(&pieces)),
                TokenKind::Symbol('{') => depth += 1,
                TokenKind::Symbol('}') => depth = depth.saturating_sub(1),
                TokenKind::Eof => return Err(self.unexpected("';'")),
                TokenKind::Ident(_)
                | TokenKind::IntLit(_)
                | TokenKind::StrLit(_)
                | TokenKind::Symbol(_) => {}
            }
            let token = self.advance()?;
            pieces.push(token_text(&token.kind));
        }
    }
}

fn token_text(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Ident(name) => name.clone(),
        TokenKind::IntLit(value) => value.to_string(),
        TokenKind::StrLit(text) => format!("\"{text}\""),
        TokenKind::Symbol(symbol) => symbol.to_string(),
        TokenKind::Eof => String::new(),
    }
}

/// Joins rendered tokens, separating only word-like neighbours.
fn join_pieces(pieces: &[String]) -> String {
    let mut joined = String::new();
    for piece in pieces {
        let needs_gap = joined
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
            && piece
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        if needs_gap {
            joined.push(' ');
        }
        joined.push_str(piece);
    }
    joined
}
