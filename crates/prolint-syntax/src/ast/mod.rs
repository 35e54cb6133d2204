//! Parse tree types for proto source files.
//!
//! Nodes keep public fields so lint rules can walk the tree directly.
//! Every declaration records the [`Position`] of its leading keyword,
//! matching where a reader would point at the declaration in the source.

use std::path::PathBuf;

/// A location in a proto source file.
///
/// `offset` is a 0-based byte offset; `line` and `column` are 1-based,
/// counted in characters. These conventions are shared with the failure
/// records built from parse trees, so positions flow through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// 0-based byte offset from the start of the file.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number, counted in characters.
    pub column: usize,
}

impl Position {
    /// Creates a position from its raw coordinates.
    #[must_use]
    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Root of a parsed proto file.
#[derive(Debug, Clone, Default)]
pub struct Proto {
    /// The file path exactly as it was handed to the parser.
    pub filename: PathBuf,
    /// The `syntax` statement, when present.
    pub syntax: Option<Syntax>,
    /// The `package` statement, when present.
    pub package: Option<Package>,
    /// `import` statements in source order.
    pub imports: Vec<Import>,
    /// File-level `option` statements in source order.
    pub options: Vec<ProtoOption>,
    /// Top-level message definitions in source order.
    pub messages: Vec<Message>,
    /// Top-level enum definitions in source order.
    pub enums: Vec<Enum>,
    /// Service definitions in source order.
    pub services: Vec<Service>,
}

impl Proto {
    /// Creates an empty parse tree recording the given filename.
    #[must_use]
    pub fn new(filename: PathBuf) -> Self {
        Self {
            filename,
            ..Self::default()
        }
    }

    /// Returns every enum in the file, including enums nested in messages.
    #[must_use]
    pub fn all_enums(&self) -> Vec<&Enum> {
        let mut found: Vec<&Enum> = self.enums.iter().collect();
        for message in &self.messages {
            collect_enums(message, &mut found);
        }
        found
    }

    /// Returns every message in the file, including nested messages.
    #[must_use]
    pub fn all_messages(&self) -> Vec<&Message> {
        let mut found = Vec::new();
        for message in &self.messages {
            collect_messages(message, &mut found);
        }
        found
    }
}

fn collect_enums<'a>(message: &'a Message, found: &mut Vec<&'a Enum>) {
    found.extend(message.enums.iter());
    for nested in &message.messages {
        collect_enums(nested, found);
    }
}

fn collect_messages<'a>(message: &'a Message, found: &mut Vec<&'a Message>) {
    found.push(message);
    for nested in &message.messages {
        collect_messages(nested, found);
    }
}

/// The `syntax` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syntax {
    /// The declared syntax level, e.g. `proto3`.
    pub version: String,
    /// Position of the `syntax` keyword.
    pub pos: Position,
}

/// The `package` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// The full dotted package name.
    pub name: String,
    /// Position of the `package` keyword.
    pub pos: Position,
}

/// An `import` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// The imported file path as written in the source.
    pub path: String,
    /// Position of the `import` keyword.
    pub pos: Position,
}

/// An `option` statement, at file, message, or enum level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoOption {
    /// The option name, e.g. `java_package`.
    pub name: String,
    /// The option value rendered as source text.
    pub value: String,
    /// Position of the `option` keyword.
    pub pos: Position,
}

/// A message definition.
#[derive(Debug, Clone, Default)]
pub struct Message {
    /// The message name.
    pub name: String,
    /// Fields in source order, with `oneof` members flattened in.
    pub fields: Vec<Field>,
    /// Enums nested directly in this message.
    pub enums: Vec<Enum>,
    /// Messages nested directly in this message.
    pub messages: Vec<Message>,
    /// Message-level options.
    pub options: Vec<ProtoOption>,
    /// Position of the `message` keyword.
    pub pos: Position,
}

/// Label modifying a message field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldLabel {
    /// No label (proto3 singular).
    #[default]
    Singular,
    /// The `optional` label.
    Optional,
    /// The `repeated` label.
    Repeated,
    /// The `required` label (proto2).
    Required,
}

/// A message field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// The field label.
    pub label: FieldLabel,
    /// The field type as written, e.g. `string` or `map<string, int32>`.
    pub type_name: String,
    /// The field name.
    pub name: String,
    /// The field number.
    pub number: i64,
    /// Position of the first token of the field.
    pub pos: Position,
}

/// An enum definition.
#[derive(Debug, Clone, Default)]
pub struct Enum {
    /// The enum name.
    pub name: String,
    /// Enum fields in source order.
    pub fields: Vec<EnumField>,
    /// Enum-level options.
    pub options: Vec<ProtoOption>,
    /// Position of the `enum` keyword.
    pub pos: Position,
}

/// A single enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumField {
    /// The value name.
    pub name: String,
    /// The assigned number, possibly negative.
    pub number: i64,
    /// Position of the value name.
    pub pos: Position,
}

/// A service definition.
#[derive(Debug, Clone, Default)]
pub struct Service {
    /// The service name.
    pub name: String,
    /// Rpcs in source order.
    pub rpcs: Vec<Rpc>,
    /// Position of the `service` keyword.
    pub pos: Position,
}

/// A single rpc declaration inside a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rpc {
    /// The rpc name.
    pub name: String,
    /// The request message type as written.
    pub request_type: String,
    /// The response message type as written.
    pub response_type: String,
    /// Position of the `rpc` keyword.
    pub pos: Position,
}
