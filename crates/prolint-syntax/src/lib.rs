//! Proto source parsing for the prolint toolchain.
//!
//! This crate is the parse collaborator consumed by the lint engine and by
//! plugin-side rule registries. It turns a `.proto` file into a [`Proto`]
//! parse tree whose nodes carry source positions (0-based byte offset,
//! 1-based line and column), so rules can report failures at the exact
//! declaration site.
//!
//! The grammar coverage is the subset lint rules inspect: `syntax`,
//! `package`, `import`, and `option` statements, messages with fields and
//! nested declarations, enums with fields, and services with rpcs.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use prolint_syntax::parse_source;
//!
//! let proto = parse_source(Path::new("greet.proto"), "enum greeting { HI = 0; }")?;
//! let first = proto.enums.first().expect("one enum");
//! assert_eq!(first.name, "greeting");
//! assert_eq!(first.pos.line, 1);
//! # Ok::<(), prolint_syntax::SyntaxError>(())
//! ```

pub mod ast;
pub mod error;
mod lexer;
pub mod parser;

pub use self::ast::{
    Enum, EnumField, Field, FieldLabel, Import, Message, Package, Position, Proto, ProtoOption,
    Rpc, Service, Syntax,
};
pub use self::error::SyntaxError;
pub use self::parser::{parse_file, parse_source};
