//! A YAML 1.2 reader.
//!
//! The pipeline is strictly pull-based: [`Parser`] pulls events from
//! [`ParseStream`], which pulls tokens from [`Scanner`], which pulls
//! characters from the encoding-normalizing stream. Input may be UTF-8,
//! UTF-16, or UTF-32 in either byte order, with or without a BOM.
//!
//! ```
//! let mut parser = yamlet::open("{a: 1, b: [x, y]}".as_bytes());
//! let doc = parser.next_document().unwrap().unwrap();
//! assert_eq!(doc.at("a").unwrap().as_int().unwrap(), 1);
//! assert_eq!(doc.at("b").unwrap().size(), 2);
//! ```

mod builder;
mod chars;
mod directive;
mod error;
mod event;
mod location;
mod node;
mod parser;
mod scalars;
mod scanner;
mod schema;
mod stream;
mod token;

pub use builder::*;
pub use error::*;
pub use event::*;
pub use location::*;
pub use node::*;
pub use parser::*;
pub use scanner::*;
pub use token::*;

pub(crate) use location::SpannedExt;
