//! Expand JSDoc typedef references into flattened property lists.
//!
//! Given the doclets a JSDoc parser produced (`jsdoc -X`), every typedef
//! that inherits from or refers to other typedefs gets their properties
//! pulled in under dotted names, so a renderer can show the full shape of
//! a type in one table:
//!
//! ```text
//! @typedef {Base} Options          Options
//! @property {Point} origin   =>      origin          object
//!                                    origin.x        number
//!                                    origin.y        number
//!                                    ...Base's properties
//! ```

pub mod config;
pub mod error;
pub mod expand;
pub mod index;
pub mod logging;
pub mod merge;
pub mod model;
pub mod resolve;
pub mod source;

pub use config::{Config, ExpandOptions};
pub use error::{Error, Result};
pub use expand::{expand_property, expand_typedef, expand_typedef_with, expand_typedefs};
pub use index::{build_index, load_auxiliary, TypedefIndex};
pub use model::{DocRecord, Kind, Property, TypeRef, TypeSpec};
pub use resolve::resolve_type_sources;
pub use source::{parse_records, CommandSource, DispatchSource, JsonSource, RecordSource};
