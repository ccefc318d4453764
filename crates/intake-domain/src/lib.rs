//! intake-domain
//!
//! Pure questionnaire models (Answer Set, option enums, selection sets, sections).
//! No I/O, no CLI, no storage. Only data types and core enums.

#[macro_use]
mod macros;

pub mod answers;
pub mod error;
pub mod fields;
pub mod options;
pub mod section;
pub mod selection;

pub use answers::*;
pub use error::DomainError;
pub use fields::*;
pub use options::*;
pub use section::*;
pub use selection::OptionSet;
