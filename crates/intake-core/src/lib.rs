//! intake-core
//!
//! Questionnaire engine: visibility, requirements, validation, progress and the form state store.
//! Depends on intake-domain. No CLI, no terminal I/O, no direct filesystem access.

pub mod error;
pub mod gateway;
pub mod progress;
pub mod requirements;
pub mod session;
pub mod store;
pub mod time;
pub mod validation;
pub mod visibility;

pub use error::{CoreError, SaveError};
pub use gateway::*;
pub use progress::*;
pub use requirements::{visible_fields, Gate, Requirement, REQUIREMENTS};
pub use session::*;
pub use store::*;
pub use time::{Clock, SystemClock};
pub use validation::*;
pub use visibility::*;
