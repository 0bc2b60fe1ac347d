#![deny(unsafe_code)]

//! Column resolution.
//!
//! Maps the headers of an arbitrary source table onto the report's field
//! roles, either by name (two-phase exact-then-substring matching over ordered
//! candidate lists) or by fixed column positions.

mod candidates;
mod error;
mod positional;
mod resolver;
mod suggest;

pub use candidates::Candidates;
pub use error::{MappingError, Result};
pub use positional::{PositionalLayout, column_letter, parse_column_letter, resolve_positional};
pub use resolver::{
    MappingStrategy, MatchKind, RoleMatch, match_role, normalize_header, resolve, resolve_by_name,
    resolve_role,
};
pub use suggest::closest_header;
