//! Entity to model mappers
//!
//! Conversions between domain entities (bugbot-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - Enum conversions in both directions for binding parameters

mod bug;
mod guild;
mod media;
mod user;
