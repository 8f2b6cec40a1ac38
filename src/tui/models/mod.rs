//! # Models
//!
//! Plain state owned by the event loop: input fields and the form model.

pub mod field;
pub mod field_set;
pub mod model;

pub use field::Field;
pub use field_set::{
    InputFieldSet, BODY_FIELD, FIELD_COUNT, FIELD_LABELS, METHOD_FIELD, URL_FIELD,
};
pub use model::Model;
