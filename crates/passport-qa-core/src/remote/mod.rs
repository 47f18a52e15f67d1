//! Model-agnostic helpers for the remote content assessor: instruction text
//! and best-effort reply parsing.
//!
//! Adapters call [`build_instruction`] to phrase the request and
//! [`parse_reply`] to turn free text back into a [`ContentAssessment`].

mod extract;
mod prompt;

pub use extract::{extract_json_object, parse_reply};
pub use prompt::build_instruction;
