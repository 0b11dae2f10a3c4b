//! Insight types on both sides of the trust boundary.
//!
//! [`CandidateInsight`] is what the generator claims; [`ValidatedInsight`] is
//! what the validator vouches for. The two are deliberately separate types so
//! that generator output can never reach a consumer without passing through
//! validation.

mod candidate;
mod validated;

pub use candidate::{CandidateInsight, candidates_from_values, parse_candidates};
pub use validated::{Confidence, ValidatedInsight};
