//! Questionnaire: the fixed, ordered set of ranking questions.
//!
//! - [`question::Question`]: one question with its ordered option list
//! - [`entities::Questionnaire`]: validated collection, loaded once per session
//! - [`entities::SectionStart`]: precomputed section boundaries for rendering

pub mod entities;
pub mod question;
