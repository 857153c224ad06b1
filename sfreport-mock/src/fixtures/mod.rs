//! Canned service bodies shaped like real responses.

pub mod login;
pub mod report;
