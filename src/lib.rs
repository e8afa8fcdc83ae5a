//! Romanized Japanese corpus builder.
//!
//! Two stages: [`fetch`] appends raw encyclopedia prose to a line-oriented
//! store, and [`corpus`] compiles that store into an append-only output
//! store: Hepburn romanization via a [`reading::ReadingConverter`],
//! character filtering, then ordered Hepburn → Nihon-shiki substitution.

pub mod corpus;
pub mod fetch;
pub mod reading;
#[cfg(feature = "cli")]
pub mod trace_init;
pub mod unicode;
