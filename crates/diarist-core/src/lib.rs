//! Diarist Core Library
//!
//! Index, retrieval and insight logic for a folder of markdown journal
//! entries and the AI outputs generated from them.

pub mod config;
pub mod error;
pub mod format;
pub mod index;
pub mod insights;
pub mod journal;
pub mod logging;
pub mod search;
pub mod text;
