//! CLI commands for diarist

pub mod ask;
pub mod dispatch;
pub mod index;
pub mod insights;
pub mod output;
pub mod patterns;
pub mod remove;
pub mod search;
pub mod select;
pub mod stats;
pub mod switch;
pub mod update;
