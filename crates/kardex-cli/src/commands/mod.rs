//! Command handlers for the kardex CLI

pub mod config;
pub mod item;
pub mod report;
