//! CLI command implementations.

pub mod ask;
pub mod circuits;
pub mod common;
pub mod create;
pub mod examples;
pub mod parse;
pub mod scan;
pub mod session;
pub mod version;
