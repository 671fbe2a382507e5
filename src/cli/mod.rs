//! CLI command handlers

pub mod commands;

pub use commands::{convert, resolve_sheet_choice, sample, sheets, ConvertArgs, SheetChoice};
