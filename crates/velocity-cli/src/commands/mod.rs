//! Command handlers.
//!
//! `create` is the default action; `completions` short-circuits it when
//! `--completions <SHELL>` is passed.

pub mod completions;
pub mod create;
