//! Template fetcher adapters.

mod git;

pub use git::GitTemplateFetcher;
