pub mod category;
pub mod corpus;
pub mod provider;

// Re-export the main types for convenience
pub use category::Category;
pub use corpus::{Abbreviation, ContentError, Corpus};
pub use provider::{ContentProvider, ScriptedSource, SnippetSource};
