//! Editor-facing completion and hover.
//!
//! - `registry`   : Metadata providers per editor model.
//! - `keywords`   : Keyword table and its priorities.
//! - `snippet`    : Canned statement snippets.
//! - `completion` : Completion list for a cursor position.
//! - `hover`      : Description of the word under the pointer.

pub mod completion;
pub mod hover;
pub mod keywords;
pub mod registry;
pub mod snippet;

pub use completion::{CompletionItem, CompletionKind};
pub use hover::Hover;
pub use keywords::{HIGH_PRIORITY_KEYWORDS, KEYWORDS};
pub use registry::{ProviderRegistry, RegistryLookup, SharedProvider};
pub use snippet::{SNIPPETS, Snippet};

mod completion_tests;
