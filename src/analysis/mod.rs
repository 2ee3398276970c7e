pub mod content;
pub mod signals;

#[cfg(test)]
mod tests;

pub use content::{ContentProfile, InternalLink, KeywordProfile, LinkContext};
pub use signals::PageSignals;
