//! KTP field extraction module.

mod parser;
mod preprocess;
pub mod rules;

pub use parser::{ExtractionResult, KtpParser, KtpTextParser};
pub use preprocess::preprocess;
pub use rules::FieldExtractor;
