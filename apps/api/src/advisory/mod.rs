// Career consultation: CV analysis and general advice.

pub mod extractor;
pub mod prompts;
pub mod responder;

pub use extractor::{DocumentTextExtractor, ExtractionError, PdfTextExtractor};
pub use responder::AdvisoryResponder;
