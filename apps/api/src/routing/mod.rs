// Query routing: keyword/model classification, dispatch and the answer
// envelope shown to the user.

pub mod classifier;
pub mod envelope;
pub mod intent;
pub mod prompts;
pub mod router;

pub use classifier::IntentClassifier;
pub use intent::{Intent, KeywordScoreTable};
pub use router::IntentRouter;
