//! Profile adapters for candidate loading

mod documents;
mod in_memory;
mod json_store;

pub use documents::{AnalysisReport, CandidateFile, ProfileDocument, TraitRecord};
pub use in_memory::InMemoryCandidateSource;
pub use json_store::JsonProfileStore;
