pub mod generation;

pub use generation::{GenerationOutcome, GenerationRequest, GenerationService};
