pub mod candidates;
pub mod enrichment;
pub mod history;
pub mod ingestion;
pub mod providers;
pub mod suggestions;

pub use enrichment::SuggestionEnricher;
