//! Lead enrichment, propensity scoring and ranking for life-science sales
//! leads loaded from CSV.

pub mod config;
pub mod enrich;
pub mod error;
pub mod filter;
pub mod models;
pub mod pipeline;
pub mod rank;
pub mod report;
pub mod scoring;
pub mod table;

pub use config::ScoringConfig;
pub use error::LeadError;
pub use filter::LeadFilter;
pub use pipeline::process_leads;
pub use table::{LeadTable, RankedTable, RankedView};
