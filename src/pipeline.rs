use tracing::debug;

use crate::config::ScoringConfig;
use crate::enrich::enrich_leads;
use crate::rank::rank_leads;
use crate::scoring::score_leads;
use crate::table::{LeadTable, RankedTable};

/// Enrich, score and rank a raw lead table.
///
/// The raw table is only borrowed, so a cached copy can be run again (for
/// example after a config change) without reloading it.
pub fn process_leads(table: &LeadTable, config: &ScoringConfig) -> RankedTable {
    let enriched = enrich_leads(&table.leads, config);
    debug!(rows = enriched.len(), "enriched leads");

    let scored = score_leads(enriched, config);
    debug!(
        rows = scored.len(),
        at_ceiling = scored
            .iter()
            .filter(|lead| lead.probability_score == config.max_score)
            .count(),
        "scored leads"
    );

    let leads = rank_leads(scored);
    debug!(rows = leads.len(), "ranked leads");

    RankedTable {
        columns: table.columns.clone(),
        leads,
    }
}
