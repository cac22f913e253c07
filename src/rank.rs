use crate::models::{RankedLead, ScoredLead};

/// Order leads by descending score and number them from 1.
///
/// The sort is stable: leads with equal scores keep their input order, so
/// ranks are deterministic for a given input order.
pub fn rank_leads(mut leads: Vec<ScoredLead>) -> Vec<RankedLead> {
    leads.sort_by(|a, b| b.probability_score.cmp(&a.probability_score));
    leads
        .into_iter()
        .enumerate()
        .map(|(position, scored)| RankedLead {
            rank: position + 1,
            probability_score: scored.probability_score,
            lead: scored.lead,
        })
        .collect()
}
