use crate::config::ScoringConfig;
use crate::models::{EnrichedLead, ScoreBreakdown, ScoredLead, Signal, SignalHit};

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|keyword| haystack.contains(keyword.to_lowercase().as_str()))
}

fn is_yes(value: &str) -> bool {
    value == "Yes"
}

/// Evaluate one signal against the lead. Signals never depend on each other.
pub fn signal_matches(signal: Signal, lead: &EnrichedLead, config: &ScoringConfig) -> bool {
    let raw = &lead.raw;
    match signal {
        Signal::RoleFit => {
            let title = raw.title.to_lowercase();
            contains_any(&title, &config.role_fit.seniority_keywords)
                && contains_any(&title, &config.role_fit.focus_keywords)
        }
        Signal::CompanyIntent => config
            .company_intent
            .funding_stages
            .iter()
            .any(|stage| *stage == raw.funding_stage),
        Signal::TechnographicFit => is_yes(&raw.uses_invitro_or_nams),
        Signal::LocationHub => lead.in_biotech_hub.is_yes(),
        Signal::ScientificIntent => {
            is_yes(&raw.published_recent_paper)
                && raw.paper_topic.as_deref().is_some_and(|topic| {
                    contains_any(&topic.to_lowercase(), &config.scientific_intent.topic_keywords)
                })
        }
    }
}

pub fn signal_points(signal: Signal, config: &ScoringConfig) -> u32 {
    match signal {
        Signal::RoleFit => config.role_fit.points,
        Signal::CompanyIntent => config.company_intent.points,
        Signal::TechnographicFit => config.technographic.points,
        Signal::LocationHub => config.location_hub.points,
        Signal::ScientificIntent => config.scientific_intent.points,
    }
}

pub fn score_breakdown(lead: &EnrichedLead, config: &ScoringConfig) -> ScoreBreakdown {
    let hits: Vec<SignalHit> = Signal::ALL
        .into_iter()
        .map(|signal| {
            let matched = signal_matches(signal, lead, config);
            SignalHit {
                signal,
                matched,
                points: if matched {
                    signal_points(signal, config)
                } else {
                    0
                },
            }
        })
        .collect();

    let raw_total = hits
        .iter()
        .map(|hit| hit.points)
        .fold(0, u32::saturating_add);
    ScoreBreakdown {
        hits,
        raw_total,
        score: raw_total.min(config.max_score),
    }
}

/// Propensity-to-buy score, clamped to `config.max_score`.
pub fn score_lead(lead: &EnrichedLead, config: &ScoringConfig) -> u32 {
    score_breakdown(lead, config).score
}

pub fn score_leads(leads: Vec<EnrichedLead>, config: &ScoringConfig) -> Vec<ScoredLead> {
    leads
        .into_iter()
        .map(|lead| ScoredLead {
            probability_score: score_lead(&lead, config),
            lead,
        })
        .collect()
}
