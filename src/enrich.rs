use crate::config::ScoringConfig;
use crate::models::{EnrichedLead, Flag, RawLead};

const COURTESY_PREFIX: &str = "Dr ";

/// Guess a work address as `first.rest@company.com`.
///
/// Returns an empty string when the name has no separable first token or the
/// company is blank; this is a placeholder, never a verified mailbox.
pub fn infer_email(name: &str, company: &str) -> String {
    let name = name.trim_start();
    let name = name.strip_prefix(COURTESY_PREFIX).unwrap_or(name);
    let name = name.trim().to_lowercase();
    let Some((first, rest)) = name.split_once(char::is_whitespace) else {
        return String::new();
    };

    let domain = company.replace(' ', "").to_lowercase();
    if domain.is_empty() {
        return String::new();
    }

    format!("{first}.{rest}@{domain}.com")
}

pub fn is_remote(lead: &RawLead) -> Flag {
    Flag::from_bool(lead.person_location != lead.company_hq)
}

pub fn in_biotech_hub(lead: &RawLead, hubs: &[String]) -> Flag {
    let is_hub = |place: &str| hubs.iter().any(|hub| hub == place);
    Flag::from_bool(is_hub(&lead.person_location) || is_hub(&lead.company_hq))
}

pub fn enrich_lead(lead: &RawLead, config: &ScoringConfig) -> EnrichedLead {
    EnrichedLead {
        email: infer_email(&lead.name, &lead.company),
        is_remote: is_remote(lead),
        in_biotech_hub: in_biotech_hub(lead, &config.biotech_hubs),
        raw: lead.clone(),
    }
}

/// Enrich every lead, preserving row count and order.
pub fn enrich_leads(leads: &[RawLead], config: &ScoringConfig) -> Vec<EnrichedLead> {
    leads.iter().map(|lead| enrich_lead(lead, config)).collect()
}
