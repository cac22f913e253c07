use std::fmt;

use serde::Serialize;

/// Raw input columns every lead table must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    Name,
    Title,
    Company,
    PersonLocation,
    CompanyHq,
    FundingStage,
    UsesInvitroOrNams,
    PublishedRecentPaper,
    PaperTopic,
    Source,
}

impl LeadField {
    pub const ALL: [LeadField; 10] = [
        LeadField::Name,
        LeadField::Title,
        LeadField::Company,
        LeadField::PersonLocation,
        LeadField::CompanyHq,
        LeadField::FundingStage,
        LeadField::UsesInvitroOrNams,
        LeadField::PublishedRecentPaper,
        LeadField::PaperTopic,
        LeadField::Source,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            LeadField::Name => "name",
            LeadField::Title => "title",
            LeadField::Company => "company",
            LeadField::PersonLocation => "person_location",
            LeadField::CompanyHq => "company_hq",
            LeadField::FundingStage => "funding_stage",
            LeadField::UsesInvitroOrNams => "uses_invitro_or_nams",
            LeadField::PublishedRecentPaper => "published_recent_paper",
            LeadField::PaperTopic => "paper_topic",
            LeadField::Source => "source",
        }
    }

    pub fn from_column_name(column: &str) -> Option<LeadField> {
        LeadField::ALL
            .into_iter()
            .find(|field| field.column_name() == column)
    }
}

/// Columns appended by the pipeline, in output order.
pub const DERIVED_COLUMNS: [&str; 5] = [
    "email",
    "is_remote",
    "in_biotech_hub",
    "probability_score",
    "rank",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Flag {
    Yes,
    No,
}

impl Flag {
    pub fn from_bool(value: bool) -> Flag {
        if value {
            Flag::Yes
        } else {
            Flag::No
        }
    }

    pub fn is_yes(self) -> bool {
        self == Flag::Yes
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Flag::Yes => "Yes",
            Flag::No => "No",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawLead {
    pub name: String,
    pub title: String,
    pub company: String,
    pub person_location: String,
    pub company_hq: String,
    pub funding_stage: String,
    pub uses_invitro_or_nams: String,
    pub published_recent_paper: String,
    pub paper_topic: Option<String>,
    pub source: String,
    /// Values of columns the pipeline does not read, aligned with the
    /// table's passthrough column list.
    #[serde(skip)]
    pub passthrough: Vec<String>,
}

impl RawLead {
    pub fn field(&self, field: LeadField) -> &str {
        match field {
            LeadField::Name => &self.name,
            LeadField::Title => &self.title,
            LeadField::Company => &self.company,
            LeadField::PersonLocation => &self.person_location,
            LeadField::CompanyHq => &self.company_hq,
            LeadField::FundingStage => &self.funding_stage,
            LeadField::UsesInvitroOrNams => &self.uses_invitro_or_nams,
            LeadField::PublishedRecentPaper => &self.published_recent_paper,
            LeadField::PaperTopic => self.paper_topic.as_deref().unwrap_or(""),
            LeadField::Source => &self.source,
        }
    }

    pub fn set_field(&mut self, field: LeadField, value: String) {
        match field {
            LeadField::Name => self.name = value,
            LeadField::Title => self.title = value,
            LeadField::Company => self.company = value,
            LeadField::PersonLocation => self.person_location = value,
            LeadField::CompanyHq => self.company_hq = value,
            LeadField::FundingStage => self.funding_stage = value,
            LeadField::UsesInvitroOrNams => self.uses_invitro_or_nams = value,
            LeadField::PublishedRecentPaper => self.published_recent_paper = value,
            LeadField::PaperTopic => {
                self.paper_topic = if value.trim().is_empty() {
                    None
                } else {
                    Some(value)
                }
            }
            LeadField::Source => self.source = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedLead {
    #[serde(flatten)]
    pub raw: RawLead,
    pub email: String,
    pub is_remote: Flag,
    pub in_biotech_hub: Flag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredLead {
    #[serde(flatten)]
    pub lead: EnrichedLead,
    pub probability_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedLead {
    pub rank: usize,
    pub probability_score: u32,
    #[serde(flatten)]
    pub lead: EnrichedLead,
}

/// Whether one scoring signal fired and what it contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalHit {
    pub signal: Signal,
    pub matched: bool,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    RoleFit,
    CompanyIntent,
    TechnographicFit,
    LocationHub,
    ScientificIntent,
}

impl Signal {
    pub const ALL: [Signal; 5] = [
        Signal::RoleFit,
        Signal::CompanyIntent,
        Signal::TechnographicFit,
        Signal::LocationHub,
        Signal::ScientificIntent,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Signal::RoleFit => "role fit",
            Signal::CompanyIntent => "company intent",
            Signal::TechnographicFit => "technographic fit",
            Signal::LocationHub => "location hub",
            Signal::ScientificIntent => "scientific intent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub hits: Vec<SignalHit>,
    /// Sum of contributions before the ceiling is applied.
    pub raw_total: u32,
    pub score: u32,
}

impl ScoreBreakdown {
    pub fn matched(&self) -> impl Iterator<Item = Signal> + '_ {
        self.hits.iter().filter(|hit| hit.matched).map(|hit| hit.signal)
    }
}

#[derive(Debug, Clone)]
pub struct SignalSummary {
    pub signal: Signal,
    pub count: usize,
}

/// Coarse buckets used when summarising a ranked view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScoreBand {
    Hot,
    Warm,
    Cool,
    Unqualified,
}

impl ScoreBand {
    pub const ALL: [ScoreBand; 4] = [
        ScoreBand::Hot,
        ScoreBand::Warm,
        ScoreBand::Cool,
        ScoreBand::Unqualified,
    ];

    pub fn of(score: u32) -> ScoreBand {
        match score {
            80.. => ScoreBand::Hot,
            50..=79 => ScoreBand::Warm,
            1..=49 => ScoreBand::Cool,
            0 => ScoreBand::Unqualified,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Hot => "hot (80-100)",
            ScoreBand::Warm => "warm (50-79)",
            ScoreBand::Cool => "cool (1-49)",
            ScoreBand::Unqualified => "unqualified (0)",
        }
    }
}
