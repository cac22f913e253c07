use crate::models::RankedLead;
use crate::table::{RankedTable, RankedView};

/// Display-side row selection over a ranked table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFilter {
    /// Inclusive lower bound on `probability_score`.
    pub min_score: u32,
    /// Substring searched case-insensitively across every output column.
    pub query: Option<String>,
}

impl LeadFilter {
    pub fn new(min_score: u32, query: Option<&str>) -> Self {
        Self {
            min_score,
            query: query.map(str::to_string),
        }
    }

    /// Rows passing the filter, still in rank order. The table is untouched.
    pub fn apply<'a>(&self, table: &'a RankedTable) -> RankedView<'a> {
        let all = table.view();
        let query = self
            .query
            .as_deref()
            .map(str::to_lowercase)
            .filter(|query| !query.is_empty());
        let leads = all
            .leads
            .iter()
            .copied()
            .filter(|lead| self.matches(&all, lead, query.as_deref()))
            .collect();
        RankedView {
            columns: all.columns,
            leads,
        }
    }

    fn matches<'a>(
        &self,
        view: &RankedView<'a>,
        lead: &'a RankedLead,
        query: Option<&str>,
    ) -> bool {
        if lead.probability_score < self.min_score {
            return false;
        }
        let Some(query) = query else {
            return true;
        };
        row_text(view, lead).contains(query)
    }
}

/// Lower-cased cell values joined with single spaces.
fn row_text<'a>(view: &RankedView<'a>, lead: &'a RankedLead) -> String {
    view.row_values(lead)
        .iter()
        .map(|value| value.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
