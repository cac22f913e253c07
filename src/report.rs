use std::fmt::Write;

use chrono::NaiveDate;

use crate::config::ScoringConfig;
use crate::models::{ScoreBand, Signal, SignalSummary};
use crate::scoring::{score_breakdown, signal_points};
use crate::table::RankedView;

pub fn summarize_by_band(view: &RankedView<'_>) -> Vec<(ScoreBand, usize)> {
    ScoreBand::ALL
        .into_iter()
        .map(|band| {
            let count = view
                .leads
                .iter()
                .filter(|lead| ScoreBand::of(lead.probability_score) == band)
                .count();
            (band, count)
        })
        .collect()
}

pub fn summarize_by_signal(view: &RankedView<'_>, config: &ScoringConfig) -> Vec<SignalSummary> {
    let mut summaries: Vec<SignalSummary> = Signal::ALL
        .into_iter()
        .map(|signal| SignalSummary { signal, count: 0 })
        .collect();

    for lead in &view.leads {
        let breakdown = score_breakdown(&lead.lead, config);
        for signal in breakdown.matched() {
            if let Some(summary) = summaries
                .iter_mut()
                .find(|summary| summary.signal == signal)
            {
                summary.count += 1;
            }
        }
    }

    summaries.sort_by(|a, b| b.count.cmp(&a.count));
    summaries
}

pub fn build_report(
    view: &RankedView<'_>,
    config: &ScoringConfig,
    filter_label: Option<&str>,
    generated_on: NaiveDate,
) -> String {
    let bands = summarize_by_band(view);
    let signals = summarize_by_signal(view, config);

    let mut output = String::new();
    let scope_label = filter_label.unwrap_or("all leads");

    let _ = writeln!(output, "# Lead Qualification Report");
    let _ = writeln!(
        output,
        "Generated on {} for {} ({} leads)",
        generated_on,
        scope_label,
        view.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Score Bands");

    if view.is_empty() {
        let _ = writeln!(output, "No leads matched this view.");
    } else {
        for (band, count) in bands.iter() {
            let _ = writeln!(output, "- {}: {} leads", band.label(), count);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Signal Mix");

    if view.is_empty() {
        let _ = writeln!(output, "No leads matched this view.");
    } else {
        for summary in signals.iter() {
            let _ = writeln!(
                output,
                "- {} (+{}): {} leads",
                summary.signal.label(),
                signal_points(summary.signal, config),
                summary.count
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Ranked Leads");

    if view.is_empty() {
        let _ = writeln!(output, "No leads matched this view.");
    } else {
        for lead in view.leads.iter().take(10) {
            let breakdown = score_breakdown(&lead.lead, config);
            let reasons: Vec<&str> = breakdown.matched().map(Signal::label).collect();
            let raw = &lead.lead.raw;
            let _ = writeln!(
                output,
                "{}. {} ({}, {}) score {} [{}]",
                lead.rank,
                raw.name,
                raw.title,
                raw.company,
                lead.probability_score,
                if reasons.is_empty() {
                    "no signals".to_string()
                } else {
                    reasons.join(", ")
                }
            );
        }
    }

    let missing_email: Vec<&str> = view
        .leads
        .iter()
        .filter(|lead| lead.lead.email.is_empty())
        .map(|lead| lead.lead.raw.name.as_str())
        .collect();

    if !missing_email.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Leads Without Inferred Email");
        for name in missing_email {
            let name = if name.is_empty() { "(unnamed)" } else { name };
            let _ = writeln!(output, "- {}", name);
        }
    }

    output
}
