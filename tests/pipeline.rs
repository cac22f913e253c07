use std::collections::HashSet;
use std::path::PathBuf;

use lead_qualification::models::{Flag, RankedLead};
use lead_qualification::{
    process_leads, LeadError, LeadFilter, LeadTable, RankedTable, ScoringConfig,
};

const HEADER: &str = "name,title,company,person_location,company_hq,funding_stage,\
uses_invitro_or_nams,published_recent_paper,paper_topic,source";

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/leads_raw.csv")
}

fn run(rows: &[&str]) -> RankedTable {
    let data = format!("{HEADER}\n{}\n", rows.join("\n"));
    let table = LeadTable::from_reader(data.as_bytes()).unwrap();
    process_leads(&table, &ScoringConfig::default())
}

fn find<'a>(table: &'a RankedTable, name: &str) -> &'a RankedLead {
    table
        .leads
        .iter()
        .find(|lead| lead.lead.raw.name == name)
        .unwrap()
}

#[test]
fn role_and_science_match_scores_the_ceiling() {
    let table = run(&[
        "Dr Jane Roe,Director of Toxicology,AcmeBio,Boston,Boston,Series A,\
         Yes,Yes,Hepatic DILI study,conference",
    ]);
    let lead = &table.leads[0];
    assert_eq!(lead.lead.email, "jane.roe@acmebio.com");
    assert_eq!(lead.lead.is_remote, Flag::No);
    assert_eq!(lead.lead.in_biotech_hub, Flag::Yes);
    assert_eq!(lead.probability_score, 100);
    assert_eq!(lead.rank, 1);
}

#[test]
fn lead_without_signals_scores_zero() {
    let table = run(&["Avery Lee,Analyst,Helix,Nowhere,Nowhere,Seed,No,No,,web"]);
    assert_eq!(table.leads[0].probability_score, 0);
    assert_eq!(table.leads[0].lead.in_biotech_hub, Flag::No);
}

#[test]
fn single_token_name_gets_empty_email() {
    let table = run(&[
        "Madonna,Analyst,Helix,Nowhere,Nowhere,Seed,No,No,,web",
        "Avery Lee,Analyst,Helix,Nowhere,Nowhere,Seed,No,No,,web",
    ]);
    assert_eq!(find(&table, "Madonna").lead.email, "");
    assert_eq!(find(&table, "Avery Lee").lead.email, "avery.lee@helix.com");
}

#[test]
fn null_topic_with_recent_paper_is_not_scientific_intent() {
    let table = run(&["Avery Lee,Analyst,Helix,Nowhere,Nowhere,Seed,No,Yes,,web"]);
    assert_eq!(table.leads[0].lead.raw.paper_topic, None);
    assert_eq!(table.leads[0].probability_score, 0);
}

#[test]
fn sample_table_ranks_as_expected() {
    let table = LeadTable::from_path(&sample_path()).unwrap();
    let ranked = process_leads(&table, &ScoringConfig::default());

    let order: Vec<(&str, u32)> = ranked
        .leads
        .iter()
        .map(|lead| (lead.lead.raw.name.as_str(), lead.probability_score))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Dr Rahul Verma", 100),
            ("Dr Lucia Romero", 100),
            ("Michael Chen", 95),
            ("Dr James Okafor", 85),
            ("Dr Sarah Klein", 75),
            ("Priya Nair", 55),
            ("Dr Emily Watson", 30),
            ("Madonna", 30),
            ("Anna Kowalski", 0),
            ("Tom Becker", 0),
        ]
    );
    assert_eq!(find(&ranked, "Dr Lucia Romero").lead.is_remote, Flag::Yes);
    assert_eq!(
        find(&ranked, "Priya Nair").lead.email,
        "priya.nair@spheroidlabs.com"
    );
}

#[test]
fn pipeline_invariants_hold_on_sample() {
    let table = LeadTable::from_path(&sample_path()).unwrap();
    let ranked = process_leads(&table, &ScoringConfig::default());

    assert_eq!(ranked.len(), table.len());
    assert!(ranked
        .leads
        .iter()
        .all(|lead| lead.probability_score <= 100));

    let ranks: HashSet<usize> = ranked.leads.iter().map(|lead| lead.rank).collect();
    let expected: HashSet<usize> = (1..=table.len()).collect();
    assert_eq!(ranks, expected);

    assert!(ranked
        .leads
        .windows(2)
        .all(|pair| pair[0].probability_score >= pair[1].probability_score));
}

#[test]
fn pipeline_is_idempotent_and_leaves_input_untouched() {
    let table = LeadTable::from_path(&sample_path()).unwrap();
    let before = table.clone();
    let config = ScoringConfig::default();

    let first = process_leads(&table, &config);
    let second = process_leads(&table, &config);

    assert_eq!(first, second);
    assert_eq!(table, before);
}

#[test]
fn equal_scores_keep_input_order() {
    let table = run(&[
        "Cara One,Analyst,Helix,Nowhere,Nowhere,Seed,No,No,,web",
        "Dana Two,Director of Safety,Helix,Nowhere,Nowhere,Seed,No,No,,web",
        "Eli Three,Analyst,Helix,Nowhere,Nowhere,Seed,No,No,,web",
        "Fay Four,Analyst,Helix,Nowhere,Nowhere,Seed,No,No,,web",
    ]);
    let order: Vec<&str> = table.leads.iter().map(|lead| lead.lead.raw.name.as_str()).collect();
    assert_eq!(order, vec!["Dana Two", "Cara One", "Eli Three", "Fay Four"]);
}

#[test]
fn missing_column_fails_before_any_output() {
    let data = "name,title,company,person_location,funding_stage,\
uses_invitro_or_nams,published_recent_paper,paper_topic,source\nA B,t,c,l,f,No,No,,s\n";
    let err = LeadTable::from_reader(data.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        LeadError::MissingColumn { column: "company_hq" }
    ));
    assert_eq!(
        err.to_string(),
        "lead table is missing required column 'company_hq'"
    );
}

#[test]
fn export_round_trips_filtered_view() {
    let data = "crm_id,name,title,company,person_location,company_hq,funding_stage,\
uses_invitro_or_nams,published_recent_paper,paper_topic,source
17,Dr Jane Roe,Director of Toxicology,AcmeBio,Boston,Boston,Series A,\
Yes,Yes,Hepatic DILI study,conference
18,Avery Lee,Analyst,Helix,Denver,Denver,Seed,No,No,,web
";
    let table = LeadTable::from_reader(data.as_bytes()).unwrap();
    let ranked = process_leads(&table, &ScoringConfig::default());
    let view = LeadFilter::new(50, None).apply(&ranked);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("qualified_leads.csv");
    view.write_csv_path(&out).unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    let mut lines = written.lines();
    assert_eq!(
        lines.next().unwrap(),
        "crm_id,name,title,company,person_location,company_hq,funding_stage,\
uses_invitro_or_nams,published_recent_paper,paper_topic,source,\
email,is_remote,in_biotech_hub,probability_score,rank"
    );
    assert_eq!(
        lines.next().unwrap(),
        "17,Dr Jane Roe,Director of Toxicology,AcmeBio,Boston,Boston,Series A,Yes,Yes,\
Hepatic DILI study,conference,jane.roe@acmebio.com,No,Yes,100,1"
    );
    assert!(lines.next().is_none());

    let reloaded = LeadTable::from_path(&out).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.leads[0].passthrough, vec!["17"]);
    let rescored = process_leads(&reloaded, &ScoringConfig::default());
    assert_eq!(rescored.leads[0].probability_score, 100);
}

#[test]
fn custom_hub_list_changes_enrichment_and_score() {
    let config = ScoringConfig::from_toml_str(r#"biotech_hubs = ["Denver"]"#).unwrap();
    let data = format!("{HEADER}\nAvery Lee,Analyst,Helix,Denver,Denver,Seed,No,No,,web\n");
    let table = LeadTable::from_reader(data.as_bytes()).unwrap();
    let ranked = process_leads(&table, &config);
    assert_eq!(ranked.leads[0].lead.in_biotech_hub, Flag::Yes);
    assert_eq!(ranked.leads[0].probability_score, 10);
}
