use log::{info, warn};

use portfolio_analytics::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

pub mod io_csv;

#[derive(Debug, Snafu)]
pub enum PulseError {
    #[snafu(display("Error opening csv file {path}"))]
    CsvOpen { source: csv::Error, path: String },

    #[snafu(display("Error decoding a csv record in {path}"))]
    CsvRecord { source: csv::Error, path: String },

    #[snafu(display("Error reading summary file {path}"))]
    OpeningSummary {
        source: std::io::Error,
        path: String,
    },

    #[snafu(display("Error parsing summary file {path}"))]
    ParsingSummary {
        source: serde_json::Error,
        path: String,
    },

    #[snafu(display("Error serializing the summary"))]
    SerializingSummary { source: serde_json::Error },

    #[snafu(display("Error writing summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type PulseResult<T> = Result<T, PulseError>;

/// Loads the three tables, runs the analytics pipeline once and emits the
/// summary. The tables are reloaded from storage on every invocation, so a
/// file that changed underneath us since the last run is simply picked up.
pub fn run_report(args: &Args) -> PulseResult<()> {
    let data_dir = Path::new(args.data_dir.as_str());
    let people_path = resolve_table_path(args.people.as_deref(), data_dir, "people.csv");
    let companies_path = resolve_table_path(args.companies.as_deref(), data_dir, "companies.csv");
    let portfolios_path =
        resolve_table_path(args.portfolios.as_deref(), data_dir, "model_portfolios.csv");

    let people = io_csv::read_people(&people_path)?;
    let companies = io_csv::read_companies(&companies_path)?;
    let entries = io_csv::read_portfolios(&portfolios_path)?;

    let report = run_portfolio_stats(&people, &companies, &entries);
    log_digest(&report);

    let summary = build_summary_js(&report, people.len(), companies.len(), entries.len());
    let pretty_js_summary =
        serde_json::to_string_pretty(&summary).context(SerializingSummarySnafu {})?;

    match args.out.as_deref() {
        None | Some("stdout") => println!("{}", pretty_js_summary),
        Some(path) => {
            fs::write(path, &pretty_js_summary).context(WritingSummarySnafu {
                path: path.to_string(),
            })?;
            info!("Summary written to {}", path);
        }
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = args.reference.as_deref() {
        let summary_ref = read_summary(reference_path)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(SerializingSummarySnafu {})?;
        if pretty_js_summary_ref != pretty_js_summary {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_summary.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary");
        }
        info!("Summary matches the reference {}", reference_path);
    }

    Ok(())
}

fn resolve_table_path(explicit: Option<&str>, data_dir: &Path, file_name: &str) -> PathBuf {
    match explicit {
        Some(p) => PathBuf::from(p),
        None => data_dir.join(file_name),
    }
}

fn read_summary(path: &str) -> PulseResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningSummarySnafu {
        path: path.to_string(),
    })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingSummarySnafu {
        path: path.to_string(),
    })?;
    Ok(js)
}

fn log_digest(report: &AnalyticsReport) {
    info!("Votes cast: {}", report.votes.len());
    info!(
        "Mean votes per company: {:.2}",
        report.mean_votes_per_company
    );
    for cv in report.company_votes.iter() {
        info!("  {:>4} {}", cv.votes, cv.company_name);
    }
    for ss in report.stage_summary.iter() {
        info!(
            "Stage {}: {} companies, {:.2} mean votes",
            ss.stage, ss.companies, ss.mean_votes
        );
    }
    info!("High consensus companies: {}", report.consensus.high.len());
    for e in report.consensus.high.iter() {
        info!(
            "  {:>5.1}% {} ({} votes)",
            e.vote_percentage, e.company_name, e.votes
        );
    }
    info!(
        "Low consensus companies: {} (showing up to {})",
        report.consensus.low.len(),
        LOW_CONSENSUS_DISPLAY_ROWS
    );
    for e in report.consensus.low.iter().take(LOW_CONSENSUS_DISPLAY_ROWS) {
        info!(
            "  {:>5.1}% {} ({} votes)",
            e.vote_percentage, e.company_name, e.votes
        );
    }
    match report.alignment.same_pod_percentage {
        Some(pct) => info!(
            "Alignment: {} same-pod / {} cross-pod pairs ({:.1}% same-pod)",
            report.alignment.same_pod, report.alignment.cross_pod, pct
        ),
        None => info!("Alignment: no (voter, lead) pair could be classified"),
    }
}

fn consensus_js(entries: &[ConsensusEntry]) -> Vec<JSValue> {
    entries
        .iter()
        .map(|e| {
            json!({
                "company": e.company_name,
                "votePercentage": e.vote_percentage,
                "votes": e.votes,
            })
        })
        .collect()
}

fn lead_js(leads: &[LeadVotes]) -> Vec<JSValue> {
    leads
        .iter()
        .map(|l| {
            json!({
                "name": l.lead_name,
                "companies": l.companies,
                "meanVotes": l.mean_votes,
            })
        })
        .collect()
}

fn group_js(groups: &[GroupVotes]) -> JSValue {
    let mut m: JSMap<String, JSValue> = JSMap::new();
    for g in groups.iter() {
        m.insert(g.group.clone(), json!(g.votes));
    }
    JSValue::Object(m)
}

fn build_summary_js(
    report: &AnalyticsReport,
    num_people: usize,
    num_companies: usize,
    num_entries: usize,
) -> JSValue {
    let mut company_votes: JSMap<String, JSValue> = JSMap::new();
    for cv in report.company_votes.iter() {
        company_votes.insert(cv.company_name.clone(), json!(cv.votes));
    }

    let stages: Vec<JSValue> = report
        .stage_summary
        .iter()
        .map(|ss| {
            json!({
                "stage": ss.stage.to_string(),
                "companies": ss.companies,
                "meanVotes": ss.mean_votes,
            })
        })
        .collect();

    json!({
        "config": {
            "people": num_people,
            "companies": num_companies,
            "portfolioEntries": num_entries,
        },
        "results": {
            "votes": report.votes.len(),
            "meanVotesPerCompany": report.mean_votes_per_company,
            "companyVotes": company_votes,
            "stages": stages,
            "leads": lead_js(&report.lead_votes),
            "coLeads": lead_js(&report.co_lead_votes),
            "designations": group_js(&report.designation_votes),
            "teams": group_js(&report.team_votes),
            "votingMatrix": {
                "players": report.voting_matrix.players,
                "companies": report.voting_matrix.companies,
                "cells": report.voting_matrix.cells,
            },
            "consensus": {
                "high": consensus_js(&report.consensus.high),
                "low": consensus_js(&report.consensus.low),
            },
            "alignment": {
                "samePod": report.alignment.same_pod,
                "crossPod": report.alignment.cross_pod,
                "samePodPercentage": report.alignment.same_pod_percentage,
            },
        }
    })
}
