// Primitives for reading the three dashboard tables.

use std::path::Path;

use log::info;
use serde::Deserialize;
use snafu::prelude::*;

use portfolio_analytics::{split_names, Company, Person, PipelineStage, PortfolioEntry};

use crate::pulse::{CsvOpenSnafu, CsvRecordSnafu, PulseResult};

#[derive(Debug, Clone, Deserialize)]
struct PersonRow {
    person_id: u64,
    name: String,
    #[serde(default)]
    designation: String,
    #[serde(default)]
    team: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CompanyRow {
    company_id: u64,
    company_name: String,
    #[serde(default)]
    pipeline_stage: String,
    #[serde(default)]
    founder_archetype: String,
    #[serde(default)]
    sector: String,
    #[serde(default)]
    company_stage: String,
    #[serde(default)]
    cheque_type: String,
    #[serde(default)]
    lead: String,
    #[serde(default)]
    co_lead: String,
    #[serde(default)]
    deal_team: String,
}

#[derive(Debug, Clone, Deserialize)]
struct PortfolioRow {
    player_id: u64,
    player_name: String,
    #[serde(default)]
    designation: String,
    #[serde(default)]
    companies: String,
}

pub fn read_people(path: &Path) -> PulseResult<Vec<Person>> {
    let rows: Vec<PersonRow> = read_rows(path)?;
    Ok(rows
        .into_iter()
        .map(|r| Person {
            id: r.person_id,
            name: r.name.trim().to_string(),
            designation: r.designation.trim().to_string(),
            team: r.team.trim().to_string(),
        })
        .collect())
}

pub fn read_companies(path: &Path) -> PulseResult<Vec<Company>> {
    let rows: Vec<CompanyRow> = read_rows(path)?;
    Ok(rows
        .into_iter()
        .map(|r| Company {
            id: r.company_id,
            name: r.company_name.trim().to_string(),
            pipeline_stage: PipelineStage::parse(&r.pipeline_stage),
            founder_archetype: r.founder_archetype.trim().to_string(),
            sector: r.sector.trim().to_string(),
            company_stage: r.company_stage.trim().to_string(),
            cheque_type: r.cheque_type.trim().to_string(),
            leads: split_names(&r.lead),
            co_leads: split_names(&r.co_lead),
            deal_team: split_names(&r.deal_team),
        })
        .collect())
}

/// Reads the model-portfolios table, enforcing at most one entry per player.
/// The table is written with delete-then-insert semantics, so when a stray
/// duplicate shows up anyway, the last row wins.
pub fn read_portfolios(path: &Path) -> PulseResult<Vec<PortfolioEntry>> {
    let rows: Vec<PortfolioRow> = read_rows(path)?;
    let mut entries: Vec<PortfolioEntry> = Vec::new();
    for r in rows {
        entries.retain(|e| e.player_id != r.player_id);
        entries.push(PortfolioEntry {
            player_id: r.player_id,
            player_name: r.player_name.trim().to_string(),
            designation: r.designation.trim().to_string(),
            companies: split_names(&r.companies),
        });
    }
    Ok(entries)
}

// A table file that was never saved is the same as an empty table: the
// dashboard seeds empty files on first write.
fn read_rows<T: serde::de::DeserializeOwned>(path: &Path) -> PulseResult<Vec<T>> {
    if !path.exists() {
        info!("table file {:?} not found, using an empty table", path);
        return Ok(Vec::new());
    }
    let path_str = path.display().to_string();
    let mut rdr = csv::Reader::from_path(path).context(CsvOpenSnafu {
        path: path_str.clone(),
    })?;
    let mut res: Vec<T> = Vec::new();
    for row in rdr.deserialize() {
        let record: T = row.context(CsvRecordSnafu {
            path: path_str.clone(),
        })?;
        res.push(record);
    }
    Ok(res)
}
