pub use crate::config::*;

/// A builder for assembling an in-memory snapshot of the three tables.
///
/// This is the convenient path for callers that do not load the tables from
/// storage (tests, embedding applications).
///
/// ```
/// use portfolio_analytics::builder::Snapshot;
///
/// let mut snapshot = Snapshot::new();
/// snapshot.add_person(1, "Anna", "Partner", "Core - FinTech Pod");
/// snapshot.add_company(1, "Acme", "IC", &["Anna".to_string()], &[]);
/// snapshot.add_entry(1, "Anna", "Partner", &["Acme".to_string()]);
///
/// let report = portfolio_analytics::run_portfolio_stats(
///     &snapshot.people,
///     &snapshot.companies,
///     &snapshot.entries,
/// );
/// assert_eq!(report.votes.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub people: Vec<Person>,
    pub companies: Vec<Company>,
    pub entries: Vec<PortfolioEntry>,
}

impl Snapshot {
    pub fn new() -> Snapshot {
        Snapshot::default()
    }

    pub fn add_person(&mut self, id: u64, name: &str, designation: &str, team: &str) {
        self.people.push(Person {
            id,
            name: name.to_string(),
            designation: designation.to_string(),
            team: team.to_string(),
        });
    }

    /// Adds a company with the most common attributes. The descriptive fields
    /// not relevant to the aggregates are left blank.
    pub fn add_company(
        &mut self,
        id: u64,
        name: &str,
        pipeline_stage: &str,
        leads: &[String],
        co_leads: &[String],
    ) {
        self.companies.push(Company {
            id,
            name: name.to_string(),
            pipeline_stage: PipelineStage::parse(pipeline_stage),
            founder_archetype: String::new(),
            sector: String::new(),
            company_stage: String::new(),
            cheque_type: String::new(),
            leads: dedup_names(leads),
            co_leads: dedup_names(co_leads),
            deal_team: Vec::new(),
        });
    }

    /// Adds a model-portfolio entry for a player.
    ///
    /// The company list is deduplicated (a person cannot vote twice for the
    /// same company) and any previous entry for the same `player_id` is
    /// replaced, matching the upsert semantics of the persistence layer.
    pub fn add_entry(&mut self, player_id: u64, player_name: &str, designation: &str, companies: &[String]) {
        self.entries.retain(|e| e.player_id != player_id);
        self.entries.push(PortfolioEntry {
            player_id,
            player_name: player_name.to_string(),
            designation: designation.to_string(),
            companies: dedup_names(companies),
        });
    }
}

fn dedup_names(names: &[String]) -> Vec<String> {
    let mut res: Vec<String> = Vec::new();
    for raw in names {
        let name = raw.trim();
        if !name.is_empty() && !res.iter().any(|n| n == name) {
            res.push(name.to_string());
        }
    }
    res
}
