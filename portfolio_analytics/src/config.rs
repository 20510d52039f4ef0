// ********* Input data structures ***********

use std::fmt::Display;

/// The stage of a company in the deal pipeline.
///
/// The ordering is significant: `Showcase < IC < Wired`. Any positional
/// rendering of per-stage aggregates must follow this ordering rather than
/// the alphabetical one.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum PipelineStage {
    Showcase,
    Ic,
    Wired,
}

impl PipelineStage {
    /// All stages in pipeline order.
    pub const ALL: [PipelineStage; 3] = [
        PipelineStage::Showcase,
        PipelineStage::Ic,
        PipelineStage::Wired,
    ];

    /// Parses a stage label as stored in the companies table.
    /// Unknown labels yield `None` and are excluded from per-stage grouping.
    pub fn parse(s: &str) -> Option<PipelineStage> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("showcase") => Some(PipelineStage::Showcase),
            s if s.eq_ignore_ascii_case("ic") => Some(PipelineStage::Ic),
            s if s.eq_ignore_ascii_case("wired") => Some(PipelineStage::Wired),
            _ => None,
        }
    }
}

impl Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PipelineStage::Showcase => "Showcase",
            PipelineStage::Ic => "IC",
            PipelineStage::Wired => "Wired",
        };
        write!(f, "{}", s)
    }
}

/// A member of the investment team.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Person {
    pub id: u64,
    /// Assumed unique. Lead and co-lead attributions resolve by this name.
    pub name: String,
    pub designation: String,
    /// The pod this person belongs to. Unit of the alignment comparison.
    pub team: String,
}

/// A tracked portfolio company.
///
/// `leads`, `co_leads` and `deal_team` hold person names, not keys: a renamed
/// or deleted person leaves dangling names behind, and the aggregator
/// resolves them by omission.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Company {
    pub id: u64,
    pub name: String,
    pub pipeline_stage: Option<PipelineStage>,
    pub founder_archetype: String,
    pub sector: String,
    pub company_stage: String,
    pub cheque_type: String,
    pub leads: Vec<String>,
    pub co_leads: Vec<String>,
    pub deal_team: Vec<String>,
}

/// One person's model-portfolio selection.
///
/// At most one entry per `player_id`. `companies` has set semantics: a person
/// cannot vote twice for the same company. Names may reference companies that
/// are no longer in the companies table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PortfolioEntry {
    pub player_id: u64,
    pub player_name: String,
    /// Snapshot of the designation at the time the entry was saved.
    pub designation: String,
    pub companies: Vec<String>,
}

/// Splits a comma-joined name list into distinct trimmed names,
/// preserving first-seen order. Blanks are dropped.
pub fn split_names(joined: &str) -> Vec<String> {
    let mut res: Vec<String> = Vec::new();
    for raw in joined.split(',') {
        let name = raw.trim();
        if !name.is_empty() && !res.iter().any(|n| n == name) {
            res.push(name.to_string());
        }
    }
    res
}

// ******** Output data structures *********

/// One (person, company) membership from the expanded vote relation, with
/// the company and voter attributes joined in. Company attributes are `None`
/// (or empty, for the name lists) when the company is no longer tracked;
/// `voter_team` is `None` when the person record is gone.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteRow {
    pub player_id: u64,
    pub player_name: String,
    pub designation: String,
    pub company_name: String,
    pub pipeline_stage: Option<PipelineStage>,
    pub sector: Option<String>,
    pub cheque_type: Option<String>,
    pub leads: Vec<String>,
    pub co_leads: Vec<String>,
    pub voter_team: Option<String>,
}

/// Vote count for one company. Zero-vote companies are included.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CompanyVotes {
    pub company_name: String,
    pub votes: u64,
}

/// Company count and mean votes for one pipeline stage.
#[derive(PartialEq, Debug, Clone)]
pub struct StageSummary {
    pub stage: PipelineStage,
    pub companies: u64,
    pub mean_votes: f64,
}

/// Vote statistics attributed to one lead (or co-lead) name.
/// A company with N leads contributes its full vote count to each of them.
#[derive(PartialEq, Debug, Clone)]
pub struct LeadVotes {
    pub lead_name: String,
    pub companies: u64,
    pub mean_votes: f64,
}

/// Total votes for one grouping value (a designation or a team).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct GroupVotes {
    pub group: String,
    pub votes: u64,
}

/// A 0/1 matrix of who voted for what. Rows are players, columns are
/// companies, both restricted to names appearing in the vote relation and
/// sorted for stable rendering.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VotingMatrix {
    pub players: Vec<String>,
    pub companies: Vec<String>,
    pub cells: Vec<Vec<u8>>,
}

/// One company's consensus standing.
#[derive(PartialEq, Debug, Clone)]
pub struct ConsensusEntry {
    pub company_name: String,
    pub vote_percentage: f64,
    pub votes: u64,
}

/// Consensus tiers. Both lists are complete and sorted by descending
/// percentage; display truncation is left to the caller.
#[derive(PartialEq, Debug, Clone)]
pub struct ConsensusReport {
    pub high: Vec<ConsensusEntry>,
    pub low: Vec<ConsensusEntry>,
}

/// Same-pod versus cross-pod split over all (voter, lead) pairs.
#[derive(PartialEq, Debug, Clone)]
pub struct AlignmentSummary {
    pub same_pod: u64,
    pub cross_pod: u64,
    /// `None` when no pair could be classified.
    pub same_pod_percentage: Option<f64>,
}

/// Everything the aggregator derives from one snapshot of the three tables.
#[derive(PartialEq, Debug, Clone)]
pub struct AnalyticsReport {
    pub votes: Vec<VoteRow>,
    pub company_votes: Vec<CompanyVotes>,
    pub mean_votes_per_company: f64,
    pub stage_summary: Vec<StageSummary>,
    pub lead_votes: Vec<LeadVotes>,
    pub co_lead_votes: Vec<LeadVotes>,
    pub designation_votes: Vec<GroupVotes>,
    pub team_votes: Vec<GroupVotes>,
    pub voting_matrix: VotingMatrix,
    pub consensus: ConsensusReport,
    pub alignment: AlignmentSummary,
}

// ********* Classification thresholds **********

/// A company is in high consensus when at least half the team voted for it.
pub const HIGH_CONSENSUS_PCT: f64 = 50.0;

/// A company is in low consensus strictly below this percentage.
/// Percentages in `[LOW_CONSENSUS_PCT, HIGH_CONSENSUS_PCT)` land in neither tier.
pub const LOW_CONSENSUS_PCT: f64 = 20.0;

/// How many low-consensus rows the dashboard shows. The classifier itself
/// always returns the full list.
pub const LOW_CONSENSUS_DISPLAY_ROWS: usize = 5;
