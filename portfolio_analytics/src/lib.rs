mod config;
pub mod builder;

use log::{debug, info};

use std::collections::{HashMap, HashSet};

pub use crate::config::*;

// **** Vote relation ****

/// Expands every portfolio entry's company set into one row per
/// (person, company) membership and joins in the company attributes and the
/// voter's team.
///
/// Entries with an empty company list contribute no rows, so the output
/// length is the sum of the company-set sizes. Dangling company names are
/// kept as rows with the joined attributes nulled; a missing person record
/// nulls the voter team. Nothing is dropped and nothing is fabricated.
pub fn build_vote_relation(
    entries: &[PortfolioEntry],
    companies: &[Company],
    people: &[Person],
) -> Vec<VoteRow> {
    let companies_by_name: HashMap<&str, &Company> =
        companies.iter().map(|c| (c.name.as_str(), c)).collect();
    let teams_by_id: HashMap<u64, &str> =
        people.iter().map(|p| (p.id, p.team.as_str())).collect();

    let mut rows: Vec<VoteRow> = Vec::new();
    for entry in entries {
        for company_name in entry.companies.iter() {
            let company = companies_by_name.get(company_name.as_str());
            if company.is_none() {
                debug!(
                    "build_vote_relation: stale company reference {:?} in entry for {:?}",
                    company_name, entry.player_name
                );
            }
            rows.push(VoteRow {
                player_id: entry.player_id,
                player_name: entry.player_name.clone(),
                designation: entry.designation.clone(),
                company_name: company_name.clone(),
                pipeline_stage: company.and_then(|c| c.pipeline_stage),
                sector: company.map(|c| c.sector.clone()),
                cheque_type: company.map(|c| c.cheque_type.clone()),
                leads: company.map(|c| c.leads.clone()).unwrap_or_default(),
                co_leads: company.map(|c| c.co_leads.clone()).unwrap_or_default(),
                voter_team: teams_by_id.get(&entry.player_id).map(|t| t.to_string()),
            });
        }
    }
    rows
}

// **** Metric aggregation ****

/// Per-company vote counts over the companies table, in table order.
///
/// Every tracked company appears exactly once; companies nobody voted for
/// get an explicit zero. Votes for companies absent from the table are not
/// represented here (they only exist in the vote relation).
pub fn count_company_votes(companies: &[Company], votes: &[VoteRow]) -> Vec<CompanyVotes> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for row in votes {
        *counts.entry(row.company_name.as_str()).or_insert(0) += 1;
    }
    companies
        .iter()
        .map(|c| CompanyVotes {
            company_name: c.name.clone(),
            votes: counts.get(c.name.as_str()).copied().unwrap_or(0),
        })
        .collect()
}

/// Mean votes over all tracked companies.
///
/// Zero-vote companies are included in the denominator, so the value is
/// total votes on tracked companies divided by the size of the companies
/// table. Returns 0 for an empty table.
pub fn mean_votes_per_company(company_votes: &[CompanyVotes]) -> f64 {
    if company_votes.is_empty() {
        return 0.0;
    }
    let total: u64 = company_votes.iter().map(|cv| cv.votes).sum();
    total as f64 / company_votes.len() as f64
}

/// Company count and mean votes per pipeline stage, in pipeline order
/// (`Showcase`, `IC`, `Wired`). Stages with no companies are skipped, and so
/// are companies whose stage label did not parse.
pub fn stage_breakdown(companies: &[Company], company_votes: &[CompanyVotes]) -> Vec<StageSummary> {
    let counts: HashMap<&str, u64> = company_votes
        .iter()
        .map(|cv| (cv.company_name.as_str(), cv.votes))
        .collect();

    let mut res: Vec<StageSummary> = Vec::new();
    for stage in PipelineStage::ALL {
        let stage_counts: Vec<u64> = companies
            .iter()
            .filter(|c| c.pipeline_stage == Some(stage))
            .map(|c| counts.get(c.name.as_str()).copied().unwrap_or(0))
            .collect();
        if stage_counts.is_empty() {
            continue;
        }
        let total: u64 = stage_counts.iter().sum();
        res.push(StageSummary {
            stage,
            companies: stage_counts.len() as u64,
            mean_votes: total as f64 / stage_counts.len() as f64,
        });
    }
    res
}

/// Mean votes attributed to each lead name.
///
/// A company listing N leads contributes its full vote count to each of the
/// N groups; the count is never divided among them.
pub fn lead_vote_means(companies: &[Company], company_votes: &[CompanyVotes]) -> Vec<LeadVotes> {
    attribution_means(companies, company_votes, |c| c.leads.as_slice())
}

/// Same as [lead_vote_means], over the co-lead attributions.
pub fn co_lead_vote_means(companies: &[Company], company_votes: &[CompanyVotes]) -> Vec<LeadVotes> {
    attribution_means(companies, company_votes, |c| c.co_leads.as_slice())
}

fn attribution_means<F>(
    companies: &[Company],
    company_votes: &[CompanyVotes],
    names_of: F,
) -> Vec<LeadVotes>
where
    F: Fn(&Company) -> &[String],
{
    let counts: HashMap<&str, u64> = company_votes
        .iter()
        .map(|cv| (cv.company_name.as_str(), cv.votes))
        .collect();

    // name -> (companies attributed, total votes over them)
    let mut groups: HashMap<&str, (u64, u64)> = HashMap::new();
    for company in companies {
        let votes = counts.get(company.name.as_str()).copied().unwrap_or(0);
        for name in names_of(company) {
            let e = groups.entry(name.as_str()).or_insert((0, 0));
            e.0 += 1;
            e.1 += votes;
        }
    }

    let mut res: Vec<LeadVotes> = groups
        .iter()
        .map(|(name, (n, total))| LeadVotes {
            lead_name: name.to_string(),
            companies: *n,
            mean_votes: *total as f64 / *n as f64,
        })
        .collect();
    res.sort_by(|a, b| {
        b.mean_votes
            .partial_cmp(&a.mean_votes)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.lead_name.cmp(&b.lead_name))
    });
    res
}

/// Total votes per designation, from the designation snapshot carried on
/// each vote row. Sorted by descending total.
pub fn designation_totals(votes: &[VoteRow]) -> Vec<GroupVotes> {
    group_totals(votes.iter().map(|row| row.designation.as_str()))
}

/// Total votes per team. Rows whose voter no longer resolves to a person
/// record carry no team and are left out. Sorted by descending total.
pub fn team_totals(votes: &[VoteRow]) -> Vec<GroupVotes> {
    group_totals(votes.iter().filter_map(|row| row.voter_team.as_deref()))
}

fn group_totals<'a, I>(groups: I) -> Vec<GroupVotes>
where
    I: Iterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for group in groups {
        *counts.entry(group).or_insert(0) += 1;
    }
    let mut res: Vec<GroupVotes> = counts
        .iter()
        .map(|(group, votes)| GroupVotes {
            group: group.to_string(),
            votes: *votes,
        })
        .collect();
    res.sort_by(|a, b| b.votes.cmp(&a.votes).then_with(|| a.group.cmp(&b.group)));
    res
}

/// The 0/1 voting matrix over the names appearing in the vote relation.
/// Duplicate votes cannot occur upstream, so cells are plain membership.
pub fn voting_matrix(votes: &[VoteRow]) -> VotingMatrix {
    let mut players: Vec<String> = Vec::new();
    let mut companies: Vec<String> = Vec::new();
    let mut pairs: HashSet<(&str, &str)> = HashSet::new();
    for row in votes {
        if !players.contains(&row.player_name) {
            players.push(row.player_name.clone());
        }
        if !companies.contains(&row.company_name) {
            companies.push(row.company_name.clone());
        }
        pairs.insert((row.player_name.as_str(), row.company_name.as_str()));
    }
    players.sort();
    companies.sort();

    let cells: Vec<Vec<u8>> = players
        .iter()
        .map(|p| {
            companies
                .iter()
                .map(|c| u8::from(pairs.contains(&(p.as_str(), c.as_str()))))
                .collect()
        })
        .collect();
    VotingMatrix {
        players,
        companies,
        cells,
    }
}

// **** Consensus classification ****

/// Buckets companies into consensus tiers.
///
/// The percentage denominator is the size of the whole person table, not the
/// number of voters, so adding non-voting members dilutes every company.
/// With an empty person table every percentage is defined as 0 (which puts
/// every company in the low tier). The tiers are not complements: companies
/// in `[20, 50)` percent appear in neither.
pub fn classify_consensus(company_votes: &[CompanyVotes], person_count: usize) -> ConsensusReport {
    let mut high: Vec<ConsensusEntry> = Vec::new();
    let mut low: Vec<ConsensusEntry> = Vec::new();

    for cv in company_votes {
        let vote_percentage = if person_count == 0 {
            0.0
        } else {
            cv.votes as f64 / person_count as f64 * 100.0
        };
        let entry = ConsensusEntry {
            company_name: cv.company_name.clone(),
            vote_percentage,
            votes: cv.votes,
        };
        if vote_percentage >= HIGH_CONSENSUS_PCT {
            high.push(entry);
        } else if vote_percentage < LOW_CONSENSUS_PCT {
            low.push(entry);
        }
    }

    let by_percentage_desc = |a: &ConsensusEntry, b: &ConsensusEntry| {
        b.vote_percentage
            .partial_cmp(&a.vote_percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.company_name.cmp(&b.company_name))
    };
    high.sort_by(by_percentage_desc);
    low.sort_by(by_percentage_desc);
    ConsensusReport { high, low }
}

// **** Pod alignment ****

/// Classifies every (voter, lead) pair as same-pod or cross-pod.
///
/// Each vote row fans out to one pair per lead listed on the company, so the
/// pair count may exceed the vote count. A lead name with no person record
/// is skipped, and so is a row whose voter team is unknown: a team is never
/// fabricated for either side of the comparison. Team labels are compared
/// by exact string equality.
pub fn analyze_alignment(votes: &[VoteRow], people: &[Person]) -> AlignmentSummary {
    let teams_by_name: HashMap<&str, &str> = people
        .iter()
        .map(|p| (p.name.as_str(), p.team.as_str()))
        .collect();

    let mut same_pod: u64 = 0;
    let mut cross_pod: u64 = 0;
    for row in votes {
        let voter_team = match row.voter_team.as_deref() {
            Some(t) => t,
            None => continue,
        };
        for lead in row.leads.iter() {
            match teams_by_name.get(lead.as_str()) {
                Some(lead_team) if *lead_team == voter_team => same_pod += 1,
                Some(_) => cross_pod += 1,
                None => {
                    debug!("analyze_alignment: unresolvable lead {:?}", lead);
                }
            }
        }
    }

    let total = same_pod + cross_pod;
    let same_pod_percentage = if total == 0 {
        None
    } else {
        Some(same_pod as f64 / total as f64 * 100.0)
    };
    AlignmentSummary {
        same_pod,
        cross_pod,
        same_pod_percentage,
    }
}

// **** Entry point ****

/// Runs the whole analytics pipeline over one snapshot of the three tables.
///
/// This is a pure transform: no I/O, no retained state, identical outputs
/// for identical snapshots. Empty tables degrade every aggregate to its
/// identity value instead of failing.
pub fn run_portfolio_stats(
    people: &[Person],
    companies: &[Company],
    entries: &[PortfolioEntry],
) -> AnalyticsReport {
    info!(
        "run_portfolio_stats: {} people, {} companies, {} portfolio entries",
        people.len(),
        companies.len(),
        entries.len()
    );

    let votes = build_vote_relation(entries, companies, people);
    debug!("run_portfolio_stats: expanded {} vote rows", votes.len());

    let company_votes = count_company_votes(companies, &votes);
    let report = AnalyticsReport {
        mean_votes_per_company: mean_votes_per_company(&company_votes),
        stage_summary: stage_breakdown(companies, &company_votes),
        lead_votes: lead_vote_means(companies, &company_votes),
        co_lead_votes: co_lead_vote_means(companies, &company_votes),
        designation_votes: designation_totals(&votes),
        team_votes: team_totals(&votes),
        voting_matrix: voting_matrix(&votes),
        consensus: classify_consensus(&company_votes, people.len()),
        alignment: analyze_alignment(&votes, people),
        company_votes,
        votes,
    };
    info!(
        "run_portfolio_stats: {} high consensus, {} low consensus, alignment {:?}",
        report.consensus.high.len(),
        report.consensus.low.len(),
        report.alignment.same_pod_percentage
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Snapshot;

    fn names(ns: &[&str]) -> Vec<String> {
        ns.iter().map(|s| s.to_string()).collect()
    }

    // One partner, one IC company she leads and voted for: a single vote row
    // at 100% consensus.
    #[test]
    fn single_voter_full_consensus() {
        let mut s = Snapshot::new();
        s.add_person(1, "Alice", "Partner", "Core - FinTech Pod");
        s.add_company(1, "Acme", "IC", &names(&["Alice"]), &[]);
        s.add_entry(1, "Alice", "Partner", &names(&["Acme"]));

        let report = run_portfolio_stats(&s.people, &s.companies, &s.entries);

        assert_eq!(report.votes.len(), 1);
        let row = &report.votes[0];
        assert_eq!(row.player_id, 1);
        assert_eq!(row.player_name, "Alice");
        assert_eq!(row.designation, "Partner");
        assert_eq!(row.company_name, "Acme");
        assert_eq!(row.pipeline_stage, Some(PipelineStage::Ic));
        assert_eq!(row.voter_team.as_deref(), Some("Core - FinTech Pod"));

        assert_eq!(
            report.company_votes,
            vec![CompanyVotes {
                company_name: "Acme".to_string(),
                votes: 1
            }]
        );
        assert_eq!(report.consensus.high.len(), 1);
        assert_eq!(report.consensus.high[0].vote_percentage, 100.0);
        assert!(report.consensus.low.is_empty());
    }

    // Companies with no votes at all must still appear, with explicit zeros,
    // and both land in the low-consensus tier at 0%.
    #[test]
    fn zero_votes_are_filled_in() {
        let mut s = Snapshot::new();
        s.add_person(1, "Alice", "Partner", "Core - FinTech Pod");
        s.add_company(1, "Acme", "IC", &[], &[]);
        s.add_company(2, "Zeta", "Showcase", &[], &[]);

        let report = run_portfolio_stats(&s.people, &s.companies, &s.entries);

        assert_eq!(
            report.company_votes,
            vec![
                CompanyVotes {
                    company_name: "Acme".to_string(),
                    votes: 0
                },
                CompanyVotes {
                    company_name: "Zeta".to_string(),
                    votes: 0
                },
            ]
        );
        assert!(report.consensus.high.is_empty());
        let low_names: Vec<&str> = report
            .consensus
            .low
            .iter()
            .map(|e| e.company_name.as_str())
            .collect();
        assert_eq!(low_names, vec!["Acme", "Zeta"]);
    }

    // A company with two leads fans one vote out to two alignment pairs,
    // classified independently per lead.
    #[test]
    fn alignment_fans_out_per_lead() {
        let mut s = Snapshot::new();
        s.add_person(1, "Alice", "Partner", "Core - FinTech Pod");
        s.add_person(2, "Bob", "Principal", "Core - SaaS Pod");
        s.add_person(3, "Carol", "Analyst", "Core - SaaS Pod");
        s.add_company(1, "Acme", "IC", &names(&["Alice", "Bob"]), &[]);
        s.add_entry(3, "Carol", "Analyst", &names(&["Acme"]));

        let report = run_portfolio_stats(&s.people, &s.companies, &s.entries);

        assert_eq!(report.alignment.same_pod + report.alignment.cross_pod, 2);
        assert_eq!(report.alignment.same_pod, 1);
        assert_eq!(report.alignment.cross_pod, 1);
        assert_eq!(report.alignment.same_pod_percentage, Some(50.0));
    }

    // A portfolio entry referencing a company that is no longer tracked:
    // the vote row survives with nulled attributes, and the ghost company
    // never enters the zero-filled table.
    #[test]
    fn stale_company_reference_is_tolerated() {
        let mut s = Snapshot::new();
        s.add_person(1, "Alice", "Partner", "Core - FinTech Pod");
        s.add_company(1, "Acme", "IC", &[], &[]);
        s.add_entry(1, "Alice", "Partner", &names(&["Ghost", "Acme"]));

        let report = run_portfolio_stats(&s.people, &s.companies, &s.entries);

        assert_eq!(report.votes.len(), 2);
        let ghost = report
            .votes
            .iter()
            .find(|r| r.company_name == "Ghost")
            .unwrap();
        assert_eq!(ghost.pipeline_stage, None);
        assert_eq!(ghost.sector, None);
        assert_eq!(ghost.cheque_type, None);
        assert!(ghost.leads.is_empty());

        let filled: Vec<&str> = report
            .company_votes
            .iter()
            .map(|cv| cv.company_name.as_str())
            .collect();
        assert_eq!(filled, vec!["Acme"]);
    }

    #[test]
    fn vote_relation_row_count_is_sum_of_list_lengths() {
        let mut s = Snapshot::new();
        s.add_person(1, "Alice", "Partner", "Pod A");
        s.add_person(2, "Bob", "Analyst", "Pod B");
        s.add_person(3, "Carol", "Analyst", "Pod B");
        s.add_company(1, "Acme", "IC", &[], &[]);
        s.add_company(2, "Zeta", "Wired", &[], &[]);
        s.add_entry(1, "Alice", "Partner", &names(&["Acme", "Zeta", "Ghost"]));
        s.add_entry(2, "Bob", "Analyst", &names(&["Acme"]));
        // Empty selection contributes zero rows.
        s.add_entry(3, "Carol", "Analyst", &[]);

        let votes = build_vote_relation(&s.entries, &s.companies, &s.people);
        let expected: usize = s.entries.iter().map(|e| e.companies.len()).sum();
        assert_eq!(votes.len(), expected);
        assert_eq!(votes.len(), 4);
    }

    #[test]
    fn consensus_tiers_never_overlap() {
        let mut s = Snapshot::new();
        for (id, name) in [(1, "P1"), (2, "P2"), (3, "P3"), (4, "P4")] {
            s.add_person(id, name, "Analyst", "Pod A");
        }
        // 4 people. Acme: 3 votes (75%, high). Beta: 1 vote (25%, neither).
        // Zeta: 0 votes (0%, low).
        s.add_company(1, "Acme", "IC", &[], &[]);
        s.add_company(2, "Beta", "IC", &[], &[]);
        s.add_company(3, "Zeta", "Showcase", &[], &[]);
        s.add_entry(1, "P1", "Analyst", &names(&["Acme", "Beta"]));
        s.add_entry(2, "P2", "Analyst", &names(&["Acme"]));
        s.add_entry(3, "P3", "Analyst", &names(&["Acme"]));

        let votes = build_vote_relation(&s.entries, &s.companies, &s.people);
        let company_votes = count_company_votes(&s.companies, &votes);
        let consensus = classify_consensus(&company_votes, s.people.len());

        let high: Vec<&str> = consensus.high.iter().map(|e| e.company_name.as_str()).collect();
        let low: Vec<&str> = consensus.low.iter().map(|e| e.company_name.as_str()).collect();
        assert_eq!(high, vec!["Acme"]);
        assert_eq!(low, vec!["Zeta"]);
        assert!(!high.iter().any(|c| low.contains(c)));
        // Beta sits in the [20, 50) gap and belongs to neither tier.
        assert!(!high.contains(&"Beta") && !low.contains(&"Beta"));
    }

    #[test]
    fn consensus_with_no_people_defaults_to_zero() {
        let company_votes = vec![CompanyVotes {
            company_name: "Acme".to_string(),
            votes: 3,
        }];
        let consensus = classify_consensus(&company_votes, 0);
        assert!(consensus.high.is_empty());
        assert_eq!(consensus.low.len(), 1);
        assert_eq!(consensus.low[0].vote_percentage, 0.0);
    }

    // One full contribution per listed lead: a 2-vote company with two leads
    // counts as 2 votes for each of them.
    #[test]
    fn multi_lead_companies_contribute_once_per_lead() {
        let mut s = Snapshot::new();
        s.add_person(1, "Alice", "Partner", "Pod A");
        s.add_person(2, "Bob", "Partner", "Pod B");
        s.add_person(3, "Carol", "Analyst", "Pod A");
        s.add_person(4, "Dan", "Analyst", "Pod B");
        s.add_company(1, "Acme", "IC", &names(&["Alice", "Bob"]), &[]);
        s.add_company(2, "Zeta", "IC", &names(&["Alice"]), &[]);
        s.add_entry(3, "Carol", "Analyst", &names(&["Acme"]));
        s.add_entry(4, "Dan", "Analyst", &names(&["Acme"]));

        let votes = build_vote_relation(&s.entries, &s.companies, &s.people);
        let company_votes = count_company_votes(&s.companies, &votes);
        let leads = lead_vote_means(&s.companies, &company_votes);

        let bob = leads.iter().find(|l| l.lead_name == "Bob").unwrap();
        assert_eq!(bob.companies, 1);
        assert_eq!(bob.mean_votes, 2.0);
        // Alice leads Acme (2 votes) and Zeta (0 votes): mean 1.
        let alice = leads.iter().find(|l| l.lead_name == "Alice").unwrap();
        assert_eq!(alice.companies, 2);
        assert_eq!(alice.mean_votes, 1.0);
    }

    #[test]
    fn stage_summary_follows_pipeline_order() {
        let mut s = Snapshot::new();
        s.add_person(1, "Alice", "Partner", "Pod A");
        s.add_company(1, "W1", "Wired", &[], &[]);
        s.add_company(2, "S1", "Showcase", &[], &[]);
        s.add_company(3, "I1", "IC", &[], &[]);
        s.add_company(4, "S2", "Showcase", &[], &[]);
        s.add_company(5, "X1", "Warehoused", &[], &[]);
        s.add_entry(1, "Alice", "Partner", &names(&["S1", "S2"]));

        let report = run_portfolio_stats(&s.people, &s.companies, &s.entries);
        let stages: Vec<PipelineStage> =
            report.stage_summary.iter().map(|ss| ss.stage).collect();
        assert_eq!(
            stages,
            vec![
                PipelineStage::Showcase,
                PipelineStage::Ic,
                PipelineStage::Wired
            ]
        );
        let showcase = &report.stage_summary[0];
        assert_eq!(showcase.companies, 2);
        assert_eq!(showcase.mean_votes, 1.0);
        // The unknown "Warehoused" label is excluded from the grouping.
        let total: u64 = report.stage_summary.iter().map(|ss| ss.companies).sum();
        assert_eq!(total, 4);
    }

    // Dangling voters keep their rows in the relation but carry no team, so
    // they are absent from the per-team totals and from alignment pairs.
    #[test]
    fn dangling_voter_is_excluded_from_team_joins() {
        let mut s = Snapshot::new();
        s.add_person(1, "Alice", "Partner", "Pod A");
        s.add_company(1, "Acme", "IC", &names(&["Alice"]), &[]);
        s.add_entry(1, "Alice", "Partner", &names(&["Acme"]));
        s.add_entry(9, "Departed", "Analyst", &names(&["Acme"]));

        let report = run_portfolio_stats(&s.people, &s.companies, &s.entries);

        assert_eq!(report.votes.len(), 2);
        assert_eq!(
            report.team_votes,
            vec![GroupVotes {
                group: "Pod A".to_string(),
                votes: 1
            }]
        );
        // Only Alice's vote produces a classified pair.
        assert_eq!(report.alignment.same_pod + report.alignment.cross_pod, 1);
    }

    #[test]
    fn empty_snapshot_degrades_to_identity_values() {
        let report = run_portfolio_stats(&[], &[], &[]);
        assert!(report.votes.is_empty());
        assert!(report.company_votes.is_empty());
        assert_eq!(report.mean_votes_per_company, 0.0);
        assert!(report.stage_summary.is_empty());
        assert!(report.lead_votes.is_empty());
        assert!(report.co_lead_votes.is_empty());
        assert!(report.designation_votes.is_empty());
        assert!(report.team_votes.is_empty());
        assert!(report.voting_matrix.players.is_empty());
        assert!(report.consensus.high.is_empty() && report.consensus.low.is_empty());
        assert_eq!(report.alignment.same_pod_percentage, None);
    }

    #[test]
    fn mean_includes_zero_vote_companies() {
        let company_votes = vec![
            CompanyVotes {
                company_name: "Acme".to_string(),
                votes: 3,
            },
            CompanyVotes {
                company_name: "Zeta".to_string(),
                votes: 0,
            },
        ];
        assert_eq!(mean_votes_per_company(&company_votes), 1.5);
    }

    #[test]
    fn voting_matrix_cells_are_memberships() {
        let mut s = Snapshot::new();
        s.add_person(1, "Alice", "Partner", "Pod A");
        s.add_person(2, "Bob", "Analyst", "Pod B");
        s.add_company(1, "Acme", "IC", &[], &[]);
        s.add_company(2, "Zeta", "IC", &[], &[]);
        s.add_entry(1, "Alice", "Partner", &names(&["Acme", "Zeta"]));
        s.add_entry(2, "Bob", "Analyst", &names(&["Zeta"]));

        let votes = build_vote_relation(&s.entries, &s.companies, &s.people);
        let matrix = voting_matrix(&votes);
        assert_eq!(matrix.players, vec!["Alice", "Bob"]);
        assert_eq!(matrix.companies, vec!["Acme", "Zeta"]);
        assert_eq!(matrix.cells, vec![vec![1, 1], vec![0, 1]]);
    }

    #[test]
    fn designation_totals_use_entry_snapshot() {
        let mut s = Snapshot::new();
        s.add_person(1, "Alice", "Partner", "Pod A");
        s.add_person(2, "Bob", "Analyst", "Pod B");
        s.add_company(1, "Acme", "IC", &[], &[]);
        s.add_entry(1, "Alice", "Principal", &names(&["Acme"]));
        s.add_entry(2, "Bob", "Analyst", &names(&["Acme"]));

        let votes = build_vote_relation(&s.entries, &s.companies, &s.people);
        // The snapshot designation on the entry wins over the person record.
        assert_eq!(
            designation_totals(&votes),
            vec![
                GroupVotes {
                    group: "Analyst".to_string(),
                    votes: 1
                },
                GroupVotes {
                    group: "Principal".to_string(),
                    votes: 1
                },
            ]
        );
    }

    #[test]
    fn identical_snapshots_yield_identical_reports() {
        let mut s = Snapshot::new();
        s.add_person(1, "Alice", "Partner", "Pod A");
        s.add_person(2, "Bob", "Analyst", "Pod B");
        s.add_company(1, "Acme", "IC", &names(&["Alice"]), &names(&["Bob"]));
        s.add_company(2, "Zeta", "Showcase", &names(&["Bob"]), &[]);
        s.add_entry(1, "Alice", "Partner", &names(&["Acme", "Zeta"]));
        s.add_entry(2, "Bob", "Analyst", &names(&["Acme"]));

        let first = run_portfolio_stats(&s.people, &s.companies, &s.entries);
        let second = run_portfolio_stats(&s.people, &s.companies, &s.entries);
        assert_eq!(first, second);
    }

    #[test]
    fn split_names_dedups_and_trims() {
        assert_eq!(
            split_names(" Alice, Bob ,Alice,,  "),
            vec!["Alice".to_string(), "Bob".to_string()]
        );
        assert!(split_names("").is_empty());
    }

    #[test]
    fn snapshot_entry_upsert_replaces_previous_selection() {
        let mut s = Snapshot::new();
        s.add_person(1, "Alice", "Partner", "Pod A");
        s.add_entry(1, "Alice", "Partner", &names(&["Acme"]));
        s.add_entry(1, "Alice", "Partner", &names(&["Zeta", "Zeta"]));
        assert_eq!(s.entries.len(), 1);
        assert_eq!(s.entries[0].companies, vec!["Zeta".to_string()]);
    }
}
