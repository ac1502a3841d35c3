//! Ranking of tallies by count.
//!
//! Rankings are listed in ascending order of count, so rank 1 (the largest
//! count) is the last entry. Ties are broken by login: among authors with the
//! same count, the alphabetically smaller login gets the better rank.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::github::ContributorStats;
use crate::tally::{AuthorTally, Tally, USERNAME_MISSING};

/// Rank used by the top contributors list before positional ranking.
pub const LEGACY_TOP_RANK_BASE: i64 = 100;

/// One ranked author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    /// 1 is the largest count. Signed because legacy top contributor ranks can go negative.
    pub rank: i64,
    pub login: String,
    pub emails: Vec<String>,
    pub count: u64,
}

impl RankedEntry {
    fn from_tally(rank: i64, tally: AuthorTally) -> Self {
        Self {
            rank,
            login: tally.login,
            emails: tally.emails,
            count: tally.count,
        }
    }
}

/// Ascending by count; equal counts put the larger login first so it ranks lower.
fn ascending(a: &AuthorTally, b: &AuthorTally) -> Ordering {
    a.count.cmp(&b.count).then_with(|| b.login.cmp(&a.login))
}

/// Rank every author in `tally`.
///
/// Returns entries in ascending count order with ranks N down to 1, where N
/// is the number of distinct authors.
pub fn rank(tally: Tally) -> Vec<RankedEntry> {
    let mut tallies: Vec<AuthorTally> = tally.into_tallies().collect();
    tallies.sort_by(ascending);

    let total = tallies.len() as i64;
    tallies
        .into_iter()
        .enumerate()
        .map(|(position, t)| RankedEntry::from_tally(total - position as i64, t))
        .collect()
}

/// How to number the contributor statistics list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopRankMode {
    /// Rank N down to 1 along the order the API returned.
    #[default]
    Positional,
    /// `100 - position`, which is only contiguous when exactly 100 entries
    /// come back; fewer entries leave ranks starting above 1, more go negative.
    Legacy,
}

/// Rank contributor statistics in the order the API returned them.
///
/// The statistics endpoint returns contributors by total commits ascending,
/// so the last entry is the top contributor. No re-sort happens here.
pub fn rank_contributors(stats: Vec<ContributorStats>, mode: TopRankMode) -> Vec<RankedEntry> {
    let total = stats.len() as i64;
    stats
        .into_iter()
        .enumerate()
        .map(|(position, s)| {
            let rank = match mode {
                TopRankMode::Positional => total - position as i64,
                TopRankMode::Legacy => LEGACY_TOP_RANK_BASE - position as i64,
            };
            RankedEntry {
                rank,
                login: s.author_login().unwrap_or(USERNAME_MISSING).to_string(),
                emails: Vec::new(),
                count: s.total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::SimpleUser;
    use crate::tally::Contribution;

    struct Commit(&'static str, &'static str);

    impl Contribution for Commit {
        const TRACKS_EMAIL: bool = true;

        fn author_login(&self) -> Option<&str> {
            Some(self.0)
        }

        fn author_email(&self) -> Option<&str> {
            Some(self.1)
        }
    }

    fn tally_of(records: &[Commit]) -> Tally {
        let mut tally = Tally::new();
        tally.fold_all(records);
        tally
    }

    fn stats(login: Option<&str>, total: u64) -> ContributorStats {
        ContributorStats {
            author: Some(SimpleUser {
                login: login.map(String::from),
            }),
            total,
        }
    }

    #[test]
    fn test_three_commit_scenario_ranks() {
        let ranked = rank(tally_of(&[
            Commit("alice", "a@x.com"),
            Commit("bob", "b@x.com"),
            Commit("alice", "a2@x.com"),
        ]));

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].login, "bob");
        assert_eq!(ranked[0].rank, 2);
        assert_eq!(ranked[1].login, "alice");
        assert_eq!(ranked[1].rank, 1);
        assert_eq!(ranked[1].emails, vec!["a@x.com", "a2@x.com"]);
    }

    #[test]
    fn test_ranks_are_contiguous() {
        let records: Vec<Commit> = [
            "d", "a", "c", "a", "b", "d", "d", "e", "a", "d", "f", "c",
        ]
        .into_iter()
        .map(|l| Commit(l, "x@x"))
        .collect();

        let ranked = rank(tally_of(&records));
        let mut ranks: Vec<i64> = ranked.iter().map(|e| e.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (1..=6).collect::<Vec<_>>());

        let counts: Vec<u64> = ranked.iter().map(|e| e.count).collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(ranked.last().unwrap().login, "d");
    }

    #[test]
    fn test_ties_break_by_login() {
        let ranked = rank(tally_of(&[
            Commit("zed", "z@x"),
            Commit("amy", "a@x"),
            Commit("max", "m@x"),
        ]));

        let order: Vec<(&str, i64)> = ranked.iter().map(|e| (e.login.as_str(), e.rank)).collect();
        assert_eq!(order, vec![("zed", 3), ("max", 2), ("amy", 1)]);
    }

    #[test]
    fn test_empty_tally_ranks_nothing() {
        assert!(rank(Tally::new()).is_empty());
    }

    #[test]
    fn test_positional_contributor_ranks() {
        let ranked = rank_contributors(
            vec![stats(Some("low"), 1), stats(Some("mid"), 5), stats(Some("top"), 9)],
            TopRankMode::Positional,
        );

        let order: Vec<(&str, i64, u64)> = ranked
            .iter()
            .map(|e| (e.login.as_str(), e.rank, e.count))
            .collect();
        assert_eq!(order, vec![("low", 3, 1), ("mid", 2, 5), ("top", 1, 9)]);
    }

    #[test]
    fn test_legacy_contributor_ranks_start_at_100() {
        let ranked = rank_contributors(
            vec![stats(Some("low"), 1), stats(Some("top"), 9)],
            TopRankMode::Legacy,
        );
        let ranks: Vec<i64> = ranked.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![100, 99]);
    }

    #[test]
    fn test_legacy_contributor_ranks_go_negative_past_100() {
        let many: Vec<ContributorStats> = (0..102).map(|n| stats(Some("x"), n)).collect();
        let ranked = rank_contributors(many, TopRankMode::Legacy);
        assert_eq!(ranked[99].rank, 1);
        assert_eq!(ranked[101].rank, -1);
    }

    #[test]
    fn test_contributor_without_author_uses_sentinel() {
        let ranked = rank_contributors(
            vec![ContributorStats {
                author: None,
                total: 4,
            }],
            TopRankMode::Positional,
        );
        assert_eq!(ranked[0].login, USERNAME_MISSING);
        assert_eq!(ranked[0].rank, 1);
    }
}
