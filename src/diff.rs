// src/diff.rs
//
// Citation deltas between a stored snapshot and a fresh fetch.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::core::sanitize::title_key;
use crate::data::{Metrics, Paper};

/// Author-level change of the all-time citation total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CitationChange {
    pub user_id: String,
    pub name: String,
    pub old: u32,
    pub new: u32,
}

impl CitationChange {
    pub fn delta(&self) -> i64 {
        i64::from(self.new) - i64::from(self.old)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Increased,
    Decreased,
    /// Not in the previous list, already cited.
    Added,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperChange {
    pub title: String,
    pub old: u32,
    pub new: u32,
    #[serde(default)]
    pub added: bool,
}

impl PaperChange {
    pub fn delta(&self) -> i64 {
        i64::from(self.new) - i64::from(self.old)
    }

    pub fn kind(&self) -> ChangeKind {
        if self.added {
            ChangeKind::Added
        } else if self.new > self.old {
            ChangeKind::Increased
        } else {
            ChangeKind::Decreased
        }
    }

    pub fn is_gain(&self) -> bool {
        self.delta() > 0
    }
}

pub fn diff_metrics(user_id: &str, name: &str, old: &Metrics, new: &Metrics) -> Option<CitationChange> {
    if old.total_citations == new.total_citations {
        return None;
    }
    Some(CitationChange {
        user_id: s!(user_id),
        name: s!(name),
        old: old.total_citations,
        new: new.total_citations,
    })
}

/// Per-paper deltas, in the order papers appear in `new`.
///
/// Papers are matched on [`title_key`]; repeated titles pair up in order of
/// appearance. A paper missing from `old` is reported as added only once it
/// has citations. Papers missing from `new` are ignored: Scholar merges and
/// drops entries on its own.
pub fn diff_papers(old: &[Paper], new: &[Paper]) -> Vec<PaperChange> {
    let mut pool: HashMap<String, VecDeque<u32>> = HashMap::with_capacity(old.len());
    for p in old {
        pool.entry(title_key(&p.title)).or_default().push_back(p.citations);
    }

    let mut out = Vec::new();
    for p in new {
        let prev = pool.get_mut(&title_key(&p.title)).and_then(|q| q.pop_front());
        match prev {
            Some(before) if before != p.citations => out.push(PaperChange {
                title: p.title.clone(),
                old: before,
                new: p.citations,
                added: false,
            }),
            Some(_) => {}
            None if p.citations > 0 => out.push(PaperChange {
                title: p.title.clone(),
                old: 0,
                new: p.citations,
                added: true,
            }),
            None => {}
        }
    }
    out
}

/// Biggest gain first; ties keep list order.
pub fn top_gains(changes: &[PaperChange]) -> Vec<&PaperChange> {
    let mut gains: Vec<&PaperChange> = changes.iter().filter(|c| c.is_gain()).collect();
    gains.sort_by(|a, b| b.delta().cmp(&a.delta()));
    gains
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(title: &str, citations: u32) -> Paper {
        Paper { title: s!(title), citations, ..Paper::default() }
    }

    fn list() -> Vec<Paper> {
        vec![paper("Alpha", 10), paper("Beta", 5), paper("Gamma", 0)]
    }

    #[test]
    fn single_count_change_yields_one_record() {
        let old = list();
        let mut new = list();
        new[1].citations = 8;

        let d = diff_papers(&old, &new);
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].title, "Beta");
        assert_eq!(d[0].delta(), 3);
        assert_eq!(d[0].kind(), ChangeKind::Increased);
    }

    #[test]
    fn decrease_has_negative_delta() {
        let old = list();
        let mut new = list();
        new[0].citations = 7;

        let d = diff_papers(&old, &new);
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].delta(), -3);
        assert_eq!(d[0].kind(), ChangeKind::Decreased);
    }

    #[test]
    fn identical_lists_yield_nothing() {
        assert!(diff_papers(&list(), &list()).is_empty());
    }

    #[test]
    fn matching_ignores_case_spacing_and_order() {
        let old = list();
        let new = vec![paper("gamma", 0), paper("  BETA ", 5), paper("Alpha", 11)];
        let d = diff_papers(&old, &new);
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].title, "Alpha");
    }

    #[test]
    fn added_papers_only_once_cited() {
        let old = list();
        let mut new = list();
        new.push(paper("Delta", 0));
        new.push(paper("Epsilon", 2));

        let d = diff_papers(&old, &new);
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].kind(), ChangeKind::Added);
        assert_eq!(d[0].delta(), 2);
    }

    #[test]
    fn duplicate_titles_pair_in_order() {
        let old = vec![paper("Same", 1), paper("Same", 9)];
        let new = vec![paper("Same", 1), paper("Same", 12)];
        let d = diff_papers(&old, &new);
        assert_eq!(d.len(), 1);
        assert_eq!((d[0].old, d[0].new), (9, 12));
    }

    #[test]
    fn first_cited_paper_after_empty_list_is_added() {
        let d = diff_papers(&[], &[paper("First", 4), paper("Draft", 0)]);
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].title, "First");
        assert_eq!(d[0].kind(), ChangeKind::Added);
        assert_eq!((d[0].old, d[0].new), (0, 4));
    }

    #[test]
    fn metrics_change_only_on_total() {
        let a = Metrics { total_citations: 5, h_index: 1, ..Metrics::default() };
        let b = Metrics { total_citations: 5, h_index: 2, ..Metrics::default() };
        assert!(diff_metrics("u", "n", &a, &b).is_none());

        let c = Metrics { total_citations: 9, ..a };
        let ch = diff_metrics("u", "n", &a, &c).unwrap();
        assert_eq!(ch.delta(), 4);
    }

    #[test]
    fn top_gains_sorted_desc_and_skips_losses() {
        let changes = vec![
            PaperChange { title: s!("a"), old: 1, new: 2, added: false },
            PaperChange { title: s!("b"), old: 5, new: 1, added: false },
            PaperChange { title: s!("c"), old: 0, new: 7, added: true },
        ];
        let top: Vec<&str> = top_gains(&changes).iter().map(|c| c.title.as_str()).collect();
        assert_eq!(top, vec!["c", "a"]);
    }
}
