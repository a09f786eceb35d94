// src/notify.rs
use std::sync::{Mutex, PoisonError};

use crate::diff::{CitationChange, PaperChange, top_gains};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

/// Where a finished refresh announces itself.
pub trait Notifier: Send + Sync {
    fn notify(&self, n: &Notification);
}

/// CLI: print to stdout.
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, n: &Notification) {
        println!("[{}] {}", n.title, n.message);
    }
}

/// Background runs with nobody watching.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, n: &Notification) {
        logf!("{}: {}", n.title, n.message.replace('\n', " | "));
    }
}

/// Keeps everything it was handed.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, n: &Notification) {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).push(n.clone());
    }
}

/// Only increases are announced. Decreases and paper shuffles with an
/// unchanged total produce no notification.
pub fn build_notification(citations: &[CitationChange], papers: &[PaperChange]) -> Option<Notification> {
    let gains: Vec<&CitationChange> = citations.iter().filter(|c| c.delta() > 0).collect();
    for c in citations.iter().filter(|c| c.delta() < 0) {
        logf!("{}: citations dropped {} → {}", c.name, c.old, c.new);
    }

    let (title, mut message) = match gains.as_slice() {
        [] => return None,
        [one] => (
            s!("Citation update"),
            format!("{}: {} → {} (+{})", one.name, one.old, one.new, one.delta()),
        ),
        many => {
            let names: Vec<&str> = many.iter().map(|c| c.name.as_str()).collect();
            let total: i64 = many.iter().map(|c| c.delta()).sum();
            (
                format!("{} scholars updated", many.len()),
                format!("{}: +{} citations", names.join(", "), total),
            )
        }
    };

    let paper_gains = top_gains(papers);
    if let Some(top) = paper_gains.first() {
        message.push_str(&format!(
            "\n{} gained citations, top: \"{}\" (+{})",
            plural!(paper_gains.len(), "paper"),
            top.title,
            top.delta()
        ));
    }

    Some(Notification { title, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(name: &str, old: u32, new: u32) -> CitationChange {
        CitationChange { user_id: s!(name), name: s!(name), old, new }
    }

    fn paper(title: &str, old: u32, new: u32) -> PaperChange {
        PaperChange { title: s!(title), old, new, added: false }
    }

    #[test]
    fn nothing_to_say() {
        assert_eq!(build_notification(&[], &[]), None);
        assert_eq!(build_notification(&[change("A", 10, 8)], &[]), None);
        assert_eq!(build_notification(&[], &[paper("P", 1, 2)]), None);
    }

    #[test]
    fn single_author() {
        let n = build_notification(&[change("Ada", 100, 105)], &[]).unwrap();
        assert_eq!(n.title, "Citation update");
        assert_eq!(n.message, "Ada: 100 → 105 (+5)");
    }

    #[test]
    fn several_authors_sum_gains() {
        let n = build_notification(&[change("Ada", 1, 3), change("Grace", 10, 14), change("Alan", 5, 4)], &[]).unwrap();
        assert_eq!(n.title, "2 scholars updated");
        assert_eq!(n.message, "Ada, Grace: +6 citations");
    }

    #[test]
    fn paper_line_names_top_gain() {
        let papers = [paper("Small", 1, 2), paper("Big", 10, 20), paper("Lost", 5, 3)];
        let n = build_notification(&[change("Ada", 16, 25)], &papers).unwrap();
        assert_eq!(n.message, "Ada: 16 → 25 (+9)\n2 papers gained citations, top: \"Big\" (+10)");
    }

    #[test]
    fn recorder_drains() {
        let r = RecordingNotifier::default();
        r.notify(&Notification { title: s!("t"), message: s!("m") });
        assert_eq!(r.take().len(), 1);
        assert!(r.take().is_empty());
    }
}
