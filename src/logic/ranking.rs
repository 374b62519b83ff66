use crate::models::{RankedEntry, ScanSample};

pub const DEFAULT_TOP_N: usize = 10;

/// Best `n` samples, highest score first. Equal scores keep their input order.
pub fn top(samples: &[ScanSample], n: usize) -> Vec<ScanSample> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));
    sorted.truncate(n);
    sorted
}

/// Ranked view of a scan, keeping the selected location visible.
///
/// The anchor replaces any entry with the same label (or is added). If it
/// would not make the top `n`, it takes the last slot.
pub fn rank(samples: &[ScanSample], anchor: Option<RankedEntry>, n: usize) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = samples.iter().map(RankedEntry::from).collect();

    let anchor_label = anchor.as_ref().map(|a| a.label.clone());
    if let Some(anchor) = anchor {
        let anchor = RankedEntry {
            is_anchor: true,
            ..anchor
        };
        match entries.iter_mut().find(|e| e.label == anchor.label) {
            Some(existing) => *existing = anchor,
            None => entries.push(anchor),
        }
    }

    entries.sort_by(|a, b| b.score.cmp(&a.score));

    let Some(label) = anchor_label else {
        entries.truncate(n);
        return entries;
    };

    let position = entries.iter().position(|e| e.label == label);
    match position {
        Some(pos) if pos >= n && n > 0 => {
            let anchor = entries.remove(pos);
            entries.truncate(n - 1);
            entries.push(anchor);
        }
        _ => entries.truncate(n),
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    fn sample(id: &str, score: u8) -> ScanSample {
        ScanSample {
            location_id: id.into(),
            lat: 0.0,
            lon: 0.0,
            score,
            status: Status::Ideal,
        }
    }

    #[test]
    fn fewer_samples_than_n_returns_all_sorted() {
        let samples = vec![sample("A", 40), sample("B", 90), sample("C", 65)];
        let ranked = top(&samples, 10);
        assert_eq!(ranked.len(), 3);
        let scores: Vec<u8> = ranked.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![90, 65, 40]);
    }

    #[test]
    fn truncates_to_n() {
        let samples: Vec<_> = (0..25).map(|i| sample(&format!("P{}", i), i)).collect();
        let ranked = top(&samples, 10);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].score, 24);
        assert_eq!(ranked[9].score, 15);
    }

    #[test]
    fn ties_keep_input_order() {
        let samples = vec![sample("First", 70), sample("Second", 70), sample("Third", 80)];
        let ranked = top(&samples, 10);
        let ids: Vec<&str> = ranked.iter().map(|s| s.location_id.as_str()).collect();
        assert_eq!(ids, vec!["Third", "First", "Second"]);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(top(&[], 10).is_empty());
        assert!(rank(&[], None, 10).is_empty());
    }

    #[test]
    fn anchor_overwrites_by_label() {
        let samples = vec![sample("Spain", 60), sample("France", 80)];
        let ranked = rank(&samples, Some(RankedEntry::new("Spain", 95)), 10);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].label, "Spain");
        assert_eq!(ranked[0].score, 95);
        assert!(ranked[0].is_anchor);
    }

    #[test]
    fn anchor_outside_sample_is_inserted() {
        let samples = vec![sample("Spain", 60), sample("France", 80)];
        let ranked = rank(&samples, Some(RankedEntry::anchor("Zurich", 70)), 10);
        let labels: Vec<&str> = ranked.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["France", "Zurich", "Spain"]);
    }

    #[test]
    fn low_anchor_stays_visible() {
        let samples: Vec<_> = (0..20)
            .map(|i| sample(&format!("P{}", i), 50 + i as u8))
            .collect();
        let ranked = rank(&samples, Some(RankedEntry::anchor("Home", 5)), 10);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[9].label, "Home");
        assert!(ranked[9].is_anchor);
        assert_eq!(ranked[0].score, 69);
    }
}
