use glint_common::wire::Point;

use super::scanner::{Candidate, CandidateList};

/// Result of aggregating the per-strip candidate lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No strip retained any candidate.
    NotFound,
    /// Exactly one strip retained candidates; centroid of that strip's list.
    Single(Point),
    /// Two or more strips retained candidates; centroid of the merged
    /// global top candidates.
    Ambiguous(Point),
}

impl Outcome {
    /// Coordinate reported on the wire. NotFound reports the origin.
    pub fn point(&self) -> Point {
        match self {
            Outcome::NotFound => Point::ORIGIN,
            Outcome::Single(p) | Outcome::Ambiguous(p) => *p,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::NotFound => "not_found",
            Outcome::Single(_) => "single",
            Outcome::Ambiguous(_) => "ambiguous",
        }
    }
}

/// Combine the per-strip lists into one outcome.
///
/// When several strips hold candidates they are merged by descending diff
/// and the global top `capacity` entries are kept before taking the
/// centroid, so a spot straddling a strip seam still reports one coherent
/// coordinate.
pub fn merge(lists: &[CandidateList], capacity: usize) -> Outcome {
    let occupied: Vec<&CandidateList> = lists.iter().filter(|l| !l.is_empty()).collect();
    match occupied.as_slice() {
        [] => Outcome::NotFound,
        [only] => Outcome::Single(centroid(only.entries())),
        _ => {
            let mut merged: Vec<Candidate> = occupied
                .iter()
                .flat_map(|l| l.entries().iter().copied())
                .collect();
            merged.sort_by(|a, b| b.diff.cmp(&a.diff));
            merged.truncate(capacity);
            Outcome::Ambiguous(centroid(&merged))
        }
    }
}

/// Integer centroid of the retained candidates. Divides by the actual entry
/// count, not the list capacity.
fn centroid(entries: &[Candidate]) -> Point {
    let count = entries.len() as i64;
    let sum_x: i64 = entries.iter().map(|c| i64::from(c.x)).sum();
    let sum_y: i64 = entries.iter().map(|c| i64::from(c.y)).sum();
    Point {
        x: (sum_x / count) as i32,
        y: (sum_y / count) as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(entries: &[(u32, u32, i32)]) -> CandidateList {
        let mut list = CandidateList::new(50, 4);
        for &(x, y, diff) in entries {
            list.offer(Candidate { x, y, diff });
        }
        list
    }

    #[test]
    fn all_strips_empty_is_not_found() {
        let lists = vec![list_of(&[]), list_of(&[]), list_of(&[])];
        let outcome = merge(&lists, 4);
        assert_eq!(outcome, Outcome::NotFound);
        assert_eq!(outcome.point(), Point::ORIGIN);
    }

    #[test]
    fn single_candidate_reports_its_own_coordinate() {
        // divisor is the actual count, so one candidate maps to itself
        let lists = vec![list_of(&[]), list_of(&[(12, 7, 120)])];
        assert_eq!(merge(&lists, 4), Outcome::Single(Point { x: 12, y: 7 }));
    }

    #[test]
    fn single_strip_centroid_averages_entries() {
        let lists = vec![list_of(&[(10, 20, 200), (30, 40, 180)])];
        assert_eq!(merge(&lists, 4), Outcome::Single(Point { x: 20, y: 30 }));
    }

    #[test]
    fn multiple_strips_merge_by_descending_diff() {
        let lists = vec![
            list_of(&[(0, 0, 300), (4, 4, 100)]),
            list_of(&[(8, 8, 250), (12, 12, 90)]),
        ];
        // all four survive the top-4 cut: centroid of (0,0) (4,4) (8,8) (12,12)
        assert_eq!(merge(&lists, 4), Outcome::Ambiguous(Point { x: 6, y: 6 }));
    }

    #[test]
    fn multiple_strips_truncate_to_global_top() {
        let lists = vec![
            list_of(&[(0, 0, 300), (100, 100, 60), (100, 100, 55)]),
            list_of(&[(2, 2, 290), (4, 4, 280), (6, 6, 270)]),
        ];
        // top 4 diffs are 300, 290, 280, 270; the weak 60/55 entries drop out
        assert_eq!(merge(&lists, 4), Outcome::Ambiguous(Point { x: 3, y: 3 }));
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(Outcome::NotFound.label(), "not_found");
        assert_eq!(Outcome::Single(Point::ORIGIN).label(), "single");
        assert_eq!(Outcome::Ambiguous(Point::ORIGIN).label(), "ambiguous");
    }
}
