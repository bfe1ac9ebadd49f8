use glint_common::frame::Frame;
use std::ops::Range;

/// A pixel whose brightness exceeded the base frame by more than the
/// detection threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub x: u32,
    pub y: u32,
    pub diff: i32,
}

/// Bounded list of the brightest deviations found in one strip.
///
/// Invariants: at most `capacity` entries, sorted by descending diff, every
/// retained diff strictly above `threshold`.
#[derive(Debug, Clone)]
pub struct CandidateList {
    entries: Vec<Candidate>,
    threshold: i32,
    capacity: usize,
}

impl CandidateList {
    pub fn new(threshold: i32, capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            threshold,
            capacity,
        }
    }

    /// Offer a candidate; it is retained only if it beats the current floor.
    ///
    /// The floor is the threshold while the list has room, afterwards the
    /// smallest retained diff (which itself already beat the threshold).
    pub fn offer(&mut self, candidate: Candidate) {
        let floor = if self.entries.len() < self.capacity {
            self.threshold
        } else {
            match self.entries.last() {
                Some(last) => last.diff,
                None => self.threshold,
            }
        };
        if candidate.diff <= floor {
            return;
        }
        let at = self
            .entries
            .iter()
            .position(|e| candidate.diff > e.diff)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, candidate);
        if self.entries.len() > self.capacity {
            self.entries.pop();
        }
    }

    pub fn entries(&self) -> &[Candidate] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Scan all rows of the given column range, diffing the live frame against
/// the base at each pixel. A missing base frame, or a base smaller than the
/// live frame, reads as brightness 0. Pure over its inputs.
pub fn scan_strip(
    frame: &Frame,
    base: Option<&Frame>,
    cols: Range<u32>,
    threshold: i32,
    capacity: usize,
) -> CandidateList {
    let mut found = CandidateList::new(threshold, capacity);
    for y in 0..frame.height() {
        for x in cols.clone() {
            let live = i32::from(frame.brightness(x, y).unwrap_or(0));
            let background = i32::from(base.and_then(|b| b.brightness(x, y)).unwrap_or(0));
            found.offer(Candidate {
                x,
                y,
                diff: live - background,
            });
        }
    }
    found
}
