use std::fmt;

use super::state::{JobId, Ticks};

/// Which MLFQ level a segment ran on. Single-level strategies leave their
/// segments untagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    RoundRobin,
    Fcfs,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::RoundRobin => write!(f, "RR"),
            Tier::Fcfs => write!(f, "FCFS"),
        }
    }
}

/// One contiguous execution interval on the simulated CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub id: JobId,
    pub start: Ticks,
    pub end: Ticks,
    pub tier: Option<Tier>,
}

/// Append-only Gantt log, filled in clock order as the simulation runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, segment: Segment) {
        debug_assert!(segment.end >= segment.start, "segment runs backwards");
        if let Some(last) = self.segments.last() {
            debug_assert!(
                segment.start >= last.start,
                "segment recorded out of clock order"
            );
        }
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_clock_order() {
        let mut timeline = Timeline::new();
        timeline.record(Segment {
            id: 1,
            start: 0,
            end: 2,
            tier: None,
        });
        timeline.record(Segment {
            id: 2,
            start: 2,
            end: 5,
            tier: Some(Tier::RoundRobin),
        });

        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.segments()[1].tier, Some(Tier::RoundRobin));
    }

    #[test]
    fn tier_labels() {
        assert_eq!(Tier::RoundRobin.to_string(), "RR");
        assert_eq!(Tier::Fcfs.to_string(), "FCFS");
    }
}
