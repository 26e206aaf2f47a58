use super::affinity::{Connection, PeakRef};
use super::peaks::Peak;
use super::types::Keypoint;
use serde::{Deserialize, Serialize};

/// What to do when a connection links two people who both already have some
/// of the same parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeConflictPolicy {
    /// Leave both people unchanged and drop the connection.
    #[default]
    KeepSeparate,
    /// Move the linked peak of the lower-scoring person into the higher-scoring
    /// one, provided that person has no peak for that part yet. A person left
    /// without peaks disappears.
    MoveToStronger,
}

/// Partially assembled person: one optional peak index per part.
#[derive(Debug, Clone)]
struct Record {
    slots: Vec<Option<usize>>,
}

impl Record {
    fn new(part_count: usize) -> Self {
        Self {
            slots: vec![None; part_count],
        }
    }

    fn total_score(&self, peaks: &[Vec<Peak>]) -> f32 {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(part, slot)| Some(peaks[part][(*slot)?].score))
            .sum()
    }

    fn collides_with(&self, other: &Record) -> bool {
        self.slots
            .iter()
            .zip(&other.slots)
            .any(|(a, b)| a.is_some() && b.is_some())
    }

    fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

struct Assembler<'a> {
    peaks: &'a [Vec<Peak>],
    records: Vec<Option<Record>>,
    owner: Vec<Vec<Option<usize>>>,
    policy: MergeConflictPolicy,
}

impl<'a> Assembler<'a> {
    fn new(peaks: &'a [Vec<Peak>], policy: MergeConflictPolicy) -> Self {
        Self {
            peaks,
            records: Vec::new(),
            owner: peaks.iter().map(|part| vec![None; part.len()]).collect(),
            policy,
        }
    }

    fn owner_of(&self, peak: PeakRef) -> Option<usize> {
        self.owner[peak.part][peak.index]
    }

    fn assign(&mut self, record: usize, peak: PeakRef) {
        if let Some(Some(r)) = self.records.get_mut(record) {
            r.slots[peak.part] = Some(peak.index);
            self.owner[peak.part][peak.index] = Some(record);
        }
    }

    fn add(&mut self, connection: &Connection) {
        let (from, to) = (connection.from, connection.to);
        match (self.owner_of(from), self.owner_of(to)) {
            (None, None) => {
                let id = self.records.len();
                self.records.push(Some(Record::new(self.peaks.len())));
                self.assign(id, from);
                self.assign(id, to);
            }
            (Some(id), None) => self.attach(id, to),
            (None, Some(id)) => self.attach(id, from),
            (Some(a), Some(b)) if a != b => self.join(a, b, from, to),
            _ => {}
        }
    }

    fn attach(&mut self, id: usize, peak: PeakRef) {
        let free = matches!(&self.records[id], Some(r) if r.slots[peak.part].is_none());
        if free {
            self.assign(id, peak);
        }
    }

    /// `from` is owned by `a`, `to` by `b`.
    fn join(&mut self, a: usize, b: usize, from: PeakRef, to: PeakRef) {
        let (Some(ra), Some(rb)) = (&self.records[a], &self.records[b]) else {
            return;
        };

        if !ra.collides_with(rb) {
            let (keep, gone) = (a.min(b), a.max(b));
            if let Some(moved) = self.records[gone].take() {
                for (part, slot) in moved.slots.iter().enumerate() {
                    if let Some(index) = *slot {
                        self.assign(keep, PeakRef { part, index });
                    }
                }
            }
            return;
        }

        if self.policy == MergeConflictPolicy::MoveToStronger {
            let (score_a, score_b) = (ra.total_score(self.peaks), rb.total_score(self.peaks));
            // earlier record wins ties
            let a_stronger = score_a > score_b || (score_a == score_b && a < b);
            let (strong, weak, peak) = if a_stronger { (a, b, to) } else { (b, a, from) };
            self.attach_from(strong, weak, peak);
        }
    }

    fn attach_from(&mut self, strong: usize, weak: usize, peak: PeakRef) {
        let free = matches!(&self.records[strong], Some(r) if r.slots[peak.part].is_none());
        if !free {
            return;
        }
        if let Some(record) = self.records[weak].as_mut() {
            record.slots[peak.part] = None;
            if record.is_empty() {
                self.records[weak] = None;
            }
        }
        self.assign(strong, peak);
    }

    fn finish(self, max_human_number: Option<usize>) -> Vec<Vec<Option<Keypoint>>> {
        let mut people: Vec<(usize, f32, Record)> = self
            .records
            .into_iter()
            .enumerate()
            .filter_map(|(id, record)| {
                let record = record?;
                Some((id, record.total_score(self.peaks), record))
            })
            .collect();

        if let Some(limit) = max_human_number {
            if people.len() > limit {
                people.sort_by(|x, y| y.1.total_cmp(&x.1));
                people.truncate(limit);
                people.sort_by_key(|person| person.0);
            }
        }

        people
            .into_iter()
            .map(|(_, _, record)| {
                record
                    .slots
                    .iter()
                    .enumerate()
                    .map(|(part, slot)| {
                        let peak = &self.peaks[part][(*slot)?];
                        Some(Keypoint {
                            position: peak.position,
                            score: peak.score,
                        })
                    })
                    .collect()
            })
            .collect()
    }
}

/// Group connections into people, in the order the connections are given.
///
/// Returns one keypoint array per person, in discovery order, each with one
/// slot per entry of `peaks`. With `max_human_number` set, only the people
/// with the highest summed keypoint score are kept (ties favor earlier
/// discovery), still in discovery order.
pub fn assemble(
    peaks: &[Vec<Peak>],
    connections: &[Connection],
    policy: MergeConflictPolicy,
    max_human_number: Option<usize>,
) -> Vec<Vec<Option<Keypoint>>> {
    let mut assembler = Assembler::new(peaks, policy);
    for connection in connections {
        assembler.add(connection);
    }
    assembler.finish(max_human_number)
}
