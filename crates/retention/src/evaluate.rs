//! The revision thinning walk

use crate::policy::{Granularity, RetentionPolicy};
use chrono::NaiveDateTime;
use history::{RevisionHistory, RevisionRecord};
use tracing::debug;

/// Classifies revisions to remove under a retention policy
///
/// Evaluation is a pure function of the input: no record is ever mutated,
/// and running the same group twice yields the same removal set. Each
/// parent group is walked with its own fresh tracker state.
pub struct Pruner {
    policy: RetentionPolicy,
}

/// Timestamps admitted into the current period, one slot per granularity
///
/// The walk runs oldest to newest, so each slot acts as a sliding
/// current-period detector: the latest admitted timestamp identifies the
/// period, and the slot length counts survivors within it.
#[derive(Debug, Default)]
struct BucketTrackers {
    admitted: [Vec<NaiveDateTime>; 5],
}

impl BucketTrackers {
    fn latest(&self, granularity: Granularity) -> Option<NaiveDateTime> {
        self.admitted[granularity as usize].last().copied()
    }

    fn admitted_count(&self, granularity: Granularity) -> usize {
        self.admitted[granularity as usize].len()
    }

    fn reset(&mut self, granularity: Granularity, ts: NaiveDateTime) {
        let slot = &mut self.admitted[granularity as usize];
        slot.clear();
        slot.push(ts);
    }

    fn admit(&mut self, granularity: Granularity, ts: NaiveDateTime) {
        self.admitted[granularity as usize].push(ts);
    }
}

impl Pruner {
    /// Create a new pruner with the given policy
    pub fn new(policy: RetentionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    /// Evaluate every parent group and return the union of removed ids,
    /// numerically sorted. Revisions never marked are implicitly kept.
    pub fn evaluate(&self, history: &RevisionHistory) -> Vec<u64> {
        let mut removed = Vec::new();
        for (parent_id, revisions) in history.iter() {
            removed.extend(self.evaluate_group(parent_id, revisions));
        }
        removed.sort_unstable();
        removed
    }

    /// Walk one parent's chronologically ordered revisions and collect the
    /// ids to remove
    pub fn evaluate_group(&self, parent_id: u64, revisions: &[RevisionRecord]) -> Vec<u64> {
        let n = revisions.len();

        if let Some(min) = self.policy.min_revisions {
            if n <= min {
                debug!("[min-rev] preserves all revisions of {parent_id}");
                return Vec::new();
            }
        }
        if let Some(last) = self.policy.keep_last {
            if n <= last {
                debug!("[keep-last] preserves all revisions of {parent_id}");
                return Vec::new();
            }
        }

        let mut trackers = BucketTrackers::default();
        let mut removed = Vec::new();

        for (index, revision) in revisions.iter().enumerate() {
            let ts = revision.timestamp;

            if let Some(fence) = self.policy.keep_before {
                if ts <= fence {
                    debug!("[keep-before] preserves {}", revision.id);
                    continue;
                }
            }
            if let Some(fence) = self.policy.keep_after {
                if ts >= fence {
                    debug!("[keep-after] preserves {} and subsequent", revision.id);
                    break;
                }
            }
            if let Some(last) = self.policy.keep_last {
                if n - index <= last {
                    debug!("[keep-last] preserves {} and subsequent", revision.id);
                    break;
                }
            }

            // A revision that opens a new period at a narrow granularity
            // must not be evicted by a wider one in the same pass.
            let mut preserve = false;

            for granularity in Granularity::ALL {
                let Some(cap) = granularity.cap(&self.policy) else {
                    continue;
                };

                // A zero cap never seeds a period: every revision at this
                // granularity falls through to the removal check below.
                if cap > 0 {
                    match trackers.latest(granularity) {
                        None => {
                            trackers.reset(granularity, ts);
                            continue;
                        }
                        Some(latest)
                            if granularity.bucket_key(latest) != granularity.bucket_key(ts) =>
                        {
                            trackers.reset(granularity, ts);
                            preserve = true;
                            continue;
                        }
                        Some(_) => {}
                    }
                }

                // Same period as the tracker. Remove once the cap is
                // exhausted; wider granularities never see this revision.
                if !preserve && trackers.admitted_count(granularity) >= cap {
                    debug!("{} says remove {}", granularity.label(), revision.id);
                    removed.push(revision.id);
                    break;
                }

                trackers.admit(granularity, ts);
            }
        }

        removed
    }
}
