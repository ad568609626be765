use hitlens_api::{Backend, HitCountSnapshot};
use serde::{Deserialize, Serialize};

/// Order in which backend snapshots are layered, lowest priority first.
///
/// The last backend in the list wins when two snapshots carry the same id.
/// Ids are origin-qualified so that should not happen, but the order is
/// still fixed here rather than left to call order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Backend>", into = "Vec<Backend>")]
pub struct MergePriority(Vec<Backend>);

impl MergePriority {
    /// Duplicate entries are dropped, keeping the first occurrence.
    pub fn new(order: impl IntoIterator<Item = Backend>) -> Self {
        let mut seen = Vec::new();
        for backend in order {
            if !seen.contains(&backend) {
                seen.push(backend);
            }
        }
        Self(seen)
    }

    pub fn order(&self) -> &[Backend] {
        &self.0
    }

    /// The backend whose value survives a collision.
    pub fn winner(&self) -> Option<Backend> {
        self.0.last().copied()
    }

    // Unlisted backends rank below every listed one.
    fn rank(&self, backend: Backend) -> Option<usize> {
        self.0.iter().position(|b| *b == backend)
    }
}

impl From<Vec<Backend>> for MergePriority {
    fn from(order: Vec<Backend>) -> Self {
        Self::new(order)
    }
}

impl From<MergePriority> for Vec<Backend> {
    fn from(priority: MergePriority) -> Self {
        priority.0
    }
}

impl Default for MergePriority {
    fn default() -> Self {
        Self(vec![Backend::Native, Backend::Browser])
    }
}

/// Union the per-backend poll results.
///
/// `None` when no backend produced a snapshot: "no data" is not the same as
/// an empty snapshot.
pub fn merge_snapshots(
    priority: &MergePriority,
    results: Vec<(Backend, Option<HitCountSnapshot>)>,
) -> Option<HitCountSnapshot> {
    let mut present: Vec<_> = results
        .into_iter()
        .filter_map(|(backend, snapshot)| snapshot.map(|s| (backend, s)))
        .collect();
    if present.is_empty() {
        return None;
    }

    present.sort_by_key(|(backend, _)| priority.rank(*backend));

    let mut merged = HitCountSnapshot::default();
    for (_, snapshot) in &present {
        merged.overlay(snapshot);
    }
    Some(merged)
}
