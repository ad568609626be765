use super::function::FunctionId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cumulative hit counts plus the change since the previous poll.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct HitCountSnapshot {
    #[serde(default)]
    pub hits: BTreeMap<FunctionId, u64>,
    #[serde(default)]
    pub deltas: BTreeMap<FunctionId, u64>,
}

impl HitCountSnapshot {
    pub fn new(hits: BTreeMap<FunctionId, u64>, deltas: BTreeMap<FunctionId, u64>) -> Self {
        Self { hits, deltas }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty() && self.deltas.is_empty()
    }

    /// Number of functions with a cumulative count.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn hits_for(&self, id: &FunctionId) -> Option<u64> {
        self.hits.get(id).copied()
    }

    pub fn delta_for(&self, id: &FunctionId) -> Option<u64> {
        self.deltas.get(id).copied()
    }

    /// Copy every entry of `other` into `self`; `other` wins on collision.
    pub fn overlay(&mut self, other: &HitCountSnapshot) {
        self.hits
            .extend(other.hits.iter().map(|(id, n)| (id.clone(), *n)));
        self.deltas
            .extend(other.deltas.iter().map(|(id, n)| (id.clone(), *n)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(entries: &[(&str, u64)]) -> HitCountSnapshot {
        let map: BTreeMap<_, _> = entries
            .iter()
            .map(|(id, n)| (FunctionId::new(*id), *n))
            .collect();
        HitCountSnapshot::new(map.clone(), map)
    }

    #[test]
    fn overlay_later_value_wins() {
        let mut base = snapshot(&[("a", 1), ("shared", 5)]);
        base.overlay(&snapshot(&[("b", 2), ("shared", 9)]));

        assert_eq!(base.len(), 3);
        assert_eq!(base.hits_for(&"shared".into()), Some(9));
        assert_eq!(base.delta_for(&"a".into()), Some(1));
    }

    #[test]
    fn missing_fields_deserialize_empty() {
        let snap: HitCountSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snap.is_empty());
    }
}
