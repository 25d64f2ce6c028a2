use crate::features::anomalies::dtos::{Anomaly, AnomalyId};

/// Anomalies shown on the list screen, most recent first.
///
/// Owned by the list screen; only successful submissions, refreshes and
/// assignments write to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnomalyList {
    items: Vec<Anomaly>,
}

impl AnomalyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepend(&mut self, anomaly: Anomaly) {
        self.items.insert(0, anomaly);
    }

    pub fn replace_all(&mut self, anomalies: Vec<Anomaly>) {
        self.items = anomalies;
    }

    /// Swap in the server's version of an entry; false if the id is unknown
    pub fn replace(&mut self, anomaly: Anomaly) -> bool {
        match self.items.iter_mut().find(|a| a.id == anomaly.id) {
            Some(slot) => {
                *slot = anomaly;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &AnomalyId) -> Option<&Anomaly> {
        self.items.iter().find(|a| &a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Anomaly> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Anomaly] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
