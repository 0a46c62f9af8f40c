//! Arena of live identities keyed by [`TrackId`].

use tracing::debug;

use crate::tracker::track_state::{TrackId, TrackState};

/// Storage for every live [`TrackState`].
///
/// States are kept in a dense vector ordered by id. New identities come from
/// [`TrackStore::spawn`], backed by a counter that only grows, so a removed id
/// is never seen again. All mutation goes through the store's own methods.
#[derive(Debug, Clone)]
pub struct TrackStore {
    states: Vec<TrackState>,
    /// Lowest id that has never been handed out. `None` once `u64::MAX` is used.
    next_id: Option<u64>,
}

impl Default for TrackStore {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            next_id: Some(0),
        }
    }
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state under the next unused id and insert it.
    ///
    /// Returns `None`, storing nothing, once the id space is exhausted.
    pub fn spawn(&mut self, build: impl FnOnce(TrackId) -> TrackState) -> Option<TrackId> {
        let id = TrackId(self.next_id?);
        let mut state = build(id);
        state.id = id;
        self.next_id = id.0.checked_add(1);
        self.insert_sorted(state);
        Some(id)
    }

    /// Whether `id` was handed out before, live or retired.
    fn is_issued(&self, id: TrackId) -> bool {
        self.next_id.is_none_or(|next| id.0 < next)
    }

    fn insert_sorted(&mut self, state: TrackState) {
        match self.position(state.id) {
            Ok(i) => self.states[i] = state,
            Err(i) => self.states.insert(i, state),
        }
    }

    /// All live states in ascending id order.
    pub fn all_states(&self) -> impl ExactSizeIterator<Item = &TrackState> {
        self.states.iter()
    }

    pub(crate) fn states_mut(&mut self) -> &mut [TrackState] {
        &mut self.states
    }

    fn position(&self, id: TrackId) -> Result<usize, usize> {
        self.states.binary_search_by_key(&id, |s| s.id)
    }

    pub fn get(&self, id: TrackId) -> Option<&TrackState> {
        self.position(id).ok().map(|i| &self.states[i])
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.position(id).is_ok()
    }

    /// Replace the live state with the same id, or insert a state whose id
    /// was never issued. A retired id is refused so it cannot come back.
    ///
    /// Returns whether the state was stored.
    pub fn upsert(&mut self, state: TrackState) -> bool {
        if self.contains(state.id) {
            self.insert_sorted(state);
            return true;
        }
        if self.is_issued(state.id) {
            debug!(id = %state.id, "refusing to reinsert a retired identity");
            return false;
        }
        self.next_id = state.id.0.checked_add(1);
        self.insert_sorted(state);
        true
    }

    pub fn remove(&mut self, id: TrackId) -> Option<TrackState> {
        self.position(id).ok().map(|i| self.states.remove(i))
    }

    /// Flag `id` as selected and clear the flag everywhere else. An unknown id
    /// just clears the selection.
    pub fn mark_selected(&mut self, id: Option<TrackId>) {
        for state in &mut self.states {
            state.selected = Some(state.id) == id;
        }
    }

    pub fn selected(&self) -> Option<TrackId> {
        self.states.iter().find(|s| s.selected).map(|s| s.id)
    }

    pub fn is_selected(&self, id: TrackId) -> bool {
        self.get(id).is_some_and(|s| s.selected)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Drop every state. The id counter is kept.
    pub fn clear(&mut self) {
        self.states.clear();
    }
}
