//! Identity lifecycle: labels, expiry and single-subject auto-selection.

use crate::tracker::config::TrackerConfig;
use crate::tracker::store::TrackStore;
use crate::tracker::track_state::{TrackId, TrackState};

/// Display label for a new identity, numbered from 1.
pub fn label_for(config: &TrackerConfig, id: TrackId) -> String {
    format!("{} {}", config.label_prefix, u128::from(id.0) + 1)
}

/// Missing frames a state may accumulate before it is retired.
pub fn expiry_threshold(config: &TrackerConfig, state: &TrackState) -> u32 {
    if state.selected {
        config.selected_max_missing
    } else {
        config.max_missing
    }
}

pub fn is_expired(config: &TrackerConfig, state: &TrackState) -> bool {
    state.missing > expiry_threshold(config, state)
}

/// The identity to auto-select: the only live one, if none is selected yet.
pub fn auto_selection(store: &TrackStore) -> Option<TrackId> {
    if store.len() != 1 || store.selected().is_some() {
        return None;
    }
    store.all_states().next().map(|s| s.id)
}
