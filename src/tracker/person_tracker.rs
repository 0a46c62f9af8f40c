//! Per-frame association of detections with tracked identities.

use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::tracker::config::{AssignmentStrategy, FrameSize, TrackerConfig};
use crate::tracker::lifecycle;
use crate::tracker::matching::{self, AssignmentResult, Detection};
use crate::tracker::store::TrackStore;
use crate::tracker::track_state::{TrackId, TrackState, TrackedPerson};

/// Run one frame of association against `store`.
///
/// `selected` is applied to the store before anything else, so it decides
/// which identity gets the extended expiry grace this frame. Detections that
/// match nobody become new identities; states that go unmatched age by one
/// frame and are removed once past their expiry threshold.
///
/// The output lists matched identities first, in acceptance order, followed
/// by identities spawned this frame. Unmatched live identities are only
/// reported when [`TrackerConfig::emit_unmatched`] is set.
pub fn match_detections(
    config: &TrackerConfig,
    detections: &[Detection],
    store: &mut TrackStore,
    frame: FrameSize,
    selected: Option<TrackId>,
) -> Vec<TrackedPerson> {
    store.mark_selected(selected);

    let scores = matching::score_matrix(config, store.all_states(), detections, frame);
    let AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_detections,
    } = match config.assignment {
        AssignmentStrategy::Greedy => matching::greedy_assignment(&scores, config.min_match_score),
        AssignmentStrategy::Optimal => {
            matching::linear_assignment(&scores, config.min_match_score)
        }
    };

    let mut output = Vec::with_capacity(detections.len());

    // Step 1: Update matched states
    let states = store.states_mut();
    for &(itrack, idet) in &matches {
        let det = &detections[idet];
        let state = &mut states[itrack];
        trace!(
            id = %state.id,
            score = scores[[itrack, idet]],
            "matched detection {idet}"
        );
        state.update(det, config.smoothing_alpha);
        output.push(state.to_person(true));
    }

    // Step 2: Age unmatched states
    let mut ghosts = Vec::new();
    let mut expired = Vec::new();
    for &itrack in &unmatched_tracks {
        let state = &mut states[itrack];
        state.mark_missed();
        if lifecycle::is_expired(config, state) {
            expired.push(state.id);
        } else if config.emit_unmatched {
            ghosts.push(state.to_person(false));
        }
    }

    for id in expired {
        store.remove(id);
        debug!(%id, "identity expired");
    }

    // Step 3: Spawn identities for unmatched detections
    for idet in unmatched_detections {
        let det = &detections[idet];
        let spawned = store.spawn(|id| {
            let mut state = TrackState::new(id, lifecycle::label_for(config, id), det);
            state.selected = selected == Some(id);
            state
        });
        match spawned.and_then(|id| store.get(id)) {
            Some(state) => {
                debug!(id = %state.id, bbox = ?det.bbox, "new identity");
                output.push(state.to_person(true));
            }
            None => warn!("identity counter exhausted, dropping detection {idet}"),
        }
    }

    output.extend(ghosts);
    output
}

/// Stateful tracker owning its identity store and the current selection.
///
/// Frames must be fed one at a time; `update` borrows the tracker mutably so
/// two frames can never race on the same store.
#[derive(Debug, Clone, Default)]
pub struct PersonTracker {
    config: TrackerConfig,
    store: TrackStore,
    selected: Option<TrackId>,
    frame_count: u64,
}

impl PersonTracker {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Process one frame of detections and return the people seen in it.
    pub fn update(&mut self, detections: &[Detection], frame: FrameSize) -> Vec<TrackedPerson> {
        self.frame_count += 1;

        if self.config.auto_select_single && self.selected.is_none() {
            if let Some(id) = lifecycle::auto_selection(&self.store) {
                debug!(%id, "auto-selecting the only identity");
                self.selected = Some(id);
            }
        }

        let people = match_detections(
            &self.config,
            detections,
            &mut self.store,
            frame,
            self.selected,
        );
        debug!(
            frame = self.frame_count,
            detections = detections.len(),
            reported = people.len(),
            live = self.store.len(),
            "frame tracked"
        );
        people
    }

    /// Choose the subject of interest. Takes effect on the next `update`.
    pub fn select(&mut self, id: Option<TrackId>) {
        self.selected = id;
    }

    pub fn selection(&self) -> Option<TrackId> {
        self.selected
    }

    /// Whether `id` is live and flagged as selected in the store.
    pub fn is_selected(&self, id: TrackId) -> bool {
        self.store.is_selected(id)
    }

    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Forget every identity and the selection. Ids keep counting up.
    pub fn reset(&mut self) {
        self.store.clear();
        self.selected = None;
        self.frame_count = 0;
    }
}
