use std::collections::{HashMap, HashSet};

use postdesk_core::feed::Feed;
use postdesk_core::models::{Post, PostId};

use crate::common::MountId;

#[derive(Debug)]
pub struct FeedState {
    pub mount: MountId,
    pub feed: Feed,
    pub selected: usize,
    /// Published flag before each in-flight toggle, for rollback.
    pub pending_toggles: HashMap<PostId, bool>,
    /// Deletes sent but not answered yet.
    pub pending_deletes: HashSet<PostId>,
}

impl FeedState {
    pub fn new(mount: MountId) -> Self {
        Self {
            mount,
            feed: Feed::default(),
            selected: 0,
            pending_toggles: HashMap::new(),
            pending_deletes: HashSet::new(),
        }
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.feed.get_index(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.feed.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.feed.len().saturating_sub(1);
    }

    /// Keeps the selection inside the list after it shrinks.
    pub fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.feed.len().saturating_sub(1));
    }

    pub fn is_toggle_pending(&self, id: &PostId) -> bool {
        self.pending_toggles.contains_key(id)
    }

    pub fn is_delete_pending(&self, id: &PostId) -> bool {
        self.pending_deletes.contains(id)
    }
}
