use postdesk_core::models::{Post, PostId};

use crate::common::MountId;

#[derive(Debug)]
pub struct ReaderState {
    pub mount: MountId,
    pub id: PostId,
    /// `None` until the fetch lands.
    pub post: Option<Post>,
    pub scroll: u16,
}

impl ReaderState {
    pub fn new(mount: MountId, id: PostId) -> Self {
        Self {
            mount,
            id,
            post: None,
            scroll: 0,
        }
    }
}
