//! Ordered post collection backing the feed view.
//!
//! Order is always the server's response order; nothing here re-sorts.

use crate::models::{Post, PostId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feed {
    posts: Vec<Post>,
}

impl Feed {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Replaces the whole collection with a fresh server response.
    pub fn replace_all(&mut self, posts: Vec<Post>) {
        self.posts = posts;
    }

    /// Replaces the entry whose id matches `post.id`, in place.
    ///
    /// Returns false (and changes nothing) when no entry matches.
    pub fn splice(&mut self, post: Post) -> bool {
        match self.posts.iter_mut().find(|p| p.id == post.id) {
            Some(slot) => {
                *slot = post;
                true
            }
            None => false,
        }
    }

    /// Removes every entry with the given id. Returns true if any was removed.
    pub fn remove(&mut self, id: &PostId) -> bool {
        let before = self.posts.len();
        self.posts.retain(|p| &p.id != id);
        self.posts.len() != before
    }

    /// Sets the published flag locally, returning the previous value.
    pub fn set_published(&mut self, id: &PostId, is_published: bool) -> Option<bool> {
        let post = self.posts.iter_mut().find(|p| &p.id == id)?;
        Some(std::mem::replace(&mut post.is_published, is_published))
    }

    pub fn get(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|p| &p.id == id)
    }

    pub fn get_index(&self, index: usize) -> Option<&Post> {
        self.posts.get(index)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Post> {
        self.posts.iter()
    }
}

impl<'a> IntoIterator for &'a Feed {
    type Item = &'a Post;
    type IntoIter = std::slice::Iter<'a, Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}
