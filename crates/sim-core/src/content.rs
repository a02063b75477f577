//! Post arena: append-only content collection with an explicit capacity
//! and uniform sampling for engagement targets.

use contracts::{UserId, UserTier};

use crate::rng::SimRng;

/// A published content item. Immutable after creation except for the
/// three engagement counters.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: usize,
    pub author_id: UserId,
    pub author_influential: bool,
    pub likes: u64,
    pub replies: u64,
    pub retweets: u64,
    pub created_minute: u64,
}

#[derive(Debug, Clone)]
pub struct ContentStore {
    posts: Vec<Post>,
    capacity: usize,
    dropped: u64,
}

impl ContentStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            posts: Vec::new(),
            capacity,
            dropped: 0,
        }
    }

    /// Append a new post, returning its id, or `None` once the arena is
    /// full (the shed publish is counted, not surfaced).
    pub fn publish(&mut self, author_id: UserId, tier: UserTier, minute: u64) -> Option<usize> {
        if self.posts.len() >= self.capacity {
            self.dropped = self.dropped.saturating_add(1);
            return None;
        }
        let id = self.posts.len();
        self.posts.push(Post {
            id,
            author_id,
            author_influential: tier == UserTier::Influential,
            likes: 0,
            replies: 0,
            retweets: 0,
            created_minute: minute,
        });
        Some(id)
    }

    /// Uniformly random existing post, or `None` when nothing has been
    /// published yet.
    pub fn sample_mut(&mut self, rng: &mut SimRng) -> Option<&mut Post> {
        if self.posts.is_empty() {
            return None;
        }
        let index = rng.roll(self.posts.len() as u64) as usize;
        self.posts.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// How many publishes have been shed at capacity.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn influential_count(&self) -> usize {
        self.posts.iter().filter(|p| p.author_influential).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_assigns_sequential_ids() {
        let mut store = ContentStore::new(10);
        assert_eq!(store.publish(3, UserTier::Ordinary, 0), Some(0));
        assert_eq!(store.publish(4, UserTier::Influential, 5), Some(1));
        assert_eq!(store.len(), 2);
        assert_eq!(store.posts()[1].author_id, 4);
        assert!(store.posts()[1].author_influential);
        assert_eq!(store.posts()[1].created_minute, 5);
    }

    #[test]
    fn counters_start_at_zero() {
        let mut store = ContentStore::new(10);
        store.publish(0, UserTier::Ordinary, 0);
        let post = &store.posts()[0];
        assert_eq!((post.likes, post.replies, post.retweets), (0, 0, 0));
    }

    #[test]
    fn publish_past_capacity_is_shed_and_counted() {
        let mut store = ContentStore::new(2);
        assert!(store.publish(0, UserTier::Ordinary, 0).is_some());
        assert!(store.publish(1, UserTier::Ordinary, 1).is_some());
        assert!(store.publish(2, UserTier::Ordinary, 2).is_none());
        assert_eq!(store.len(), 2);
        assert_eq!(store.dropped(), 1);
    }

    #[test]
    fn sample_on_empty_store_is_none() {
        let mut store = ContentStore::new(4);
        let mut rng = SimRng::new(1);
        assert!(store.sample_mut(&mut rng).is_none());
    }

    #[test]
    fn sample_returns_each_post_eventually() {
        let mut store = ContentStore::new(4);
        for author in 0..3 {
            store.publish(author, UserTier::Ordinary, 0);
        }
        let mut rng = SimRng::new(11);
        let mut seen = [false; 3];
        for _ in 0..64 {
            let id = store.sample_mut(&mut rng).map(|p| p.id);
            seen[id.unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn influential_count_tracks_tier_snapshots() {
        let mut store = ContentStore::new(8);
        store.publish(0, UserTier::Influential, 0);
        store.publish(1, UserTier::Ordinary, 0);
        store.publish(2, UserTier::Influential, 0);
        assert_eq!(store.influential_count(), 2);
    }
}
