//! Synthetic follower graph: a fixed population of tiered users with
//! directed follower edges, built once at startup and read-only
//! thereafter except for each user's activity flag.

use contracts::{ActivityState, SimConfig, UserId, UserTier};

use crate::rng::SimRng;

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub tier: UserTier,
    pub state: ActivityState,
    followers: Vec<UserId>,
}

impl User {
    fn new(id: UserId, tier: UserTier) -> Self {
        Self {
            id,
            tier,
            state: ActivityState::Inactive,
            followers: Vec::new(),
        }
    }
}

/// Population plus adjacency. Follower lists may contain duplicate ids
/// (a duplicate edge just means the follower is reached twice by a
/// cascade); self-edges are never stored.
#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    users: Vec<User>,
}

impl SocialGraph {
    /// Build the population from the configuration. The first
    /// `influential_count` ids (clamped to the population size) are
    /// influential; follower counts draw from a tier-conditioned range
    /// and each follower is drawn uniformly from the whole population.
    /// A self-draw is skipped but still consumes its draw, so the
    /// stream stays aligned regardless of where self-draws land.
    pub fn build(config: &SimConfig, rng: &mut SimRng) -> Self {
        let size = config.population_size;
        let influential = config.normalized_influential_count();

        let mut users: Vec<User> = (0..size)
            .map(|id| {
                let tier = if id < influential {
                    UserTier::Influential
                } else {
                    UserTier::Ordinary
                };
                User::new(id, tier)
            })
            .collect();

        let avg = config.avg_followers_ordinary as u64;
        for id in 0..size {
            let mut count = match users[id].tier {
                UserTier::Influential => rng.roll(config.avg_followers_influential() as u64),
                UserTier::Ordinary => rng.roll(avg) + avg / 5,
            };
            count = count.min(size.saturating_sub(1) as u64);

            for _ in 0..count {
                let candidate = rng.roll(size as u64) as UserId;
                if candidate != id {
                    users[id].followers.push(candidate);
                }
            }
        }

        Self { users }
    }

    /// Build a graph from explicit adjacency, all users ordinary.
    /// Self-edges are dropped; out-of-range ids are dropped.
    pub fn from_followers(followers: Vec<Vec<UserId>>) -> Self {
        let size = followers.len();
        let users = followers
            .into_iter()
            .enumerate()
            .map(|(id, list)| {
                let mut user = User::new(id, UserTier::Ordinary);
                user.followers = list
                    .into_iter()
                    .filter(|&f| f != id && f < size)
                    .collect();
                user
            })
            .collect();
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, id: UserId) -> bool {
        id < self.users.len()
    }

    pub fn tier(&self, id: UserId) -> UserTier {
        self.users[id].tier
    }

    pub fn state(&self, id: UserId) -> ActivityState {
        self.users[id].state
    }

    pub fn set_state(&mut self, id: UserId, state: ActivityState) {
        self.users[id].state = state;
    }

    pub fn followers_of(&self, id: UserId) -> &[UserId] {
        &self.users[id].followers
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }
}
