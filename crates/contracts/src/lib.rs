//! v1 cross-boundary contracts for the diffusion kernel, CLI, and reporting.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION_V1: &str = "1.0";
pub const MINUTES_PER_HOUR: u64 = 60;
pub const HOURS_PER_DAY: usize = 24;
pub const MINUTES_PER_DAY: u64 = MINUTES_PER_HOUR * HOURS_PER_DAY as u64;

/// Dense user identifier in `[0, population_size)`.
pub type UserId = usize;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserTier {
    Ordinary,
    Influential,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityState {
    Inactive,
    Active,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Wake an inactive user; arms a follow-up action.
    Activate,
    /// Perform one engagement action, then go back to sleep.
    Act,
}

/// A scheduled unit of work in the event queue.
///
/// `sequence` is assigned by the queue at insertion time and breaks ties
/// between events due at the same minute, keeping same-minute execution
/// in FIFO order for reproducible runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub due_minute: u64,
    pub kind: EventKind,
    pub user_id: UserId,
    pub sequence: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimConfig {
    pub schema_version: String,
    pub run_id: String,
    /// Seed for the deterministic random stream. `None` means the world
    /// derives one from wall-clock entropy, so unseeded runs differ.
    pub seed: Option<u64>,
    pub population_size: usize,
    pub influential_count: usize,
    pub horizon_minutes: u64,
    pub avg_followers_ordinary: usize,
    pub influential_multiplier: usize,
    pub active_day_start_minute: u64,
    pub active_day_end_minute: u64,
    pub activation_day_percent: u64,
    pub activation_night_percent: u64,
    pub follower_boost_percent: u64,
    pub event_capacity: usize,
    pub content_capacity: usize,
    pub notes: Option<String>,
}

impl SimConfig {
    pub fn avg_followers_influential(&self) -> usize {
        self.avg_followers_ordinary
            .saturating_mul(self.influential_multiplier)
    }

    /// Influential count can never exceed the population.
    pub fn normalized_influential_count(&self) -> usize {
        self.influential_count.min(self.population_size)
    }

    /// Whether `minute` falls inside the active-day window. The end
    /// minute is part of the window.
    pub fn in_active_window(&self, minute: u64) -> bool {
        minute >= self.active_day_start_minute && minute <= self.active_day_end_minute
    }

    /// Activation chance (percent) for an inactive user at `minute`.
    pub fn activation_percent_at(&self, minute: u64) -> u64 {
        if self.in_active_window(minute) {
            self.activation_day_percent
        } else {
            self.activation_night_percent
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            run_id: "run_local_001".to_string(),
            seed: None,
            population_size: 100,
            influential_count: 5,
            horizon_minutes: MINUTES_PER_DAY,
            avg_followers_ordinary: 5,
            influential_multiplier: 6,
            active_day_start_minute: 8 * MINUTES_PER_HOUR,
            active_day_end_minute: 22 * MINUTES_PER_HOUR,
            activation_day_percent: 30,
            activation_night_percent: 10,
            follower_boost_percent: 33,
            event_capacity: 200_000,
            content_capacity: 200_000,
            notes: None,
        }
    }
}

/// Aggregate engagement figures for a completed run, consumed by the
/// reporting front end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngagementReport {
    pub schema_version: String,
    pub run_id: String,
    pub total_posts: usize,
    pub influential_posts: usize,
    pub ordinary_posts: usize,
    pub total_likes: u64,
    pub total_replies: u64,
    pub total_retweets: u64,
    pub avg_likes_per_post: f64,
    pub avg_replies_per_post: f64,
    pub avg_retweets_per_post: f64,
    /// Actions bucketed by simulated hour of day; minutes beyond the
    /// first day are not represented here.
    pub actions_per_hour: [u64; HOURS_PER_DAY],
}

/// Final run status: where the clock stopped and what the engine
/// processed or shed along the way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunSummary {
    pub schema_version: String,
    pub run_id: String,
    pub seed: u64,
    pub final_minute: u64,
    pub horizon_minutes: u64,
    pub steps_taken: u64,
    pub events_executed: u64,
    pub events_dropped: u64,
    pub posts_dropped: u64,
    pub replay_hash: u64,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run_id={} seed={} minute={}/{} steps={} executed={} dropped={} shed_posts={} replay={:016x}",
            self.run_id,
            self.seed,
            self.final_minute,
            self.horizon_minutes,
            self.steps_taken,
            self.events_executed,
            self.events_dropped,
            self.posts_dropped,
            self.replay_hash,
        )
    }
}
