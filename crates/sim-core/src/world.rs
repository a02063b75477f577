//! Simulation world: the clock/driver plus the activation and action
//! policies, owning every collection the run touches.
//!
//! One `step` is one simulated minute: sweep activations while the
//! clock is inside the horizon, then drain and execute due events until
//! none remain (cascade activations with zero jitter land in the same
//! minute and are picked up by the re-drain), then advance the clock,
//! clamped at the horizon. The run ends when the clock has reached the
//! horizon and the queue is empty.

use std::time::{SystemTime, UNIX_EPOCH};

use contracts::{
    ActivityState, EngagementReport, EventKind, RunSummary, ScheduledEvent, SimConfig, UserId,
    SCHEMA_VERSION_V1,
};

use crate::content::ContentStore;
use crate::graph::SocialGraph;
use crate::queue::EventQueue;
use crate::rng::SimRng;
use crate::stats::EngagementStats;

// Action category thresholds on a [0, 100) roll.
const COMPOSE_BELOW: u64 = 40;
const RETWEET_BELOW: u64 = 70;
const LIKE_BELOW: u64 = 85;

// Activation fires U(0,9) minutes after its trigger; the armed action
// follows U(1,5) minutes after activation.
const ACTIVATION_JITTER_MINUTES: u64 = 10;
const ACTION_DELAY_MIN_MINUTES: u64 = 1;
const ACTION_DELAY_SPAN_MINUTES: u64 = 5;

/// What the most recent `step` did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepMetrics {
    pub minute: u64,
    pub activations_scheduled: u64,
    pub events_executed: u64,
}

#[derive(Debug)]
pub struct SimWorld {
    config: SimConfig,
    seed: u64,
    rng: SimRng,
    graph: SocialGraph,
    queue: EventQueue,
    content: ContentStore,
    stats: EngagementStats,
    current_minute: u64,
    steps_taken: u64,
    events_executed: u64,
    replay_hash: u64,
    last_step_metrics: StepMetrics,
}

impl SimWorld {
    /// Build a world from the configuration. Without a configured seed
    /// the world takes one from wall-clock entropy, so unseeded runs
    /// differ run-to-run.
    pub fn new(config: SimConfig) -> Self {
        let seed = config.seed.unwrap_or_else(seed_from_entropy);
        let mut rng = SimRng::new(seed);
        let graph = SocialGraph::build(&config, &mut rng);
        Self::assemble(config, seed, rng, graph)
    }

    /// Build a world around an explicit follower graph, bypassing the
    /// generated population. Scenario seeding and tests use this.
    pub fn with_graph(mut config: SimConfig, graph: SocialGraph) -> Self {
        config.population_size = graph.len();
        let seed = config.seed.unwrap_or_else(seed_from_entropy);
        let rng = SimRng::new(seed);
        Self::assemble(config, seed, rng, graph)
    }

    fn assemble(config: SimConfig, seed: u64, rng: SimRng, graph: SocialGraph) -> Self {
        let queue = EventQueue::new(&config);
        let content = ContentStore::new(config.content_capacity);
        let stats = EngagementStats::new(config.horizon_minutes);
        Self {
            config,
            seed,
            rng,
            graph,
            queue,
            content,
            stats,
            current_minute: 0,
            steps_taken: 0,
            events_executed: 0,
            replay_hash: 0,
            last_step_metrics: StepMetrics::default(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_minute(&self) -> u64 {
        self.current_minute
    }

    pub fn graph(&self) -> &SocialGraph {
        &self.graph
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn stats(&self) -> &EngagementStats {
        &self.stats
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn replay_hash(&self) -> u64 {
        self.replay_hash
    }

    pub fn last_step_metrics(&self) -> StepMetrics {
        self.last_step_metrics
    }

    /// Whether the clock has reached the horizon with nothing queued.
    pub fn is_complete(&self) -> bool {
        self.current_minute >= self.config.horizon_minutes && self.queue.is_empty()
    }

    /// Advance one simulated minute. Returns `false` once the run is
    /// complete and the step did nothing.
    pub fn step(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }

        let minute = self.current_minute;
        let mut metrics = StepMetrics {
            minute,
            ..StepMetrics::default()
        };

        if minute < self.config.horizon_minutes {
            metrics.activations_scheduled = self.sweep_activations(minute);
        }

        // Re-drain until quiet: a cascade scheduled mid-batch for this
        // same minute must execute before the clock moves on.
        loop {
            let due = self.queue.drain_due(minute);
            if due.is_empty() {
                break;
            }
            for event in due {
                self.execute(event);
                metrics.events_executed += 1;
            }
        }

        if self.current_minute < self.config.horizon_minutes {
            self.current_minute += 1;
        }
        self.steps_taken += 1;
        self.last_step_metrics = metrics;
        true
    }

    /// Run to completion and return the final summary.
    pub fn run(&mut self) -> RunSummary {
        while self.step() {}
        self.summary()
    }

    pub fn report(&self) -> EngagementReport {
        self.stats.report(&self.config.run_id, &self.content)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            run_id: self.config.run_id.clone(),
            seed: self.seed,
            final_minute: self.current_minute,
            horizon_minutes: self.config.horizon_minutes,
            steps_taken: self.steps_taken,
            events_executed: self.events_executed,
            events_dropped: self.queue.dropped(),
            posts_dropped: self.content.dropped(),
            replay_hash: self.replay_hash,
        }
    }

    /// Activation policy: every inactive user rolls against the
    /// time-of-day chance; success queues an `Activate` a short jitter
    /// into the future. Returns how many activations were accepted.
    fn sweep_activations(&mut self, minute: u64) -> u64 {
        let percent = self.config.activation_percent_at(minute);
        let mut scheduled = 0;
        for id in 0..self.graph.len() {
            if self.graph.state(id) != ActivityState::Inactive {
                continue;
            }
            if self.rng.chance(percent) {
                let jitter = self.rng.roll(ACTIVATION_JITTER_MINUTES);
                if self.queue.schedule(minute + jitter, EventKind::Activate, id) {
                    scheduled += 1;
                }
            }
        }
        scheduled
    }

    /// Action policy event handlers. Timestamps come from the event's
    /// own due minute, not the wall clock, so a backlog executes with
    /// the times it was scheduled for.
    fn execute(&mut self, event: ScheduledEvent) {
        match event.kind {
            EventKind::Activate => {
                self.graph.set_state(event.user_id, ActivityState::Active);
                let delay =
                    ACTION_DELAY_MIN_MINUTES + self.rng.roll(ACTION_DELAY_SPAN_MINUTES);
                self.queue
                    .schedule(event.due_minute + delay, EventKind::Act, event.user_id);
            }
            EventKind::Act => {
                // A stale Act (its activation already consumed by an
                // earlier one) finds the user inactive and does nothing.
                if self.graph.state(event.user_id) == ActivityState::Active {
                    let roll = self.rng.percent();
                    if roll < COMPOSE_BELOW {
                        self.compose(event.user_id, event.due_minute);
                    } else if roll < RETWEET_BELOW {
                        self.retweet(event.user_id, event.due_minute);
                    } else if roll < LIKE_BELOW {
                        self.like(event.due_minute);
                    } else {
                        self.reply(event.user_id, event.due_minute);
                    }
                    self.graph.set_state(event.user_id, ActivityState::Inactive);
                }
            }
        }
        self.events_executed += 1;
        self.replay_hash = mix_replay_hash(self.replay_hash, &event);
    }

    fn compose(&mut self, user_id: UserId, minute: u64) {
        let tier = self.graph.tier(user_id);
        if self.content.publish(user_id, tier, minute).is_none() {
            // Arena full: the whole action degrades to a no-op.
            return;
        }
        self.spread_to_followers(user_id, minute);
        self.stats.record_compose(minute);
    }

    fn retweet(&mut self, user_id: UserId, minute: u64) {
        match self.content.sample_mut(&mut self.rng) {
            Some(post) => post.retweets += 1,
            None => return,
        }
        self.stats.record_retweet(minute);
        self.spread_to_followers(user_id, minute);
    }

    fn like(&mut self, minute: u64) {
        match self.content.sample_mut(&mut self.rng) {
            Some(post) => post.likes += 1,
            None => return,
        }
        self.stats.record_like(minute);
    }

    fn reply(&mut self, user_id: UserId, minute: u64) {
        match self.content.sample_mut(&mut self.rng) {
            Some(post) => post.replies += 1,
            None => return,
        }
        self.stats.record_reply(minute);
        self.spread_to_followers(user_id, minute);
    }

    /// The cascade: exposure gives each follower an independent chance
    /// of waking up shortly, not a guaranteed reaction.
    fn spread_to_followers(&mut self, user_id: UserId, minute: u64) {
        let percent = self.config.follower_boost_percent;
        for &follower in self.graph.followers_of(user_id) {
            if self.rng.chance(percent) {
                let jitter = self.rng.roll(ACTIVATION_JITTER_MINUTES);
                self.queue
                    .schedule(minute + jitter, EventKind::Activate, follower);
            }
        }
    }
}

fn seed_from_entropy() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0x9e3779b97f4a7c15)
}

fn mix_replay_hash(current: u64, event: &ScheduledEvent) -> u64 {
    let mut hash = current ^ event.due_minute.wrapping_mul(0xa24b_1c62_5b93_2d47);
    hash ^= (event.user_id as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
    hash ^= event.sequence.wrapping_mul(0x517c_c1b7_2722_0a95);
    hash ^= match event.kind {
        EventKind::Activate => 0x2545_f491_4f6c_dd1d,
        EventKind::Act => 0xbf58_476d_1ce4_e5b9,
    };
    hash.rotate_left(17)
}
