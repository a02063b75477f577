//! Discrete-event diffusion kernel.
//!
//! Simulates a day of posting, retweeting, liking, and replying on a
//! synthetic follower graph. The whole run is a deterministic function
//! of the configured seed: randomness comes from a single SplitMix64
//! stream, and same-minute events execute in insertion order.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                      SimWorld                        │
//! │                                                      │
//! │  activation sweep ──► EventQueue (due_minute, seq)   │
//! │                            │                         │
//! │                            ▼                         │
//! │  Activate / Act handlers ──► SocialGraph (states)    │
//! │                            │                         │
//! │                            ▼                         │
//! │  compose / retweet / like / reply                    │
//! │        │              │                              │
//! │        ▼              ▼                              │
//! │  ContentStore    EngagementStats ──► report          │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod content;
pub mod graph;
pub mod queue;
pub mod rng;
pub mod stats;
pub mod world;

pub use content::{ContentStore, Post};
pub use graph::SocialGraph;
pub use queue::EventQueue;
pub use rng::SimRng;
pub use stats::EngagementStats;
pub use world::{SimWorld, StepMetrics};
