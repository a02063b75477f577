use contracts::SimConfig;
use proptest::prelude::*;
use sim_core::{SimWorld, SocialGraph};

fn base_config() -> SimConfig {
    SimConfig {
        seed: Some(1337),
        population_size: 20,
        influential_count: 2,
        horizon_minutes: 120,
        ..SimConfig::default()
    }
}

#[test]
fn recorded_actions_are_conserved() {
    let mut world = SimWorld::new(base_config());
    world.run();

    let stats = world.stats();
    let series_sum: u64 = stats.actions_per_minute().iter().sum();
    let totals = stats.total_likes()
        + stats.total_replies()
        + stats.total_retweets()
        + stats.total_composes();
    assert_eq!(series_sum, totals);
    assert_eq!(stats.total_composes() as usize, world.content().len());
}

#[test]
fn posts_reference_valid_users_and_minutes() {
    let mut world = SimWorld::new(base_config());
    world.run();

    let population = world.config().population_size;
    let horizon = world.config().horizon_minutes;
    for post in world.content().posts() {
        assert!(post.author_id < population);
        assert!(post.created_minute < horizon);
    }
}

#[test]
fn small_world_terminates_within_bounded_steps() {
    let mut world = SimWorld::new(SimConfig {
        population_size: 10,
        influential_count: 1,
        horizon_minutes: 60,
        ..base_config()
    });
    let summary = world.run();

    assert!(world.is_complete());
    assert_eq!(summary.final_minute, 60);
    assert!(
        summary.steps_taken <= 61,
        "driver looped {} times for a 60-minute horizon",
        summary.steps_taken
    );
}

#[test]
fn tiny_event_capacity_sheds_load_but_still_completes() {
    let mut world = SimWorld::new(SimConfig {
        population_size: 100,
        influential_count: 5,
        horizon_minutes: 30,
        activation_day_percent: 100,
        activation_night_percent: 100,
        event_capacity: 5,
        ..base_config()
    });
    let summary = world.run();

    assert!(world.is_complete());
    assert!(summary.events_dropped > 0, "saturation never hit capacity");
    assert_eq!(summary.final_minute, 30);
}

#[test]
fn lone_user_with_no_activation_produces_zero_statistics() {
    let mut world = SimWorld::new(SimConfig {
        population_size: 1,
        influential_count: 0,
        horizon_minutes: 10,
        activation_day_percent: 0,
        activation_night_percent: 0,
        ..base_config()
    });
    let summary = world.run();
    let report = world.report();

    assert!(world.graph().followers_of(0).is_empty());
    assert_eq!(report.total_posts, 0);
    assert_eq!(report.total_likes, 0);
    assert_eq!(report.total_replies, 0);
    assert_eq!(report.total_retweets, 0);
    assert!(report.actions_per_hour.iter().all(|&c| c == 0));
    assert_eq!(summary.events_executed, 0);
    assert_eq!(summary.final_minute, 10);
    assert_eq!(world.queue_len(), 0);
}

#[test]
fn hourly_histogram_accounts_for_every_recorded_action() {
    let mut world = SimWorld::new(SimConfig {
        horizon_minutes: 1440,
        population_size: 30,
        ..base_config()
    });
    world.run();

    let report = world.report();
    let histogram_sum: u64 = report.actions_per_hour.iter().sum();
    assert_eq!(histogram_sum, world.stats().total_actions());
}

#[test]
fn explicit_graph_population_overrides_config() {
    let graph = SocialGraph::from_followers(vec![vec![1], vec![0], vec![]]);
    let world = SimWorld::with_graph(base_config(), graph);
    assert_eq!(world.config().population_size, 3);
    assert_eq!(world.graph().len(), 3);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn invariants_hold_across_configurations(
        seed in any::<u64>(),
        population in 1usize..40,
        influential in 0usize..10,
        horizon in 1u64..180,
        boost in 0u64..=100,
    ) {
        let config = SimConfig {
            seed: Some(seed),
            population_size: population,
            influential_count: influential,
            horizon_minutes: horizon,
            follower_boost_percent: boost,
            ..SimConfig::default()
        };
        let mut world = SimWorld::new(config);
        let summary = world.run();

        prop_assert!(world.is_complete());
        prop_assert_eq!(summary.final_minute, horizon);
        prop_assert!(summary.steps_taken <= horizon + 1);

        let series_sum: u64 = world.stats().actions_per_minute().iter().sum();
        prop_assert_eq!(series_sum, world.stats().total_actions());
        prop_assert_eq!(world.stats().total_composes() as usize, world.content().len());

        for post in world.content().posts() {
            prop_assert!(post.author_id < population);
            prop_assert!(post.created_minute < horizon);
        }
    }
}
