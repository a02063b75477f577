//! Engagement accumulators and report derivation.
//!
//! Written only by the action handlers during a run; read out as an
//! `EngagementReport` once the driver stops.

use contracts::{EngagementReport, HOURS_PER_DAY, MINUTES_PER_HOUR, SCHEMA_VERSION_V1};

use crate::content::ContentStore;

#[derive(Debug, Clone)]
pub struct EngagementStats {
    total_likes: u64,
    total_replies: u64,
    total_retweets: u64,
    total_composes: u64,
    actions_per_minute: Vec<u64>,
}

impl EngagementStats {
    pub fn new(horizon_minutes: u64) -> Self {
        Self {
            total_likes: 0,
            total_replies: 0,
            total_retweets: 0,
            total_composes: 0,
            actions_per_minute: vec![0; horizon_minutes as usize],
        }
    }

    fn bump_minute(&mut self, minute: u64) {
        if let Some(slot) = self.actions_per_minute.get_mut(minute as usize) {
            *slot += 1;
        }
    }

    pub fn record_compose(&mut self, minute: u64) {
        self.total_composes += 1;
        self.bump_minute(minute);
    }

    pub fn record_like(&mut self, minute: u64) {
        self.total_likes += 1;
        self.bump_minute(minute);
    }

    pub fn record_reply(&mut self, minute: u64) {
        self.total_replies += 1;
        self.bump_minute(minute);
    }

    pub fn record_retweet(&mut self, minute: u64) {
        self.total_retweets += 1;
        self.bump_minute(minute);
    }

    pub fn total_likes(&self) -> u64 {
        self.total_likes
    }

    pub fn total_replies(&self) -> u64 {
        self.total_replies
    }

    pub fn total_retweets(&self) -> u64 {
        self.total_retweets
    }

    pub fn total_composes(&self) -> u64 {
        self.total_composes
    }

    pub fn total_actions(&self) -> u64 {
        self.total_likes + self.total_replies + self.total_retweets + self.total_composes
    }

    pub fn actions_per_minute(&self) -> &[u64] {
        &self.actions_per_minute
    }

    /// Sum the per-minute series into 24 hour buckets. Minutes beyond
    /// the first simulated day fall outside the histogram.
    pub fn hourly_histogram(&self) -> [u64; HOURS_PER_DAY] {
        let mut hours = [0u64; HOURS_PER_DAY];
        for (minute, &count) in self.actions_per_minute.iter().enumerate() {
            let hour = minute / MINUTES_PER_HOUR as usize;
            if hour < HOURS_PER_DAY {
                hours[hour] += count;
            }
        }
        hours
    }

    pub fn report(&self, run_id: &str, content: &ContentStore) -> EngagementReport {
        let total_posts = content.len();
        let influential_posts = content.influential_count();
        let per_post = |total: u64| {
            if total_posts == 0 {
                0.0
            } else {
                total as f64 / total_posts as f64
            }
        };

        EngagementReport {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            run_id: run_id.to_string(),
            total_posts,
            influential_posts,
            ordinary_posts: total_posts - influential_posts,
            total_likes: self.total_likes,
            total_replies: self.total_replies,
            total_retweets: self.total_retweets,
            avg_likes_per_post: per_post(self.total_likes),
            avg_replies_per_post: per_post(self.total_replies),
            avg_retweets_per_post: per_post(self.total_retweets),
            actions_per_hour: self.hourly_histogram(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::UserTier;

    #[test]
    fn records_land_in_their_minute_slot() {
        let mut stats = EngagementStats::new(10);
        stats.record_compose(0);
        stats.record_like(0);
        stats.record_reply(9);
        assert_eq!(stats.actions_per_minute()[0], 2);
        assert_eq!(stats.actions_per_minute()[9], 1);
        assert_eq!(stats.total_actions(), 3);
    }

    #[test]
    fn minute_series_sums_to_totals() {
        let mut stats = EngagementStats::new(60);
        for minute in [3, 3, 17, 42, 59] {
            stats.record_retweet(minute);
        }
        stats.record_like(5);
        stats.record_compose(6);

        let series_sum: u64 = stats.actions_per_minute().iter().sum();
        assert_eq!(series_sum, stats.total_actions());
        assert_eq!(stats.total_retweets(), 5);
    }

    #[test]
    fn hourly_histogram_buckets_by_sixty_minutes() {
        let mut stats = EngagementStats::new(1440);
        stats.record_compose(0);
        stats.record_compose(59);
        stats.record_like(60);
        stats.record_reply(1439);

        let hours = stats.hourly_histogram();
        assert_eq!(hours[0], 2);
        assert_eq!(hours[1], 1);
        assert_eq!(hours[23], 1);
        assert_eq!(hours.iter().sum::<u64>(), 4);
    }

    #[test]
    fn report_averages_are_zero_without_posts() {
        let stats = EngagementStats::new(10);
        let content = ContentStore::new(10);
        let report = stats.report("run_avg", &content);
        assert_eq!(report.total_posts, 0);
        assert_eq!(report.avg_likes_per_post, 0.0);
        assert_eq!(report.avg_replies_per_post, 0.0);
        assert_eq!(report.avg_retweets_per_post, 0.0);
    }

    #[test]
    fn report_splits_posts_by_author_tier() {
        let mut stats = EngagementStats::new(10);
        let mut content = ContentStore::new(10);
        content.publish(0, UserTier::Influential, 1);
        content.publish(5, UserTier::Ordinary, 2);
        content.publish(6, UserTier::Ordinary, 3);
        stats.record_like(4);
        stats.record_like(4);

        let report = stats.report("run_split", &content);
        assert_eq!(report.total_posts, 3);
        assert_eq!(report.influential_posts, 1);
        assert_eq!(report.ordinary_posts, 2);
        assert!((report.avg_likes_per_post - 2.0 / 3.0).abs() < 1e-9);
    }
}
