use std::{
    collections::VecDeque,
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::time::sleep;

/// Timestamps of accepted submissions inside the current window.
#[derive(Debug)]
struct SubmissionLog {
    accepted: VecDeque<Instant>,
}

impl SubmissionLog {
    fn new() -> Self {
        SubmissionLog { accepted: VecDeque::new() }
    }

    fn prune(&mut self, now: Instant, window: Duration) {
        while let Some(oldest) = self.accepted.front() {
            if now.duration_since(*oldest) >= window {
                self.accepted.pop_front();
            } else {
                break;
            }
        }
    }

    fn is_full(&mut self, now: Instant, window: Duration, limit: usize) -> bool {
        self.prune(now, window);
        self.accepted.len() >= limit
    }

    fn record(&mut self, now: Instant, window: Duration) {
        self.prune(now, window);
        self.accepted.push_back(now);
    }

    fn last_seen(&self) -> Option<Instant> {
        self.accepted.back().copied()
    }
}

type Key = String;

/// Sliding-window limiter keyed by client address, used for the contact form.
#[derive(Clone)]
pub struct SubmissionLimiter {
    map: Arc<DashMap<Key, Arc<Mutex<SubmissionLog>>>>,
    limit: usize,
    window: Duration,
}

impl SubmissionLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        SubmissionLimiter {
            map: Arc::new(DashMap::new()),
            limit: limit.max(1) as usize,
            window,
        }
    }

    fn get_log(&self, key: &str) -> Arc<Mutex<SubmissionLog>> {
        if let Some(existing) = self.map.get(key) {
            return existing.clone();
        }
        self.map
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(SubmissionLog::new())))
            .clone()
    }

    /// Whether `key` has used up its accepted submissions for the window.
    pub fn is_limited(&self, key: &str) -> bool {
        self.is_limited_at(key, Instant::now())
    }

    fn is_limited_at(&self, key: &str, now: Instant) -> bool {
        match self.map.get(key) {
            Some(log) => log.lock().is_full(now, self.window, self.limit),
            None => false,
        }
    }

    /// Counts an accepted submission against `key`.
    pub fn record(&self, key: &str) {
        self.record_at(key, Instant::now())
    }

    fn record_at(&self, key: &str, now: Instant) {
        let log = self.get_log(key);
        log.lock().record(now, self.window);
    }

    /// Drops keys with no submission inside the window.
    pub fn evict_idle(&self) -> usize {
        self.evict_idle_at(Instant::now())
    }

    fn evict_idle_at(&self, now: Instant) -> usize {
        let window = self.window;
        let before = self.map.len();
        self.map.retain(|_, log| {
            let mut guard = log.lock();
            guard.prune(now, window);
            guard.last_seen().is_some()
        });
        before.saturating_sub(self.map.len())
    }

    pub fn tracked_keys(&self) -> usize {
        self.map.len()
    }
}

/// Periodically evicts idle keys so the map does not grow without bound.
pub async fn run_eviction(limiter: SubmissionLimiter, interval: Duration) {
    loop {
        sleep(interval).await;
        let removed = limiter.evict_idle();
        if removed > 0 {
            tracing::debug!(removed, remaining = limiter.tracked_keys(), "Evicted idle rate-limit keys");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn allows_up_to_limit_per_key() {
        let limiter = SubmissionLimiter::new(2, HOUR);
        let now = Instant::now();

        assert!(!limiter.is_limited_at("10.0.0.1", now));
        limiter.record_at("10.0.0.1", now);
        assert!(!limiter.is_limited_at("10.0.0.1", now));
        limiter.record_at("10.0.0.1", now);
        assert!(limiter.is_limited_at("10.0.0.1", now));

        assert!(!limiter.is_limited_at("10.0.0.2", now));
    }

    #[test]
    fn checking_does_not_use_up_quota() {
        let limiter = SubmissionLimiter::new(1, HOUR);
        let now = Instant::now();

        for _ in 0..10 {
            assert!(!limiter.is_limited_at("ip", now));
        }
        assert_eq!(limiter.tracked_keys(), 0);
    }

    #[test]
    fn window_slides() {
        let limiter = SubmissionLimiter::new(1, HOUR);
        let start = Instant::now();

        limiter.record_at("ip", start);
        assert!(limiter.is_limited_at("ip", start + Duration::from_secs(1800)));
        assert!(!limiter.is_limited_at("ip", start + HOUR));
    }

    #[test]
    fn idle_keys_are_evicted() {
        let limiter = SubmissionLimiter::new(3, HOUR);
        let start = Instant::now();

        limiter.record_at("old", start);
        limiter.record_at("fresh", start + HOUR);

        let removed = limiter.evict_idle_at(start + HOUR + Duration::from_secs(1));

        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_keys(), 1);
    }
}
