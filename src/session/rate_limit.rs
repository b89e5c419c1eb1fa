use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const WINDOW_SECS: u64 = 900; // 15 minutes

/// Sliding-window limit on script generations per client IP. Every
/// generation is a paid call to the completion endpoint.
#[derive(Clone)]
pub struct GenerationLimiter {
    max_per_window: usize,
    window: Duration,
    attempts: Arc<Mutex<HashMap<IpAddr, Vec<Instant>>>>,
}

impl GenerationLimiter {
    pub fn new(max_per_window: usize) -> Self {
        Self::with_window(max_per_window, Duration::from_secs(WINDOW_SECS))
    }

    pub fn with_window(max_per_window: usize, window: Duration) -> Self {
        Self {
            max_per_window,
            window,
            attempts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Record a generation for `ip` if it is under the limit. Returns false
    /// (and records nothing) when the IP is blocked.
    pub fn try_acquire(&self, ip: IpAddr) -> bool {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        let window = self.window;

        let timestamps = map.entry(ip).or_default();
        timestamps.retain(|t| now.duration_since(*t) < window);
        if timestamps.len() >= self.max_per_window {
            return false;
        }
        timestamps.push(now);
        true
    }

    /// Drop IPs with no attempts left inside the window.
    pub fn prune(&self) {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        let window = self.window;
        map.retain(|_, timestamps| {
            timestamps.retain(|t| now.duration_since(*t) < window);
            !timestamps.is_empty()
        });
    }

    #[cfg(test)]
    fn tracked_ips(&self) -> usize {
        self.attempts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_after_limit() {
        let limiter = GenerationLimiter::new(2);
        let ip: IpAddr = "10.0.0.1".parse().unwrap();
        assert!(limiter.try_acquire(ip));
        assert!(limiter.try_acquire(ip));
        assert!(!limiter.try_acquire(ip));

        let other: IpAddr = "10.0.0.2".parse().unwrap();
        assert!(limiter.try_acquire(other));
    }

    #[test]
    fn window_expiry_allows_again() {
        let limiter = GenerationLimiter::with_window(1, Duration::from_millis(0));
        let ip: IpAddr = "10.0.0.1".parse().unwrap();
        assert!(limiter.try_acquire(ip));
        assert!(limiter.try_acquire(ip));
        assert_eq!(limiter.tracked_ips(), 1);
        limiter.prune();
        assert_eq!(limiter.tracked_ips(), 0);
    }

    #[test]
    fn prune_keeps_ips_inside_window() {
        let limiter = GenerationLimiter::new(5);
        limiter.try_acquire("10.0.0.1".parse().unwrap());
        limiter.try_acquire("10.0.0.2".parse().unwrap());
        limiter.prune();
        assert_eq!(limiter.tracked_ips(), 2);
    }
}
