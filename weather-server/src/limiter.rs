use std::{
    collections::HashMap,
    net::IpAddr,
    sync::Mutex,
    time::{Duration, Instant},
};

/// Fixed-window request limit per client address.
#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    hits: Mutex<HashMap<IpAddr, Window>>,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self { limit, window, hits: Mutex::new(HashMap::new()) }
    }

    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    /// Human readable form, e.g. `5 per 1 minute`.
    pub fn describe(&self) -> String {
        let secs = self.window.as_secs();
        if secs > 0 && secs % 60 == 0 {
            format!("{} per {} minute", self.limit, secs / 60)
        } else {
            format!("{} per {} second", self.limit, secs)
        }
    }

    /// Count one request from `addr`; `false` once the limit is exhausted.
    pub fn check(&self, addr: IpAddr) -> bool {
        self.check_at(addr, Instant::now())
    }

    fn check_at(&self, addr: IpAddr, now: Instant) -> bool {
        let mut hits = self.hits.lock().unwrap_or_else(|p| p.into_inner());

        // Drop expired windows so idle clients don't pile up.
        hits.retain(|_, w| now.duration_since(w.started) < self.window);

        let window = hits.entry(addr).or_insert(Window { started: now, count: 0 });
        if window.count >= self.limit {
            return false;
        }
        window.count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: IpAddr = IpAddr::V4(std::net::Ipv4Addr::new(10, 0, 0, 1));
    const B: IpAddr = IpAddr::V4(std::net::Ipv4Addr::new(10, 0, 0, 2));

    #[test]
    fn allows_up_to_limit() {
        let limiter = RateLimiter::per_minute(5);
        let now = Instant::now();

        for _ in 0..5 {
            assert!(limiter.check_at(A, now));
        }
        assert!(!limiter.check_at(A, now));
    }

    #[test]
    fn clients_are_counted_separately() {
        let limiter = RateLimiter::per_minute(1);
        let now = Instant::now();

        assert!(limiter.check_at(A, now));
        assert!(limiter.check_at(B, now));
        assert!(!limiter.check_at(A, now));
    }

    #[test]
    fn window_resets() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();

        assert!(limiter.check_at(A, now));
        assert!(!limiter.check_at(A, now + Duration::from_secs(59)));
        assert!(limiter.check_at(A, now + Duration::from_secs(60)));
    }

    #[test]
    fn describes_limit() {
        assert_eq!(RateLimiter::per_minute(10).describe(), "10 per 1 minute");
        assert_eq!(RateLimiter::new(3, Duration::from_secs(30)).describe(), "3 per 30 second");
    }
}
