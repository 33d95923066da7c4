use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpResponse,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::utils::ResponseData;

#[derive(Clone)]
pub struct RateLimitConfig {
    pub requests_per_window: u32,
    pub window_duration: Duration,
}

impl RateLimitConfig {
    pub fn per_minute(requests: u32) -> Self {
        Self {
            requests_per_window: requests,
            window_duration: Duration::from_secs(60),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::per_minute(100)
    }
}

struct RateLimitEntry {
    count: u32,
    window_start: Instant,
}

/// Fixed-window in-memory limiter keyed by client IP.
pub struct RateLimiter {
    config: RateLimitConfig,
    entries: Arc<RwLock<HashMap<String, RateLimitEntry>>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let entry = entries.entry(key.to_string()).or_insert(RateLimitEntry {
            count: 0,
            window_start: now,
        });

        // Reset window if expired
        if now.duration_since(entry.window_start) >= self.config.window_duration {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= self.config.requests_per_window {
            return false;
        }

        entry.count += 1;
        true
    }

    pub async fn cleanup_old_entries(&self) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| {
            now.duration_since(entry.window_start) < self.config.window_duration * 2
        });
    }
}

pub struct RateLimitMiddleware {
    limiter: Arc<RateLimiter>,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        })
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    limiter: Arc<RateLimiter>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Get client IP for rate limiting
        let client_ip = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        let limiter = self.limiter.clone();
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if !limiter.check(&client_ip).await {
                let response = HttpResponse::TooManyRequests().json(ResponseData::message(
                    429,
                    "Rate limit exceeded. Please try again later.",
                ));
                return Ok(req.into_response(response).map_into_right_body());
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

// Cleanup task for rate limiter
pub fn spawn_cleanup_task(limiter: Arc<RateLimiter>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300)); // Every 5 minutes
        loop {
            interval.tick().await;
            limiter.cleanup_old_entries().await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_requests_within_limit_pass() {
        let limiter = RateLimiter::new(RateLimitConfig::per_minute(3));

        assert!(limiter.check("10.0.0.1").await);
        assert!(limiter.check("10.0.0.1").await);
        assert!(limiter.check("10.0.0.1").await);
    }

    #[tokio::test]
    async fn test_requests_over_limit_are_blocked() {
        let limiter = RateLimiter::new(RateLimitConfig::per_minute(2));

        assert!(limiter.check("10.0.0.2").await);
        assert!(limiter.check("10.0.0.2").await);
        assert!(!limiter.check("10.0.0.2").await);
        assert!(!limiter.check("10.0.0.2").await);
    }

    #[tokio::test]
    async fn test_clients_are_limited_independently() {
        let limiter = RateLimiter::new(RateLimitConfig::per_minute(1));

        assert!(limiter.check("10.0.0.3").await);
        assert!(!limiter.check("10.0.0.3").await);
        assert!(limiter.check("10.0.0.4").await);
    }

    #[tokio::test]
    async fn test_cleanup_keeps_live_entries() {
        let limiter = RateLimiter::new(RateLimitConfig::per_minute(5));

        assert!(limiter.check("10.0.0.5").await);
        limiter.cleanup_old_entries().await;

        // Entry is still within its window, so the count carries over
        assert!(limiter.check("10.0.0.5").await);
        let entries = limiter.entries.read().await;
        assert_eq!(entries.get("10.0.0.5").map(|e| e.count), Some(2));
    }
}
