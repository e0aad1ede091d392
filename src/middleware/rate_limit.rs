use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

#[derive(Debug)]
struct Window {
    opened: Instant,
    served: u32,
}

/// Fixed one-second window limiter, shared by every route in a group.
#[derive(Clone, Debug)]
pub struct RpsLimiter {
    budget: u32,
    window: Arc<Mutex<Window>>,
}

impl RpsLimiter {
    fn new(budget: u32) -> Self {
        Self {
            budget: budget.max(1),
            window: Arc::new(Mutex::new(Window {
                opened: Instant::now(),
                served: 0,
            })),
        }
    }

    fn allow(&self) -> bool {
        let mut win = self.window.lock().expect("rate limiter mutex poisoned");
        let now = Instant::now();
        if now.duration_since(win.opened) >= Duration::from_secs(1) {
            win.opened = now;
            win.served = 0;
        }
        if win.served < self.budget {
            win.served += 1;
            true
        } else {
            false
        }
    }
}

pub async fn rps_middleware(
    State(limiter): State<RpsLimiter>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !limiter.allow() {
        return (StatusCode::TOO_MANY_REQUESTS, "rate_limit_exceeded").into_response();
    }
    next.run(req).await
}

pub fn new_rps_state(budget: u32) -> RpsLimiter {
    RpsLimiter::new(budget)
}
