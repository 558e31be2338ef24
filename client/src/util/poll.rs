//! Fixed-interval refresh loops tied to a component's lifetime.
//!
//! Each view starts one loop on mount. The loop runs the view's tick future
//! right away, sleeps for the interval, then checks an alive flag cleared by
//! `on_cleanup` before the next tick. Ticks run sequentially, so a slow fetch
//! delays the next tick instead of overlapping.

use std::time::Duration;

pub const MODULES_INTERVAL: Duration = Duration::from_secs(2);
pub const HISTORY_INTERVAL: Duration = Duration::from_secs(5);
pub const CAMERA_INTERVAL: Duration = Duration::from_secs(10);
pub const ANALYTICS_INTERVAL: Duration = Duration::from_secs(10);
pub const SCHEDULES_INTERVAL: Duration = Duration::from_secs(10);

/// Run `tick` once immediately and then every `interval` until the owning
/// component is cleaned up. No-op during SSR.
pub fn spawn_poll<F, Fut>(interval: Duration, mut tick: F)
where
    F: FnMut() -> Fut + 'static,
    Fut: std::future::Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let alive = Arc::new(AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                if !alive_task.load(Ordering::Relaxed) {
                    break;
                }
                tick().await;
                gloo_timers::future::sleep(interval).await;
            }
        });
        leptos::prelude::on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (interval, &mut tick);
    }
}

/// Fire `task` once without waiting for the next tick. No-op during SSR.
pub fn spawn_once<Fut>(task: Fut)
where
    Fut: std::future::Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(task);
    #[cfg(not(feature = "hydrate"))]
    drop(task);
}
