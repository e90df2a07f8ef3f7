use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// A repeating tick source for one round.
///
/// The first tick fires one `period` after spawning. The task stops when
/// `on_tick` breaks, when [`CountdownHandle::cancel`] is called, or when the
/// handle is dropped.
#[derive(Debug)]
pub struct CountdownHandle {
    handle: JoinHandle<()>,
}

impl CountdownHandle {
    pub fn spawn<F, Fut>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

            loop {
                interval.tick().await;
                if on_tick().await.is_break() {
                    break;
                }
            }
        });

        Self { handle }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting(limit: u32) -> (Arc<AtomicU32>, impl FnMut() -> std::future::Ready<ControlFlow<()>>) {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = ticks.clone();
        let on_tick = move || {
            let seen = counter.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(if seen >= limit {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            })
        };
        (ticks, on_tick)
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let (ticks, on_tick) = counting(u32::MAX);
        let _countdown = CountdownHandle::spawn(Duration::from_secs(1), on_tick);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_on_break() {
        let (ticks, on_tick) = counting(3);
        let countdown = CountdownHandle::spawn(Duration::from_secs(1), on_tick);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
        assert!(countdown.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (ticks, on_tick) = counting(u32::MAX);
        let countdown = CountdownHandle::spawn(Duration::from_secs(1), on_tick);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        countdown.cancel();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_ticks() {
        let (ticks, on_tick) = counting(u32::MAX);
        let countdown = CountdownHandle::spawn(Duration::from_secs(1), on_tick);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        drop(countdown);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }
}
