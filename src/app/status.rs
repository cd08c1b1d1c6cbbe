//! Rotating progress messages for the loading overlay

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Anything that can display a one-line status.
pub trait StatusSink: Send + Sync + 'static {
    fn show_status(&self, text: &str);
}

/// Cycles through messages on a fixed interval until stopped.
///
/// Emissions happen while holding `generation`; `stop` bumps it under the same
/// lock, so a tick that was already scheduled can never emit once `stop` has
/// returned. Must be started from inside a tokio runtime.
pub struct StatusRotator {
    sink: Arc<dyn StatusSink>,
    generation: Arc<Mutex<u64>>,
    cancel: Option<CancellationToken>,
}

impl StatusRotator {
    pub fn new(sink: Arc<dyn StatusSink>) -> Self {
        Self {
            sink,
            generation: Arc::new(Mutex::new(0)),
            cancel: None,
        }
    }

    /// Emit `messages[0]` now, then the next one every `interval`, wrapping.
    /// Replaces any rotation already running.
    pub fn start(&mut self, messages: Vec<String>, interval: Duration) {
        let mut current = self.generation.lock().unwrap();
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        *current += 1;
        let generation = *current;

        let Some(first) = messages.first() else {
            return;
        };
        self.sink.show_status(first);
        drop(current);

        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        let sink = self.sink.clone();
        let shared = self.generation.clone();

        debug!(count = messages.len(), interval_ms = interval.as_millis() as u64, "Status rotation started");

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            let mut index = 1usize;
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let current = shared.lock().unwrap();
                        if *current != generation {
                            break;
                        }
                        sink.show_status(&messages[index % messages.len()]);
                        index += 1;
                    }
                }
            }
        });
    }

    /// Halt the rotation. No message is emitted after this returns.
    pub fn stop(&mut self) {
        let mut current = self.generation.lock().unwrap();
        *current += 1;
        if let Some(token) = self.cancel.take() {
            token.cancel();
            debug!("Status rotation stopped");
        }
    }
}

impl Drop for StatusRotator {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    struct Recorder {
        start: Instant,
        seen: Mutex<Vec<(u64, String)>>,
    }

    impl Recorder {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                start: Instant::now(),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<(u64, String)> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl StatusSink for Recorder {
        fn show_status(&self, text: &str) {
            let at = self.start.elapsed().as_millis() as u64;
            self.seen.lock().unwrap().push((at, text.to_string()));
        }
    }

    fn abc() -> Vec<String> {
        vec!["A".into(), "B".into(), "C".into()]
    }

    #[tokio::test(start_paused = true)]
    async fn cycles_in_order_and_wraps() {
        let recorder = Recorder::new();
        let mut rotator = StatusRotator::new(recorder.clone());
        rotator.start(abc(), Duration::from_millis(2500));

        assert_eq!(recorder.seen(), vec![(0, "A".to_string())]);

        sleep(Duration::from_millis(7_501)).await;
        let expected: Vec<(u64, String)> = vec![
            (0, "A".into()),
            (2_500, "B".into()),
            (5_000, "C".into()),
            (7_500, "A".into()),
        ];
        assert_eq!(recorder.seen(), expected);
        rotator.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_after_stop_even_with_pending_tick() {
        let recorder = Recorder::new();
        let mut rotator = StatusRotator::new(recorder.clone());
        rotator.start(abc(), Duration::from_millis(2500));

        sleep(Duration::from_millis(2_499)).await;
        rotator.stop();
        sleep(Duration::from_millis(20_000)).await;

        assert_eq!(recorder.seen(), vec![(0, "A".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_previous_rotation() {
        let recorder = Recorder::new();
        let mut rotator = StatusRotator::new(recorder.clone());
        rotator.start(abc(), Duration::from_millis(1000));
        sleep(Duration::from_millis(500)).await;
        rotator.start(vec!["X".into(), "Y".into()], Duration::from_millis(1000));
        sleep(Duration::from_millis(1_001)).await;
        rotator.stop();

        let texts: Vec<String> = recorder.seen().into_iter().map(|(_, t)| t).collect();
        assert_eq!(texts, vec!["A", "X", "Y"]);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_message_list_is_silent() {
        let recorder = Recorder::new();
        let mut rotator = StatusRotator::new(recorder.clone());
        rotator.start(Vec::new(), Duration::from_millis(10));
        sleep(Duration::from_millis(100)).await;
        assert!(recorder.seen().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_rotator_stops_it() {
        let recorder = Recorder::new();
        {
            let mut rotator = StatusRotator::new(recorder.clone());
            rotator.start(abc(), Duration::from_millis(100));
        }
        sleep(Duration::from_millis(1_000)).await;
        assert_eq!(recorder.seen().len(), 1);
    }
}
