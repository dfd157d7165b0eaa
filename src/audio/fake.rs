//! Scripted media primitive for tests.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use super::media::{MediaError, MediaEvent, MediaPrimitive};

#[derive(Debug)]
pub struct FakeMedia {
    pub src: Option<String>,
    /// Every source passed to `load`, in order.
    pub loads: Vec<String>,
    pub paused: bool,
    pub position: Duration,
    /// Duration reported right after a successful load.
    pub duration_on_load: Option<Duration>,
    pub duration: Option<Duration>,
    pub volume: f32,
    pub events: VecDeque<MediaEvent>,
    /// Loading this source fails.
    pub broken_src: Option<String>,
}

impl Default for FakeMedia {
    fn default() -> Self {
        Self {
            src: None,
            loads: Vec::new(),
            paused: true,
            position: Duration::ZERO,
            duration_on_load: Some(Duration::from_secs(200)),
            duration: None,
            volume: 1.0,
            events: VecDeque::new(),
            broken_src: None,
        }
    }
}

impl MediaPrimitive for FakeMedia {
    fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    fn load(&mut self, src: &str) -> Result<(), MediaError> {
        self.loads.push(src.to_string());
        self.src = Some(src.to_string());
        self.paused = true;
        self.position = Duration::ZERO;
        if self.broken_src.as_deref() == Some(src) {
            self.duration = None;
            return Err(MediaError::Open {
                src: src.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "missing"),
            });
        }
        self.duration = self.duration_on_load;
        Ok(())
    }

    fn play(&mut self) {
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> Duration {
        self.position
    }

    fn seek(&mut self, pos: Duration) -> Result<(), MediaError> {
        self.position = pos;
        Ok(())
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        self.events.pop_front()
    }
}
