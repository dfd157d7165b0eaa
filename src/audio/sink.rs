//! `rodio`-backed media primitive.
//!
//! One output stream and one `Sink` live for the whole session. Switching
//! tracks clears the sink and appends a freshly decoded source.

use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::{debug, warn};

use super::media::{MediaError, MediaEvent, MediaPrimitive};

pub struct RodioMedia {
    // Dropping the stream silences the sink, so it is held for our lifetime.
    _stream: OutputStream,
    sink: Sink,
    src: Option<String>,
    duration: Option<Duration>,
    metadata_pending: bool,
    has_source: bool,
    position_interval: Duration,
    last_position_event: Option<Instant>,
}

impl RodioMedia {
    /// Open the default output device.
    pub fn open_default(position_interval: Duration) -> Result<Self, MediaError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped, which garbles the TUI.
        stream.log_on_drop(false);

        let sink = Sink::connect_new(stream.mixer());
        sink.pause();

        Ok(Self {
            _stream: stream,
            sink,
            src: None,
            duration: None,
            metadata_pending: false,
            has_source: false,
            position_interval,
            last_position_event: None,
        })
    }
}

/// Read the length of `src` from its tags when the decoder cannot tell.
fn probe_duration(src: &str) -> Option<Duration> {
    match lofty::read_from_path(src) {
        Ok(tagged) => Some(tagged.properties().duration()).filter(|d| !d.is_zero()),
        Err(e) => {
            debug!(src, error = %e, "duration probe failed");
            None
        }
    }
}

impl MediaPrimitive for RodioMedia {
    fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    fn load(&mut self, src: &str) -> Result<(), MediaError> {
        // `clear` drops queued sources and pauses the sink.
        self.sink.clear();
        self.src = Some(src.to_string());
        self.duration = None;
        self.metadata_pending = false;
        self.has_source = false;
        self.last_position_event = None;

        let file = File::open(src).map_err(|source| MediaError::Open {
            src: src.to_string(),
            source,
        })?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|source| MediaError::Decode {
            src: src.to_string(),
            source,
        })?;

        self.duration = decoder.total_duration();
        self.metadata_pending = self.duration.is_none();
        self.sink.append(decoder);
        self.sink.pause();
        self.has_source = true;
        Ok(())
    }

    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn paused(&self) -> bool {
        self.sink.is_paused()
    }

    fn current_time(&self) -> Duration {
        self.sink.get_pos()
    }

    fn seek(&mut self, pos: Duration) -> Result<(), MediaError> {
        self.sink.try_seek(pos)?;
        Ok(())
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn volume(&self) -> f32 {
        self.sink.volume()
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume);
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        if self.metadata_pending {
            self.metadata_pending = false;
            if let Some(src) = self.src.as_deref() {
                self.duration = probe_duration(src);
                if self.duration.is_none() {
                    warn!(src, "duration unknown; seeking disabled for this track");
                }
            }
            return Some(MediaEvent::PositionChanged);
        }

        if !self.has_source || self.sink.is_paused() {
            return None;
        }

        if self.sink.empty() {
            self.has_source = false;
            return Some(MediaEvent::Ended);
        }

        let now = Instant::now();
        let due = self
            .last_position_event
            .is_none_or(|t| now.duration_since(t) >= self.position_interval);
        if due {
            self.last_position_event = Some(now);
            Some(MediaEvent::PositionChanged)
        } else {
            None
        }
    }
}
