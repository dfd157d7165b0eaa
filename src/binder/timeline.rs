use std::time::Duration;

/// Format a `Duration` as `MM:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// The elapsed/duration readout and the 0..=100 position of the timeline bar.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineView {
    pub elapsed: String,
    pub duration: String,
    pub percent: f64,
}

impl Default for TimelineView {
    fn default() -> Self {
        Self {
            elapsed: format_mmss(Duration::ZERO),
            duration: format_mmss(Duration::ZERO),
            percent: 0.0,
        }
    }
}

impl TimelineView {
    /// Refresh from the engine's live position and duration.
    ///
    /// While the duration is unknown the duration text keeps its last value
    /// and the bar sits at 0.
    pub fn update(&mut self, position: Duration, duration: Option<Duration>) {
        self.elapsed = format_mmss(position);
        match duration {
            Some(total) => {
                self.duration = format_mmss(total);
                self.percent = if total.is_zero() {
                    0.0
                } else {
                    (100.0 * position.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 100.0)
                };
            }
            None => self.percent = 0.0,
        }
    }
}
