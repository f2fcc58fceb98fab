// Step sequencer core: the pad grid, per-channel state and the tick-driven
// playback loop. Audio and visuals are reached only through the
// `ChannelSink` and `StepRenderer` traits, so the whole thing runs without
// a sound card or a terminal.
use std::time::Duration;

use crate::shared::{ChannelId, DEFAULT_BPM, MAX_BPM, MIN_BPM, NUM_CHANNELS, NUMBER_OF_PADS};

pub mod clock;

use clock::Timer;

// One drum voice's audio output.
pub trait ChannelSink {
    // Seek back to the start of the sample.
    fn reset(&mut self);
    // Begin (or keep) sounding from the current position.
    fn play(&mut self);
    fn set_volume(&mut self, volume: f32);
    fn set_source(&mut self, source: &str);

    // One hit: restart from zero even if it's still sounding, then play.
    // Sinks that can ship both halves as one message should override this.
    fn trigger(&mut self) {
        self.reset();
        self.play();
    }
}

// Receives the transient highlight for the step being played.
pub trait StepRenderer {
    fn pulse(&mut self, step: usize);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    cells: [[bool; NUMBER_OF_PADS]; NUM_CHANNELS],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, channel: ChannelId, step: usize) -> bool {
        self.cells[channel.index()]
            .get(step)
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, channel: ChannelId, step: usize, active: bool) {
        if let Some(cell) = self.cells[channel.index()].get_mut(step) {
            *cell = active;
        }
    }

    pub fn toggle(&mut self, channel: ChannelId, step: usize) {
        let current = self.is_active(channel, step);
        self.set(channel, step, !current);
    }

    pub fn row(&self, channel: ChannelId) -> &[bool; NUMBER_OF_PADS] {
        &self.cells[channel.index()]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Channel {
    pub id: ChannelId,
    pub sound_source: String,
    pub muted: bool,
}

impl Channel {
    pub fn volume(&self) -> f32 {
        if self.muted { 0.0 } else { 1.0 }
    }
}

// What the user last asked the transport to do. Tempo commits restart
// playback only when this is `Playing`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayIntent {
    Playing,
    Stopped,
}

pub struct StepSequencer<S: ChannelSink, R: StepRenderer> {
    grid: Grid,
    channels: [Channel; NUM_CHANNELS],
    sinks: [S; NUM_CHANNELS],
    renderer: R,
    step_index: u64,
    bpm: f32,
    bpm_range: (f32, f32),
    timer: Option<Timer>,
    intent: PlayIntent,
}

impl<S: ChannelSink, R: StepRenderer> StepSequencer<S, R> {
    // `sources` and `sinks` are indexed by `ChannelId::index()`. Each sink is
    // pointed at its initial source and left at full volume.
    pub fn new(sources: [String; NUM_CHANNELS], mut sinks: [S; NUM_CHANNELS], renderer: R) -> Self {
        for (sink, source) in sinks.iter_mut().zip(sources.iter()) {
            sink.set_source(source);
            sink.set_volume(1.0);
        }
        let mut sources = sources.into_iter();
        let channels = ChannelId::ALL.map(|id| Channel {
            id,
            sound_source: sources.next().unwrap_or_default(),
            muted: false,
        });

        Self {
            grid: Grid::new(),
            channels,
            sinks,
            renderer,
            step_index: 0,
            bpm: DEFAULT_BPM,
            bpm_range: (MIN_BPM, MAX_BPM),
            timer: None,
            intent: PlayIntent::Stopped,
        }
    }

    // Replaces the accepted tempo range and re-clamps the current tempo.
    pub fn with_bpm_range(mut self, min: f32, max: f32) -> Self {
        self.bpm_range = if min.is_finite() && max.is_finite() {
            (min.min(max), max.max(min))
        } else {
            (MIN_BPM, MAX_BPM)
        };
        self.bpm = self.bpm.clamp(self.bpm_range.0, self.bpm_range.1);
        self
    }

    // -- transport --

    // Play/stop toggle. Arms the interval timer when stopped, cancels it
    // when running.
    pub fn start(&mut self) {
        if self.timer.is_none() {
            self.arm();
            self.intent = PlayIntent::Playing;
            tracing::info!(bpm = self.bpm, interval_ms = self.interval().as_millis() as u64, "playback started");
        } else {
            self.timer = None;
            self.intent = PlayIntent::Stopped;
            tracing::info!(step_index = self.step_index, "playback stopped");
        }
    }

    // Live tempo change. The running timer keeps its old interval until
    // `commit_tempo`.
    pub fn set_tempo(&mut self, bpm: f32) {
        if !bpm.is_finite() {
            return;
        }
        self.bpm = bpm.clamp(self.bpm_range.0, self.bpm_range.1);
    }

    // End of a tempo gesture: drop the timer and, unless the user has
    // stopped playback, re-arm it at the current tempo.
    pub fn commit_tempo(&mut self) {
        self.timer = None;
        if self.intent != PlayIntent::Stopped {
            self.arm();
        }
        tracing::debug!(bpm = self.bpm, running = self.is_running(), "tempo committed");
    }

    // Feeds wall-clock time to the armed timer, running one step per due tick.
    pub fn tick(&mut self, elapsed: Duration) {
        let due = match self.timer.as_mut() {
            Some(timer) => timer.advance(elapsed),
            None => return,
        };
        for _ in 0..due {
            self.advance_step();
        }
    }

    // One tick: fire every active cell on the current step, pulse the step,
    // move on. Muted channels still fire; they just have zero volume.
    pub fn advance_step(&mut self) {
        let step = self.current_step();
        for id in ChannelId::ALL {
            if self.grid.is_active(id, step) {
                self.sinks[id.index()].trigger();
            }
        }
        self.renderer.pulse(step);
        self.step_index = self.step_index.wrapping_add(1);
    }

    fn arm(&mut self) {
        self.timer = Some(Timer::for_bpm(self.bpm));
    }

    // -- channels and grid --

    pub fn set_channel_sound(&mut self, channel: ChannelId, source: &str) {
        let idx = channel.index();
        self.channels[idx].sound_source = source.to_string();
        self.sinks[idx].set_source(source);
        tracing::info!(channel = channel.label(), source, "sound changed");
    }

    pub fn toggle_mute(&mut self, channel: ChannelId) {
        let idx = channel.index();
        let state = &mut self.channels[idx];
        state.muted = !state.muted;
        let volume = state.volume();
        self.sinks[idx].set_volume(volume);
        tracing::debug!(channel = channel.label(), muted = state.muted, "mute toggled");
    }

    pub fn toggle_pad_active(&mut self, channel: ChannelId, step: usize) {
        self.grid.toggle(channel, step);
    }

    // -- getters --

    pub fn current_step(&self) -> usize {
        (self.step_index % NUMBER_OF_PADS as u64) as usize
    }

    pub fn step_index(&self) -> u64 {
        self.step_index
    }

    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    pub fn bpm_range(&self) -> (f32, f32) {
        self.bpm_range
    }

    // Interval of the armed timer, or the one the current tempo would give.
    pub fn interval(&self) -> Duration {
        match &self.timer {
            Some(timer) => timer.interval(),
            None => clock::interval_for_bpm(self.bpm),
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn intent(&self) -> PlayIntent {
        self.intent
    }

    pub fn channel(&self, channel: ChannelId) -> &Channel {
        &self.channels[channel.index()]
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn sink(&self, channel: ChannelId) -> &S {
        &self.sinks[channel.index()]
    }
}
