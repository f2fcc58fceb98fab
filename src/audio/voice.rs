use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;

// One playhead per drum channel. Retriggering doesn't stack voices: a reset
// just drags the single playhead back to frame 0, like an <audio> element.
#[derive(Clone, Debug)]
pub struct ChannelVoice {
    buffer: Option<SampleBuffer>,
    queued: Option<Option<SampleBuffer>>, // next source, swapped in at reset
    pos: usize,
    playing: bool,
    volume: f32,
}

impl Default for ChannelVoice {
    fn default() -> Self {
        Self {
            buffer: None,
            queued: None,
            pos: 0,
            playing: false,
            volume: 1.0,
        }
    }
}

impl ChannelVoice {
    pub fn queue_buffer(&mut self, buffer: Option<SampleBuffer>) {
        if self.playing {
            self.queued = Some(buffer); // let the current hit ring out
        } else {
            self.buffer = buffer;
            self.queued = None;
            self.pos = 0;
        }
    }

    pub fn reset(&mut self) {
        if let Some(next) = self.queued.take() {
            self.buffer = next;
        }
        self.pos = 0;
    }

    pub fn play(&mut self) {
        let len = self.buffer.as_ref().map_or(0, SampleBuffer::len);
        if self.pos >= len {
            // ended (or nothing loaded); play() alone doesn't rewind
            self.playing = false;
            return;
        }
        self.playing = true;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.as_ref().map_or(0, SampleBuffer::len)
    }

    // add this voice's next frame into `out`
    pub fn render_into(&mut self, out: &mut StereoFrame) {
        if !self.playing {
            return;
        }
        let Some(buffer) = self.buffer.as_ref() else {
            self.playing = false;
            return;
        };
        let len = buffer.data.len();
        if let Some(frame) = buffer.data.get(self.pos).copied() {
            out.mix(frame, self.volume);
            self.pos += 1;
        }
        if self.pos >= len {
            self.playing = false;
            self.finish_swap();
        }
    }

    // a source queued while sounding takes over once the old one is done
    fn finish_swap(&mut self) {
        if let Some(next) = self.queued.take() {
            self.buffer = next;
            self.pos = 0;
        }
    }
}
