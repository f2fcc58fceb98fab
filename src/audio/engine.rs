use crate::audio_api::AudioCommand;
use crate::shared::{ChannelId, NUM_CHANNELS};

use super::frame::StereoFrame;
use super::voice::ChannelVoice;

// Lives inside the output callback. Everything here is fixed-size so the
// callback never allocates; buffers arrive pre-decoded.
pub struct Engine {
    voices: [ChannelVoice; NUM_CHANNELS],
}

impl Engine {
    pub fn new() -> Self {
        Self {
            voices: Default::default(),
        }
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::SetBuffer { channel, buffer } => self.voice_mut(channel).queue_buffer(buffer),
            AudioCommand::Reset(channel) => self.voice_mut(channel).reset(),
            AudioCommand::Play(channel) => self.voice_mut(channel).play(),
            AudioCommand::Trigger(channel) => {
                let voice = self.voice_mut(channel);
                voice.reset();
                voice.play();
            }
            AudioCommand::SetVolume { channel, volume } => self.voice_mut(channel).set_volume(volume),
        }
    }

    pub fn voice(&self, channel: ChannelId) -> &ChannelVoice {
        &self.voices[channel.index()]
    }

    fn voice_mut(&mut self, channel: ChannelId) -> &mut ChannelVoice {
        &mut self.voices[channel.index()]
    }

    pub fn next_frame(&mut self) -> StereoFrame {
        let mut out = StereoFrame::zero();
        for voice in &mut self.voices {
            voice.render_into(&mut out);
        }
        out.clamped()
    }

    // fill an interleaved device buffer; extra device channels get silence
    pub fn render_interleaved(&mut self, data: &mut [f32], channels: usize) {
        if channels == 0 {
            return;
        }
        for chunk in data.chunks_mut(channels) {
            let frame = self.next_frame();
            if channels == 1 {
                chunk[0] = (frame.left + frame.right) * 0.5;
                continue;
            }
            for (i, sample) in chunk.iter_mut().enumerate() {
                *sample = match i {
                    0 => frame.left,
                    1 => frame.right,
                    _ => 0.0,
                };
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SampleBuffer;

    fn loaded_engine() -> Engine {
        let mut engine = Engine::new();
        for (channel, level) in [(ChannelId::Kick, 0.5), (ChannelId::Hihat, 0.25)] {
            engine.handle_cmd(AudioCommand::SetBuffer {
                channel,
                buffer: Some(SampleBuffer::from_frames(vec![StereoFrame::mono(level); 4])),
            });
        }
        engine
    }

    fn trigger(engine: &mut Engine, channel: ChannelId) {
        engine.handle_cmd(AudioCommand::Trigger(channel));
    }

    #[test]
    fn test_silent_until_triggered() {
        let mut engine = loaded_engine();
        assert_eq!(engine.next_frame(), StereoFrame::zero());
    }

    #[test]
    fn test_channels_mix() {
        let mut engine = loaded_engine();
        trigger(&mut engine, ChannelId::Kick);
        trigger(&mut engine, ChannelId::Hihat);
        assert_eq!(engine.next_frame(), StereoFrame::mono(0.75));
    }

    #[test]
    fn test_muted_channel_still_advances() {
        let mut engine = loaded_engine();
        engine.handle_cmd(AudioCommand::SetVolume { channel: ChannelId::Kick, volume: 0.0 });
        trigger(&mut engine, ChannelId::Kick);
        assert_eq!(engine.next_frame(), StereoFrame::zero());
        assert!(engine.voice(ChannelId::Kick).is_playing());
        assert_eq!(engine.voice(ChannelId::Kick).position(), 1);
    }

    #[test]
    fn test_trigger_matches_reset_then_play() {
        let mut split = loaded_engine();
        split.handle_cmd(AudioCommand::Reset(ChannelId::Kick));
        split.handle_cmd(AudioCommand::Play(ChannelId::Kick));
        let mut whole = loaded_engine();
        trigger(&mut whole, ChannelId::Kick);
        for _ in 0..5 {
            assert_eq!(split.next_frame(), whole.next_frame());
        }
    }

    #[test]
    fn test_interleaved_stereo_and_mono() {
        let mut engine = loaded_engine();
        trigger(&mut engine, ChannelId::Kick);
        let mut stereo = [1.0f32; 4];
        engine.render_interleaved(&mut stereo, 2);
        assert_eq!(stereo, [0.5, 0.5, 0.5, 0.5]);

        let mut mono = [1.0f32; 3];
        engine.render_interleaved(&mut mono, 1);
        assert_eq!(mono, [0.5, 0.5, 0.0]); // kick runs out after 4 frames
    }
}
