pub use crate::audio::SampleBuffer;
use crate::shared::ChannelId;

#[derive(Clone, Debug)]
pub enum AudioCommand {
    // Decoding happens on the ui thread (file io in the audio callback is a
    // no-go), so a new source arrives as an already-loaded buffer. `None`
    // means the source couldn't be loaded and the channel goes quiet.
    SetBuffer { channel: ChannelId, buffer: Option<SampleBuffer> },

    // Seek back to frame 0
    Reset(ChannelId),

    // Start sounding from wherever the playhead is
    Play(ChannelId),

    // Reset then Play as one message, so a full queue keeps or drops the
    // whole hit
    Trigger(ChannelId),

    SetVolume { channel: ChannelId, volume: f32 },
}
