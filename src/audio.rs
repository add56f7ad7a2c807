//! Audio boundary: the contract sketches need from the platform mixer.
//!
//! Decoding and output belong to the platform. The core only describes clips
//! that can start concurrent voices, plus a frame-driven fade helper used to
//! cross-fade layered loops.

use crate::error::AssetError;

/// Lowest playback rate passed to a clip after clamping.
pub const MIN_RATE: f32 = 0.01;

/// Per-voice playback parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlayOptions {
    pub rate: f32,
    /// Linear gain in [0, 1].
    pub volume: f32,
}

impl PlayOptions {
    pub fn new(rate: f32, volume: f32) -> Self {
        PlayOptions { rate, volume }
    }

    /// Clamp into the range a clip expects. Callers clamp; clips do not validate.
    pub fn clamped(self) -> Self {
        PlayOptions {
            rate: if self.rate.is_finite() { self.rate.max(MIN_RATE) } else { 1.0 },
            volume: if self.volume.is_finite() { self.volume.clamp(0.0, 1.0) } else { 0.0 },
        }
    }

    /// Scale the volume by a master gain, then clamp.
    pub fn with_master(self, master: f32) -> Self {
        PlayOptions { volume: self.volume * master, ..self }.clamped()
    }
}

impl Default for PlayOptions {
    fn default() -> Self {
        PlayOptions { rate: 1.0, volume: 1.0 }
    }
}

/// One playing instance of a clip.
pub trait Voice {
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
    fn volume(&self) -> f32;
    fn is_stopped(&self) -> bool;
}

/// A loaded sound that can start any number of overlapping voices.
pub trait Clip {
    type Voice: Voice;

    fn play(&self, options: PlayOptions) -> Self::Voice;
}

/// Platform loader. Asynchronous platforms pair each call with a
/// [`LoadTicket`](crate::resources::LoadTicket) on the host's barrier.
pub trait AudioBackend {
    type Clip: Clip;

    fn load(&mut self, path: &str) -> Result<Self::Clip, AssetError>;
}

/// Linear fade to silence over a fixed duration, stopping the voice at the end.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VolumeFade {
    start_volume: f32,
    duration: f32,
    elapsed: f32,
}

impl VolumeFade {
    /// Shortest accepted fade, so a zero duration still ramps for a few frames.
    pub const MIN_DURATION: f32 = 0.05;

    pub fn new(start_volume: f32, duration: f32) -> Self {
        VolumeFade {
            start_volume,
            duration: duration.max(Self::MIN_DURATION),
            elapsed: 0.0,
        }
    }

    /// Start fading from whatever the voice currently plays at.
    pub fn from_voice<V: Voice>(voice: &V, duration: f32) -> Self {
        Self::new(voice.volume(), duration)
    }

    /// Advance by `dt` seconds. Returns `true` once the voice has been stopped.
    pub fn step<V: Voice>(&mut self, voice: &mut V, dt: f32) -> bool {
        if voice.is_stopped() {
            return true;
        }
        if dt > 0.0 {
            self.elapsed += dt;
        }
        let k = (self.elapsed / self.duration).min(1.0);
        voice.set_volume(self.start_volume * (1.0 - k));
        if k >= 1.0 {
            voice.stop();
            return true;
        }
        false
    }

    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).min(1.0)
    }
}
