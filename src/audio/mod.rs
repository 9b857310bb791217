//! Audio cues
//!
//! Cues are fire-and-forget: the game never waits on or inspects playback.

use std::io::Write;

/// Something worth a sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// The snake ate food
    Ate,
    /// The snake hit a wall or itself
    Collided,
    /// A turn was accepted
    Moved,
}

/// Where cues go
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Rings the terminal bell for eating and crashing; turns stay quiet
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: AudioCue) {
        log::debug!("audio cue {:?}", cue);

        if matches!(cue, AudioCue::Ate | AudioCue::Collided) {
            let rung = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
            if let Err(e) = rung {
                log::debug!("terminal bell failed: {}", e);
            }
        }
    }
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, cue: AudioCue) {
        log::trace!("muted audio cue {:?}", cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_rings_for_eat_and_crash_only() {
        let mut bell = TerminalBell::new(Vec::new());

        bell.play(AudioCue::Moved);
        assert!(bell.out.is_empty());

        bell.play(AudioCue::Ate);
        bell.play(AudioCue::Collided);
        assert_eq!(bell.out, b"\x07\x07");
    }

    #[test]
    fn test_silent_sink() {
        let mut sink = Silent;
        sink.play(AudioCue::Ate);
    }
}
