//! Interface to audio backends which actually sound chords, plus playback helpers.

use std::time::Duration;

use crate::{
    keyboard::KeyPress,
    settings::{FlamValue, Instrument, PianoSettings},
};

#[cfg(feature = "player")]
mod scheduler;
#[cfg(feature = "player")]
pub use scheduler::{
    PlaybackEvent, PlaybackOptions, ProgressionPlayer, StopHandle, EVENT_QUEUE_SIZE,
};

// -------------------------------------------------------------------------------------------------

/// Audio backend which plays MIDI notes.
///
/// Implementations should tolerate `stop_chord` calls while nothing is playing.
pub trait AudioPlayer {
    /// Play the given MIDI notes as chord. Volume is in range [0..=1].
    fn play_chord(&mut self, notes: &[i32], instrument: Option<Instrument>, volume: f32);
    /// Play a single bass note. Volume is in range [0..=1].
    fn play_bass_note(&mut self, note: i32, volume: f32);
    /// Stop all currently playing chord notes.
    fn stop_chord(&mut self);

    /// Delay between successive notes of the following chords. Strumming is optional.
    fn set_flam_delay(&mut self, _delay: Duration) {}
    /// Play a metronome click with the given number in range [1..=4].
    fn play_click(&mut self, _click: u8) {}
}

impl<P: AudioPlayer + ?Sized> AudioPlayer for Box<P> {
    fn play_chord(&mut self, notes: &[i32], instrument: Option<Instrument>, volume: f32) {
        (**self).play_chord(notes, instrument, volume)
    }
    fn play_bass_note(&mut self, note: i32, volume: f32) {
        (**self).play_bass_note(note, volume)
    }
    fn stop_chord(&mut self) {
        (**self).stop_chord()
    }
    fn set_flam_delay(&mut self, delay: Duration) {
        (**self).set_flam_delay(delay)
    }
    fn play_click(&mut self, click: u8) {
        (**self).play_click(click)
    }
}

// -------------------------------------------------------------------------------------------------

/// Hands key presses over to an [`AudioPlayer`], applying tempo synced flams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackContext {
    pub bpm: f32,
    pub flam: FlamValue,
}

impl Default for PlaybackContext {
    fn default() -> Self {
        Self::new(&PianoSettings::default())
    }
}

impl PlaybackContext {
    pub fn new(settings: &PianoSettings) -> Self {
        Self {
            bpm: settings.bpm,
            flam: settings.flam,
        }
    }

    /// Delay between two successive chord notes in milliseconds.
    pub fn flam_delay_ms(&self) -> f32 {
        self.flam.delay_ms(self.bpm)
    }

    /// Start delay of each of the given number of chord notes.
    pub fn note_delays(&self, note_count: usize) -> Vec<Duration> {
        let delay = flam_delay(self.flam_delay_ms());
        (0..note_count).map(|index| delay * index as u32).collect()
    }

    /// Play a key press: stops the previous chord, then plays the new chord and its bass note.
    pub fn play_key_press<P: AudioPlayer + ?Sized>(&self, player: &mut P, press: &KeyPress) {
        log::debug!("Sending {} with bass {} to player", press.chord, press.bass_note);
        player.stop_chord();
        player.set_flam_delay(flam_delay(self.flam_delay_ms()));
        player.play_chord(&press.chord.notes, Some(press.instrument), press.chord_volume);
        player.play_bass_note(press.bass_note, press.bass_volume);
    }
}

fn flam_delay(delay_ms: f32) -> Duration {
    if delay_ms.is_finite() && delay_ms > 0.0 {
        Duration::from_secs_f32(delay_ms / 1000.0)
    } else {
        Duration::ZERO
    }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        keyboard::{Keyboard, SlotId},
        note::NoteName,
        scale::MusicMode,
    };

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Chord(Vec<i32>, Option<Instrument>, f32),
        Bass(i32, f32),
        Stop,
        Flam(Duration),
        Click(u8),
    }

    /// Records all calls.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingPlayer {
        pub calls: Vec<Call>,
    }

    impl AudioPlayer for RecordingPlayer {
        fn play_chord(&mut self, notes: &[i32], instrument: Option<Instrument>, volume: f32) {
            self.calls.push(Call::Chord(notes.to_vec(), instrument, volume));
        }
        fn play_bass_note(&mut self, note: i32, volume: f32) {
            self.calls.push(Call::Bass(note, volume));
        }
        fn stop_chord(&mut self) {
            self.calls.push(Call::Stop);
        }
        fn set_flam_delay(&mut self, delay: Duration) {
            self.calls.push(Call::Flam(delay));
        }
        fn play_click(&mut self, click: u8) {
            self.calls.push(Call::Click(click));
        }
    }

    #[test]
    fn key_presses() {
        let settings = PianoSettings {
            mode: MusicMode::Major,
            ..Default::default()
        };
        let mut keyboard = Keyboard::with_settings(&settings);
        let press = keyboard
            .press(SlotId::key(NoteName::G), &settings)
            .unwrap();

        let mut player = RecordingPlayer::default();
        PlaybackContext::new(&settings).play_key_press(&mut player, &press);
        assert_eq!(
            player.calls,
            vec![
                Call::Stop,
                Call::Flam(Duration::ZERO),
                Call::Chord(vec![67, 71, 74], Some(Instrument::Balafon), 0.25),
                Call::Bass(43, 0.75),
            ]
        );
    }

    #[test]
    fn boxed_players() {
        fn click<P: AudioPlayer>(player: &mut P) {
            player.play_click(3);
            player.stop_chord();
        }
        let mut player = Box::new(RecordingPlayer::default());
        click(&mut player);
        assert_eq!(player.calls, vec![Call::Click(3), Call::Stop]);
    }

    #[test]
    fn flams() {
        let context = PlaybackContext {
            bpm: 120.0,
            flam: FlamValue::Div16,
        };
        // 2000 ms per bar / 16 * 2
        assert_eq!(context.flam_delay_ms(), 250.0);
        assert_eq!(
            context.note_delays(3),
            vec![
                Duration::ZERO,
                Duration::from_millis(250),
                Duration::from_millis(500)
            ]
        );
        assert_eq!(
            PlaybackContext::default().note_delays(2),
            vec![Duration::ZERO, Duration::ZERO]
        );
    }
}
