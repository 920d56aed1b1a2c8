//! Keyboard and playback settings, as edited in the settings panel.

use std::{fmt::Display, ops::RangeInclusive, str::FromStr};

use anyhow::bail;

use crate::{
    keyboard::SlotId,
    note::{NoteName, Spelling},
    scale::MusicMode,
};

// -------------------------------------------------------------------------------------------------

/// Valid octave shifts of played chords.
pub const OCTAVE_RANGE: RangeInclusive<i32> = -3..=3;
/// Valid chord inversions of played chords.
pub const INVERSION_RANGE: RangeInclusive<i32> = -3..=3;

/// Default tempo in beats per minute.
pub const DEFAULT_BPM: f32 = 120.0;
/// Default chord/bass fader position: chord volume is the fader value, bass volume its
/// complement.
pub const DEFAULT_FADER: f32 = 0.25;

// -------------------------------------------------------------------------------------------------

/// Sound the audio backend uses for chords.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    #[default]
    Balafon,
    Sine,
    Rhodes,
    Piano,
    SteelDrum,
    Synth,
    Pad,
    Guitar,
    Pluck,
    Bass,
}

impl Instrument {
    pub const ALL: [Instrument; 10] = [
        Self::Balafon,
        Self::Sine,
        Self::Rhodes,
        Self::Piano,
        Self::SteelDrum,
        Self::Synth,
        Self::Pad,
        Self::Guitar,
        Self::Pluck,
        Self::Bass,
    ];

    /// Identifier as used by audio backends.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Balafon => "balafon",
            Self::Sine => "sine",
            Self::Rhodes => "rhodes",
            Self::Piano => "piano",
            Self::SteelDrum => "steel_drum",
            Self::Synth => "synth",
            Self::Pad => "pad",
            Self::Guitar => "guitar",
            Self::Pluck => "pluck",
            Self::Bass => "bass",
        }
    }

    /// General MIDI program number, as written into exported MIDI files.
    pub fn midi_program(&self) -> u8 {
        match self {
            Self::Balafon => 108,
            Self::Sine => 80,
            Self::Rhodes => 4,
            Self::Piano => 0,
            Self::SteelDrum => 114,
            Self::Synth => 81,
            Self::Pad => 88,
            Self::Guitar => 24,
            Self::Pluck => 45,
            Self::Bass => 33,
        }
    }

    #[must_use]
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|i| i == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl TryFrom<&str> for Instrument {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, String> {
        let normalized = s.trim().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|i| i.name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| {
                let names = Self::ALL.iter().map(|i| i.name()).collect::<Vec<_>>();
                format!(
                    "Unknown instrument '{}'. Valid instruments are: {}",
                    s,
                    names.join(", ")
                )
            })
    }
}

impl FromStr for Instrument {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// -------------------------------------------------------------------------------------------------

/// Strum delay between the notes of a chord, as note division synced to the tempo.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlamValue {
    #[default]
    Off,
    Div48,
    Div32,
    Div24,
    Div16,
}

impl FlamValue {
    pub const ALL: [FlamValue; 5] = [
        Self::Off,
        Self::Div48,
        Self::Div32,
        Self::Div24,
        Self::Div16,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Div48 => "1/48",
            Self::Div32 => "1/32",
            Self::Div24 => "1/24",
            Self::Div16 => "1/16",
        }
    }

    fn division(&self) -> Option<f32> {
        match self {
            Self::Off => None,
            Self::Div48 => Some(48.0),
            Self::Div32 => Some(32.0),
            Self::Div24 => Some(24.0),
            Self::Div16 => Some(16.0),
        }
    }

    /// Delay in milliseconds between two successive chord notes at the given tempo.
    /// Flams play at half time: a 1/16 flam delays notes by 1/8 of a bar.
    pub fn delay_ms(&self, bpm: f32) -> f32 {
        match self.division() {
            None => 0.0,
            Some(division) => {
                let whole_note_ms = 4.0 * 60_000.0 / bpm;
                whole_note_ms / division * 2.0
            }
        }
    }

    #[must_use]
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl TryFrom<&str> for FlamValue {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, String> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Invalid flam value '{}'. Valid values are: off, 1/48, 1/32, 1/24, 1/16",
                    s
                )
            })
    }
}

impl Display for FlamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// -------------------------------------------------------------------------------------------------

/// Keyboard size: the number of chord slots each key offers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardLayout {
    /// One chord per key.
    #[default]
    XL,
    /// Two chord slots per key.
    XXL,
    /// Three chord slots per key.
    XXXL,
}

impl KeyboardLayout {
    pub fn slot_count(&self) -> usize {
        match self {
            Self::XL => 1,
            Self::XXL => 2,
            Self::XXXL => 3,
        }
    }

    /// Slot identifier of the given key's slot. Single slot layouts use plain key ids.
    /// Slot indices beyond the layout's slot count wrap around.
    pub fn slot_id(&self, note: NoteName, slot: usize) -> SlotId {
        match self {
            Self::XL => SlotId::key(note),
            _ => SlotId::slot(note, slot % self.slot_count()),
        }
    }

    /// All slot identifiers of the given key.
    pub fn slot_ids(&self, note: NoteName) -> Vec<SlotId> {
        (0..self.slot_count())
            .map(|slot| self.slot_id(note, slot))
            .collect()
    }

    #[must_use]
    pub fn next(&self) -> Self {
        match self {
            Self::XL => Self::XXL,
            Self::XXL => Self::XXXL,
            Self::XXXL => Self::XL,
        }
    }
}

impl Display for KeyboardLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

// -------------------------------------------------------------------------------------------------

/// Settings which affect how key presses get played.
#[derive(Debug, Clone, PartialEq)]
pub struct PianoSettings {
    pub key: NoteName,
    pub mode: MusicMode,
    /// Octave shift of played chords, in octaves.
    pub octave: i32,
    pub inversion: i32,
    pub instrument: Instrument,
    /// Chord/bass balance in range [0..=1].
    pub fader: f32,
    /// Show flats instead of sharps. Only applies in `Free` mode.
    pub use_flats: bool,
    pub layout: KeyboardLayout,
    pub flam: FlamValue,
    pub bpm: f32,
}

impl Default for PianoSettings {
    fn default() -> Self {
        Self {
            key: NoteName::C,
            mode: MusicMode::Free,
            octave: 0,
            inversion: 0,
            instrument: Instrument::default(),
            fader: DEFAULT_FADER,
            use_flats: false,
            layout: KeyboardLayout::default(),
            flam: FlamValue::default(),
            bpm: DEFAULT_BPM,
        }
    }
}

impl PianoSettings {
    /// Check that all values are within their valid ranges.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.fader) {
            bail!("Invalid fader value {}: must be in range [0..=1]", self.fader);
        }
        if !self.bpm.is_finite() || self.bpm <= 0.0 {
            bail!("Invalid bpm {}: must be > 0", self.bpm);
        }
        if !OCTAVE_RANGE.contains(&self.octave) {
            bail!(
                "Invalid octave {}: must be in range [{}..={}]",
                self.octave,
                OCTAVE_RANGE.start(),
                OCTAVE_RANGE.end()
            );
        }
        if !INVERSION_RANGE.contains(&self.inversion) {
            bail!(
                "Invalid inversion {}: must be in range [{}..={}]",
                self.inversion,
                INVERSION_RANGE.start(),
                INVERSION_RANGE.end()
            );
        }
        Ok(())
    }

    /// Spelling of displayed note names. Flats are only used in `Free` mode.
    pub fn spelling(&self) -> Spelling {
        if self.mode.is_free() && self.use_flats {
            Spelling::Flats
        } else {
            Spelling::Sharps
        }
    }

    /// Volume of played chords in range [0..=1].
    pub fn chord_volume(&self) -> f32 {
        self.fader.clamp(0.0, 1.0)
    }

    /// Volume of played bass notes in range [0..=1].
    pub fn bass_volume(&self) -> f32 {
        1.0 - self.chord_volume()
    }

    /// Flam delay between chord notes at the current tempo.
    pub fn flam_delay_ms(&self) -> f32 {
        self.flam.delay_ms(self.bpm)
    }

    /// Move the key by the given amount of semitones.
    pub fn step_key(&mut self, semitones: i32) {
        self.key = self.key.transposed(semitones);
    }

    /// Cycle through the octave range, wrapping around.
    pub fn step_octave(&mut self, amount: i32) {
        self.octave = wrap_into(self.octave + amount, &OCTAVE_RANGE);
    }

    /// Cycle through the inversion range, wrapping around.
    pub fn step_inversion(&mut self, amount: i32) {
        self.inversion = wrap_into(self.inversion + amount, &INVERSION_RANGE);
    }
}

fn wrap_into(value: i32, range: &RangeInclusive<i32>) -> i32 {
    let len = range.end() - range.start() + 1;
    range.start() + (value - range.start()).rem_euclid(len)
}

// --------------------------------------------------------------------------------------------------
