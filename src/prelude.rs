//! The chordpad prelude.
//!
//! The purpose of this module is to alleviate imports of common chordpad types and functions:
//!
//! ```
//! # #![allow(unused_imports)]
//! use chordpad::prelude::*;
//! ```

pub use super::{
    // chord building
    chord::{
        chord_display_name, chord_intervals, get_chord_notes, invert, transpose, ChordId,
        ALL_CHORD_TYPES,
    },
    // analysis
    diatonic::{available_chord_types, diatonic_chords, is_chord_type_diatonic, is_diatonic},
    keyboard::{bass_midi_note, fallback_chord_type},
    midi::{write_progression, TICKS_PER_QUARTER},
    progression::{ProgressionStepper, Step, TimeSignature},
    scale::scale_notes,
    settings::{FlamValue, Instrument, KeyboardLayout},
    suggest::{
        chord_suggestions, common_progressions, ChordGroup, ChordTypePicker, CommonProgression,
    },
    // all public basic types
    AudioPlayer,
    BassOffset,
    Chord,
    ChordBuilder,
    ChordModifier,
    ChordProgression,
    ChordType,
    Direction,
    KeyPress,
    Keyboard,
    MidiExport,
    MusicMode,
    NoteName,
    PianoSettings,
    PlaybackContext,
    Scale,
    SlotId,
    Spelling,
    UserChord,
};

#[cfg(feature = "player")]
// threaded progression playback
pub use super::player::{PlaybackEvent, PlaybackOptions, ProgressionPlayer, StopHandle};
