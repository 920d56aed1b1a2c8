//! Music theory engine of a chord keyboard: notes and scales, chord tables, a chord builder,
//! diatonic chord analysis, a per key chord slot state machine and Standard MIDI File export
//! of chord progressions.

pub mod note;
pub use note::{NoteName, Spelling};

pub mod scale;
pub use scale::{MusicMode, Scale};

pub mod chord;
pub use chord::{create_chord, Chord, ChordBuilder, ChordModifier, ChordType, UserChord};

pub mod diatonic;
pub mod suggest;

pub mod settings;
pub use settings::PianoSettings;

pub mod keyboard;
pub use keyboard::{BassOffset, Direction, KeyPress, Keyboard, SlotId};

pub mod progression;
pub use progression::ChordProgression;

pub mod midi;
pub use midi::{export_progression, MidiExport};

pub mod player;
pub use player::{AudioPlayer, PlaybackContext};

pub mod prelude;

// -------------------------------------------------------------------------------------------------
