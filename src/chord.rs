//! Musical chords as list of MIDI notes built from a root, a chord type and a bass note.

use std::{
    fmt::Display,
    sync::atomic::{AtomicUsize, Ordering},
};

use derive_more::{Display, From, Into};

use crate::note::{NoteName, Spelling};

// -------------------------------------------------------------------------------------------------

pub mod builder;
pub mod symbol;
pub mod types;

pub use builder::{create_chord, get_chord_notes, invert, transpose, ChordBuilder, UserChord};
pub use types::{chord_intervals, ChordType, ALL_CHORD_TYPES};

// -------------------------------------------------------------------------------------------------

/// Opaque id of a [`Chord`]. Every built chord gets a new unique id.
#[derive(Copy, Clone, Debug, Display, From, Into, PartialEq, Eq, Hash)]
pub struct ChordId(usize);

/// Generate a new unique chord id.
pub fn unique_chord_id() -> ChordId {
    static ID: AtomicUsize = AtomicUsize::new(0);
    ChordId(ID.fetch_add(1, Ordering::Relaxed))
}

// -------------------------------------------------------------------------------------------------

/// Optional playback modifiers for a chord in a progression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordModifier {
    /// Duration in beats.
    pub duration: f32,
}

impl Default for ChordModifier {
    fn default() -> Self {
        Self { duration: 1.0 }
    }
}

// -------------------------------------------------------------------------------------------------

/// A concrete chord: root, chord type and the absolute MIDI notes it sounds.
///
/// Slash chords start with their bass note, followed by the chord's interval notes, so the
/// root still is part of the upper notes.
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    pub id: ChordId,
    pub root: NoteName,
    pub chord_type: ChordType,
    /// MIDI note numbers. Not clamped to the valid MIDI range.
    pub notes: Vec<i32>,
    pub bass_note: NoteName,
    /// Duration in MIDI ticks, see [`TICKS_PER_QUARTER`](crate::midi::TICKS_PER_QUARTER).
    pub duration: Option<u32>,
    pub inversion: Option<i32>,
    pub voicing: Option<i32>,
    /// Display name override, e.g. for user chords or names edited by the keyboard.
    pub name: Option<String>,
}

impl Chord {
    /// Returns true if the bass note differs from the root.
    pub fn is_slash_chord(&self) -> bool {
        self.bass_note != self.root
    }

    /// Chord display name with the given spelling: `<root><suffix>`, plus `/<bass>` for
    /// slash chords.
    pub fn display_name(&self, spelling: Spelling) -> String {
        chord_display_name(self.root, self.chord_type, self.bass_note, spelling)
    }

    /// The stored name, or the display name in sharps when no name is set.
    pub fn name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.display_name(Spelling::Sharps))
    }

    /// Lowest sounding MIDI note.
    pub fn lowest_note(&self) -> Option<i32> {
        self.notes.iter().copied().min()
    }

    /// Pitch classes of all notes in the chord, in note order.
    pub fn pitch_classes(&self) -> Vec<NoteName> {
        self.notes.iter().map(|n| NoteName::from_midi(*n)).collect()
    }

    /// Returns true if both chords have the same root and type.
    pub fn same_harmony(&self, other: &Chord) -> bool {
        self.root == other.root && self.chord_type == other.chord_type
    }
}

impl Display for Chord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Display name for a chord with the given root, type and bass note.
pub fn chord_display_name(
    root: NoteName,
    chord_type: ChordType,
    bass_note: NoteName,
    spelling: Spelling,
) -> String {
    let mut name = format!("{}{}", root.spelled(spelling), chord_type.suffix());
    if bass_note != root {
        name.push('/');
        name.push_str(bass_note.spelled(spelling));
    }
    name
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unique_ids() {
        let a = unique_chord_id();
        let b = unique_chord_id();
        assert_ne!(a, b);
    }

    #[test]
    fn display_names() {
        use NoteName::*;
        let spelling = Spelling::Sharps;
        assert_eq!(chord_display_name(C, ChordType::Major, C, spelling), "C");
        assert_eq!(chord_display_name(A, ChordType::Minor7, A, spelling), "Am7");
        assert_eq!(chord_display_name(C, ChordType::Major, E, spelling), "C/E");
        assert_eq!(
            chord_display_name(As, ChordType::Major7, Ds, Spelling::Flats),
            "Bbmaj7/Eb"
        );
        assert_eq!(chord_display_name(B, ChordType::Minor7Flat5, B, spelling), "Bm7b5");
    }

    #[test]
    fn chord_accessors() {
        let chord = create_chord(NoteName::C, ChordType::Major, 4, Some(NoteName::E)).unwrap();
        assert!(chord.is_slash_chord());
        assert_eq!(chord.lowest_note(), Some(60));
        assert_eq!(chord.to_string(), "C/E");
        assert_eq!(
            chord.pitch_classes(),
            vec![NoteName::E, NoteName::C, NoteName::E, NoteName::G]
        );
    }
}
