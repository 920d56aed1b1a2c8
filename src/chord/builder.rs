//! Builds concrete chords (absolute MIDI notes) from a root, a chord type and a bass note.

use crate::{
    chord::{unique_chord_id, Chord, ChordModifier, ChordType},
    midi::TICKS_PER_QUARTER,
    note::{NoteName, Spelling},
};

// -------------------------------------------------------------------------------------------------

/// A player defined chord type: the intervals behind [`ChordType::User`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserChord {
    pub name: String,
    pub intervals: Vec<u8>,
}

impl UserChord {
    pub fn new<S: Into<String>>(name: S, intervals: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            intervals,
        }
    }

    /// A user chord without name or intervals can't be built.
    pub fn is_defined(&self) -> bool {
        !self.name.is_empty() && !self.intervals.is_empty()
    }
}

// -------------------------------------------------------------------------------------------------

fn notes_from_intervals(root_note: i32, intervals: &[u8], bass_offset: i32) -> Vec<i32> {
    if intervals.is_empty() {
        return vec![];
    }
    std::iter::once(root_note + bass_offset)
        .chain(intervals.iter().map(|interval| root_note + *interval as i32))
        .collect()
}

/// Notes of a chord with the given root MIDI note and type. The bass note, `bass_offset`
/// semitones away from the root, is prepended to the chord's interval notes.
///
/// Returns an empty list for [`ChordType::User`]: use a [`ChordBuilder`] with a
/// [`UserChord`] definition to build those.
pub fn get_chord_notes(root_note: i32, chord_type: ChordType, bass_offset: i32) -> Vec<i32> {
    notes_from_intervals(root_note, chord_type.intervals(), bass_offset)
}

/// Create a new chord with the given root in the given octave, using `bass_note` as bass
/// note or the root when unset. Slash chords get their bass note prepended to the chord
/// notes, see [`get_chord_notes`].
///
/// Returns None when the chord type has no intervals, which is the case for user chords.
///
/// ### Example
///
/// ```rust
/// use chordpad::{create_chord, ChordType, NoteName};
/// let chord = create_chord(NoteName::C, ChordType::Major, 4, None).unwrap();
/// assert_eq!(chord.notes, vec![60, 64, 67]);
/// assert_eq!(chord.to_string(), "C");
/// ```
pub fn create_chord(
    root: NoteName,
    chord_type: ChordType,
    octave: i32,
    bass_note: Option<NoteName>,
) -> Option<Chord> {
    let mut builder = ChordBuilder::new(root, chord_type).octave(octave);
    if let Some(bass_note) = bass_note {
        builder = builder.bass_note(bass_note);
    }
    builder.build()
}

/// Transpose all notes by the given amount of octaves.
pub fn transpose(notes: &[i32], octaves: i32) -> Vec<i32> {
    notes.iter().map(|note| note + 12 * octaves).collect()
}

/// Invert the given chord notes |inversion| times. Positive inversions move the first note
/// an octave up to the end of the list, negative ones move the last note an octave down to
/// the front. The note count is always preserved.
pub fn invert(notes: &[i32], inversion: i32) -> Vec<i32> {
    let mut notes = notes.to_vec();
    if notes.is_empty() {
        return notes;
    }
    for _ in 0..inversion.unsigned_abs() {
        if inversion > 0 {
            let first = notes.remove(0);
            notes.push(first + 12);
        } else if let Some(last) = notes.pop() {
            notes.insert(0, last - 12);
        }
    }
    notes
}

// -------------------------------------------------------------------------------------------------

/// Step by step construction of a [`Chord`].
#[derive(Debug, Clone)]
pub struct ChordBuilder<'a> {
    root: NoteName,
    chord_type: ChordType,
    octave: i32,
    bass_note: Option<NoteName>,
    modifier: Option<ChordModifier>,
    user_chord: Option<&'a UserChord>,
    octave_shift: i32,
    inversion: i32,
}

impl<'a> ChordBuilder<'a> {
    /// A new builder for a chord in octave 4, without inversion.
    pub fn new(root: NoteName, chord_type: ChordType) -> Self {
        Self {
            root,
            chord_type,
            octave: 4,
            bass_note: None,
            modifier: None,
            user_chord: None,
            octave_shift: 0,
            inversion: 0,
        }
    }

    /// Octave of the chord's root note, where octave 4 starts at middle C.
    pub fn octave(mut self, octave: i32) -> Self {
        self.octave = octave;
        self
    }

    /// Bass note for slash chords.
    pub fn bass_note(mut self, bass_note: NoteName) -> Self {
        self.bass_note = Some(bass_note);
        self
    }

    /// Playback modifiers. The duration gets converted to MIDI ticks.
    pub fn modifier(mut self, modifier: ChordModifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    /// Intervals for [`ChordType::User`] chords.
    pub fn user_chord(mut self, user_chord: &'a UserChord) -> Self {
        self.user_chord = Some(user_chord);
        self
    }

    /// Octave transposition, applied after building the notes.
    pub fn octave_shift(mut self, octave_shift: i32) -> Self {
        self.octave_shift = octave_shift;
        self
    }

    /// Chord inversion, applied after the octave transposition.
    pub fn inversion(mut self, inversion: i32) -> Self {
        self.inversion = inversion;
        self
    }

    /// Build the chord. Returns None when the chord type has no intervals: that's a
    /// user chord without a (complete) user chord definition.
    pub fn build(&self) -> Option<Chord> {
        let intervals: &[u8] = match self.chord_type {
            ChordType::User => match self.user_chord {
                Some(user_chord) if user_chord.is_defined() => &user_chord.intervals,
                _ => {
                    log::warn!(
                        "No user chord defined: can't build a user chord on '{}'",
                        self.root
                    );
                    return None;
                }
            },
            chord_type => chord_type.intervals(),
        };
        let bass_note = self.bass_note.unwrap_or(self.root);
        let root_note = self.root.midi_note(self.octave);
        let bass_offset = bass_note.midi_note(self.octave) - root_note;
        let mut notes = if bass_offset == 0 {
            intervals
                .iter()
                .map(|interval| root_note + *interval as i32)
                .collect()
        } else {
            notes_from_intervals(root_note, intervals, bass_offset)
        };
        if notes.is_empty() {
            return None;
        }
        if self.octave_shift != 0 {
            notes = transpose(&notes, self.octave_shift);
        }
        if self.inversion != 0 {
            notes = invert(&notes, self.inversion);
        }
        let name = match (self.chord_type, self.user_chord) {
            (ChordType::User, Some(user_chord)) => {
                let mut name = format!("{}{}", self.root.spelled(Spelling::Sharps), user_chord.name);
                if bass_note != self.root {
                    name = format!("{}/{}", name, bass_note.spelled(Spelling::Sharps));
                }
                Some(name)
            }
            _ => None,
        };
        let duration = self
            .modifier
            .map(|modifier| (modifier.duration.max(0.0) * TICKS_PER_QUARTER as f32).round() as u32);
        Some(Chord {
            id: unique_chord_id(),
            root: self.root,
            chord_type: self.chord_type,
            notes,
            bass_note,
            duration,
            inversion: (self.inversion != 0).then_some(self.inversion),
            voicing: None,
            name,
        })
    }
}

// --------------------------------------------------------------------------------------------------
