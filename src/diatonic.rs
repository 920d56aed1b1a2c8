//! Diatonic chord analysis: which chords and chord types fit into a key and mode.

use crate::{
    chord::{create_chord, Chord, ChordType, ALL_CHORD_TYPES},
    note::NoteName,
    scale::{scale_notes, MusicMode, Scale},
};

use ChordType::*;

// -------------------------------------------------------------------------------------------------

/// Chord types which are tested on every scale degree in [`diatonic_chords`], in order.
pub const DIATONIC_CANDIDATES: [ChordType; 26] = [
    ChordType::Major,
    ChordType::Minor,
    ChordType::Dim,
    ChordType::Augmented,
    ChordType::Seven,
    ChordType::Major7,
    ChordType::Minor7,
    ChordType::Major9,
    ChordType::Minor9,
    ChordType::Nine,
    ChordType::Sus2,
    ChordType::Sus4,
    ChordType::Add9,
    ChordType::Minor7Flat5,
    ChordType::Minor11,
    ChordType::Dim7,
    ChordType::Six,
    ChordType::SixNine,
    ChordType::Minor6,
    ChordType::MinorMajor7,
    ChordType::Major11,
    ChordType::Thirteen,
    ChordType::SevenSus4,
    ChordType::Augmented7,
    ChordType::AugmentedMajor7,
    ChordType::Eleven,
];

/// Chord types the keyboard offers on the scale degrees 1-7 of major scales. Also used for
/// all other non-free modes, except minor.
pub const MAJOR_SCALE_CHORDS: [&[ChordType]; 7] = [
    &[
        Major, Major7, Major9, Major11, Six, SixNine, Add9, Sus2, Sus4, Seven, Nine, Eleven,
    ],
    &[Minor, Minor7, Minor9, Minor11, Minor6, Minor7Flat5, Sus2, Sus4],
    &[Minor, Minor7, Minor9, Minor11, Minor6, Sus2, Sus4],
    &[Major, Major7, Major9, Major11, Six, Add9, Sus2, Sus4, Eleven],
    &[Major, Seven, Nine, Eleven, SevenSus4, Sus4, Sus2, Add9, Thirteen],
    &[Minor, Minor7, Minor9, Minor11, Minor6, Sus2, Sus4],
    &[Dim, Dim7, Minor7Flat5, Minor7, SevenFlat5, Sus2],
];

/// Chord types the keyboard offers on the scale degrees 1-7 of (natural) minor scales.
pub const MINOR_SCALE_CHORDS: [&[ChordType]; 7] = [
    &[Minor, Minor7, Minor9, Minor11, Minor6, MinorMajor7, Sus2, Sus4],
    &[Dim, Dim7, Minor7Flat5, Minor7, SevenFlat5, Sus2],
    &[Major, Major7, Major9, Add9, Six, Sus2, Sus4],
    &[Minor, Minor7, Minor9, Minor11, Minor6, Sus2, Sus4],
    &[Minor, Minor7, Minor9, Minor11, Minor6, Sus2, Sus4],
    &[Major, Major7, Major9, Six, Add9, Sus2, Sus4],
    &[Major, Seven, Nine, Eleven, Sus2, Sus4],
];

// -------------------------------------------------------------------------------------------------

/// Returns true if all notes of the chord are part of the given key's scale.
/// In `Free` mode every chord is diatonic.
pub fn is_diatonic(chord: &Chord, key: NoteName, mode: MusicMode) -> bool {
    if mode.is_free() {
        return true;
    }
    let scale = Scale::new(key, mode);
    chord
        .notes
        .iter()
        .all(|note| scale.contains(NoteName::from_midi(*note)))
}

/// All diatonic chords of the given key and mode, built in octave 4. Chords are ordered by
/// scale degree, then by their position in [`DIATONIC_CANDIDATES`].
/// In `Free` mode there are no diatonic chords.
pub fn diatonic_chords(key: NoteName, mode: MusicMode) -> Vec<Chord> {
    if mode.is_free() {
        return vec![];
    }
    let mut chords = Vec::new();
    for root in scale_notes(key, mode) {
        for chord_type in DIATONIC_CANDIDATES {
            if let Some(chord) = create_chord(root, chord_type, 4, None) {
                if is_diatonic(&chord, key, mode) {
                    chords.push(chord);
                }
            }
        }
    }
    chords
}

/// Chord types offered on the given 1-based scale degree. Empty for invalid degrees and in
/// `Free` mode, which has no degrees: see [`available_chord_types`].
pub fn degree_chord_types(degree: usize, mode: MusicMode) -> &'static [ChordType] {
    if mode.is_free() || !(1..=7).contains(&degree) {
        return &[];
    }
    match mode {
        MusicMode::Minor => MINOR_SCALE_CHORDS[degree - 1],
        _ => MAJOR_SCALE_CHORDS[degree - 1],
    }
}

/// Chord types which can be played on the given note: the full chord type catalog in `Free`
/// mode, else the degree's chord types. Empty for notes which are not part of the scale.
pub fn available_chord_types(note: NoteName, key: NoteName, mode: MusicMode) -> &'static [ChordType] {
    if mode.is_free() {
        return &ALL_CHORD_TYPES;
    }
    match Scale::new(key, mode).degree(note) {
        Some(degree) => degree_chord_types(degree, mode),
        None => &[],
    }
}

/// Returns true if the chord type is offered on the given root in the given key and mode.
pub fn is_chord_type_diatonic(
    root: NoteName,
    chord_type: ChordType,
    mode: MusicMode,
    key: NoteName,
) -> bool {
    if mode.is_free() {
        return true;
    }
    available_chord_types(root, key, mode).contains(&chord_type)
}

// --------------------------------------------------------------------------------------------------
