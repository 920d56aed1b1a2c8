//! Chord suggestions, common progressions and chord type groups for random chord picks.

use std::fmt::Display;

use rand::{rng, Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::{
    chord::{Chord, ChordType},
    diatonic::diatonic_chords,
    note::NoteName,
    scale::MusicMode,
};

// -------------------------------------------------------------------------------------------------

/// Suggest chords which may follow the given previous chord in the given key and mode.
///
/// Suggestions are the diatonic chords a fifth and a fourth above the previous root, plus the
/// relative minor of a major or the relative major of a minor chord. When this yields less
/// than 3 chords, the list gets filled up with other diatonic chords until it contains 5.
/// Without a previous chord, all diatonic chords are returned.
pub fn chord_suggestions(previous: Option<&Chord>, key: NoteName, mode: MusicMode) -> Vec<Chord> {
    let diatonic = diatonic_chords(key, mode);
    let Some(previous) = previous else {
        return diatonic;
    };
    let fifth_up = previous.root.transposed(7);
    let fourth_up = previous.root.transposed(5);
    let mut suggestions = diatonic
        .iter()
        .filter(|chord| chord.root == fifth_up || chord.root == fourth_up)
        .cloned()
        .collect::<Vec<_>>();

    let relative = match previous.chord_type {
        ChordType::Major => Some((previous.root.transposed(9), ChordType::Minor)),
        ChordType::Minor => Some((previous.root.transposed(3), ChordType::Major)),
        _ => None,
    };
    if let Some((root, chord_type)) = relative {
        suggestions.extend(
            diatonic
                .iter()
                .filter(|chord| chord.root == root && chord.chord_type == chord_type)
                .cloned(),
        );
    }

    if suggestions.len() < 3 {
        for chord in &diatonic {
            if suggestions.len() >= 5 {
                break;
            }
            if !suggestions.iter().any(|c| c.same_harmony(chord)) {
                suggestions.push(chord.clone());
            }
        }
    }
    suggestions
}

// -------------------------------------------------------------------------------------------------

const PROGRESSION_PATTERNS: [(&str, &[usize]); 5] = [
    ("I-IV-V", &[1, 4, 5]),
    ("I-V-vi-IV", &[1, 5, 6, 4]),
    ("ii-V-I", &[2, 5, 1]),
    ("I-vi-IV-V", &[1, 6, 4, 5]),
    ("vi-IV-I-V", &[6, 4, 1, 5]),
];

/// A named chord progression pattern, resolved to chords of some key.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonProgression {
    pub name: &'static str,
    pub degrees: &'static [usize],
    pub chords: Vec<Chord>,
}

/// Common progressions in the given key and mode.
///
/// Degrees are resolved as `(degree - 1) % len` into the flat list of diatonic chords, which
/// contains several chord types per scale degree. So this only picks the intended scale
/// degree chords when each degree has a single diatonic chord. In `Free` mode there are no
/// diatonic chords, so all progressions are empty.
pub fn common_progressions(key: NoteName, mode: MusicMode) -> Vec<CommonProgression> {
    let diatonic = diatonic_chords(key, mode);
    PROGRESSION_PATTERNS
        .iter()
        .map(|&(name, degrees)| {
            let chords = if diatonic.is_empty() {
                vec![]
            } else {
                degrees
                    .iter()
                    .map(|degree| diatonic[(degree - 1) % diatonic.len()].clone())
                    .collect()
            };
            CommonProgression {
                name,
                degrees,
                chords,
            }
        })
        .collect()
}

// -------------------------------------------------------------------------------------------------

/// Chord type groups, used to pick chord types for generated progressions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordGroup {
    #[default]
    Triad,
    FourNote,
    Higher,
    Random,
}

const TRIAD_CHORDS: [ChordType; 2] = [ChordType::Major, ChordType::Minor];

const FOUR_NOTE_CHORDS: [ChordType; 11] = [
    // common 4-note chords
    ChordType::Seven,
    ChordType::Major7,
    ChordType::Minor7,
    // uncommon 4-note chords
    ChordType::Minor7Flat5,
    ChordType::Dim7,
    // uncommon 3-note chords
    ChordType::Augmented,
    ChordType::Dim,
    ChordType::Sus2,
    ChordType::Sus4,
    // triads
    ChordType::Major,
    ChordType::Minor,
];

const HIGHER_CHORDS: [ChordType; 10] = [
    // simple 5-note chords
    ChordType::Major9,
    ChordType::Minor9,
    ChordType::Nine,
    // complex 5-note chords
    ChordType::SixNine,
    ChordType::Eleven,
    // 4-note chords
    ChordType::Major7,
    ChordType::Minor7,
    ChordType::Seven,
    // triads
    ChordType::Major,
    ChordType::Minor,
];

impl ChordGroup {
    pub const ALL: [ChordGroup; 4] = [Self::Triad, Self::FourNote, Self::Higher, Self::Random];

    /// Chord types of the group in priority order. `Random` has no priorities.
    pub fn priorities(&self) -> &'static [ChordType] {
        match self {
            Self::Triad => &TRIAD_CHORDS,
            Self::FourNote => &FOUR_NOTE_CHORDS,
            Self::Higher => &HIGHER_CHORDS,
            Self::Random => &[],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Triad => "TRIAD",
            Self::FourNote => "FOUR_NOTE",
            Self::Higher => "HIGHER",
            Self::Random => "RANDOM",
        }
    }
}

impl TryFrom<&str> for ChordGroup {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, String> {
        let normalized = s.trim().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|group| group.name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| {
                format!(
                    "Invalid chord group '{}'. Valid groups are: TRIAD, FOUR_NOTE, HIGHER, RANDOM",
                    s
                )
            })
    }
}

impl Display for ChordGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// All chord types of all prioritized groups, without duplicates, in group order.
pub fn grouped_chord_types() -> Vec<ChordType> {
    let mut chord_types = Vec::new();
    for group in [ChordGroup::Triad, ChordGroup::FourNote, ChordGroup::Higher] {
        for chord_type in group.priorities() {
            if !chord_types.contains(chord_type) {
                chord_types.push(*chord_type);
            }
        }
    }
    chord_types
}

/// Chord types to pick from for the given group. `Random` and `Free` mode use all grouped
/// chord types.
pub fn chords_for_group(group: ChordGroup, mode: MusicMode) -> Vec<ChordType> {
    if mode.is_free() || group == ChordGroup::Random {
        grouped_chord_types()
    } else {
        group.priorities().to_vec()
    }
}

/// Randomly pick one of the group's chord types.
pub fn random_chord_type<R: Rng>(rng: &mut R, group: ChordGroup, mode: MusicMode) -> ChordType {
    let chord_types = chords_for_group(group, mode);
    if chord_types.is_empty() {
        return ChordType::Major;
    }
    chord_types[rng.random_range(0..chord_types.len())]
}

// -------------------------------------------------------------------------------------------------

/// Picks random chord types of a group. Seeded pickers yield the same sequence of chord types
/// after each [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct ChordTypePicker {
    rand_gen: Xoshiro256PlusPlus,
    seed: Option<u64>,
}

impl ChordTypePicker {
    pub fn new(seed: Option<u64>) -> Self {
        let rand_seed = seed.unwrap_or_else(|| rng().random());
        let rand_gen = Xoshiro256PlusPlus::seed_from_u64(rand_seed);
        Self { rand_gen, seed }
    }

    /// Pick a random chord type of the given group.
    pub fn pick(&mut self, group: ChordGroup, mode: MusicMode) -> ChordType {
        random_chord_type(&mut self.rand_gen, group, mode)
    }

    /// Restart the sequence when the picker is seeded.
    pub fn reset(&mut self) {
        if let Some(seed) = self.seed {
            self.rand_gen = Xoshiro256PlusPlus::seed_from_u64(seed);
        }
    }
}

impl Default for ChordTypePicker {
    fn default() -> Self {
        Self::new(None)
    }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chord::create_chord;

    fn harmony(chords: &[Chord]) -> Vec<(NoteName, ChordType)> {
        chords.iter().map(|c| (c.root, c.chord_type)).collect()
    }

    #[test]
    fn suggestions_without_previous_chord() {
        let suggestions = chord_suggestions(None, NoteName::C, MusicMode::Major);
        assert_eq!(
            harmony(&suggestions),
            harmony(&diatonic_chords(NoteName::C, MusicMode::Major))
        );
        assert!(chord_suggestions(None, NoteName::C, MusicMode::Free).is_empty());
    }

    #[test]
    fn suggestions_after_major_chord() {
        let previous = create_chord(NoteName::C, ChordType::Major, 4, None).unwrap();
        let suggestions = chord_suggestions(Some(&previous), NoteName::C, MusicMode::Major);
        let (last, others) = suggestions.split_last().unwrap();
        // relative minor comes last
        assert_eq!((last.root, last.chord_type), (NoteName::A, ChordType::Minor));
        assert!(!others.is_empty());
        assert!(others
            .iter()
            .all(|c| c.root == NoteName::F || c.root == NoteName::G));
        // F chords first: diatonic order is kept
        assert_eq!(others[0].root, NoteName::F);
    }

    #[test]
    fn suggestions_after_minor_chord() {
        let previous = create_chord(NoteName::A, ChordType::Minor, 4, None).unwrap();
        let suggestions = chord_suggestions(Some(&previous), NoteName::C, MusicMode::Major);
        let last = suggestions.last().unwrap();
        assert_eq!((last.root, last.chord_type), (NoteName::C, ChordType::Major));
        assert!(suggestions
            .iter()
            .any(|c| c.root == NoteName::E || c.root == NoteName::D));
    }

    #[test]
    fn suggestions_get_filled_up() {
        // nothing related to C# is part of C major
        let previous = create_chord(NoteName::Cs, ChordType::Major, 4, None).unwrap();
        let suggestions = chord_suggestions(Some(&previous), NoteName::C, MusicMode::Major);
        assert_eq!(
            harmony(&suggestions),
            vec![
                (NoteName::C, ChordType::Major),
                (NoteName::C, ChordType::Major7),
                (NoteName::C, ChordType::Major9),
                (NoteName::C, ChordType::Sus2),
                (NoteName::C, ChordType::Sus4),
            ]
        );
    }

    #[test]
    fn progressions() {
        let progressions = common_progressions(NoteName::C, MusicMode::Major);
        assert_eq!(
            progressions.iter().map(|p| p.name).collect::<Vec<_>>(),
            vec!["I-IV-V", "I-V-vi-IV", "ii-V-I", "I-vi-IV-V", "vi-IV-I-V"]
        );
        let diatonic = diatonic_chords(NoteName::C, MusicMode::Major);
        for progression in &progressions {
            assert_eq!(progression.chords.len(), progression.degrees.len());
            for (chord, degree) in progression.chords.iter().zip(progression.degrees) {
                assert!(chord.same_harmony(&diatonic[degree - 1]));
            }
        }
        for progression in common_progressions(NoteName::C, MusicMode::Free) {
            assert!(progression.chords.is_empty());
        }
    }

    #[test]
    fn chord_groups() {
        assert_eq!(
            chords_for_group(ChordGroup::Triad, MusicMode::Major),
            vec![ChordType::Major, ChordType::Minor]
        );
        assert_eq!(chords_for_group(ChordGroup::FourNote, MusicMode::Minor).len(), 11);
        let all = grouped_chord_types();
        assert_eq!(all.len(), 16);
        assert_eq!(chords_for_group(ChordGroup::Triad, MusicMode::Free), all);
        assert_eq!(chords_for_group(ChordGroup::Random, MusicMode::Major), all);
        assert_eq!(ChordGroup::try_from("four-note"), Ok(ChordGroup::FourNote));
        assert_eq!(ChordGroup::try_from("HIGHER"), Ok(ChordGroup::Higher));
        assert!(ChordGroup::try_from("quartal").is_err());
    }

    #[test]
    fn random_chord_types() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x1234);
        for group in ChordGroup::ALL {
            let chord_types = chords_for_group(group, MusicMode::Major);
            for _ in 0..32 {
                let chord_type = random_chord_type(&mut rng, group, MusicMode::Major);
                assert!(chord_types.contains(&chord_type));
            }
        }
    }

    #[test]
    fn seeded_chord_type_picks() {
        let picks = |picker: &mut ChordTypePicker| {
            (0..16)
                .map(|_| picker.pick(ChordGroup::Random, MusicMode::Major))
                .collect::<Vec<_>>()
        };
        let mut picker = ChordTypePicker::new(Some(0x1234));
        let first = picks(&mut picker);
        assert_eq!(picks(&mut ChordTypePicker::new(Some(0x1234))), first);
        picker.reset();
        assert_eq!(picks(&mut picker), first);

        let chord_types = chords_for_group(ChordGroup::Triad, MusicMode::Minor);
        let mut picker = ChordTypePicker::default();
        for _ in 0..32 {
            assert!(chord_types.contains(&picker.pick(ChordGroup::Triad, MusicMode::Minor)));
        }
    }
}
