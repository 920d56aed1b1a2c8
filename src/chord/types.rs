//! Chord type identifiers and their static interval table.

use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display, str::FromStr};

// --------------------------------------------------------------------------------------------------

// triads
const MAJOR: [u8; 3] = [0, 4, 7];
const MINOR: [u8; 3] = [0, 3, 7];
const DIM: [u8; 3] = [0, 3, 6];
const AUG: [u8; 3] = [0, 4, 8];
const FIVE: [u8; 2] = [0, 7];
// 7th chords
const SEVEN: [u8; 4] = [0, 4, 7, 10];
const MAJOR7: [u8; 4] = [0, 4, 7, 11];
const MINOR7: [u8; 4] = [0, 3, 7, 10];
const DIM7: [u8; 4] = [0, 3, 6, 9];
const MINOR7FLAT5: [u8; 4] = [0, 3, 6, 10];
const MINOR_MAJOR7: [u8; 4] = [0, 3, 7, 11];
// 9th chords
const MAJOR9: [u8; 5] = [0, 4, 7, 11, 14];
const MINOR9: [u8; 5] = [0, 3, 7, 10, 14];
const NINE: [u8; 5] = [0, 4, 7, 10, 14];
const ADD9: [u8; 4] = [0, 4, 7, 14];
const SEVEN_FLAT9: [u8; 5] = [0, 4, 7, 10, 13];
const SEVEN_SHARP9: [u8; 5] = [0, 4, 7, 10, 15];
const DIM9: [u8; 5] = [0, 3, 6, 9, 14];
const AUG9: [u8; 5] = [0, 4, 8, 10, 14];
// 11th & 13th chords
const ELEVEN: [u8; 6] = [0, 4, 7, 10, 14, 17];
const MINOR11: [u8; 6] = [0, 3, 7, 10, 14, 17];
const MAJOR11: [u8; 6] = [0, 4, 7, 11, 14, 17];
const THIRTEEN: [u8; 6] = [0, 4, 7, 10, 14, 21];
const THIRTEEN_SUS: [u8; 6] = [0, 5, 7, 10, 14, 21];
const THIRTEEN_FLAT9: [u8; 6] = [0, 4, 7, 10, 13, 21];
const MINOR11FLAT5: [u8; 6] = [0, 3, 6, 10, 14, 17];
// sus chords
const SUS2: [u8; 3] = [0, 2, 7];
const SUS4: [u8; 3] = [0, 5, 7];
const SEVEN_SUS4: [u8; 4] = [0, 5, 7, 10];
const NINE_SUS4: [u8; 5] = [0, 5, 7, 10, 14];
const SEVEN_SUS2_FLAT9: [u8; 5] = [0, 2, 7, 10, 13];
// 6th chords
const SIX: [u8; 4] = [0, 4, 7, 9];
const MINOR6: [u8; 4] = [0, 3, 7, 9];
const SIX_NINE: [u8; 5] = [0, 4, 7, 9, 14];
const MINOR_SIX_NINE: [u8; 5] = [0, 3, 7, 9, 14];
// altered chords
const SEVEN_SHARP11: [u8; 5] = [0, 4, 7, 10, 18];
const SEVEN_FLAT13: [u8; 5] = [0, 4, 7, 10, 20];
const MAJOR9SHARP11: [u8; 6] = [0, 4, 7, 11, 14, 18];
const MINOR9FLAT5: [u8; 5] = [0, 3, 6, 10, 14];
const NINE_SHARP11: [u8; 6] = [0, 4, 7, 10, 14, 18];
const MAJOR7SHARP5: [u8; 4] = [0, 4, 8, 11];
const SEVEN_ALT: [u8; 6] = [0, 4, 8, 10, 15, 21];
const SEVEN_FLAT5: [u8; 4] = [0, 4, 6, 10];
const SEVEN_SHARP5: [u8; 4] = [0, 4, 8, 10];
const AUG_MAJOR7: [u8; 4] = [0, 4, 8, 11];
// other
const BASS: [u8; 1] = [0];

// --------------------------------------------------------------------------------------------------

/// Chord type identifier. Each type names a fixed, ordered set of semitone offsets from the
/// chord's root, except `User`, whose intervals are defined by the player at runtime.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub enum ChordType {
    // triads
    Major,
    Minor,
    Dim,
    Augmented,
    Power,
    // 7th chords
    Major7,
    M7,
    Minor7,
    Seven,
    Dim7,
    Minor7Flat5,
    HalfDim7,
    MinorMajor7,
    // 9th chords
    Major9,
    Minor9,
    Nine,
    Add9,
    SevenFlat9,
    SevenSharp9,
    Dim9,
    Aug9,
    // 11th & 13th chords
    Eleven,
    Minor11,
    Major11,
    Thirteen,
    ThirteenSus,
    ThirteenFlat9,
    Minor11Flat5,
    // sus chords
    Sus2,
    Sus4,
    SevenSus,
    SevenSus4,
    NineSus,
    SevenSus2Flat9,
    // 6th chords
    Six,
    Minor6,
    SixNine,
    MinorSixNine,
    // altered chords
    SevenSharp11,
    SevenFlat13,
    Major9Sharp11,
    Minor9Flat5,
    NineSharp11,
    Major7Sharp5,
    SevenAlt,
    SevenFlat5,
    SevenSharp5,
    Augmented7,
    AugmentedMajor7,
    // other
    Bass,
    User,
}

/// Full chord type catalog in preference order. This is the list of types available on
/// every key in `Free` mode. `Bass` and `User` are not part of it.
pub const ALL_CHORD_TYPES: [ChordType; 49] = [
    // triads
    ChordType::Major,
    ChordType::Minor,
    ChordType::Dim,
    ChordType::Augmented,
    ChordType::Power,
    // 7th chords
    ChordType::Major7,
    ChordType::M7,
    ChordType::Minor7,
    ChordType::Seven,
    ChordType::Dim7,
    ChordType::Minor7Flat5,
    ChordType::HalfDim7,
    ChordType::MinorMajor7,
    // 9th chords
    ChordType::Major9,
    ChordType::Minor9,
    ChordType::Nine,
    ChordType::Add9,
    ChordType::SevenFlat9,
    ChordType::SevenSharp9,
    ChordType::Dim9,
    ChordType::Aug9,
    // 11th & 13th chords
    ChordType::Eleven,
    ChordType::Minor11,
    ChordType::Major11,
    ChordType::Thirteen,
    ChordType::ThirteenSus,
    ChordType::ThirteenFlat9,
    ChordType::Minor11Flat5,
    // sus chords
    ChordType::Sus2,
    ChordType::Sus4,
    ChordType::SevenSus,
    ChordType::SevenSus4,
    ChordType::NineSus,
    ChordType::SevenSus2Flat9,
    // 6th chords
    ChordType::Six,
    ChordType::Minor6,
    ChordType::SixNine,
    ChordType::MinorSixNine,
    // altered chords
    ChordType::SevenSharp11,
    ChordType::SevenFlat13,
    ChordType::Major9Sharp11,
    ChordType::Minor9Flat5,
    ChordType::NineSharp11,
    ChordType::Major7Sharp5,
    ChordType::SevenAlt,
    ChordType::SevenFlat5,
    ChordType::SevenSharp5,
    ChordType::Augmented7,
    ChordType::AugmentedMajor7,
];

// (type, identifier, display suffix, intervals)
type ChordTypeEntry = (ChordType, &'static str, &'static str, &'static [u8]);

const CHORD_TYPE_ENTRIES: [ChordTypeEntry; 51] = [
    (ChordType::Major, "major", "", &MAJOR),
    (ChordType::Minor, "minor", "m", &MINOR),
    (ChordType::Dim, "dim", "dim", &DIM),
    (ChordType::Augmented, "augmented", "aug", &AUG),
    (ChordType::Power, "5", "5", &FIVE),
    (ChordType::Major7, "major7", "maj7", &MAJOR7),
    (ChordType::M7, "M7", "M7", &MAJOR7),
    (ChordType::Minor7, "minor7", "m7", &MINOR7),
    (ChordType::Seven, "7", "7", &SEVEN),
    (ChordType::Dim7, "dim7", "dim7", &DIM7),
    (ChordType::Minor7Flat5, "m7b5", "m7b5", &MINOR7FLAT5),
    (ChordType::HalfDim7, "φ7", "φ7", &MINOR7FLAT5),
    (ChordType::MinorMajor7, "minorMajor7", "mMaj7", &MINOR_MAJOR7),
    (ChordType::Major9, "major9", "maj9", &MAJOR9),
    (ChordType::Minor9, "minor9", "m9", &MINOR9),
    (ChordType::Nine, "9", "9", &NINE),
    (ChordType::Add9, "add9", "add9", &ADD9),
    (ChordType::SevenFlat9, "7b9", "7b9", &SEVEN_FLAT9),
    (ChordType::SevenSharp9, "7#9", "7#9", &SEVEN_SHARP9),
    (ChordType::Dim9, "dim9", "dim9", &DIM9),
    (ChordType::Aug9, "aug9", "aug9", &AUG9),
    (ChordType::Eleven, "11", "11", &ELEVEN),
    (ChordType::Minor11, "m11", "m11", &MINOR11),
    (ChordType::Major11, "major11", "maj11", &MAJOR11),
    (ChordType::Thirteen, "13", "13", &THIRTEEN),
    (ChordType::ThirteenSus, "13sus", "13sus", &THIRTEEN_SUS),
    (ChordType::ThirteenFlat9, "13b9", "13b9", &THIRTEEN_FLAT9),
    (ChordType::Minor11Flat5, "m11b5", "m11b5", &MINOR11FLAT5),
    (ChordType::Sus2, "sus2", "sus2", &SUS2),
    (ChordType::Sus4, "sus4", "sus4", &SUS4),
    (ChordType::SevenSus, "7sus", "7sus", &SEVEN_SUS4),
    (ChordType::SevenSus4, "7sus4", "7sus4", &SEVEN_SUS4),
    (ChordType::NineSus, "9sus", "9sus", &NINE_SUS4),
    (ChordType::SevenSus2Flat9, "7sus2b9", "7sus2b9", &SEVEN_SUS2_FLAT9),
    (ChordType::Six, "6", "6", &SIX),
    (ChordType::Minor6, "minor6", "m6", &MINOR6),
    (ChordType::SixNine, "69", "69", &SIX_NINE),
    (ChordType::MinorSixNine, "m69", "m69", &MINOR_SIX_NINE),
    (ChordType::SevenSharp11, "7#11", "7#11", &SEVEN_SHARP11),
    (ChordType::SevenFlat13, "7b13", "7b13", &SEVEN_FLAT13),
    (ChordType::Major9Sharp11, "maj9#11", "maj9#11", &MAJOR9SHARP11),
    (ChordType::Minor9Flat5, "m9b5", "m9b5", &MINOR9FLAT5),
    (ChordType::NineSharp11, "9#11", "9#11", &NINE_SHARP11),
    (ChordType::Major7Sharp5, "maj7#5", "maj7#5", &MAJOR7SHARP5),
    (ChordType::SevenAlt, "7alt", "7alt", &SEVEN_ALT),
    (ChordType::SevenFlat5, "7b5", "7b5", &SEVEN_FLAT5),
    (ChordType::SevenSharp5, "7#5", "7#5", &SEVEN_SHARP5),
    (ChordType::Augmented7, "augmented7", "aug7", &SEVEN_SHARP5),
    (ChordType::AugmentedMajor7, "augmentedMajor7", "augMaj7", &AUG_MAJOR7),
    (ChordType::Bass, "bass", "bass", &BASS),
    (ChordType::User, "user", "user", &[]),
];

// map of all chord types to their table entries
lazy_static! {
    static ref CHORD_TABLE: HashMap<ChordType, ChordTypeEntry> = CHORD_TYPE_ENTRIES
        .iter()
        .map(|entry| (entry.0, *entry))
        .collect();
    static ref CHORD_IDENTIFIERS: HashMap<&'static str, ChordType> = CHORD_TYPE_ENTRIES
        .iter()
        .map(|entry| (entry.1, entry.0))
        .collect();
    static ref CHORD_SUFFIXES: HashMap<&'static str, ChordType> = CHORD_TYPE_ENTRIES
        .iter()
        .filter(|entry| entry.0 != ChordType::User)
        .map(|entry| (entry.2, entry.0))
        .collect();
}

// --------------------------------------------------------------------------------------------------

impl ChordType {
    fn entry(&self) -> &'static ChordTypeEntry {
        // the table covers every variant: see test `table_integrity`
        &CHORD_TABLE[self]
    }

    /// Semitone offsets from the root. Empty for `User`, which gets its intervals from a
    /// [`UserChord`](crate::chord::UserChord) definition instead.
    pub fn intervals(&self) -> &'static [u8] {
        self.entry().3
    }

    /// Stable string identifier, as used in stored progressions and settings.
    pub fn identifier(&self) -> &'static str {
        self.entry().1
    }

    /// Quality suffix appended to the root name in chord display names, e.g. `m7` for
    /// `Minor7`. Plain major triads have no suffix.
    pub fn suffix(&self) -> &'static str {
        self.entry().2
    }

    /// Number of notes in the chord's interval set.
    pub fn note_count(&self) -> usize {
        self.intervals().len()
    }

    /// Lookup a chord type by its display suffix, e.g. `maj7` or `m`.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        CHORD_SUFFIXES.get(suffix).copied()
    }
}

/// return chord intervals for the given chord type.
pub fn chord_intervals(chord_type: ChordType) -> &'static [u8] {
    chord_type.intervals()
}

/// return list of all known chord type identifiers.
pub fn chord_type_names() -> String {
    CHORD_TYPE_ENTRIES
        .iter()
        .map(|entry| entry.1)
        .collect::<Vec<_>>()
        .join(", ")
}

impl TryFrom<&str> for ChordType {
    type Error = String;

    /// Try converting the given chord type identifier (e.g. "minor7" or "7b9") to a chord type.
    fn try_from(s: &str) -> Result<Self, String> {
        CHORD_IDENTIFIERS.get(s.trim()).copied().ok_or_else(|| {
            format!(
                "Invalid chord type identifier '{}'. Valid chord types are: {}",
                s,
                chord_type_names()
            )
        })
    }
}

impl FromStr for ChordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl Display for ChordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn table_integrity() {
        assert_eq!(CHORD_TABLE.len(), CHORD_TYPE_ENTRIES.len());
        for (chord_type, _, _, intervals) in CHORD_TYPE_ENTRIES {
            if chord_type == ChordType::User {
                assert!(intervals.is_empty());
            } else {
                assert!(!intervals.is_empty(), "{chord_type} has no intervals");
                assert_eq!(intervals[0], 0, "{chord_type} does not contain its root");
            }
        }
    }

    #[test]
    fn identifiers_and_suffixes_are_unique() {
        let identifiers = CHORD_TYPE_ENTRIES.iter().map(|e| e.1).collect::<HashSet<_>>();
        assert_eq!(identifiers.len(), CHORD_TYPE_ENTRIES.len());
        let suffixes = CHORD_TYPE_ENTRIES.iter().map(|e| e.2).collect::<HashSet<_>>();
        assert_eq!(suffixes.len(), CHORD_TYPE_ENTRIES.len());
    }

    #[test]
    fn catalog() {
        let unique = ALL_CHORD_TYPES.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), ALL_CHORD_TYPES.len());
        assert!(!ALL_CHORD_TYPES.contains(&ChordType::User));
        assert!(!ALL_CHORD_TYPES.contains(&ChordType::Bass));
        assert_eq!(ALL_CHORD_TYPES[0], ChordType::Major);
    }

    #[test]
    fn chord_type_string_conversion() -> Result<(), String> {
        assert!(ChordType::try_from("wurst").is_err());
        assert!(ChordType::try_from("maj7").is_err());
        assert_eq!(ChordType::try_from("major7")?, ChordType::Major7);
        assert_eq!(ChordType::try_from("7#9")?, ChordType::SevenSharp9);
        assert_eq!("m7b5".parse::<ChordType>()?, ChordType::Minor7Flat5);
        assert_eq!(ChordType::Minor7.to_string(), "minor7");
        assert_eq!(ChordType::from_suffix("maj7"), Some(ChordType::Major7));
        assert_eq!(ChordType::from_suffix(""), Some(ChordType::Major));
        assert_eq!(ChordType::from_suffix("user"), None);
        Ok(())
    }

    #[test]
    fn intervals() {
        assert_eq!(chord_intervals(ChordType::Major), &[0, 4, 7]);
        assert_eq!(chord_intervals(ChordType::Minor7), &[0, 3, 7, 10]);
        assert_eq!(ChordType::HalfDim7.intervals(), ChordType::Minor7Flat5.intervals());
        assert_eq!(ChordType::Power.note_count(), 2);
        assert!(ChordType::User.intervals().is_empty());
    }

    #[test]
    fn suffixes() {
        assert_eq!(ChordType::Major.suffix(), "");
        assert_eq!(ChordType::Minor.suffix(), "m");
        assert_eq!(ChordType::Major7.suffix(), "maj7");
        assert_eq!(ChordType::Dim7.suffix(), "dim7");
        assert_eq!(ChordType::Minor7Flat5.suffix(), "m7b5");
        assert_eq!(ChordType::AugmentedMajor7.suffix(), "augMaj7");
    }
}
