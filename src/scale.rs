//! Musical modes and scales based on `NoteName` pitch classes.

use std::{fmt::Display, str::FromStr};

use crate::note::NoteName;

// -------------------------------------------------------------------------------------------------

/// A scale mode. `Free` disables scale restrictions: all 12 pitch classes are available.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub enum MusicMode {
    Major,
    Minor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
    #[default]
    Free,
}

struct ModeInfo {
    mode: MusicMode,
    name: &'static str,
    alt_names: &'static str,
    intervals: Option<[u8; 7]>,
}

const MODES: [ModeInfo; 8] = [
    ModeInfo {
        mode: MusicMode::Major,
        name: "major",
        alt_names: "ionian;natural major",
        intervals: Some([0, 2, 4, 5, 7, 9, 11]),
    },
    ModeInfo {
        mode: MusicMode::Minor,
        name: "minor",
        alt_names: "aeolian;natural minor",
        intervals: Some([0, 2, 3, 5, 7, 8, 10]),
    },
    ModeInfo {
        mode: MusicMode::Dorian,
        name: "dorian",
        alt_names: "",
        intervals: Some([0, 2, 3, 5, 7, 9, 10]),
    },
    ModeInfo {
        mode: MusicMode::Phrygian,
        name: "phrygian",
        alt_names: "",
        intervals: Some([0, 1, 3, 5, 7, 8, 10]),
    },
    ModeInfo {
        mode: MusicMode::Lydian,
        name: "lydian",
        alt_names: "",
        intervals: Some([0, 2, 4, 6, 7, 9, 11]),
    },
    ModeInfo {
        mode: MusicMode::Mixolydian,
        name: "mixolydian",
        alt_names: "",
        intervals: Some([0, 2, 4, 5, 7, 9, 10]),
    },
    ModeInfo {
        mode: MusicMode::Locrian,
        name: "locrian",
        alt_names: "",
        intervals: Some([0, 1, 3, 5, 6, 8, 10]),
    },
    ModeInfo {
        mode: MusicMode::Free,
        name: "free",
        alt_names: "chromatic;all;off",
        intervals: None,
    },
];

impl MusicMode {
    /// All modes in the order the settings panel cycles through them.
    pub const ALL: [MusicMode; 8] = [
        Self::Free,
        Self::Major,
        Self::Minor,
        Self::Dorian,
        Self::Phrygian,
        Self::Lydian,
        Self::Mixolydian,
        Self::Locrian,
    ];

    fn info(&self) -> &'static ModeInfo {
        // MODES contains every variant
        MODES
            .iter()
            .find(|info| info.mode == *self)
            .unwrap_or(&MODES[MODES.len() - 1])
    }

    /// Lower case mode name.
    pub fn name(&self) -> &'static str {
        self.info().name
    }

    /// Known mode names.
    pub fn mode_names() -> Vec<&'static str> {
        MODES.iter().map(|info| info.name).collect()
    }

    /// The 7 semitone offsets of the mode's scale degrees, or None for `Free`.
    pub fn intervals(&self) -> Option<[u8; 7]> {
        self.info().intervals
    }

    /// Returns true when scale restrictions are disabled.
    pub fn is_free(&self) -> bool {
        *self == Self::Free
    }

    /// Next mode in `ALL`, wrapping around.
    #[must_use]
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    fn resolve_synonyms(mode: &str) -> String {
        mode.split(' ')
            .filter(|v| !v.is_empty())
            .map(|v| match v.to_ascii_lowercase().as_str() {
                "maj" => "major".to_string(),
                "min" => "minor".to_string(),
                "nat" => "natural".to_string(),
                "mixo" => "mixolydian".to_string(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TryFrom<&str> for MusicMode {
    type Error = String;

    /// Try converting the given string to a known mode
    fn try_from(mode: &str) -> Result<Self, String> {
        let norm_mode = Self::resolve_synonyms(mode);
        MODES
            .iter()
            .find(|v| {
                v.name.eq_ignore_ascii_case(&norm_mode)
                    || v.alt_names
                        .split(';')
                        .any(|v| !v.is_empty() && v.eq_ignore_ascii_case(&norm_mode))
            })
            .map(|v| v.mode)
            .ok_or_else(|| {
                format!(
                    "Unknown mode '{}'. Valid modes are: {}",
                    mode,
                    Self::mode_names().join(", ")
                )
            })
    }
}

impl FromStr for MusicMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl Display for MusicMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// -------------------------------------------------------------------------------------------------

/// Ordered pitch classes of the scale with the given root and mode. Index 0 is the root
/// (degree 1). `Free` returns all 12 pitch classes starting from C, regardless of the root.
pub fn scale_notes(root: NoteName, mode: MusicMode) -> Vec<NoteName> {
    match mode.intervals() {
        None => NoteName::ALL.to_vec(),
        Some(intervals) => intervals
            .iter()
            .map(|offset| root.transposed(*offset as i32))
            .collect(),
    }
}

// -------------------------------------------------------------------------------------------------

/// A musical scale: a key note in some mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scale {
    key: NoteName,
    mode: MusicMode,
}

impl Scale {
    pub fn new(key: NoteName, mode: MusicMode) -> Self {
        Self { key, mode }
    }

    /// Key note.
    pub fn key(&self) -> NoteName {
        self.key
    }

    /// Scale mode.
    pub fn mode(&self) -> MusicMode {
        self.mode
    }

    /// Ordered list of pitch classes in the scale.
    pub fn notes(&self) -> Vec<NoteName> {
        scale_notes(self.key, self.mode)
    }

    /// Returns true if the given pitch class is part of the scale.
    pub fn contains(&self, note: NoteName) -> bool {
        match self.mode.intervals() {
            None => true,
            Some(intervals) => {
                let offset = (note.index() as i32 - self.key.index() as i32).rem_euclid(12);
                intervals.contains(&(offset as u8))
            }
        }
    }

    /// 1-based scale degree of the given pitch class, if it is part of the scale.
    /// In `Free` mode the degree is the pitch class position in the chromatic scale.
    pub fn degree(&self, note: NoteName) -> Option<usize> {
        self.notes()
            .iter()
            .position(|n| *n == note)
            .map(|index| index + 1)
    }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mode_from_string() {
        assert!(MusicMode::try_from("wurst").is_err());
        assert!(MusicMode::try_from("harmonic minor").is_err());

        assert_eq!(MusicMode::try_from("min"), Ok(MusicMode::Minor));
        assert_eq!(MusicMode::try_from("Aeolian"), Ok(MusicMode::Minor));
        assert_eq!(MusicMode::try_from(" nat  maj "), Ok(MusicMode::Major));
        assert_eq!(MusicMode::try_from("ionian"), Ok(MusicMode::Major));
        assert_eq!(MusicMode::try_from("Mixo"), Ok(MusicMode::Mixolydian));
        assert_eq!(MusicMode::try_from("chromatic"), Ok(MusicMode::Free));
        assert_eq!("LOCRIAN".parse::<MusicMode>(), Ok(MusicMode::Locrian));
    }

    #[test]
    fn scale_cardinality() {
        for root in NoteName::ALL {
            for mode in MusicMode::ALL {
                let notes = scale_notes(root, mode);
                if mode.is_free() {
                    assert_eq!(notes.len(), 12);
                } else {
                    assert_eq!(notes.len(), 7);
                    assert_eq!(notes[0], root);
                }
            }
        }
    }

    #[test]
    fn notes() {
        use NoteName::*;
        assert_eq!(
            scale_notes(C, MusicMode::Major),
            vec![C, D, E, F, G, A, B]
        );
        assert_eq!(
            scale_notes(A, MusicMode::Minor),
            vec![A, B, C, D, E, F, G]
        );
        assert_eq!(
            scale_notes(D, MusicMode::Dorian),
            vec![D, E, F, G, A, B, C]
        );
        assert_eq!(
            scale_notes(B, MusicMode::Locrian),
            vec![B, C, D, E, F, G, A]
        );
        assert_eq!(
            scale_notes(Fs, MusicMode::Major),
            vec![Fs, Gs, As, B, Cs, Ds, F]
        );
        assert_eq!(scale_notes(G, MusicMode::Free)[0], C);
    }

    #[test]
    fn membership_and_degrees() {
        let scale = Scale::new(NoteName::G, MusicMode::Major);
        assert!(scale.contains(NoteName::Fs));
        assert!(!scale.contains(NoteName::F));
        assert_eq!(scale.degree(NoteName::G), Some(1));
        assert_eq!(scale.degree(NoteName::D), Some(5));
        assert_eq!(scale.degree(NoteName::F), None);

        let free = Scale::new(NoteName::G, MusicMode::Free);
        assert!(free.contains(NoteName::F));
        assert_eq!(free.degree(NoteName::C), Some(1));
    }

    #[test]
    fn mode_cycling() {
        assert_eq!(MusicMode::Free.next(), MusicMode::Major);
        assert_eq!(MusicMode::Locrian.next(), MusicMode::Free);
    }
}
