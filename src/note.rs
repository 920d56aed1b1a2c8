//! Pitch classes and their MIDI note number arithmetic.

use std::{fmt::Display, str::FromStr};

// -------------------------------------------------------------------------------------------------

/// MIDI note number of C in octave 4 (middle C).
pub const MIDDLE_C: i32 = 60;

/// Number of pitch classes in an octave.
pub const PITCH_CLASS_COUNT: usize = 12;

const SHARP_NAMES: [&str; PITCH_CLASS_COUNT] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_NAMES: [&str; PITCH_CLASS_COUNT] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

// -------------------------------------------------------------------------------------------------

/// How accidentals are displayed. Spelling never changes the pitch class itself.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

// -------------------------------------------------------------------------------------------------

/// One of the 12 pitch classes. The subscript 's' to a note means sharp.
///
/// NoteName implements TryFrom<&str>, so notes can be created from plain strings. The following
/// notation is supported: `C` (plain), `C#` or `Cs` (sharps), `Db` or `D♭` (flats), case
/// insensitive.
#[repr(u8)]
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub enum NoteName {
    #[default]
    C = 0,
    Cs = 1,
    D = 2,
    Ds = 3,
    E = 4,
    F = 5,
    Fs = 6,
    G = 7,
    Gs = 8,
    A = 9,
    As = 10,
    B = 11,
}

impl NoteName {
    /// All pitch classes in ascending order, starting from C.
    pub const ALL: [NoteName; PITCH_CLASS_COUNT] = [
        Self::C,
        Self::Cs,
        Self::D,
        Self::Ds,
        Self::E,
        Self::F,
        Self::Fs,
        Self::G,
        Self::Gs,
        Self::A,
        Self::As,
        Self::B,
    ];

    /// Pitch class index: 0 = C, 1 = C# ... 11 = B.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Pitch class at the given index. Any integer is accepted: values get wrapped into
    /// the range [0..12), so negative indices count down from B.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(PITCH_CLASS_COUNT as i32) as usize]
    }

    /// Pitch class of the given MIDI note number.
    pub fn from_midi(note: i32) -> Self {
        Self::from_index(note)
    }

    /// MIDI note number of this pitch class in the given octave, where octave 4 starts
    /// at middle C. Results are not clamped to the valid MIDI range.
    pub fn midi_note(&self, octave: i32) -> i32 {
        MIDDLE_C + (octave - 4) * 12 + self.index() as i32
    }

    /// Return a new pitch class which is `semitones` away from this one.
    #[must_use]
    pub fn transposed(&self, semitones: i32) -> Self {
        Self::from_index(self.index() as i32 + semitones)
    }

    /// Returns true for the 5 pitch classes on black keys.
    pub fn is_accidental(&self) -> bool {
        matches!(self, Self::Cs | Self::Ds | Self::Fs | Self::Gs | Self::As)
    }

    /// Canonical name, using sharps.
    pub fn sharp_name(&self) -> &'static str {
        SHARP_NAMES[self.index()]
    }

    /// Alternate name, using flats.
    pub fn flat_name(&self) -> &'static str {
        FLAT_NAMES[self.index()]
    }

    /// Name using the given spelling.
    pub fn spelled(&self, spelling: Spelling) -> &'static str {
        match spelling {
            Spelling::Sharps => self.sharp_name(),
            Spelling::Flats => self.flat_name(),
        }
    }

    /// Try converting the given string to a pitch class.
    /// returns Self and the number of consumed bytes read from the string.
    pub fn try_from_with_offset(s: &str) -> Result<(Self, usize), String> {
        fn is_sharp_symbol(c: char) -> bool {
            c == 's' || c == 'S' || c == '#' || c == '♯'
        }
        fn is_flat_symbol(c: char) -> bool {
            c == 'b' || c == '♭'
        }
        fn note_value(s: &str, c: char) -> Result<i32, String> {
            match c {
                'c' | 'C' => Ok(0),
                'd' | 'D' => Ok(2),
                'e' | 'E' => Ok(4),
                'f' | 'F' => Ok(5),
                'g' | 'G' => Ok(7),
                'a' | 'A' => Ok(9),
                'b' | 'B' => Ok(11),
                _ => Err(format!(
                    "Invalid note str '{}' - note character '{}' is invalid.",
                    s, c
                )),
            }
        }

        let mut chars = s.chars();
        let first = chars
            .next()
            .ok_or_else(|| format!("Invalid note str '{}' - string is too short.", s))?;
        let note = note_value(s, first)?;
        let mut consumed = first.len_utf8();
        let note = match chars.next() {
            Some(c) if is_sharp_symbol(c) => {
                consumed += c.len_utf8();
                note + 1
            }
            Some(c) if is_flat_symbol(c) => {
                consumed += c.len_utf8();
                note - 1
            }
            _ => note,
        };
        Ok((Self::from_index(note), consumed))
    }
}

impl TryFrom<&str> for NoteName {
    type Error = String;

    /// Try converting the given string to a pitch class.
    fn try_from(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        let (note, consumed) = Self::try_from_with_offset(trimmed)?;
        if consumed != trimmed.len() {
            return Err(format!(
                "Invalid note str '{}' - unexpected trailing characters '{}'.",
                s,
                &trimmed[consumed..]
            ));
        }
        Ok(note)
    }
}

impl FromStr for NoteName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl From<NoteName> for u8 {
    fn from(note: NoteName) -> u8 {
        note as u8
    }
}

impl Display for NoteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sharp_name())
    }
}

// --------------------------------------------------------------------------------------------------
