use std::fmt::Display;

use anyhow::anyhow;
use pest::Parser;
use pest_derive::Parser;

use crate::{
    chord::{chord_display_name, create_chord, Chord, ChordType},
    note::{NoteName, Spelling},
};

// -------------------------------------------------------------------------------------------------

#[derive(Parser)]
#[grammar = "chord/symbol.pest"]
struct ChordSymbolParser {}

// common quality spellings which are not chord type suffixes or identifiers
const QUALITY_ALIASES: [(&str, ChordType); 8] = [
    ("M", ChordType::Major),
    ("maj", ChordType::Major),
    ("min", ChordType::Minor),
    ("-", ChordType::Minor),
    ("+", ChordType::Augmented),
    ("°", ChordType::Dim),
    ("ø", ChordType::HalfDim7),
    ("min7", ChordType::Minor7),
];

fn parse_quality(symbol: &str, quality: &str) -> Result<ChordType, String> {
    ChordType::from_suffix(quality)
        .or_else(|| ChordType::try_from(quality).ok())
        .or_else(|| {
            QUALITY_ALIASES
                .iter()
                .find(|(alias, _)| *alias == quality)
                .map(|(_, chord_type)| *chord_type)
        })
        .filter(|chord_type| *chord_type != ChordType::User)
        .ok_or_else(|| {
            format!(
                "Invalid chord symbol '{}' - unknown chord quality '{}'.",
                symbol, quality
            )
        })
}

// -------------------------------------------------------------------------------------------------

/// A parsed chord symbol like `Am7/G`: root, chord type and an optional slash bass note.
///
/// Qualities are the chord type's display suffixes (`m7`, `maj7`, `dim`), chord type
/// identifiers (`minor7`) or a few common aliases (`min`, `-`, `+`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChordSymbol {
    pub root: NoteName,
    pub chord_type: ChordType,
    pub bass_note: Option<NoteName>,
}

impl ChordSymbol {
    /// Build the chord in the given octave.
    pub fn to_chord(&self, octave: i32) -> Option<Chord> {
        create_chord(self.root, self.chord_type, octave, self.bass_note)
    }
}

impl TryFrom<&str> for ChordSymbol {
    type Error = String;

    fn try_from(symbol: &str) -> Result<Self, String> {
        let trimmed = symbol.trim();
        let mut pairs = ChordSymbolParser::parse(Rule::symbol, trimmed)
            .map_err(|err| format!("Invalid chord symbol '{}':\n{}", symbol, err))?;
        // the grammar always yields a symbol with a root note and quality
        let inner = pairs
            .next()
            .ok_or_else(|| format!("Invalid chord symbol '{}' - empty symbol.", symbol))?
            .into_inner();
        let mut root = None;
        let mut chord_type = None;
        let mut bass_note = None;
        for pair in inner {
            match pair.as_rule() {
                Rule::note => root = Some(NoteName::try_from(pair.as_str())?),
                Rule::quality => chord_type = Some(parse_quality(symbol, pair.as_str())?),
                Rule::bass => {
                    if let Some(note) = pair.into_inner().next() {
                        bass_note = Some(NoteName::try_from(note.as_str())?);
                    }
                }
                _ => (),
            }
        }
        let root =
            root.ok_or_else(|| format!("Invalid chord symbol '{}' - missing root.", symbol))?;
        Ok(Self {
            root,
            chord_type: chord_type.unwrap_or(ChordType::Major),
            bass_note: bass_note.filter(|bass| *bass != root),
        })
    }
}

impl Display for ChordSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bass_note = self.bass_note.unwrap_or(self.root);
        write!(
            f,
            "{}",
            chord_display_name(self.root, self.chord_type, bass_note, Spelling::Sharps)
        )
    }
}

// -------------------------------------------------------------------------------------------------

impl Chord {
    /// Parse a chord symbol such as `C#m7b5/E` and build it in octave 4.
    ///
    /// ### Example
    ///
    /// ```rust
    /// use chordpad::{Chord, ChordType, NoteName};
    /// let chord = Chord::from_symbol("Am7/G").unwrap();
    /// assert_eq!(chord.chord_type, ChordType::Minor7);
    /// assert_eq!(chord.bass_note, NoteName::G);
    /// ```
    pub fn from_symbol(symbol: &str) -> anyhow::Result<Chord> {
        let parsed = ChordSymbol::try_from(symbol).map_err(anyhow::Error::msg)?;
        parsed
            .to_chord(4)
            .ok_or_else(|| anyhow!("Chord symbol '{}' has no chord notes", symbol))
    }
}

// --------------------------------------------------------------------------------------------------
