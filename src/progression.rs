//! Chord progressions and the stepping logic of their playback.

use std::{fmt::Display, time::Duration};

use crate::{
    chord::{Chord, ChordModifier},
    midi::TICKS_PER_QUARTER,
    note::NoteName,
    scale::MusicMode,
};

// -------------------------------------------------------------------------------------------------

/// Number of click steps per chord in progression playback.
pub const STEPS_PER_CHORD: usize = 4;

// -------------------------------------------------------------------------------------------------

/// Musical time signature: beats per bar and beat unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSignature {
    pub beats_per_bar: u8,
    pub beat_unit: u8,
}

impl TimeSignature {
    pub fn new(beats_per_bar: u8, beat_unit: u8) -> Self {
        Self {
            beats_per_bar,
            beat_unit,
        }
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

impl TryFrom<&str> for TimeSignature {
    type Error = String;

    /// Try converting the given string (e.g. "3/4") to a time signature.
    fn try_from(s: &str) -> Result<Self, String> {
        let (beats, unit) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| format!("Invalid time signature '{}' - expected 'N/M'.", s))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u8>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or_else(|| format!("Invalid time signature '{}' - invalid value '{}'.", s, v))
        };
        Ok(Self::new(parse(beats)?, parse(unit)?))
    }
}

impl Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.beats_per_bar, self.beat_unit)
    }
}

// -------------------------------------------------------------------------------------------------

/// A named sequence of chords, as played back or exported to MIDI files.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordProgression {
    pub name: String,
    pub chords: Vec<Chord>,
    /// Tempo in beats per minute.
    pub tempo: f32,
    pub time_signature: TimeSignature,
    pub key: NoteName,
    pub mode: MusicMode,
}

impl Default for ChordProgression {
    fn default() -> Self {
        Self {
            name: String::new(),
            chords: vec![],
            tempo: 120.0,
            time_signature: TimeSignature::default(),
            key: NoteName::C,
            mode: MusicMode::Major,
        }
    }
}

impl ChordProgression {
    /// Create a new, empty progression.
    pub fn new<S: Into<String>>(name: S, tempo: f32) -> Self {
        Self {
            name: name.into(),
            tempo,
            ..Default::default()
        }
    }

    /// Create a new progression with the given chords.
    pub fn with_chords<S: Into<String>>(name: S, tempo: f32, chords: Vec<Chord>) -> Self {
        Self {
            chords,
            ..Self::new(name, tempo)
        }
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Append a chord.
    pub fn push(&mut self, chord: Chord) {
        self.chords.push(chord);
    }

    /// Append a chord, applying the modifier's duration.
    pub fn push_with_modifier(&mut self, mut chord: Chord, modifier: ChordModifier) {
        let ticks = (modifier.duration.max(0.0) * TICKS_PER_QUARTER as f32).round() as u32;
        chord.duration = Some(ticks);
        self.chords.push(chord);
    }

    /// Duration of the chord at the given index in MIDI ticks. Chords without duration last
    /// a quarter note.
    pub fn chord_ticks(&self, index: usize) -> Option<u32> {
        self.chords
            .get(index)
            .map(|chord| chord.duration.unwrap_or(TICKS_PER_QUARTER))
    }

    /// Overall duration of all chords in MIDI ticks.
    pub fn total_ticks(&self) -> u64 {
        (0..self.len())
            .filter_map(|index| self.chord_ticks(index))
            .map(u64::from)
            .sum()
    }

    /// Time between two playback steps: a quarter of a beat.
    pub fn step_interval(&self) -> Duration {
        step_interval(self.tempo)
    }

    /// Create a stepper for the progression's playback.
    pub fn stepper(&self, looping: bool) -> ProgressionStepper {
        ProgressionStepper::new(self.len(), looping)
    }
}

/// Time between two playback steps at the given tempo: `60000 / tempo / 4` ms.
/// Non positive or invalid tempos result in a zero interval.
pub fn step_interval(tempo: f32) -> Duration {
    if !tempo.is_finite() || tempo <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(60.0 / tempo as f64 / STEPS_PER_CHORD as f64)
}

// -------------------------------------------------------------------------------------------------

/// A single playback step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    /// Running quarter index, starting from 0.
    pub quarter_index: usize,
    /// Click number in range [1..=4].
    pub click: u8,
    /// Index of the chord which starts playing at this step, if any.
    pub chord_index: Option<usize>,
}

/// Steps through a progression's playback: each chord lasts 4 steps, and each step emits a
/// click. The chord advances only on every 4th step.
///
/// Unless looping, the stepper ends after the last chord's 4 steps.
#[derive(Debug, Clone)]
pub struct ProgressionStepper {
    chord_count: usize,
    looping: bool,
    quarter_index: usize,
}

impl ProgressionStepper {
    pub fn new(chord_count: usize, looping: bool) -> Self {
        Self {
            chord_count,
            looping,
            quarter_index: 0,
        }
    }

    /// Rewind to the first step.
    pub fn reset(&mut self) {
        self.quarter_index = 0;
    }

    /// Total number of steps of a single pass through the progression.
    pub fn steps_per_pass(&self) -> usize {
        self.chord_count * STEPS_PER_CHORD
    }
}

impl Iterator for ProgressionStepper {
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        if self.chord_count == 0 {
            return None;
        }
        if !self.looping && self.quarter_index >= self.steps_per_pass() {
            return None;
        }
        let quarter_index = self.quarter_index;
        let chord_index = if quarter_index % STEPS_PER_CHORD == 0 {
            Some((quarter_index / STEPS_PER_CHORD) % self.chord_count)
        } else {
            None
        };
        self.quarter_index += 1;
        Some(Step {
            quarter_index,
            click: (quarter_index % STEPS_PER_CHORD) as u8 + 1,
            chord_index,
        })
    }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chord::{create_chord, ChordType};

    fn progression() -> ChordProgression {
        let chords = [NoteName::C, NoteName::F, NoteName::G]
            .into_iter()
            .filter_map(|root| create_chord(root, ChordType::Major, 4, None))
            .collect();
        ChordProgression::with_chords("Test", 120.0, chords)
    }

    #[test]
    fn time_signatures() {
        assert_eq!(TimeSignature::default().to_string(), "4/4");
        assert_eq!(TimeSignature::try_from("3/4"), Ok(TimeSignature::new(3, 4)));
        assert_eq!(TimeSignature::try_from(" 6 / 8 "), Ok(TimeSignature::new(6, 8)));
        assert!(TimeSignature::try_from("3").is_err());
        assert!(TimeSignature::try_from("0/4").is_err());
        assert!(TimeSignature::try_from("a/4").is_err());
    }

    #[test]
    fn durations() {
        let mut progression = progression();
        assert_eq!(progression.total_ticks(), 3 * TICKS_PER_QUARTER as u64);
        let chord = progression.chords[0].clone();
        progression.push_with_modifier(chord, ChordModifier { duration: 2.5 });
        assert_eq!(progression.chord_ticks(3), Some(240));
        assert_eq!(progression.chord_ticks(4), None);
        assert_eq!(progression.total_ticks(), 3 * 96 + 240);

        let chord = progression.chords[0].clone();
        progression.push_with_modifier(chord, ChordModifier::default());
        assert_eq!(progression.chord_ticks(4), Some(TICKS_PER_QUARTER));
    }

    #[test]
    fn step_intervals() {
        assert_eq!(step_interval(120.0), Duration::from_millis(125));
        assert_eq!(step_interval(60.0), Duration::from_millis(250));
        assert_eq!(step_interval(0.0), Duration::ZERO);
        assert_eq!(step_interval(-10.0), Duration::ZERO);
        assert_eq!(progression().step_interval(), Duration::from_millis(125));
    }

    #[test]
    fn stepping() {
        let steps = progression().stepper(false).collect::<Vec<_>>();
        assert_eq!(steps.len(), 12);
        assert_eq!(
            steps.iter().map(|s| s.click).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 4]
        );
        let chord_steps = steps
            .iter()
            .filter_map(|s| s.chord_index.map(|index| (s.quarter_index, index)))
            .collect::<Vec<_>>();
        assert_eq!(chord_steps, vec![(0, 0), (4, 1), (8, 2)]);

        assert_eq!(ChordProgression::default().stepper(true).next(), None);
    }

    #[test]
    fn looping() {
        let mut stepper = progression().stepper(true);
        let steps = stepper.by_ref().take(30).collect::<Vec<_>>();
        assert_eq!(steps.len(), 30);
        assert_eq!(steps[12].chord_index, Some(0));
        assert_eq!(steps[12].quarter_index, 12);
        assert_eq!(steps[28].chord_index, Some(1));
        stepper.reset();
        assert_eq!(stepper.next().map(|s| s.quarter_index), Some(0));
    }
}
