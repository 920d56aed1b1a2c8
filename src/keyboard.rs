//! Key and slot state of the chord keyboard: chord type cursors, bass offsets and key presses.

use std::{collections::HashMap, fmt::Display};

use crate::{
    chord::{chord_display_name, create_chord, invert, transpose, Chord, ChordType},
    diatonic::available_chord_types,
    note::{NoteName, Spelling},
    scale::{scale_notes, MusicMode},
    settings::{Instrument, PianoSettings},
};

// -------------------------------------------------------------------------------------------------

/// Chord type used whenever no chord type is available for a key.
pub fn fallback_chord_type() -> ChordType {
    ChordType::Major
}

/// MIDI note of the bass note for the given root and bass offset. Bass notes are played in
/// the range [43..=54], below the chords: F# and above drop down an octave.
pub fn bass_midi_note(root: NoteName, offset: BassOffset) -> i32 {
    const BASE_NOTE: i32 = 48; // C3
    let bass_index = (root.index() as i32 + offset.semitones().unwrap_or(0)).rem_euclid(12);
    if bass_index >= 5 {
        BASE_NOTE + bass_index - 12
    } else {
        BASE_NOTE + bass_index
    }
}

// -------------------------------------------------------------------------------------------------

/// Identifies a chord slot on the keyboard: a key, plus the slot index in layouts with more
/// than one chord per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId {
    note: NoteName,
    slot: Option<usize>,
}

impl SlotId {
    /// Id of a key in single slot layouts.
    pub fn key(note: NoteName) -> Self {
        Self { note, slot: None }
    }

    /// Id of a key's slot in multi slot layouts.
    pub fn slot(note: NoteName, slot: usize) -> Self {
        Self {
            note,
            slot: Some(slot),
        }
    }

    /// The key's note, which is the root of chords played on this slot.
    pub fn note(&self) -> NoteName {
        self.note
    }

    pub fn slot_index(&self) -> Option<usize> {
        self.slot
    }

    /// Returns true for all slots below the first one in multi slot layouts.
    pub fn is_lower_slot(&self) -> bool {
        self.slot.is_some_and(|slot| slot > 0)
    }
}

impl From<NoteName> for SlotId {
    fn from(note: NoteName) -> Self {
        Self::key(note)
    }
}

impl Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.slot {
            None => write!(f, "{}", self.note),
            Some(slot) => write!(f, "{}[{}]", self.note, slot),
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Cycling direction for chord types and bass offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn step(&self, index: usize, len: usize) -> usize {
        match self {
            Self::Up => (index + 1) % len,
            Self::Down => (index + len - 1) % len,
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Bass note of a slot, relative to the slot's root. `Bass` (the default) and `Off` both play
/// the root as bass note. Semitone offsets also show up as slash in the chord name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BassOffset {
    #[default]
    Bass,
    Semitones(i8),
    Off,
}

impl BassOffset {
    /// All bass offsets in cycling order.
    pub const SEQUENCE: [BassOffset; 13] = [
        Self::Bass,
        Self::Semitones(1),
        Self::Semitones(2),
        Self::Semitones(3),
        Self::Semitones(4),
        Self::Semitones(5),
        Self::Semitones(-6),
        Self::Semitones(-5),
        Self::Semitones(-4),
        Self::Semitones(-3),
        Self::Semitones(-2),
        Self::Semitones(-1),
        Self::Off,
    ];

    /// Offset in semitones, if this is a semitone offset.
    pub fn semitones(&self) -> Option<i32> {
        match self {
            Self::Semitones(semitones) => Some(*semitones as i32),
            Self::Bass | Self::Off => None,
        }
    }

    /// The following offset in the cycling sequence, wrapping around.
    #[must_use]
    pub fn next(&self) -> Self {
        self.step(Direction::Up)
    }

    /// The preceding offset in the cycling sequence, wrapping around.
    #[must_use]
    pub fn prev(&self) -> Self {
        self.step(Direction::Down)
    }

    #[must_use]
    pub fn step(&self, direction: Direction) -> Self {
        // offsets outside of the sequence restart cycling from `Bass`
        let index = Self::SEQUENCE.iter().position(|o| o == self).unwrap_or(0);
        Self::SEQUENCE[direction.step(index, Self::SEQUENCE.len())]
    }
}

impl TryFrom<&str> for BassOffset {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        Self::SEQUENCE
            .into_iter()
            .find(|offset| offset.to_string().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                format!(
                    "Invalid bass offset '{}'. Valid offsets are: BASS, +1..+5, -6..-1, OFF",
                    s
                )
            })
    }
}

impl Display for BassOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bass => write!(f, "BASS"),
            Self::Semitones(semitones) => write!(f, "{:+}", semitones),
            Self::Off => write!(f, "OFF"),
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Everything the audio backend needs to play a key press.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPress {
    pub slot: SlotId,
    /// The played chord, with octave shift and inversion applied to its notes.
    pub chord: Chord,
    /// MIDI note of the separately played bass note.
    pub bass_note: i32,
    pub chord_volume: f32,
    pub bass_volume: f32,
    pub instrument: Instrument,
}

// -------------------------------------------------------------------------------------------------

/// Chord keyboard state.
///
/// Each slot has a chord type cursor, an index into the slot's available chord types, which
/// get cycled up and down by the player, and a bass offset. Cursors and bass offsets get
/// reset when the key or mode changes.
///
/// All operations are read-modify-write on the keyboard's maps: share a keyboard between
/// threads behind a single `Mutex` only.
#[derive(Debug, Clone)]
pub struct Keyboard {
    key: NoteName,
    mode: MusicMode,
    scale_notes: Vec<NoteName>,
    cursors: HashMap<SlotId, usize>,
    bass_offsets: HashMap<SlotId, BassOffset>,
    last_pressed: Option<SlotId>,
    current_chord: Option<Chord>,
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new(NoteName::C, MusicMode::Free)
    }
}

impl Keyboard {
    pub fn new(key: NoteName, mode: MusicMode) -> Self {
        Self {
            key,
            mode,
            scale_notes: scale_notes(key, mode),
            cursors: HashMap::new(),
            bass_offsets: HashMap::new(),
            last_pressed: None,
            current_chord: None,
        }
    }

    /// Create a new keyboard with the key and mode of the given settings.
    pub fn with_settings(settings: &PianoSettings) -> Self {
        Self::new(settings.key, settings.mode)
    }

    pub fn key(&self) -> NoteName {
        self.key
    }

    pub fn mode(&self) -> MusicMode {
        self.mode
    }

    /// Notes which can be played: the scale notes, or all 12 notes in `Free` mode.
    pub fn scale_notes(&self) -> &[NoteName] {
        &self.scale_notes
    }

    /// Returns true if chords can be played on the given note.
    pub fn is_playable(&self, note: NoteName) -> bool {
        self.mode.is_free() || self.scale_notes.contains(&note)
    }

    /// Change the mode, keeping the key.
    pub fn set_mode(&mut self, mode: MusicMode) {
        self.transition(self.key, mode);
    }

    /// Change the key, keeping the mode.
    pub fn set_key(&mut self, key: NoteName) {
        self.transition(key, self.mode);
    }

    /// Apply key and mode of the given settings.
    pub fn apply(&mut self, settings: &PianoSettings) {
        self.transition(settings.key, settings.mode);
    }

    fn transition(&mut self, key: NoteName, mode: MusicMode) {
        let prev_key = self.key;
        let prev_mode = self.mode;
        self.key = key;
        self.mode = mode;
        self.scale_notes = scale_notes(key, mode);
        if mode != prev_mode {
            if mode.is_free() {
                // keep existing cursors and start all new notes with the first chord type
                let prev_scale = scale_notes(key, prev_mode);
                for note in NoteName::ALL {
                    if !prev_scale.contains(&note) {
                        self.cursors.entry(SlotId::key(note)).or_insert(0);
                    }
                }
            } else {
                self.cursors.clear();
            }
            self.bass_offsets.clear();
            self.current_chord = None;
            log::debug!("Keyboard mode changed from {} to {} in {}", prev_mode, mode, key);
        } else if key != prev_key {
            if !mode.is_free() {
                self.bass_offsets.clear();
            }
            log::debug!("Keyboard key changed from {} to {} ({})", prev_key, key, mode);
        }
    }

    /// Chord types which can be played on the given note in the current key and mode.
    pub fn available_chord_types(&self, note: NoteName) -> &'static [ChordType] {
        available_chord_types(note, self.key, self.mode)
    }

    /// Current chord type cursor of the given slot.
    pub fn chord_type_cursor(&self, slot: SlotId) -> usize {
        self.cursors.get(&slot).copied().unwrap_or(0)
    }

    /// All chord type cursors which got set.
    pub fn chord_type_cursors(&self) -> &HashMap<SlotId, usize> {
        &self.cursors
    }

    /// Replace all chord type cursors, e.g. to restore a saved keyboard state.
    pub fn set_chord_type_cursors(&mut self, cursors: HashMap<SlotId, usize>) {
        self.cursors = cursors;
    }

    /// Chord type the given slot currently plays.
    pub fn current_chord_type(&self, slot: SlotId) -> ChordType {
        let chord_types = self.available_chord_types(slot.note());
        if chord_types.is_empty() {
            return fallback_chord_type();
        }
        chord_types[self.chord_type_cursor(slot) % chord_types.len()]
    }

    /// Move the given slot's chord type cursor up or down, wrapping around.
    /// Does nothing for notes outside of the scale.
    pub fn adjust_chord_type(&mut self, slot: SlotId, direction: Direction) {
        if !self.is_playable(slot.note()) {
            return;
        }
        let chord_types = self.available_chord_types(slot.note());
        if chord_types.is_empty() {
            return;
        }
        let index = self.chord_type_cursor(slot) % chord_types.len();
        let new_index = direction.step(index, chord_types.len());
        self.cursors.insert(slot, new_index);
        log::debug!(
            "Chord type of {} changed to {}",
            slot,
            chord_types[new_index]
        );
    }

    /// Move the chord type cursor of the last pressed slot up or down.
    pub fn adjust_last_chord_type(&mut self, direction: Direction) {
        if let Some(slot) = self.last_pressed {
            self.adjust_chord_type(slot, direction);
        }
    }

    /// The slot which got pressed last.
    pub fn last_pressed(&self) -> Option<SlotId> {
        self.last_pressed
    }

    /// Bass offset of the given slot.
    pub fn bass_offset(&self, slot: SlotId) -> BassOffset {
        self.bass_offsets.get(&slot).copied().unwrap_or_default()
    }

    pub fn set_bass_offset(&mut self, slot: SlotId, offset: BassOffset) {
        self.bass_offsets.insert(slot, offset);
    }

    /// Cycle the given slot's bass offset up or down and return the new offset.
    pub fn cycle_bass_offset(&mut self, slot: SlotId, direction: Direction) -> BassOffset {
        let offset = self.bass_offset(slot).step(direction);
        self.bass_offsets.insert(slot, offset);
        log::debug!("Bass offset of {} changed to {}", slot, offset);
        offset
    }

    /// Note spelling for displayed names. Flats only get used in `Free` mode.
    pub fn spelling(&self, use_flats: bool) -> Spelling {
        if self.mode.is_free() && use_flats {
            Spelling::Flats
        } else {
            Spelling::Sharps
        }
    }

    /// Display name of the chord the given slot currently plays, including its slash bass.
    /// None for notes outside of the scale.
    pub fn chord_name(&self, slot: SlotId, use_flats: bool) -> Option<String> {
        if !self.is_playable(slot.note()) {
            return None;
        }
        let root = slot.note();
        let bass_note = match self.bass_offset(slot).semitones() {
            Some(semitones) => root.transposed(semitones),
            None => root,
        };
        Some(chord_display_name(
            root,
            self.current_chord_type(slot),
            bass_note,
            self.spelling(use_flats),
        ))
    }

    /// Play the given slot: builds the slot's chord with the settings' octave shift and
    /// inversion and remembers it as current chord.
    /// Returns None for notes outside of the scale.
    pub fn press(&mut self, slot: SlotId, settings: &PianoSettings) -> Option<KeyPress> {
        self.last_pressed = Some(slot);
        let root = slot.note();
        if !self.is_playable(root) {
            log::warn!("Key {} is not part of the {} {} scale", root, self.key, self.mode);
            return None;
        }
        let chord_type = self.current_chord_type(slot);
        let offset = self.bass_offset(slot);
        let slash_bass = offset.semitones().map(|semitones| root.transposed(semitones));
        let mut chord = create_chord(root, chord_type, 4, slash_bass)?;
        let mut notes = std::mem::take(&mut chord.notes);
        if settings.octave != 0 {
            notes = transpose(&notes, settings.octave);
        }
        if settings.inversion != 0 {
            notes = invert(&notes, settings.inversion);
            chord.inversion = Some(settings.inversion);
        }
        chord.notes = notes;

        let mut name = self.chord_name(slot, settings.use_flats)?;
        if slot.is_lower_slot() {
            if let Some(index) = name.find('/') {
                name.truncate(index);
            }
        }
        chord.name = Some(name);

        let key_press = KeyPress {
            slot,
            bass_note: bass_midi_note(root, offset),
            chord_volume: settings.chord_volume(),
            bass_volume: settings.bass_volume(),
            instrument: settings.instrument,
            chord: chord.clone(),
        };
        log::debug!("Playing {} on {}: {:?}", chord, slot, chord.notes);
        self.current_chord = Some(chord);
        Some(key_press)
    }

    /// The last played chord. Mode changes clear it.
    pub fn current_chord(&self) -> Option<&Chord> {
        self.current_chord.as_ref()
    }
}

// --------------------------------------------------------------------------------------------------
