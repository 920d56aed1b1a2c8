//! Standard MIDI file export of chord progressions.

use std::io;

use crate::{chord::Chord, progression::ChordProgression};

// -------------------------------------------------------------------------------------------------

/// MIDI file time division: ticks per quarter note.
pub const TICKS_PER_QUARTER: u32 = 96;

/// Media type of exported MIDI files.
pub const MIDI_MIME_TYPE: &str = "audio/midi";

/// Track name which is used for progressions without a name.
pub const DEFAULT_TRACK_NAME: &str = "Chord Progression";

/// General MIDI program of the note track (balafon).
pub const NOTE_TRACK_PROGRAM: u8 = 108;

/// Note-on velocity of all exported notes.
pub const NOTE_VELOCITY: u8 = 100;

const HEADER_CHUNK: [u8; 14] = [
    b'M', b'T', b'h', b'd', // chunk id
    0x00, 0x00, 0x00, 0x06, // chunk length
    0x00, 0x01, // format 1
    0x00, 0x02, // two tracks
    0x00, TICKS_PER_QUARTER as u8, // division
];

const TRACK_CHUNK_ID: [u8; 4] = *b"MTrk";
const END_OF_TRACK: [u8; 4] = [0x00, 0xFF, 0x2F, 0x00];

// -------------------------------------------------------------------------------------------------

/// An exported MIDI file: raw bytes plus suggested file name and media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiExport {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub file_name: String,
}

/// Export the given progression to a Standard MIDI File, format 1, with a tempo/meta and
/// a note track.
///
/// Export is best effort: progressions without chords or with invalid tempos still result
/// in a complete, yet possibly meaningless, file.
pub fn export_progression(progression: &ChordProgression) -> MidiExport {
    let mut bytes = Vec::new();
    write_progression(progression, &mut bytes).unwrap_or_else(|err| {
        // writing into a Vec can't fail
        log::error!("Failed to write MIDI data: {}", err);
    });
    log::debug!(
        "Exported progression '{}' with {} chords: {} bytes",
        progression.name,
        progression.len(),
        bytes.len()
    );
    MidiExport {
        bytes,
        mime_type: MIDI_MIME_TYPE,
        file_name: midi_file_name(&progression.name),
    }
}

/// Write the given progression as Standard MIDI File into the given writer.
pub fn write_progression<W: io::Write>(
    progression: &ChordProgression,
    writer: &mut W,
) -> io::Result<()> {
    writer.write_all(&HEADER_CHUNK)?;
    write_track_chunk(writer, &tempo_track(progression))?;
    write_track_chunk(writer, &note_track(&progression.chords))?;
    writer.flush()
}

/// Suggested file name for a progression: its name with all characters which are not
/// alphanumeric replaced by underscores, plus a `.mid` extension.
pub fn midi_file_name(name: &str) -> String {
    let name = name.trim();
    let base = if name.is_empty() {
        DEFAULT_TRACK_NAME
    } else {
        name
    };
    let sanitized = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>();
    format!("{}.mid", sanitized)
}

// -------------------------------------------------------------------------------------------------

/// Microseconds per quarter note for the given tempo in BPM. Out of range values saturate.
pub fn tempo_micros_per_quarter(tempo: f32) -> u32 {
    (60_000_000.0 / tempo as f64) as u32
}

/// Append the given value as MIDI variable length quantity.
pub fn write_var_len(bytes: &mut Vec<u8>, value: u32) {
    let mut buffer = [0u8; 5];
    let mut index = buffer.len() - 1;
    let mut value = value;
    buffer[index] = (value & 0x7F) as u8;
    value >>= 7;
    while value > 0 {
        index -= 1;
        buffer[index] = (value & 0x7F) as u8 | 0x80;
        value >>= 7;
    }
    bytes.extend_from_slice(&buffer[index..]);
}

fn write_track_chunk<W: io::Write>(writer: &mut W, events: &[u8]) -> io::Result<()> {
    let length = u32::try_from(events.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "MIDI track is too large"))?;
    writer.write_all(&TRACK_CHUNK_ID)?;
    writer.write_all(&length.to_be_bytes())?;
    writer.write_all(events)
}

fn tempo_track(progression: &ChordProgression) -> Vec<u8> {
    let mut events = Vec::new();
    // set tempo
    let tempo = tempo_micros_per_quarter(progression.tempo).to_be_bytes();
    events.extend_from_slice(&[0x00, 0xFF, 0x51, 0x03]);
    events.extend_from_slice(&tempo[1..]);
    // track name
    let name = if progression.name.is_empty() {
        DEFAULT_TRACK_NAME
    } else {
        progression.name.as_str()
    };
    events.extend_from_slice(&[0x00, 0xFF, 0x03]);
    write_var_len(&mut events, name.len() as u32);
    events.extend_from_slice(name.as_bytes());
    events.extend_from_slice(&END_OF_TRACK);
    events
}

/// MIDI data byte of the given note. Notes out of range [0..=127] get clamped.
fn note_data_byte(note: i32) -> u8 {
    note.clamp(0, 127) as u8
}

fn note_track(chords: &[Chord]) -> Vec<u8> {
    let mut events = vec![0x00, 0xC0, NOTE_TRACK_PROGRAM];
    for chord in chords {
        for note in &chord.notes {
            events.extend_from_slice(&[0x00, 0x90, note_data_byte(*note), NOTE_VELOCITY]);
        }
        // notes sound for the chord's duration, then get released all at once
        let duration = chord.duration.unwrap_or(TICKS_PER_QUARTER);
        for (index, note) in chord.notes.iter().enumerate() {
            write_var_len(&mut events, if index == 0 { duration } else { 0 });
            events.extend_from_slice(&[0x80, note_data_byte(*note), 0x00]);
        }
    }
    events.extend_from_slice(&END_OF_TRACK);
    events
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        chord::{create_chord, ChordType},
        note::NoteName,
    };

    fn track_length(bytes: &[u8], offset: usize) -> usize {
        assert_eq!(&bytes[offset..offset + 4], b"MTrk");
        u32::from_be_bytes([
            bytes[offset + 4],
            bytes[offset + 5],
            bytes[offset + 6],
            bytes[offset + 7],
        ]) as usize
    }

    fn c_major_progression() -> ChordProgression {
        let chord = create_chord(NoteName::C, ChordType::Major, 4, None).unwrap();
        ChordProgression::with_chords("Test", 120.0, vec![chord])
    }

    #[test]
    fn var_len() {
        let encode = |value| {
            let mut bytes = Vec::new();
            write_var_len(&mut bytes, value);
            bytes
        };
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(0x60), vec![0x60]);
        assert_eq!(encode(0x7F), vec![0x7F]);
        assert_eq!(encode(0x80), vec![0x81, 0x00]);
        assert_eq!(encode(192), vec![0x81, 0x40]);
        assert_eq!(encode(0x3FFF), vec![0xFF, 0x7F]);
        assert_eq!(encode(0x0FFF_FFFF), vec![0xFF, 0xFF, 0xFF, 0x7F]);
    }

    #[test]
    fn header_and_track_lengths() {
        let export = export_progression(&c_major_progression());
        let bytes = &export.bytes;
        assert_eq!(
            &bytes[..14],
            &[
                0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x02, 0x00, 0x60
            ]
        );
        let tempo_length = track_length(bytes, 14);
        // tempo (7) + name (4 + "Test") + end of track (4)
        assert_eq!(tempo_length, 7 + 4 + 4 + 4);
        let note_offset = 14 + 8 + tempo_length;
        let note_length = track_length(bytes, note_offset);
        // program (3) + 3 note-ons (4) + 3 note-offs (4) + end of track (4)
        assert_eq!(note_length, 3 + 12 + 12 + 4);
        assert_eq!(bytes.len(), note_offset + 8 + note_length);

        assert_eq!(export.mime_type, "audio/midi");
        assert_eq!(export.file_name, "Test.mid");
    }

    #[test]
    fn tempo_track_events() {
        let bytes = export_progression(&c_major_progression()).bytes;
        let events = &bytes[22..22 + track_length(&bytes, 14)];
        // 500000 µs per quarter at 120 BPM
        assert_eq!(&events[..7], &[0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20]);
        assert_eq!(&events[7..11], &[0x00, 0xFF, 0x03, 0x04]);
        assert_eq!(&events[11..15], b"Test");
        assert_eq!(&events[15..], &END_OF_TRACK);
    }

    #[test]
    fn note_track_events() {
        let bytes = export_progression(&c_major_progression()).bytes;
        let offset = 22 + track_length(&bytes, 14);
        let events = &bytes[offset + 8..];
        assert_eq!(
            events,
            &[
                0x00, 0xC0, 0x6C, // program change
                0x00, 0x90, 60, 0x64, // note ons
                0x00, 0x90, 64, 0x64, //
                0x00, 0x90, 67, 0x64, //
                0x60, 0x80, 60, 0x00, // note offs
                0x00, 0x80, 64, 0x00, //
                0x00, 0x80, 67, 0x00, //
                0x00, 0xFF, 0x2F, 0x00, // end of track
            ]
        );
    }

    #[test]
    fn long_durations() {
        let mut chord = create_chord(NoteName::A, ChordType::Minor, 4, None).unwrap();
        chord.duration = Some(192);
        let progression = ChordProgression::with_chords("Long", 90.0, vec![chord]);
        let bytes = export_progression(&progression).bytes;
        let offset = 22 + track_length(&bytes, 14);
        let note_length = track_length(&bytes, offset);
        // the first note-off's delta takes two bytes
        assert_eq!(note_length, 3 + 12 + 13 + 4);
        let events = &bytes[offset + 8..];
        assert_eq!(&events[15..19], &[0x81, 0x40, 0x80, 69]);
    }

    #[test]
    fn out_of_range_notes() {
        let mut chord = create_chord(NoteName::C, ChordType::Major, 4, None).unwrap();
        chord.notes = vec![-12, 130];
        let progression = ChordProgression::with_chords("Clamped", 120.0, vec![chord]);
        let bytes = export_progression(&progression).bytes;
        let offset = 22 + track_length(&bytes, 14);
        assert_eq!(track_length(&bytes, offset), 3 + 8 + 8 + 4);
        let events = &bytes[offset + 8..];
        assert_eq!(
            &events[3..19],
            &[
                0x00, 0x90, 0, 0x64, //
                0x00, 0x90, 127, 0x64, //
                0x60, 0x80, 0, 0x00, //
                0x00, 0x80, 127, 0x00, //
            ]
        );
    }

    #[test]
    fn default_name_and_empty_progressions() {
        let export = export_progression(&ChordProgression::default());
        let bytes = &export.bytes;
        let tempo_length = track_length(bytes, 14);
        assert_eq!(tempo_length, 7 + 4 + DEFAULT_TRACK_NAME.len() + 4);
        assert_eq!(&bytes[33..33 + DEFAULT_TRACK_NAME.len()], DEFAULT_TRACK_NAME.as_bytes());
        let note_offset = 22 + tempo_length;
        assert_eq!(track_length(bytes, note_offset), 3 + 4);
        assert_eq!(export.file_name, "Chord_Progression.mid");
    }

    #[test]
    fn file_names() {
        assert_eq!(midi_file_name("My Song: I-V-vi-IV"), "My_Song__I-V-vi-IV.mid");
        assert_eq!(midi_file_name("  "), "Chord_Progression.mid");
    }

    #[test]
    fn writer_output_matches_export() {
        let progression = c_major_progression();
        let mut bytes = Vec::new();
        write_progression(&progression, &mut bytes).unwrap();
        assert_eq!(bytes, export_progression(&progression).bytes);
    }

    #[test]
    fn tempos() {
        assert_eq!(tempo_micros_per_quarter(120.0), 500_000);
        assert_eq!(tempo_micros_per_quarter(60.0), 1_000_000);
        // invalid tempos saturate but don't panic
        assert_eq!(tempo_micros_per_quarter(0.0), u32::MAX);
        assert_eq!(tempo_micros_per_quarter(-1.0), 0);
    }
}
