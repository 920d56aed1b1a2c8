use std::hint::black_box;

use criterion::{criterion_group, Criterion};

use chordpad::prelude::*;

// ---------------------------------------------------------------------------------------------

pub fn build_chords(c: &mut Criterion) {
    let mut group = c.benchmark_group("Chords");
    group.bench_function("Create", |b| {
        b.iter(|| {
            for root in NoteName::ALL {
                for chord_type in ALL_CHORD_TYPES {
                    black_box(chordpad::create_chord(root, chord_type, 4, None));
                }
            }
        })
    });
    group.bench_function("Parse Symbols", |b| {
        b.iter(|| {
            for symbol in ["C", "Am7/G", "F#m7b5", "Bbmaj9", "E7#9", "Dsus4/A"] {
                black_box(Chord::from_symbol(symbol).unwrap());
            }
        })
    });
    group.finish();
}

pub fn diatonic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Diatonic");
    group.bench_function("Chords", |b| {
        b.iter(|| {
            for key in NoteName::ALL {
                for mode in MusicMode::ALL {
                    black_box(diatonic_chords(key, mode));
                }
            }
        })
    });
    group.bench_function("Suggestions", |b| {
        let previous = chordpad::create_chord(NoteName::G, ChordType::Seven, 4, None);
        b.iter(|| {
            for key in NoteName::ALL {
                black_box(chord_suggestions(previous.as_ref(), key, MusicMode::Major));
                black_box(common_progressions(key, MusicMode::Minor));
            }
        })
    });
    group.finish();
}

pub fn keyboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("Keyboard");
    let settings = PianoSettings {
        mode: MusicMode::Dorian,
        octave: 1,
        inversion: 2,
        ..Default::default()
    };
    group.bench_function("Press", |b| {
        b.iter_batched(
            || Keyboard::with_settings(&settings),
            |mut keyboard| {
                for note in NoteName::ALL {
                    let slot = SlotId::key(note);
                    keyboard.adjust_chord_type(slot, Direction::Up);
                    black_box(keyboard.press(slot, &settings));
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });
    group.finish();
}

// ---------------------------------------------------------------------------------------------

criterion_group! {
    name = theory;
    config = Criterion::default();
    targets = build_chords, diatonic, keyboard
}
