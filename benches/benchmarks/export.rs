use std::hint::black_box;

use criterion::{criterion_group, Criterion};

use chordpad::prelude::*;

// ---------------------------------------------------------------------------------------------

fn create_progression() -> ChordProgression {
    let mut progression = ChordProgression::new("Benchmark", 132.0);
    for _ in 0..64 {
        for chord in common_progressions(NoteName::A, MusicMode::Minor)
            .into_iter()
            .flat_map(|p| p.chords)
        {
            progression.push(chord);
        }
    }
    progression
}

// ---------------------------------------------------------------------------------------------

pub fn midi(c: &mut Criterion) {
    let mut group = c.benchmark_group("MIDI");
    let progression = create_progression();
    group.bench_function("Export", |b| {
        b.iter(|| {
            black_box(chordpad::export_progression(&progression));
        })
    });
    group.bench_function("Write", |b| {
        let mut bytes = Vec::with_capacity(64 * 1024);
        b.iter(|| {
            bytes.clear();
            write_progression(&progression, &mut bytes).unwrap();
            black_box(bytes.len());
        })
    });
    group.finish();
}

pub fn stepping(c: &mut Criterion) {
    let mut group = c.benchmark_group("Progression");
    let progression = create_progression();
    group.bench_function("Step", |b| {
        b.iter(|| black_box(progression.stepper(false).filter(|s| s.chord_index.is_some()).count()))
    });
    group.finish();
}

// ---------------------------------------------------------------------------------------------

criterion_group!(export, midi, stepping);
