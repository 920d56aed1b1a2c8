use std::{fs, time::Duration};

use simplelog::*;

use chordpad::prelude::*;

// -------------------------------------------------------------------------------------------------

/// An audio player which only logs what it would play.
#[derive(Default)]
struct LoggingPlayer {
    flam_delay: Duration,
}

impl AudioPlayer for LoggingPlayer {
    fn play_chord(&mut self, notes: &[i32], instrument: Option<Instrument>, volume: f32) {
        log::info!(
            "Chord {:?} on {} at volume {:.2} (flam {:?})",
            notes,
            instrument.unwrap_or_default(),
            volume,
            self.flam_delay
        );
    }

    fn play_bass_note(&mut self, note: i32, volume: f32) {
        log::info!("Bass {} at volume {:.2}", note, volume);
    }

    fn stop_chord(&mut self) {
        log::debug!("Stop");
    }

    fn set_flam_delay(&mut self, delay: Duration) {
        self.flam_delay = delay;
    }

    fn play_click(&mut self, click: u8) {
        log::debug!("Click {}", click);
    }
}

// -------------------------------------------------------------------------------------------------

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // init logging
    TermLogger::init(
        log::STATIC_MAX_LEVEL,
        ConfigBuilder::default().build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .unwrap_or_else(|err| {
        log::error!("init_logger error: {:?}", err);
    });

    // play a few keys of an A dorian keyboard
    let settings = PianoSettings {
        key: NoteName::A,
        mode: MusicMode::Dorian,
        flam: FlamValue::Div32,
        ..Default::default()
    };
    settings.validate()?;

    let mut keyboard = Keyboard::with_settings(&settings);
    let context = PlaybackContext::new(&settings);
    let mut player = LoggingPlayer::default();

    let mut progression = ChordProgression::new("Dorian Walk", settings.bpm);
    progression.key = settings.key;
    progression.mode = settings.mode;
    for note in [NoteName::A, NoteName::D, NoteName::G, NoteName::E] {
        let slot = SlotId::key(note);
        keyboard.adjust_chord_type(slot, Direction::Up);
        if let Some(press) = keyboard.press(slot, &settings) {
            context.play_key_press(&mut player, &press);
            progression.push(press.chord);
        }
    }
    let suggestions = chord_suggestions(keyboard.current_chord(), settings.key, settings.mode);
    log::info!(
        "Suggested next chords: {}",
        suggestions
            .iter()
            .map(|chord| chord.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    // export the played chords
    let export = chordpad::export_progression(&progression);
    let path = std::env::temp_dir().join(&export.file_name);
    fs::write(&path, &export.bytes)?;
    log::info!("Wrote {} bytes to '{}'", export.bytes.len(), path.display());

    // loop the progression until Control-C gets pressed
    let options = PlaybackOptions {
        looping: true,
        volume: settings.chord_volume(),
        ..Default::default()
    };
    let mut playback = ProgressionPlayer::start(player, progression, options)?;
    ctrlc::set_handler({
        let stop_handle = playback.stop_handle();
        move || stop_handle.stop()
    })?;
    log::info!("Playing progression. Press Control-C to stop...");
    for event in playback.events().iter() {
        match event {
            PlaybackEvent::ChordChanged(index) => log::info!("Chord #{}", index + 1),
            PlaybackEvent::Click(_) => (),
            PlaybackEvent::Finished => break,
        }
    }
    playback.join()?;
    Ok(())
}
