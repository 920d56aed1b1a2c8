use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, bail, Context};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};

use super::AudioPlayer;
use crate::{progression::ChordProgression, settings::Instrument};

// -------------------------------------------------------------------------------------------------

/// Max number of pending [`PlaybackEvent`]s. Events get dropped while the queue is full.
pub const EVENT_QUEUE_SIZE: usize = 64;

// -------------------------------------------------------------------------------------------------

/// Events published by a running [`ProgressionPlayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The chord with the given index started playing.
    ChordChanged(usize),
    /// A click with the given number in range [1..=4] got played.
    Click(u8),
    /// Playback stopped or ran out of chords.
    Finished,
}

/// Progression playback options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackOptions {
    /// Restart from the first chord after the last one.
    pub looping: bool,
    pub instrument: Option<Instrument>,
    /// Chord volume in range [0..=1].
    pub volume: f32,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            looping: false,
            instrument: Some(Instrument::default()),
            volume: 1.0,
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Stops a [`ProgressionPlayer`] from any thread. Stopping is idempotent.
#[derive(Debug, Clone)]
pub struct StopHandle {
    playing: Arc<AtomicBool>,
    stop_sender: Sender<()>,
}

impl StopHandle {
    pub fn stop(&self) {
        if self.playing.swap(false, Ordering::AcqRel) {
            // wake up the sleeping playback thread
            let _ = self.stop_sender.try_send(());
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }
}

// -------------------------------------------------------------------------------------------------

/// Plays back a [`ChordProgression`] with an [`AudioPlayer`] in a background thread.
///
/// Chords change every 4 steps, and each step plays a click. Stopping the player, or dropping
/// it, silences the sounding chord.
pub struct ProgressionPlayer {
    stop_handle: StopHandle,
    event_receiver: Receiver<PlaybackEvent>,
    thread: Option<JoinHandle<()>>,
}

impl ProgressionPlayer {
    /// Start playing the given progression in a new thread.
    pub fn start<P>(
        player: P,
        progression: ChordProgression,
        options: PlaybackOptions,
    ) -> anyhow::Result<Self>
    where
        P: AudioPlayer + Send + 'static,
    {
        if !progression.tempo.is_finite() || progression.tempo <= 0.0 {
            bail!("Invalid progression tempo {}: must be > 0", progression.tempo);
        }
        let playing = Arc::new(AtomicBool::new(true));
        let (stop_sender, stop_receiver) = bounded::<()>(1);
        let (event_sender, event_receiver) = bounded::<PlaybackEvent>(EVENT_QUEUE_SIZE);

        log::debug!(
            "Start playing progression '{}' with {} chords at {} BPM",
            progression.name,
            progression.len(),
            progression.tempo
        );
        let thread = thread::Builder::new()
            .name("progression-player".to_string())
            .spawn({
                let playing = Arc::clone(&playing);
                move || {
                    Self::run(
                        player,
                        progression,
                        options,
                        playing,
                        stop_receiver,
                        event_sender,
                    )
                }
            })
            .context("Failed to spawn the progression player thread")?;

        Ok(Self {
            stop_handle: StopHandle {
                playing,
                stop_sender,
            },
            event_receiver,
            thread: Some(thread),
        })
    }

    /// Returns true until playback got stopped or finished.
    pub fn is_playing(&self) -> bool {
        self.stop_handle.is_playing()
    }

    /// Playback events. The channel disconnects when the playback thread exits. Holds at most
    /// [`EVENT_QUEUE_SIZE`] events: newer ones get dropped until the receiver catches up.
    pub fn events(&self) -> &Receiver<PlaybackEvent> {
        &self.event_receiver
    }

    /// A handle to stop playback from other threads.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop_handle.clone()
    }

    /// Stop playback and wait until the playback thread exited. Calling this on a stopped
    /// player does nothing.
    pub fn stop(&mut self) -> anyhow::Result<()> {
        self.stop_handle.stop();
        self.join()
    }

    /// Wait until playback finished without stopping it. Looping playback only finishes
    /// when it gets stopped via a [`StopHandle`].
    pub fn join(&mut self) -> anyhow::Result<()> {
        if let Some(thread) = self.thread.take() {
            thread
                .join()
                .map_err(|_| anyhow!("The progression player thread panicked"))?;
        }
        Ok(())
    }

    fn run<P: AudioPlayer>(
        mut player: P,
        progression: ChordProgression,
        options: PlaybackOptions,
        playing: Arc<AtomicBool>,
        stop_receiver: Receiver<()>,
        event_sender: Sender<PlaybackEvent>,
    ) {
        let interval = progression.step_interval();
        for step in progression.stepper(options.looping) {
            if !playing.load(Ordering::Acquire) {
                break;
            }
            log::trace!(
                "Step {} click {} chord {:?}",
                step.quarter_index,
                step.click,
                step.chord_index
            );
            if let Some(chord_index) = step.chord_index {
                player.stop_chord();
                player.play_chord(
                    &progression.chords[chord_index].notes,
                    options.instrument,
                    options.volume,
                );
                let _ = event_sender.try_send(PlaybackEvent::ChordChanged(chord_index));
            }
            player.play_click(step.click);
            let _ = event_sender.try_send(PlaybackEvent::Click(step.click));
            match stop_receiver.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        player.stop_chord();
        playing.store(false, Ordering::Release);
        log::debug!("Stopped playing progression '{}'", progression.name);
        let _ = event_sender.try_send(PlaybackEvent::Finished);
    }
}

impl Drop for ProgressionPlayer {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            log::error!("Failed to stop progression player: {}", err);
        }
    }
}

// --------------------------------------------------------------------------------------------------
