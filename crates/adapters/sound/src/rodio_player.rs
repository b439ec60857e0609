//! Looping playback through the default audio output.
//!
//! The output stream is not `Send`, so a dedicated thread owns it along with
//! the active sink and is driven over a command channel.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use rodio::{Decoder, OutputStreamBuilder, Sink, Source};

use alarmgroups_app::ports::AlarmPlayer;
use alarmgroups_domain::error::AlarmGroupsError;

use crate::config::SoundConfig;
use crate::error::SoundError;

type Reply = mpsc::Sender<Result<(), SoundError>>;

enum Command {
    Play(Reply),
    Stop(Reply),
}

/// Player backed by `rodio`.
#[derive(Debug)]
pub struct RodioPlayer {
    commands: mpsc::Sender<Command>,
}

impl RodioPlayer {
    /// Open the default output device on a playback thread.
    ///
    /// # Errors
    ///
    /// Returns [`SoundError::Stream`] when no output device can be opened,
    /// or [`SoundError::Disconnected`] when the thread exits early.
    pub fn open(config: &SoundConfig) -> Result<Self, SoundError> {
        let (commands, receiver) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::channel();
        let path = config.path.clone();
        let volume = config.clamped_volume();

        thread::Builder::new()
            .name("alarm-sound".to_string())
            .spawn(move || playback_loop(&path, volume, &receiver, &ready_tx))?;

        ready_rx.recv().map_err(|_| SoundError::Disconnected)??;
        tracing::info!(path = %config.path.display(), volume, "audio output opened");
        Ok(Self { commands })
    }

    fn request(&self, command: impl FnOnce(Reply) -> Command) -> Result<(), SoundError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.commands
            .send(command(reply_tx))
            .map_err(|_| SoundError::Disconnected)?;
        reply_rx.recv().map_err(|_| SoundError::Disconnected)?
    }
}

impl AlarmPlayer for RodioPlayer {
    fn play_looping(&self) -> Result<(), AlarmGroupsError> {
        self.request(Command::Play).map_err(Into::into)
    }

    fn stop(&self) -> Result<(), AlarmGroupsError> {
        self.request(Command::Stop).map_err(Into::into)
    }
}

fn playback_loop(
    path: &Path,
    volume: f32,
    commands: &mpsc::Receiver<Command>,
    ready: &mpsc::Sender<Result<(), SoundError>>,
) {
    let mut stream = match OutputStreamBuilder::open_default_stream() {
        Ok(stream) => stream,
        Err(err) => {
            let _ = ready.send(Err(err.into()));
            return;
        }
    };
    stream.log_on_drop(false);
    let _ = ready.send(Ok(()));

    let mut sink: Option<Sink> = None;
    while let Ok(command) = commands.recv() {
        match command {
            Command::Play(reply) => {
                if let Some(active) = sink.take() {
                    active.stop();
                }
                let result = File::open(path)
                    .map_err(SoundError::from)
                    .and_then(|file| Decoder::new(BufReader::new(file)).map_err(SoundError::from))
                    .map(|source| {
                        let next = Sink::connect_new(stream.mixer());
                        next.set_volume(volume);
                        next.append(source.repeat_infinite());
                        next.play();
                        sink = Some(next);
                    });
                if let Err(err) = &result {
                    tracing::warn!(%err, path = %path.display(), "failed to start alarm tone");
                }
                let _ = reply.send(result);
            }
            Command::Stop(reply) => {
                if let Some(active) = sink.take() {
                    active.stop();
                }
                let _ = reply.send(Ok(()));
            }
        }
    }
    tracing::debug!("playback thread exiting");
}
