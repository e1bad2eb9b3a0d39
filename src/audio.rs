use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::assets;

type Sound = Buffered<Decoder<BufReader<File>>>;

/// Audio manager for the tank's sound effects and ambient track
pub struct AudioManager {
    /// Output stream and handle; None when no audio device is available
    output: Option<(OutputStream, OutputStreamHandle)>,
    /// Pre-loaded and buffered effects (None if loading failed)
    boom_sound: Option<Sound>,
    shot_sound: Option<Sound>,
    /// Keeps the looping ambient track alive; dropping the sink stops it
    _music: Option<Sink>,
}

impl AudioManager {
    /// Create a new audio manager and pre-load audio files
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let (stream, stream_handle) = OutputStream::try_default()?;

        // Pre-load and buffer the effects at startup
        let boom_sound = load_sound(&assets::sound_path("boom.wav"));
        let shot_sound = load_sound(&assets::sound_path("shot.wav"));
        let music = start_music(&stream_handle, &assets::sound_path("aqua.wav"));

        Ok(Self {
            output: Some((stream, stream_handle)),
            boom_sound,
            shot_sound,
            _music: music,
        })
    }

    /// Play the explosion sound
    pub fn play_boom(&self) {
        self.play(&self.boom_sound, 0.2);
    }

    /// Play the harpoon launch sound
    pub fn play_shot(&self) {
        self.play(&self.shot_sound, 0.1);
    }

    fn play(&self, sound: &Option<Sound>, volume: f32) {
        // Only play if the device and the sound are both available
        if let (Some((_, stream_handle)), Some(sound)) = (&self.output, sound) {
            // Ignore errors for sound playback - don't want to crash the tank
            if let Ok(sink) = Sink::try_new(stream_handle) {
                sink.set_volume(volume);
                // Clone the buffered source (fast - just clones references)
                sink.append(sound.clone());
                sink.detach();
            }
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new().unwrap_or_else(|err| {
            eprintln!("Warning: Failed to initialize audio: {}", err);
            eprintln!("Continuing without audio...");

            // Fallback: a silent manager; every play call is a no-op
            Self {
                output: None,
                boom_sound: None,
                shot_sound: None,
                _music: None,
            }
        })
    }
}

fn load_sound(path: &Path) -> Option<Sound> {
    let decoded = File::open(path)
        .map_err(|err| err.to_string())
        .and_then(|file| Decoder::new(BufReader::new(file)).map_err(|err| err.to_string()));

    match decoded {
        Ok(source) => Some(source.buffered()),
        Err(err) => {
            eprintln!("Warning: unable to load {}: {}", path.display(), err);
            None
        }
    }
}

/// Starts the ambient track on its own sink, looping forever.
fn start_music(stream_handle: &OutputStreamHandle, path: &Path) -> Option<Sink> {
    let file = File::open(path).ok()?;
    let source = Decoder::new(BufReader::new(file)).ok()?;
    let sink = Sink::try_new(stream_handle).ok()?;
    sink.set_volume(0.05);
    sink.append(source.repeat_infinite());
    Some(sink)
}
