use std::path::{Path, PathBuf};
use anyhow::{anyhow, Result};
use log::{debug, info};
use raylib::prelude::*;

/// A loaded, playable sound. Dropping the handle releases it.
pub trait SoundHandle {
    fn set_volume(&mut self, volume: f32);
    fn rewind(&mut self);
    fn play(&mut self) -> Result<()>;
    fn halt(&mut self);
}

/// Something that can load a sound from a file.
pub trait SoundBackend {
    type Handle: SoundHandle;

    fn open(&self, path: &Path) -> Result<Self::Handle>;
}

/// The one sound the widget plays, loaded lazily and recreated on demand.
pub struct AudioSlot<B: SoundBackend> {
    backend: B,
    path: PathBuf,
    volume: f32,
    handle: Option<B::Handle>,
}

impl<B: SoundBackend> AudioSlot<B> {
    pub fn new(backend: B, path: impl Into<PathBuf>, volume: f32) -> Self {
        Self {
            backend,
            path: path.into(),
            volume: volume.clamp(0.0, 1.0),
            handle: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }

    /// Loads the sound if it is not loaded yet.
    pub fn acquire(&mut self) -> Result<&mut B::Handle> {
        if self.handle.is_none() {
            let mut handle = self.backend.open(&self.path)?;
            handle.set_volume(self.volume);
            debug!("Loaded sound {:?}", self.path);
            self.handle = Some(handle);
        }
        self.handle
            .as_mut()
            .ok_or_else(|| anyhow!("sound {:?} not loaded", self.path))
    }

    pub fn play_from_start(&mut self) -> Result<()> {
        let handle = self.acquire()?;
        handle.rewind();
        handle.play()
    }

    /// Stops playback and drops the handle. The next play reloads it.
    pub fn release(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.halt();
            debug!("Released sound {:?}", self.path);
        }
    }
}

/// Sounds loaded through raylib's audio device. Without a device every open fails.
pub struct RaylibSoundBackend<'aud> {
    audio: Option<&'aud RaylibAudio>,
}

impl<'aud> RaylibSoundBackend<'aud> {
    pub fn new(audio: Option<&'aud RaylibAudio>) -> Self {
        if audio.is_none() {
            info!("No audio device, running silent");
        }
        Self { audio }
    }
}

impl<'aud> SoundBackend for RaylibSoundBackend<'aud> {
    type Handle = Sound<'aud>;

    fn open(&self, path: &Path) -> Result<Sound<'aud>> {
        let audio = self.audio.ok_or_else(|| anyhow!("audio device unavailable"))?;
        let file = path
            .to_str()
            .ok_or_else(|| anyhow!("sound path {:?} is not valid UTF-8", path))?;
        audio
            .new_sound(file)
            .map_err(|e| anyhow!("Failed to load sound {:?}: {}", path, e))
    }
}

// raylib sounds are decoded fully into memory when loaded, and PlaySound restarts
// from the beginning, so rewinding is a stop.
impl SoundHandle for Sound<'_> {
    fn set_volume(&mut self, volume: f32) {
        Sound::set_volume(self, volume);
    }

    fn rewind(&mut self) {
        Sound::stop(self);
    }

    fn play(&mut self) -> Result<()> {
        Sound::play(self);
        Ok(())
    }

    fn halt(&mut self) {
        Sound::stop(self);
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    pub struct Log {
        pub opened: usize,
        pub plays: usize,
        pub rewinds: usize,
        pub halts: usize,
        pub dropped: usize,
        pub volume: Option<f32>,
    }

    /// Records what the slot does with its handles.
    #[derive(Clone, Default)]
    pub struct FakeBackend {
        pub log: Rc<RefCell<Log>>,
        pub fail_open: bool,
        pub fail_play: bool,
    }

    pub struct FakeHandle {
        log: Rc<RefCell<Log>>,
        fail_play: bool,
    }

    impl SoundBackend for FakeBackend {
        type Handle = FakeHandle;

        fn open(&self, _path: &Path) -> Result<FakeHandle> {
            if self.fail_open {
                return Err(anyhow!("no device"));
            }
            self.log.borrow_mut().opened += 1;
            Ok(FakeHandle { log: self.log.clone(), fail_play: self.fail_play })
        }
    }

    impl SoundHandle for FakeHandle {
        fn set_volume(&mut self, volume: f32) {
            self.log.borrow_mut().volume = Some(volume);
        }

        fn rewind(&mut self) {
            self.log.borrow_mut().rewinds += 1;
        }

        fn play(&mut self) -> Result<()> {
            if self.fail_play {
                return Err(anyhow!("autoplay blocked"));
            }
            self.log.borrow_mut().plays += 1;
            Ok(())
        }

        fn halt(&mut self) {
            self.log.borrow_mut().halts += 1;
        }
    }

    impl Drop for FakeHandle {
        fn drop(&mut self) {
            self.log.borrow_mut().dropped += 1;
        }
    }
}
