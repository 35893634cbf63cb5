use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use anyhow::{anyhow, Context, Result};
use exif::{In, Reader, Tag, Value};
use log::{debug, warn};
use raylib::prelude::*;

/// File contents read off the render thread, waiting to be decoded into a texture.
#[derive(Debug)]
pub struct RawImage {
    pub extension: String,
    pub bytes: Vec<u8>,
    pub orientation: u16,
}

// --- Read file bytes and EXIF orientation ---
pub fn read_raw_image(image_path: &Path) -> Result<RawImage> {
    let bytes = fs::read(image_path)
        .with_context(|| format!("Failed to read file {:?}", image_path))?;

    let extension = image_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut orientation = 1; // Default: no rotation

    // EXIF is only read reliably from JPEG
    if extension == "jpg" || extension == "jpeg" {
        match Reader::new().read_from_container(&mut Cursor::new(&bytes)) {
            Ok(exif) => {
                if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                    if let Value::Short(values) = &field.value {
                        if let Some(value) = values.first() {
                            orientation = *value;
                        }
                    }
                }
            }
            Err(e) => {
                // Not fatal, the image is shown unrotated
                debug!("No EXIF data for {:?}: {}", image_path, e);
            }
        }
    }

    Ok(RawImage { extension, bytes, orientation })
}

// --- Decode, apply EXIF rotation, upload to the GPU ---
pub fn decode_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    raw: &RawImage,
) -> Result<Texture2D> {
    let mut image = Image::load_image_from_mem(&format!(".{}", raw.extension), &raw.bytes)
        .map_err(|e| anyhow!("Failed to decode image: {}", e))?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
    // Flipped orientations are ignored.
    match raw.orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("Failed to create texture: {}", e))?;

    // CPU copy is no longer needed
    drop(image);

    Ok(texture)
}

pub fn load_texture(rl: &mut RaylibHandle, thread: &RaylibThread, path: &Path) -> Result<Texture2D> {
    let raw = read_raw_image(path)?;
    decode_texture(rl, thread, &raw).with_context(|| format!("Loading {:?}", path))
}

pub struct Prefetched {
    pub index: usize,
    pub result: Result<RawImage>,
}

/// Reads every catalog file on a background thread. Results arrive in catalog
/// order and are picked up with [`Prefetcher::poll`], which never blocks.
pub struct Prefetcher {
    rx: Option<Receiver<Prefetched>>,
}

impl Prefetcher {
    pub fn spawn(paths: Vec<PathBuf>) -> Self {
        if paths.is_empty() {
            return Self { rx: None };
        }
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("prefetch".into())
            .spawn(move || {
                for (index, path) in paths.iter().enumerate() {
                    let result = read_raw_image(path);
                    if tx.send(Prefetched { index, result }).is_err() {
                        // Receiver is gone, the widget was torn down
                        break;
                    }
                }
            });
        match spawned {
            Ok(_) => Self { rx: Some(rx) },
            Err(e) => {
                warn!("Could not start image prefetch: {}", e);
                Self { rx: None }
            }
        }
    }

    /// Takes up to `limit` finished reads.
    pub fn poll(&mut self, limit: usize) -> Vec<Prefetched> {
        let mut done = Vec::new();
        let Some(rx) = &self.rx else {
            return done;
        };
        while done.len() < limit {
            match rx.try_recv() {
                Ok(item) => done.push(item),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("Image prefetch finished");
                    self.rx = None;
                    break;
                }
            }
        }
        done
    }

    pub fn is_finished(&self) -> bool {
        self.rx.is_none()
    }

    pub fn cancel(&mut self) {
        self.rx = None;
    }
}

#[derive(Debug)]
pub enum Slot<T> {
    Pending,
    Ready(T),
    Failed,
}

/// Decoded images by catalog index.
pub struct TextureCache<T> {
    slots: Vec<Slot<T>>,
}

impl<T> TextureCache<T> {
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| Slot::Pending).collect(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        match self.slots.get(index) {
            Some(Slot::Ready(texture)) => Some(texture),
            _ => None,
        }
    }

    pub fn is_pending(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Slot::Pending))
    }

    /// Stores a decoded image unless one is already there.
    pub fn insert(&mut self, index: usize, texture: T) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        if matches!(slot, Slot::Ready(_)) {
            return false;
        }
        *slot = Slot::Ready(texture);
        true
    }

    pub fn mark_failed(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            if matches!(slot, Slot::Pending) {
                *slot = Slot::Failed;
            }
        }
    }

    /// Runs `load` for a slot that has not been resolved yet, recording the outcome.
    pub fn ensure_with(&mut self, index: usize, load: impl FnOnce() -> Result<T>) -> Option<&T> {
        if self.is_pending(index) {
            match load() {
                Ok(texture) => {
                    self.insert(index, texture);
                }
                Err(e) => {
                    warn!("Image {} unavailable: {:#}", index, e);
                    self.mark_failed(index);
                }
            }
        }
        self.get(index)
    }

    pub fn ready_count(&self) -> usize {
        self.slots.iter().filter(|s| matches!(s, Slot::Ready(_))).count()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
