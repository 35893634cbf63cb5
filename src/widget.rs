use std::path::Path;
use std::time::Duration;
use log::{debug, info, warn};
use rand::Rng;
use crate::audio::{AudioSlot, SoundBackend};
use crate::catalog::Catalog;
use crate::flash::FlashTimer;
use crate::interaction::{Interaction, InteractionEvent};
use crate::selection::pick_index;
use crate::state::FlashState;
use crate::texture_loader::{Prefetched, Prefetcher};

/// The button and everything it owns: image catalog, selection, flash timer,
/// sound and cosmetic input state.
///
/// Lifecycle is `new` -> `mount` -> any number of `activate`/`tick` ->
/// `teardown`. Teardown also runs on drop.
pub struct FlashButton<B: SoundBackend, R: Rng> {
    catalog: Catalog,
    current_index: usize,
    flash: FlashTimer,
    audio: AudioSlot<B>,
    interaction: Interaction,
    prefetcher: Option<Prefetcher>,
    rng: R,
    mounted: bool,
}

impl<B: SoundBackend, R: Rng> FlashButton<B, R> {
    pub fn new(catalog: Catalog, audio: AudioSlot<B>, flash_duration: Duration, rng: R) -> Self {
        Self {
            catalog,
            current_index: 0,
            flash: FlashTimer::new(flash_duration),
            audio,
            interaction: Interaction::default(),
            prefetcher: None,
            rng,
            mounted: false,
        }
    }

    /// Preloads the sound and starts reading every image in the background.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        if let Err(e) = self.audio.acquire() {
            warn!("Sound not preloaded: {:#}", e);
        }
        self.prefetcher = Some(Prefetcher::spawn(self.catalog.paths().to_vec()));
        info!("Mounted with {} images", self.catalog.len());
    }

    pub fn activate(&mut self, now: Duration) {
        self.current_index = pick_index(self.catalog.len(), self.current_index, &mut self.rng);

        // Sound is best effort, the flash happens regardless
        if let Err(e) = self.audio.play_from_start() {
            debug!("Sound playback skipped: {:#}", e);
        }

        self.flash.trigger(now);
        debug!("Flash image {} until {:?}", self.current_index, self.flash.pending_reset());
    }

    pub fn tick(&mut self, now: Duration) {
        if self.flash.tick(now) {
            debug!("Flash ended at {:?}", now);
        }
    }

    pub fn handle(&mut self, event: InteractionEvent) {
        self.interaction.apply(event);
    }

    /// Hands over images read in the background since the last call.
    pub fn take_prefetched(&mut self, limit: usize) -> Vec<Prefetched> {
        match self.prefetcher.as_mut() {
            Some(prefetcher) => prefetcher.poll(limit),
            None => Vec::new(),
        }
    }

    /// Stops the sound, releases it and cancels the pending reset. Leaves the
    /// button idle on its first image, so a later `mount` starts fresh. Safe to call twice.
    pub fn teardown(&mut self) {
        self.audio.release();
        self.flash.reset();
        self.current_index = 0;
        self.interaction = Interaction::default();
        if let Some(mut prefetcher) = self.prefetcher.take() {
            prefetcher.cancel();
        }
        if self.mounted {
            self.mounted = false;
            info!("Torn down");
        }
    }

    /// The image to show full-screen, if any.
    pub fn overlay(&self) -> Option<(usize, &Path)> {
        if !self.flash.is_flashing() {
            return None;
        }
        self.catalog
            .get(self.current_index)
            .map(|path| (self.current_index, path))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn flash_state(&self) -> FlashState {
        self.flash.state()
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn sound_loaded(&self) -> bool {
        self.audio.is_loaded()
    }
}

impl<B: SoundBackend, R: Rng> Drop for FlashButton<B, R> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::fake::FakeBackend;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::path::PathBuf;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn catalog(n: usize) -> Catalog {
        Catalog::new((0..n).map(|i| PathBuf::from(format!("img{i}.png"))).collect())
    }

    fn button(n: usize, backend: &FakeBackend) -> FlashButton<FakeBackend, StdRng> {
        FlashButton::new(
            catalog(n),
            AudioSlot::new(backend.clone(), "boom.mp3", 1.0),
            ms(220),
            StdRng::seed_from_u64(3),
        )
    }

    #[test]
    fn starts_idle_on_first_image() {
        let backend = FakeBackend::default();
        let b = button(3, &backend);
        assert_eq!(b.flash_state(), FlashState::Idle);
        assert_eq!(b.current_index(), 0);
        assert_eq!(b.overlay(), None);
    }

    #[test]
    fn mount_preloads_sound() {
        let backend = FakeBackend::default();
        let mut b = button(3, &backend);
        b.mount();
        assert!(b.is_mounted());
        assert!(b.sound_loaded());
        assert_eq!(backend.log.borrow().opened, 1);
        b.activate(ms(0));
        assert_eq!(backend.log.borrow().opened, 1);
        assert_eq!(backend.log.borrow().plays, 1);
    }

    #[test]
    fn activation_never_repeats_image() {
        let backend = FakeBackend::default();
        let mut b = button(3, &backend);
        b.mount();
        let mut now = ms(0);
        for _ in 0..100 {
            let before = b.current_index();
            b.activate(now);
            assert_ne!(b.current_index(), before);
            let (index, path) = b.overlay().unwrap();
            assert_eq!(index, b.current_index());
            assert_eq!(path, Path::new(&format!("img{index}.png")));
            now += ms(500);
            b.tick(now);
            assert_eq!(b.overlay(), None);
        }
    }

    #[test]
    fn single_image_repeats() {
        let backend = FakeBackend::default();
        let mut b = button(1, &backend);
        b.mount();
        for i in 0..5 {
            b.activate(ms(i * 1000));
            assert_eq!(b.current_index(), 0);
            assert!(b.overlay().is_some());
        }
    }

    #[test]
    fn empty_catalog_flashes_without_overlay() {
        let backend = FakeBackend::default();
        let mut b = button(0, &backend);
        b.mount();
        b.activate(ms(0));
        assert_eq!(b.flash_state(), FlashState::Flashing);
        assert_eq!(b.current_index(), 0);
        assert_eq!(b.overlay(), None);
        assert_eq!(backend.log.borrow().plays, 1);
    }

    #[test]
    fn later_activation_extends_flash() {
        let backend = FakeBackend::default();
        let mut b = button(3, &backend);
        b.mount();
        b.activate(ms(0));
        b.tick(ms(50));
        b.activate(ms(100));
        b.tick(ms(220));
        assert!(b.overlay().is_some(), "first reset must not fire");
        b.tick(ms(319));
        assert!(b.overlay().is_some());
        b.tick(ms(320));
        assert_eq!(b.overlay(), None);
    }

    #[test]
    fn rapid_activations_form_one_visible_interval() {
        let backend = FakeBackend::default();
        let mut b = button(3, &backend);
        b.mount();
        b.activate(ms(0));
        b.tick(ms(50));
        b.activate(ms(50));
        for t in (50..270).step_by(5) {
            b.tick(ms(t));
            assert_eq!(b.flash_state(), FlashState::Flashing, "gap at {t}ms");
        }
        b.tick(ms(270));
        assert_eq!(b.flash_state(), FlashState::Idle);
    }

    #[test]
    fn playback_failure_does_not_stop_flash() {
        let backend = FakeBackend { fail_play: true, ..Default::default() };
        let mut b = button(2, &backend);
        b.mount();
        b.activate(ms(0));
        assert!(b.overlay().is_some());
    }

    #[test]
    fn missing_audio_device_does_not_stop_flash() {
        let backend = FakeBackend { fail_open: true, ..Default::default() };
        let mut b = button(2, &backend);
        b.mount();
        assert!(!b.sound_loaded());
        b.activate(ms(0));
        assert!(b.overlay().is_some());
    }

    #[test]
    fn teardown_cancels_reset_and_releases_sound() {
        let backend = FakeBackend::default();
        let mut b = button(3, &backend);
        b.mount();
        b.activate(ms(0));
        b.teardown();
        assert!(!b.sound_loaded());
        {
            let log = backend.log.borrow();
            assert_eq!(log.halts, 1);
            assert_eq!(log.dropped, 1);
        }
        assert_eq!(b.flash_state(), FlashState::Idle);
        b.tick(ms(10_000));
        assert_eq!(b.flash_state(), FlashState::Idle);
        assert_eq!(b.overlay(), None);

        b.activate(ms(20_000));
        assert_eq!(backend.log.borrow().opened, 2);
        assert!(b.sound_loaded());
    }

    #[test]
    fn remount_after_teardown_starts_idle() {
        let backend = FakeBackend::default();
        let mut b = button(3, &backend);
        b.mount();
        b.handle(InteractionEvent::PointerEnter);
        b.activate(ms(0));
        assert!(b.overlay().is_some());

        b.teardown();
        b.mount();
        assert!(b.is_mounted());
        assert_eq!(b.flash_state(), FlashState::Idle);
        assert_eq!(b.overlay(), None);
        assert_eq!(b.current_index(), 0);
        assert_eq!(b.interaction(), Interaction::default());

        b.tick(ms(10_000));
        assert_eq!(b.overlay(), None);

        b.activate(ms(20_000));
        assert!(b.overlay().is_some());
        b.tick(ms(20_220));
        assert_eq!(b.overlay(), None);
    }

    #[test]
    fn teardown_stops_prefetch_delivery() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        std::fs::write(&path, b"png").unwrap();
        let backend = FakeBackend::default();
        let mut b = FlashButton::new(
            Catalog::new(vec![path]),
            AudioSlot::new(backend, "boom.mp3", 1.0),
            ms(220),
            StdRng::seed_from_u64(0),
        );
        b.mount();
        b.teardown();

        // Give the worker time to finish reading; nothing may come through
        std::thread::sleep(ms(50));
        assert!(b.take_prefetched(4).is_empty());
    }

    #[test]
    fn drop_tears_down() {
        let backend = FakeBackend::default();
        {
            let mut b = button(2, &backend);
            b.mount();
        }
        assert_eq!(backend.log.borrow().dropped, 1);
        assert_eq!(backend.log.borrow().halts, 1);
    }

    #[test]
    fn interaction_events_reach_flags() {
        let backend = FakeBackend::default();
        let mut b = button(1, &backend);
        b.handle(InteractionEvent::PointerEnter);
        b.handle(InteractionEvent::PointerDown);
        assert_eq!(b.interaction(), Interaction { hovered: true, pressed: true });
        b.handle(InteractionEvent::Blur);
        assert_eq!(b.interaction(), Interaction::default());
    }

    #[test]
    fn mount_prefetches_catalog_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        std::fs::write(&path, b"png").unwrap();
        let backend = FakeBackend::default();
        let mut b = FlashButton::new(
            Catalog::new(vec![path]),
            AudioSlot::new(backend, "boom.mp3", 1.0),
            ms(220),
            StdRng::seed_from_u64(0),
        );
        b.mount();

        let started = std::time::Instant::now();
        let mut got = Vec::new();
        while got.is_empty() && started.elapsed() < Duration::from_secs(5) {
            got = b.take_prefetched(4);
            std::thread::sleep(ms(1));
        }
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].index, 0);
        assert_eq!(got[0].result.as_ref().unwrap().bytes, b"png");
    }
}
