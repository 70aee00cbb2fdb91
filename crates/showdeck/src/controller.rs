//! Presentation state: the current slide, the fullscreen flag and the image modal.
//!
//! Navigation and modal state are independent axes. Keyboard navigation wraps around the
//! deck, the on-screen buttons clamp at its ends.

use std::num::NonZeroUsize;

use eframe::egui;

/// Receives fire-and-forget fullscreen requests.
pub trait FullscreenHost {
    fn request_fullscreen(&mut self, fullscreen: bool);
}

/// Viewport commands collected during input handling and sent once the input closure returns.
impl FullscreenHost for Vec<egui::ViewportCommand> {
    fn request_fullscreen(&mut self, fullscreen: bool) {
        self.push(egui::ViewportCommand::Fullscreen(fullscreen));
    }
}

/// Keys the presentation reacts to, independent of the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowRight,
    ArrowLeft,
    Space,
    F,
    F11,
    Other,
}

impl NavKey {
    /// Map a key press with its modifiers. The fullscreen shortcut is the lowercase `f`, so
    /// Shift+F is not a shortcut.
    pub fn from_event(key: egui::Key, modifiers: egui::Modifiers) -> Self {
        if key == egui::Key::F && modifiers.shift {
            return Self::Other;
        }
        Self::from(key)
    }
}

impl From<egui::Key> for NavKey {
    fn from(key: egui::Key) -> Self {
        match key {
            egui::Key::ArrowRight => Self::ArrowRight,
            egui::Key::ArrowLeft => Self::ArrowLeft,
            egui::Key::Space => Self::Space,
            egui::Key::F => Self::F,
            egui::Key::F11 => Self::F11,
            _ => Self::Other,
        }
    }
}

/// Lightbox state. `image` and `title` are only meaningful while `is_open`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    pub is_open: bool,
    pub image: String,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct Controller {
    len: NonZeroUsize,
    current: usize,
    /// Optimistic: flipped when a request is issued, never read back from the window.
    fullscreen: bool,
    modal: ModalState,
    reset_modal_on_navigate: bool,
}

// A deck always has at least one slide.
#[allow(clippy::len_without_is_empty)]
impl Controller {
    pub fn new(len: NonZeroUsize) -> Self {
        Self {
            len,
            current: 0,
            fullscreen: false,
            modal: ModalState::default(),
            reset_modal_on_navigate: false,
        }
    }

    /// Start on `index`, clamped into the deck.
    pub fn starting_at(mut self, index: usize) -> Self {
        self.current = index.min(self.last());
        self
    }

    /// Seed the fullscreen flag with the window's initial mode.
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn reset_modal_on_navigate(mut self, reset: bool) -> Self {
        self.reset_modal_on_navigate = reset;
        self
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len.get()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    fn last(&self) -> usize {
        self.len.get() - 1
    }

    fn set_current(&mut self, index: usize) {
        if index != self.current && self.reset_modal_on_navigate {
            self.close_image_modal();
        }
        self.current = index;
    }

    pub fn go_to_next(&mut self) {
        self.set_current((self.current + 1) % self.len.get());
    }

    pub fn go_to_previous(&mut self) {
        let len = self.len.get();
        self.set_current((self.current + len - 1) % len);
    }

    /// Jump to `index`, clamped into `[0, len - 1]`.
    pub fn go_to_index(&mut self, index: isize) {
        let clamped = index.clamp(0, self.last() as isize) as usize;
        self.set_current(clamped);
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.current < self.last()
    }

    /// On-screen "previous" button: stops at the first slide.
    pub fn previous_button(&mut self) {
        self.go_to_index(self.current as isize - 1);
    }

    /// On-screen "next" button: stops at the last slide.
    pub fn next_button(&mut self) {
        self.go_to_index(self.current as isize + 1);
    }

    pub fn toggle_fullscreen(&mut self, host: &mut impl FullscreenHost) {
        let target = !self.fullscreen;
        host.request_fullscreen(target);
        self.fullscreen = target;
    }

    /// Apply a key press. Returns true when the key's default action must be suppressed.
    pub fn handle_key(&mut self, key: NavKey, host: &mut impl FullscreenHost) -> bool {
        match key {
            NavKey::ArrowRight | NavKey::Space => {
                self.go_to_next();
                false
            }
            NavKey::ArrowLeft => {
                self.go_to_previous();
                false
            }
            NavKey::F | NavKey::F11 => {
                self.toggle_fullscreen(host);
                true
            }
            NavKey::Other => false,
        }
    }

    /// Open the lightbox. An empty image reference leaves the state untouched.
    pub fn open_image_modal(&mut self, image: &str, title: &str) {
        if image.is_empty() {
            return;
        }
        self.modal = ModalState {
            is_open: true,
            image: image.to_string(),
            title: title.to_string(),
        };
    }

    pub fn close_image_modal(&mut self) {
        self.modal = ModalState::default();
    }

    /// Adopt a reloaded catalog of `len` slides, keeping the current index if it still fits.
    pub fn resize(&mut self, len: NonZeroUsize) {
        self.len = len;
        self.current = self.current.min(self.last());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHost {
        requests: Vec<bool>,
    }

    impl FullscreenHost for RecordingHost {
        fn request_fullscreen(&mut self, fullscreen: bool) {
            self.requests.push(fullscreen);
        }
    }

    fn controller(len: usize) -> Controller {
        Controller::new(NonZeroUsize::new(len).unwrap())
    }

    #[test]
    fn test_next_wraps_modulo_length() {
        for start in 0..9 {
            for n in 0..25 {
                let mut c = controller(9).starting_at(start);
                for _ in 0..n {
                    c.go_to_next();
                }
                assert_eq!(c.current(), (start + n) % 9);
            }
        }
    }

    #[test]
    fn test_previous_wraps_modulo_length() {
        for start in 0..9 {
            for n in 0..25 {
                let mut c = controller(9).starting_at(start);
                for _ in 0..n {
                    c.go_to_previous();
                }
                let expected = (start as isize - n as isize).rem_euclid(9) as usize;
                assert_eq!(c.current(), expected);
            }
        }
    }

    #[test]
    fn test_single_slide_deck_stays_put() {
        let mut c = controller(1);
        c.go_to_next();
        c.go_to_previous();
        c.next_button();
        assert_eq!(c.current(), 0);
        assert!(!c.can_go_previous());
        assert!(!c.can_go_next());
    }

    #[test]
    fn test_go_to_index_clamps() {
        let mut c = controller(9);
        c.go_to_index(-1);
        assert_eq!(c.current(), 0);
        c.go_to_index(42);
        assert_eq!(c.current(), 8);
        c.go_to_index(9);
        assert_eq!(c.current(), 8);
        c.go_to_index(isize::MIN);
        assert_eq!(c.current(), 0);
        c.go_to_index(4);
        assert_eq!(c.current(), 4);
    }

    #[test]
    fn test_buttons_stop_at_bounds() {
        let mut c = controller(9);
        assert!(!c.can_go_previous());
        c.previous_button();
        assert_eq!(c.current(), 0);

        let mut c = controller(9).starting_at(8);
        assert!(!c.can_go_next());
        c.next_button();
        assert_eq!(c.current(), 8);
        c.previous_button();
        assert_eq!(c.current(), 7);
        assert!(c.can_go_next());
    }

    #[test]
    fn test_starting_at_clamps() {
        assert_eq!(controller(3).starting_at(10).current(), 2);
    }

    #[test]
    fn test_open_modal_with_empty_image_is_noop() {
        let mut c = controller(3);
        c.open_image_modal("", "Caption");
        assert_eq!(c.modal(), &ModalState::default());
        assert!(!c.modal().is_open);

        c.open_image_modal("/a.png", "A");
        c.open_image_modal("", "B");
        assert_eq!(c.modal().image, "/a.png");
        assert_eq!(c.modal().title, "A");
    }

    #[test]
    fn test_open_then_close_resets_modal() {
        let mut c = controller(3);
        c.open_image_modal("https://example.com/x.png", "X");
        assert!(c.modal().is_open);
        c.close_image_modal();
        assert_eq!(
            c.modal(),
            &ModalState {
                is_open: false,
                image: String::new(),
                title: String::new(),
            }
        );
    }

    #[test]
    fn test_arrow_right_equals_next() {
        let mut host = RecordingHost::default();
        let mut by_key = controller(9).starting_at(3);
        let mut by_call = by_key.clone();
        assert!(!by_key.handle_key(NavKey::ArrowRight, &mut host));
        by_call.go_to_next();
        assert_eq!(by_key.current(), by_call.current());

        assert!(!by_key.handle_key(NavKey::Space, &mut host));
        assert_eq!(by_key.current(), 5);
        assert!(host.requests.is_empty());
    }

    #[test]
    fn test_unrecognised_key_changes_nothing() {
        let mut host = RecordingHost::default();
        let mut c = controller(9).starting_at(2);
        c.open_image_modal("/a.png", "A");
        let before = (c.current(), c.is_fullscreen(), c.modal().clone());
        assert!(!c.handle_key(NavKey::from(egui::Key::X), &mut host));
        assert_eq!((c.current(), c.is_fullscreen(), c.modal().clone()), before);
        assert!(host.requests.is_empty());
    }

    #[test]
    fn test_arrow_keys_wrap_at_ends() {
        let mut host = RecordingHost::default();
        let mut c = controller(9);
        c.handle_key(NavKey::ArrowLeft, &mut host);
        assert_eq!(c.current(), 8);
        c.handle_key(NavKey::ArrowRight, &mut host);
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn test_fullscreen_round_trip() {
        let mut host = RecordingHost::default();
        let mut c = controller(9);
        c.toggle_fullscreen(&mut host);
        assert!(c.is_fullscreen());
        c.toggle_fullscreen(&mut host);
        assert!(!c.is_fullscreen());
        assert_eq!(host.requests, vec![true, false]);
    }

    #[test]
    fn test_fullscreen_keys_suppress_default() {
        let mut host = RecordingHost::default();
        let mut c = controller(9);
        assert!(c.handle_key(NavKey::F, &mut host));
        assert!(c.handle_key(NavKey::F11, &mut host));
        assert!(!c.is_fullscreen());
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn test_fullscreen_queues_viewport_command() {
        let mut cmds: Vec<egui::ViewportCommand> = Vec::new();
        let mut c = controller(2).with_fullscreen(true);
        c.toggle_fullscreen(&mut cmds);
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], egui::ViewportCommand::Fullscreen(false)));
    }

    #[test]
    fn test_navigation_keeps_modal_by_default() {
        let mut c = controller(3);
        c.open_image_modal("/a.png", "A");
        c.go_to_next();
        assert!(c.modal().is_open);
    }

    #[test]
    fn test_navigation_can_reset_modal() {
        let mut c = controller(3).reset_modal_on_navigate(true);
        c.open_image_modal("/a.png", "A");
        c.go_to_index(0);
        assert!(c.modal().is_open, "staying on the same slide keeps the modal");
        c.go_to_next();
        assert!(!c.modal().is_open);
    }

    #[test]
    fn test_modal_does_not_move_index() {
        let mut c = controller(5).starting_at(3);
        c.open_image_modal("/a.png", "A");
        c.close_image_modal();
        assert_eq!(c.current(), 3);
    }

    #[test]
    fn test_resize_clamps_current() {
        let mut c = controller(9).starting_at(8);
        c.resize(NonZeroUsize::new(4).unwrap());
        assert_eq!(c.current(), 3);
        assert_eq!(c.len(), 4);
        c.resize(NonZeroUsize::new(10).unwrap());
        assert_eq!(c.current(), 3);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(NavKey::from(egui::Key::ArrowRight), NavKey::ArrowRight);
        assert_eq!(NavKey::from(egui::Key::ArrowLeft), NavKey::ArrowLeft);
        assert_eq!(NavKey::from(egui::Key::Space), NavKey::Space);
        assert_eq!(NavKey::from(egui::Key::F), NavKey::F);
        assert_eq!(NavKey::from(egui::Key::F11), NavKey::F11);
        assert_eq!(NavKey::from(egui::Key::Enter), NavKey::Other);
    }

    #[test]
    fn test_shift_f_is_not_fullscreen() {
        let mut c = controller(9);
        let mut host = RecordingHost::default();
        let key = NavKey::from_event(egui::Key::F, egui::Modifiers::SHIFT);
        assert_eq!(key, NavKey::Other);
        assert!(!c.handle_key(key, &mut host));
        assert!(!c.is_fullscreen());
        assert!(host.requests.is_empty());

        assert_eq!(
            NavKey::from_event(egui::Key::F, egui::Modifiers::NONE),
            NavKey::F
        );
        assert_eq!(
            NavKey::from_event(egui::Key::F11, egui::Modifiers::SHIFT),
            NavKey::F11
        );
        assert_eq!(
            NavKey::from_event(egui::Key::ArrowRight, egui::Modifiers::SHIFT),
            NavKey::ArrowRight
        );
    }
}
