//! Preview window on minifb.
//!
//! The window is created on the first `show` and recreated if the frame
//! size changes. Frames are packed into minifb's `0RGB` `u32` buffer.

use super::{CaptureError, KEY_POLL_SLICE, Preview, poll_in_slices};
use image::RgbImage;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::time::Duration;

const LETTER_KEYS: [(Key, char); 26] = [
    (Key::A, 'a'),
    (Key::B, 'b'),
    (Key::C, 'c'),
    (Key::D, 'd'),
    (Key::E, 'e'),
    (Key::F, 'f'),
    (Key::G, 'g'),
    (Key::H, 'h'),
    (Key::I, 'i'),
    (Key::J, 'j'),
    (Key::K, 'k'),
    (Key::L, 'l'),
    (Key::M, 'm'),
    (Key::N, 'n'),
    (Key::O, 'o'),
    (Key::P, 'p'),
    (Key::Q, 'q'),
    (Key::R, 'r'),
    (Key::S, 's'),
    (Key::T, 't'),
    (Key::U, 'u'),
    (Key::V, 'v'),
    (Key::W, 'w'),
    (Key::X, 'x'),
    (Key::Y, 'y'),
    (Key::Z, 'z'),
];

#[derive(Default)]
pub struct PreviewWindow {
    window: Option<Window>,
    buffer: Vec<u32>,
    size: (usize, usize),
}

impl PreviewWindow {
    pub fn new() -> Self {
        Self::default()
    }
}

fn key_char(key: Key) -> Option<char> {
    match key {
        Key::Escape => Some('\u{1b}'),
        Key::Space => Some(' '),
        _ => LETTER_KEYS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, c)| *c),
    }
}

impl Preview for PreviewWindow {
    fn show(&mut self, title: &str, frame: &RgbImage) -> Result<(), CaptureError> {
        let size = (frame.width() as usize, frame.height() as usize);
        if self.window.is_none() || self.size != size {
            let window = Window::new(title, size.0, size.1, WindowOptions::default())
                .map_err(|e| CaptureError::Preview(e.to_string()))?;
            self.window = Some(window);
            self.size = size;
        }

        self.buffer.clear();
        self.buffer.extend(
            frame
                .pixels()
                .map(|p| (u32::from(p[0]) << 16) | (u32::from(p[1]) << 8) | u32::from(p[2])),
        );

        if let Some(window) = self.window.as_mut() {
            window
                .update_with_buffer(&self.buffer, size.0, size.1)
                .map_err(|e| CaptureError::Preview(e.to_string()))?;
        }
        Ok(())
    }

    fn poll_key(&mut self, delay: Duration) -> Option<char> {
        let Some(window) = self.window.as_mut() else {
            std::thread::sleep(delay);
            return None;
        };
        poll_in_slices(delay, KEY_POLL_SLICE, |wait| {
            std::thread::sleep(wait);
            window.update();
            // minifb reports a press one update after it arrives; keys still
            // held cover that gap.
            window
                .get_keys_pressed(KeyRepeat::No)
                .into_iter()
                .chain(window.get_keys())
                .find_map(key_char)
        })
    }

    fn is_open(&self) -> bool {
        self.window.as_ref().is_none_or(Window::is_open)
    }

    fn close_all(&mut self) {
        // minifb closes the native window on drop
        self.window = None;
        self.buffer = Vec::new();
    }
}
