//! Preview decoration: center marker and mirroring.
//!
//! Only the preview copy is decorated. The frame handed back by
//! [`FrameCapture`](super::FrameCapture) is always the raw device frame.

use crate::config::MarkerConfig;
use image::{Rgb, RgbImage, imageops};
use imageproc::drawing::draw_hollow_circle_mut;

/// Build the image shown in the preview window for `frame`.
pub fn preview_frame(frame: &RgbImage, marker: &MarkerConfig, mirror: bool) -> RgbImage {
    let mut shown = frame.clone();
    draw_marker(&mut shown, marker);
    if mirror {
        imageops::flip_horizontal_in_place(&mut shown);
    }
    shown
}

/// Draw a hollow ring of `marker.thickness` pixels centered on the image,
/// with `marker.radius` as the ring's middle line.
pub fn draw_marker(image: &mut RgbImage, marker: &MarkerConfig) {
    let center = ((image.width() / 2) as i32, (image.height() / 2) as i32);
    let color = Rgb(marker.color);
    let radius = marker.radius as i32;
    let thickness = marker.thickness as i32;
    let inner = radius - thickness / 2;

    for r in inner..inner + thickness {
        if r > 0 {
            draw_hollow_circle_mut(image, center, r, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{RED, gradient, solid};

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    #[test]
    fn marker_ring_crosses_radius_points() {
        let mut img = solid(101, 101, BLACK);
        draw_marker(&mut img, &MarkerConfig::default());

        // Center (50, 50), radius 30: the ring passes through (80, 50) and (50, 20)
        assert_eq!(*img.get_pixel(80, 50), RED);
        assert_eq!(*img.get_pixel(50, 20), RED);
        // Inside and outside the ring are untouched
        assert_eq!(*img.get_pixel(50, 50), BLACK);
        assert_eq!(*img.get_pixel(95, 50), BLACK);
    }

    #[test]
    fn marker_thickness_spans_adjacent_radii() {
        let mut img = solid(101, 101, BLACK);
        draw_marker(&mut img, &MarkerConfig::default());

        // thickness 3 around radius 30 → radii 29, 30, 31
        for x in [79, 80, 81] {
            assert_eq!(*img.get_pixel(x, 50), RED, "x = {x}");
        }
        assert_eq!(*img.get_pixel(78, 50), BLACK);
        assert_eq!(*img.get_pixel(82, 50), BLACK);
    }

    #[test]
    fn preview_does_not_touch_frame() {
        let frame = gradient(64, 48);
        let before = frame.clone();

        let shown = preview_frame(&frame, &MarkerConfig::default(), true);

        assert_eq!(frame, before);
        assert_ne!(shown, frame);
    }

    #[test]
    fn preview_mirrors_horizontally() {
        let frame = gradient(64, 48);
        let marker = MarkerConfig {
            radius: 1,
            thickness: 1,
            color: [0, 0, 0],
        };

        let shown = preview_frame(&frame, &marker, true);

        // Corner far from the marker: mirrored from the opposite edge
        assert_eq!(shown.get_pixel(0, 0), frame.get_pixel(63, 0));
        assert_eq!(shown.get_pixel(63, 47), frame.get_pixel(0, 47));
    }

    #[test]
    fn preview_without_mirror_keeps_orientation() {
        let frame = gradient(64, 48);
        let shown = preview_frame(&frame, &MarkerConfig::default(), false);
        assert_eq!(shown.get_pixel(0, 0), frame.get_pixel(0, 0));
    }
}
