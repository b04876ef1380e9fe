//! Procedural images so the demo runs without an asset folder.

use image::{Rgba, RgbaImage};
use sprig::prelude::*;

pub fn checkerboard(width: u32, height: u32, cell: u32) -> Image {
    let dark = Rgba([24, 28, 48, 255]);
    let light = Rgba([30, 36, 60, 255]);
    Image::from_rgba(RgbaImage::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 { dark } else { light }
    }))
}

/// A filled disc on a transparent square.
pub fn disc(radius: u32, color: [u8; 4]) -> Image {
    let size = radius * 2;
    let r = radius as f32;
    Image::from_rgba(RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - r;
        let dy = y as f32 + 0.5 - r;
        if dx * dx + dy * dy <= r * r {
            Rgba(color)
        } else {
            Rgba([0, 0, 0, 0])
        }
    }))
}

/// A ring that grows and fades over `frames` frames.
pub fn burst(frames: u32, radius: u32) -> Vec<Image> {
    (0..frames)
        .map(|i| {
            let t = (i + 1) as f32 / frames as f32;
            let outer = radius as f32 * t;
            let inner = (outer - 3.0).max(0.0);
            let alpha = (255.0 * (1.0 - t * 0.7)) as u8;
            let size = radius * 2;
            let c = radius as f32;
            Image::from_rgba(RgbaImage::from_fn(size, size, |x, y| {
                let dx = x as f32 + 0.5 - c;
                let dy = y as f32 + 0.5 - c;
                let d = (dx * dx + dy * dy).sqrt();
                if d >= inner && d <= outer {
                    Rgba([255, 220, 90, alpha])
                } else {
                    Rgba([0, 0, 0, 0])
                }
            }))
        })
        .collect()
}
