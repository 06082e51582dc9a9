//! Window with a translucent background image behind a label and two buttons.
//!
//! Painting and window management belong to the toolkit; this module decides
//! what to paint and how big the window should be.

use crate::error::TriptychError;
use crate::notice::Notice;
use image::ImageReader;
use std::path::Path;
use tracing::{info, warn};

pub const LABEL_DEFAULT: &str = "Caption";
pub const LABEL_CHANGED: &str = "Text changed!";

/// Fill used when no image is loaded.
pub const FALLBACK_FILL: Rgb = Rgb(240, 240, 240);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowFit {
    Maximize,
    Resize(Size),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintOp {
    Fill(Rgb),
    /// Draw the image at the origin, scaled to `size`.
    Image { size: Size, opacity: f32 },
}

/// Bigger than the screen in either direction means maximize.
pub fn window_fit(image: Size, screen: Size) -> WindowFit {
    if image.width > screen.width || image.height > screen.height {
        WindowFit::Maximize
    } else {
        WindowFit::Resize(image)
    }
}

/// Scale `image` to cover `target` while keeping its aspect ratio.
pub fn cover_size(image: Size, target: Size) -> Size {
    if image.width == 0 || image.height == 0 {
        return target;
    }
    let sx = target.width as f64 / image.width as f64;
    let sy = target.height as f64 / image.height as f64;
    let scale = sx.max(sy);
    Size {
        width: ((image.width as f64 * scale).round() as u32).max(target.width),
        height: ((image.height as f64 * scale).round() as u32).max(target.height),
    }
}

#[derive(Debug, Clone)]
pub struct Viewer {
    label: &'static str,
    background: Option<Size>,
    opacity: f32,
    screen: Size,
}

impl Viewer {
    pub fn new(screen: Size, opacity: f32) -> Self {
        Self {
            label: LABEL_DEFAULT,
            background: None,
            opacity: opacity.clamp(0.0, 1.0),
            screen,
        }
    }

    pub fn label(&self) -> &str {
        self.label
    }

    pub fn background(&self) -> Option<Size> {
        self.background
    }

    /// Button 1.
    pub fn toggle_label(&mut self) -> &str {
        self.label = if self.label == LABEL_DEFAULT {
            LABEL_CHANGED
        } else {
            LABEL_DEFAULT
        };
        self.label
    }

    /// Button 2, after the file dialog returned `path`.
    ///
    /// On success the new background is kept and the window fit is returned.
    /// A failed load keeps the previous background.
    pub fn load_background(&mut self, path: &Path) -> (Option<WindowFit>, Vec<Notice>) {
        if path.as_os_str().is_empty() {
            return (None, Vec::new());
        }
        match read_dimensions(path) {
            Ok(size) => {
                info!(path = %path.display(), width = size.width, height = size.height, "background loaded");
                self.background = Some(size);
                (Some(window_fit(size, self.screen)), Vec::new())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load background");
                (None, vec![Notice::error("Error", "Failed to load image.")])
            }
        }
    }

    pub fn paint_plan(&self, widget: Size) -> PaintOp {
        match self.background {
            Some(image) => PaintOp::Image {
                size: cover_size(image, widget),
                opacity: self.opacity,
            },
            None => PaintOp::Fill(FALLBACK_FILL),
        }
    }
}

/// Decode the whole file; a valid header over a broken body is still a failure.
fn read_dimensions(path: &Path) -> Result<Size, TriptychError> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(Size {
        width: img.width(),
        height: img.height(),
    })
}
