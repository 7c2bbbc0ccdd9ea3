//! Crop/scale editor state behind the image upload dialog.
//!
//! The crop window keeps the frame's aspect ratio. At scale 1 it is the
//! largest such window that fits the image; zooming in shrinks it.

use serde::{Deserialize, Serialize};

pub const WHEEL_STEP: f64 = 0.001;
pub const ARROW_STEP: f64 = 1.0;
pub const ARROW_STEP_FAST: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

/// Crop rectangle in source image pixels, as sent with the upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropArea {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CropEditor {
    image_width: f64,
    image_height: f64,
    aspect: f64,
    min_scale: f64,
    max_scale: f64,
    scale: f64,
    x: f64,
    y: f64,
}

impl CropEditor {
    /// `aspect` is frame width over height. Non-positive sizes are treated as 1px.
    pub fn new(image_width: u32, image_height: u32, aspect: f64) -> Self {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        let mut editor = Self {
            image_width: f64::from(image_width.max(1)),
            image_height: f64::from(image_height.max(1)),
            aspect,
            min_scale: 1.0,
            max_scale: 5.0,
            scale: 1.0,
            x: 0.0,
            y: 0.0,
        };
        editor.center();
        editor
    }

    pub fn with_scale_limits(mut self, min: f64, max: f64) -> Self {
        self.min_scale = min.max(1.0);
        self.max_scale = max.max(self.min_scale);
        self.set_scale(self.scale);
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    fn base_size(&self) -> (f64, f64) {
        if self.image_width / self.image_height > self.aspect {
            (self.image_height * self.aspect, self.image_height)
        } else {
            (self.image_width, self.image_width / self.aspect)
        }
    }

    fn window(&self) -> (f64, f64) {
        let (w, h) = self.base_size();
        (w / self.scale, h / self.scale)
    }

    fn center(&mut self) {
        let (w, h) = self.window();
        self.x = (self.image_width - w) / 2.0;
        self.y = (self.image_height - h) / 2.0;
    }

    fn clamp_offset(&mut self) {
        let (w, h) = self.window();
        self.x = self.x.clamp(0.0, (self.image_width - w).max(0.0));
        self.y = self.y.clamp(0.0, (self.image_height - h).max(0.0));
    }

    /// Sets the zoom, keeping the window centred on the same point.
    pub fn set_scale(&mut self, scale: f64) {
        let scale = if scale.is_finite() { scale } else { self.scale };
        let (w, h) = self.window();
        let (cx, cy) = (self.x + w / 2.0, self.y + h / 2.0);
        self.scale = scale.clamp(self.min_scale, self.max_scale);
        let (w, h) = self.window();
        self.x = cx - w / 2.0;
        self.y = cy - h / 2.0;
        self.clamp_offset();
    }

    /// Mouse wheel: positive `delta_y` (scrolling down) zooms out.
    pub fn wheel(&mut self, delta_y: f64) {
        self.set_scale(self.scale - delta_y * WHEEL_STEP);
    }

    pub fn nudge(&mut self, arrow: Arrow, fast: bool) {
        let step = if fast { ARROW_STEP_FAST } else { ARROW_STEP };
        match arrow {
            Arrow::Up => self.y -= step,
            Arrow::Down => self.y += step,
            Arrow::Left => self.x -= step,
            Arrow::Right => self.x += step,
        }
        self.clamp_offset();
    }

    pub fn area(&self) -> CropArea {
        let (w, h) = self.window();
        let width = (w.round() as u32).clamp(1, self.image_width as u32);
        let height = (h.round() as u32).clamp(1, self.image_height as u32);
        let x = (self.x.round() as u32).min(self.image_width as u32 - width);
        let y = (self.y.round() as u32).min(self.image_height as u32 - height);
        CropArea { x, y, width, height }
    }
}
