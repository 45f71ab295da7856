//! Headless canvas that records draw calls

use glam::Vec2;
use serde::Serialize;

use super::{Canvas, Color, RenderError, TextAlign};
use crate::assets::Image;
use crate::sim::Rect;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Clear(Color),
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    Image {
        image: Image,
        dest: Rect,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
        align: TextAlign,
    },
}

/// Keeps the commands of the frame being drawn and of the last presented one
#[derive(Debug, Default)]
pub struct CommandRecorder {
    pending: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames_presented: u64,
    /// Number of upcoming presents that fail, for exercising error paths
    failures_queued: u32,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands drawn since the last present
    pub fn pending(&self) -> &[DrawCommand] {
        &self.pending
    }

    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Make the next `count` presents report a lost surface
    pub fn fail_next_presents(&mut self, count: u32) {
        self.failures_queued = count;
    }
}

impl Canvas for CommandRecorder {
    fn clear(&mut self, color: Color) {
        self.pending.clear();
        self.pending.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.pending.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.pending.push(DrawCommand::StrokeRect { rect, color, width });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.pending.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn draw_image(&mut self, image: Image, dest: Rect) {
        self.pending.push(DrawCommand::Image { image, dest });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color, align: TextAlign) {
        self.pending.push(DrawCommand::Text {
            text: text.to_owned(),
            pos,
            size,
            color,
            align,
        });
    }

    fn present(&mut self) -> Result<(), RenderError> {
        if self.failures_queued > 0 {
            self.failures_queued -= 1;
            self.pending.clear();
            return Err(RenderError::SurfaceLost);
        }
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::colors;

    #[test]
    fn test_present_moves_frame() {
        let mut canvas = CommandRecorder::new();
        canvas.clear(colors::BLACK);
        canvas.draw_line(Vec2::ZERO, Vec2::ONE, colors::WHITE, 1.0);
        assert_eq!(canvas.pending().len(), 2);

        canvas.present().unwrap();
        assert!(canvas.pending().is_empty());
        assert_eq!(canvas.last_frame().len(), 2);
        assert_eq!(canvas.frames_presented(), 1);
    }

    #[test]
    fn test_clear_starts_new_frame() {
        let mut canvas = CommandRecorder::new();
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), colors::RED);
        canvas.clear(colors::BLACK);
        assert_eq!(canvas.pending(), &[DrawCommand::Clear(colors::BLACK)]);
    }

    #[test]
    fn test_queued_failures() {
        let mut canvas = CommandRecorder::new();
        canvas.fail_next_presents(1);
        canvas.clear(colors::BLACK);
        assert!(matches!(canvas.present(), Err(RenderError::SurfaceLost)));
        canvas.clear(colors::BLACK);
        assert!(canvas.present().is_ok());
        assert_eq!(canvas.frames_presented(), 1);
    }
}
