//! The animation document: frame sequence, edit cursor, tools and colors.
//!
//! A [`Document`] is driven by two kinds of input from the shell. Pointer
//! interactions ([`Document::pointer`]) apply the active tool to the current
//! frame; control presses ([`Document::control`]) switch tools or edit the
//! frame sequence. Both return an [`Effects`] value listing the bitmaps and
//! labels the shell has to refresh.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::color::{with_alpha, Color, TRANSPARENT};
use crate::fill::flood_fill;
use crate::frame::PixelFrame;
use crate::onion::{empty_onion_skin, render_onion_skin};
use crate::playback::Playback;
use crate::project::{self, ProjectError};
use crate::scale::GridSize;
use crate::shapes::{ellipse, rectangle, Point};

/// The two logical input buttons a color can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Usually the left mouse button
    Primary,
    /// Usually the right mouse button
    Secondary,
}

/// Drawing tool applied by pointer interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
    PaintBucket,
    Rectangle,
    Ellipse,
}

/// Tool and frame controls pressed in the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Pen,
    Eraser,
    PaintBucket,
    Rectangle,
    Ellipse,
    AddFrame,
    PreviousFrame,
    NextFrame,
    DeleteFrame,
    ClearFrame,
}

impl Control {
    /// The tool this control selects, if it is a tool control.
    pub fn tool(self) -> Option<Tool> {
        match self {
            Control::Pen => Some(Tool::Pen),
            Control::Eraser => Some(Tool::Eraser),
            Control::PaintBucket => Some(Tool::PaintBucket),
            Control::Rectangle => Some(Tool::Rectangle),
            Control::Ellipse => Some(Tool::Ellipse),
            _ => None,
        }
    }
}

/// Progress of a two-click rectangle or ellipse gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeGesture {
    #[default]
    Idle,
    /// First corner placed, waiting for the second click
    AnchorSet(Point),
}

/// Index of the frame being edited. Always valid for its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct FrameCursor(usize);

impl FrameCursor {
    pub fn index(self) -> usize {
        self.0
    }

    /// 1-based label shown in the frame counter.
    pub fn label(self) -> String {
        (self.0 + 1).to_string()
    }

    fn back(self) -> Self {
        FrameCursor(self.0.saturating_sub(1))
    }

    fn forward(self, len: usize) -> Self {
        if self.0 + 1 < len {
            FrameCursor(self.0 + 1)
        } else {
            self
        }
    }
}

/// Frame-sequence state the shell shows next to the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameStatus {
    /// Number of frames in the document
    pub frame_count: usize,
    /// 1-based index of the current frame
    pub frame_label: String,
    /// Dimmed previous frame, or an empty bitmap on the first frame
    pub onion_skin: RgbaImage,
}

/// What the shell must refresh after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effects {
    /// Bitmap of the current frame
    pub canvas: RgbaImage,
    /// Present after control events
    pub status: Option<FrameStatus>,
}

/// Starting settings for a new document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSettings {
    pub primary: Color,
    pub secondary: Color,
    pub playback: Playback,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            primary: Rgba([0, 0, 0, 255]),
            secondary: Rgba([255, 255, 255, 255]),
            playback: Playback::default(),
        }
    }
}

/// An open sprite animation.
#[derive(Debug, Clone)]
pub struct Document {
    grid: GridSize,
    frames: Vec<PixelFrame>,
    cursor: FrameCursor,
    tool: Tool,
    gesture: ShapeGesture,
    primary: Color,
    secondary: Color,
    playback: Playback,
}

impl Document {
    /// New document with one blank frame and default settings.
    pub fn new(grid: GridSize) -> Self {
        Self::with_settings(grid, DocumentSettings::default())
    }

    pub fn with_settings(grid: GridSize, settings: DocumentSettings) -> Self {
        Self {
            grid,
            frames: vec![PixelFrame::square(grid.pixels())],
            cursor: FrameCursor::default(),
            tool: Tool::default(),
            gesture: ShapeGesture::Idle,
            primary: settings.primary,
            secondary: settings.secondary,
            playback: settings.playback,
        }
    }

    /// Open a saved project with default settings.
    pub fn open(path: &Path) -> Result<Self, ProjectError> {
        Self::open_with_settings(path, DocumentSettings::default())
    }

    /// Open a saved project. The grid size defaults to 32 when the file does
    /// not name one.
    pub fn open_with_settings(path: &Path, settings: DocumentSettings) -> Result<Self, ProjectError> {
        let mut doc = Self::with_settings(GridSize::default(), settings);
        project::load_into(&mut doc, path)?;
        Ok(doc)
    }

    pub fn grid_size(&self) -> GridSize {
        self.grid
    }

    pub fn frames(&self) -> &[PixelFrame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn cursor(&self) -> FrameCursor {
        self.cursor
    }

    pub fn current_frame(&self) -> &PixelFrame {
        &self.frames[self.cursor.index()]
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn gesture(&self) -> ShapeGesture {
        self.gesture
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    /// Color bound to a button.
    pub fn color(&self, button: PointerButton) -> Color {
        match button {
            PointerButton::Primary => self.primary,
            PointerButton::Secondary => self.secondary,
        }
    }

    /// Bind a color to a button.
    pub fn set_color(&mut self, color: Color, button: PointerButton) {
        match button {
            PointerButton::Primary => self.primary = color,
            PointerButton::Secondary => self.secondary = color,
        }
    }

    /// Overwrite the alpha channel of both bound colors.
    pub fn set_alpha(&mut self, alpha: u8) {
        self.primary = with_alpha(self.primary, alpha);
        self.secondary = with_alpha(self.secondary, alpha);
    }

    /// Handle a pointer interaction at a raw display position.
    pub fn pointer(&mut self, raw: Point, button: PointerButton) -> Effects {
        let point = self.grid.map_point(raw);
        self.pointer_at(point, button)
    }

    /// Handle a pointer interaction at an already-resolved grid coordinate.
    pub fn pointer_at(&mut self, point: Point, button: PointerButton) -> Effects {
        let color = self.color(button);
        let index = self.cursor.index();
        let frame = &mut self.frames[index];
        let (x, y) = point;

        log::debug!("{:?} at ({}, {}) on frame {} with {:?}", self.tool, x, y, index, button);

        match self.tool {
            Tool::Pen => {
                frame.plot(x, y, color);
            }
            Tool::Eraser => {
                frame.plot(x, y, TRANSPARENT);
            }
            Tool::PaintBucket => {
                if let Some(target) = frame.get(x, y) {
                    let written = flood_fill(frame, point, color, target);
                    log::debug!("flood fill wrote {} pixels", written);
                }
            }
            Tool::Rectangle | Tool::Ellipse => match self.gesture {
                ShapeGesture::Idle => self.gesture = ShapeGesture::AnchorSet(point),
                ShapeGesture::AnchorSet(anchor) => {
                    if self.tool == Tool::Rectangle {
                        rectangle(frame, anchor, point, color);
                    } else {
                        ellipse(frame, anchor, point, color);
                    }
                    self.gesture = ShapeGesture::Idle;
                }
            },
        }

        Effects { canvas: self.canvas(), status: None }
    }

    /// Handle a tool or frame control. Any unfinished shape gesture is
    /// discarded first.
    pub fn control(&mut self, control: Control) -> Effects {
        self.gesture = ShapeGesture::Idle;

        if let Some(tool) = control.tool() {
            self.tool = tool;
        } else {
            match control {
                Control::AddFrame => {
                    self.frames.push(PixelFrame::square(self.grid.pixels()));
                    self.cursor = FrameCursor(self.frames.len() - 1);
                }
                Control::PreviousFrame => self.cursor = self.cursor.back(),
                Control::NextFrame => self.cursor = self.cursor.forward(self.frames.len()),
                Control::DeleteFrame => {
                    // The first frame is never deleted, which also keeps the
                    // sequence non-empty.
                    if self.cursor.index() > 0 {
                        self.frames.remove(self.cursor.index());
                        self.cursor = self.cursor.back();
                    }
                }
                Control::ClearFrame => self.frames[self.cursor.index()].clear(),
                _ => {}
            }
        }

        log::debug!(
            "{:?}: tool {:?}, frame {}/{}",
            control,
            self.tool,
            self.cursor.label(),
            self.frames.len()
        );

        Effects { canvas: self.canvas(), status: Some(self.frame_status()) }
    }

    /// Bitmap of the current frame.
    pub fn canvas(&self) -> RgbaImage {
        self.current_frame().to_image()
    }

    /// Ghost of the frame before the cursor, scaled to the canvas.
    pub fn onion_skin(&self) -> RgbaImage {
        match self.cursor.index() {
            0 => empty_onion_skin(),
            i => render_onion_skin(self.frames[i - 1].image(), self.grid.canvas_scale()),
        }
    }

    pub fn frame_status(&self) -> FrameStatus {
        FrameStatus {
            frame_count: self.frames.len(),
            frame_label: self.cursor.label(),
            onion_skin: self.onion_skin(),
        }
    }

    /// Advance the playback preview; see [`Playback::tick`].
    pub fn tick(&mut self) -> Option<RgbaImage> {
        self.playback.tick(&self.frames, self.grid)
    }

    /// Save to a project file, reporting failure as `false`.
    pub fn save(&self, path: &Path) -> bool {
        match project::save(self, path) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("could not save project '{}': {}", path.display(), e);
                false
            }
        }
    }

    /// Replace contents from a project file, reporting failure as `false`.
    /// On failure the document is left unchanged.
    pub fn load(&mut self, path: &Path) -> bool {
        match project::load_into(self, path) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("could not open project '{}': {}", path.display(), e);
                false
            }
        }
    }

    /// Export the current frame as an image, reporting failure as `false`.
    pub fn export(&self, path: &Path) -> bool {
        match self.current_frame().export_png(path) {
            Ok(()) => {
                log::info!("exported frame {} to '{}'", self.cursor.label(), path.display());
                true
            }
            Err(e) => {
                log::warn!("could not export '{}': {}", path.display(), e);
                false
            }
        }
    }

    /// Swap in a loaded grid size and frame sequence. Resets the cursor, the
    /// preview and any half-finished gesture.
    pub(crate) fn replace_frames(&mut self, grid: GridSize, frames: Vec<PixelFrame>) {
        debug_assert!(!frames.is_empty());
        self.grid = grid;
        self.frames = frames;
        self.cursor = FrameCursor::default();
        self.gesture = ShapeGesture::Idle;
        self.playback.rewind();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Rgba([255, 0, 0, 255]);
    const BLUE: Color = Rgba([0, 0, 255, 255]);

    fn doc8() -> Document {
        let mut doc = Document::new(GridSize::S8);
        doc.set_color(RED, PointerButton::Primary);
        doc.set_color(BLUE, PointerButton::Secondary);
        doc
    }

    #[test]
    fn test_new_document() {
        let doc = Document::new(GridSize::S8);
        assert_eq!(doc.frame_count(), 1);
        assert_eq!(doc.cursor().index(), 0);
        assert_eq!(doc.tool(), Tool::Pen);
        assert_eq!(doc.gesture(), ShapeGesture::Idle);
        assert_eq!(doc.current_frame(), &PixelFrame::square(8));
    }

    #[test]
    fn test_pen_uses_button_color() {
        let mut doc = doc8();
        doc.pointer_at((2, 3), PointerButton::Primary);
        doc.pointer_at((4, 4), PointerButton::Secondary);
        assert_eq!(doc.current_frame().get(2, 3), Some(RED));
        assert_eq!(doc.current_frame().get(4, 4), Some(BLUE));
        assert_eq!(doc.current_frame().painted_count(), 2);
    }

    #[test]
    fn test_pointer_maps_raw_coordinates() {
        let mut doc = doc8();
        let effects = doc.pointer((2 * 64 + 10, 3 * 64 + 63), PointerButton::Primary);
        assert_eq!(doc.current_frame().get(2, 3), Some(RED));
        assert_eq!(effects.canvas.get_pixel(2, 3), &RED);
        assert!(effects.status.is_none());
    }

    #[test]
    fn test_pointer_outside_canvas_is_ignored() {
        let mut doc = doc8();
        doc.pointer((600, 10), PointerButton::Primary);
        doc.pointer((-70, 10), PointerButton::Primary);
        assert_eq!(doc.current_frame().painted_count(), 0);
    }

    #[test]
    fn test_eraser() {
        let mut doc = doc8();
        doc.pointer_at((1, 1), PointerButton::Primary);
        doc.control(Control::Eraser);
        doc.pointer_at((1, 1), PointerButton::Secondary);
        assert_eq!(doc.current_frame().get(1, 1), Some(TRANSPARENT));
    }

    #[test]
    fn test_bucket_fills_blank_frame() {
        let mut doc = doc8();
        doc.control(Control::PaintBucket);
        doc.pointer_at((0, 0), PointerButton::Primary);
        assert!(doc.current_frame().image().pixels().all(|p| *p == RED));
    }

    #[test]
    fn test_rectangle_two_click_gesture() {
        let mut doc = doc8();
        doc.control(Control::Rectangle);

        doc.pointer_at((1, 1), PointerButton::Primary);
        assert_eq!(doc.gesture(), ShapeGesture::AnchorSet((1, 1)));
        assert_eq!(doc.current_frame().painted_count(), 0);

        doc.pointer_at((4, 4), PointerButton::Secondary);
        assert_eq!(doc.gesture(), ShapeGesture::Idle);
        assert_eq!(doc.current_frame().painted_count(), 12);
        assert_eq!(doc.current_frame().get(4, 1), Some(BLUE));
    }

    #[test]
    fn test_ellipse_two_click_gesture() {
        let mut doc = doc8();
        doc.control(Control::Ellipse);
        doc.pointer_at((0, 0), PointerButton::Primary);
        doc.pointer_at((6, 4), PointerButton::Primary);
        assert_eq!(doc.current_frame().painted_count(), 12);
        assert_eq!(doc.current_frame().get(3, 2), Some(TRANSPARENT));
    }

    #[test]
    fn test_reselecting_tool_discards_anchor() {
        let mut doc = doc8();
        doc.control(Control::Rectangle);
        doc.pointer_at((1, 1), PointerButton::Primary);
        doc.control(Control::Rectangle);
        assert_eq!(doc.gesture(), ShapeGesture::Idle);

        // The next click is a fresh anchor, not a second corner.
        doc.pointer_at((5, 5), PointerButton::Primary);
        assert_eq!(doc.current_frame().painted_count(), 0);
        assert_eq!(doc.gesture(), ShapeGesture::AnchorSet((5, 5)));
    }

    #[test]
    fn test_frame_controls_discard_anchor() {
        let mut doc = doc8();
        doc.control(Control::Ellipse);
        doc.pointer_at((1, 1), PointerButton::Primary);
        doc.control(Control::NextFrame);
        assert_eq!(doc.gesture(), ShapeGesture::Idle);
        assert_eq!(doc.tool(), Tool::Ellipse);
    }

    #[test]
    fn test_add_frame_moves_cursor() {
        let mut doc = doc8();
        let effects = doc.control(Control::AddFrame);
        assert_eq!(doc.frame_count(), 2);
        assert_eq!(doc.cursor().index(), 1);
        let status = effects.status.unwrap();
        assert_eq!(status.frame_count, 2);
        assert_eq!(status.frame_label, "2");
    }

    #[test]
    fn test_add_frame_from_middle_goes_to_new_last() {
        let mut doc = doc8();
        doc.control(Control::AddFrame);
        doc.control(Control::AddFrame);
        doc.control(Control::PreviousFrame);
        doc.control(Control::PreviousFrame);
        doc.control(Control::AddFrame);
        assert_eq!(doc.frame_count(), 4);
        assert_eq!(doc.cursor().index(), 3);
    }

    #[test]
    fn test_previous_clamps_at_zero() {
        let mut doc = doc8();
        doc.control(Control::AddFrame);
        for _ in 0..5 {
            doc.control(Control::PreviousFrame);
        }
        assert_eq!(doc.cursor().index(), 0);
    }

    #[test]
    fn test_next_clamps_at_end() {
        let mut doc = doc8();
        doc.control(Control::AddFrame);
        doc.control(Control::PreviousFrame);
        for _ in 0..5 {
            doc.control(Control::NextFrame);
        }
        assert_eq!(doc.cursor().index(), 1);
    }

    #[test]
    fn test_delete_at_zero_is_noop() {
        let mut doc = doc8();
        doc.pointer_at((0, 0), PointerButton::Primary);
        doc.control(Control::AddFrame);
        doc.control(Control::PreviousFrame);
        let before: Vec<PixelFrame> = doc.frames().to_vec();

        doc.control(Control::DeleteFrame);
        assert_eq!(doc.frames(), &before[..]);
        assert_eq!(doc.cursor().index(), 0);
    }

    #[test]
    fn test_delete_removes_current_and_steps_back() {
        let mut doc = doc8();
        doc.control(Control::AddFrame);
        doc.pointer_at((1, 1), PointerButton::Primary);
        doc.control(Control::AddFrame);
        doc.pointer_at((2, 2), PointerButton::Primary);
        doc.control(Control::PreviousFrame);

        doc.control(Control::DeleteFrame);
        assert_eq!(doc.frame_count(), 2);
        assert_eq!(doc.cursor().index(), 0);
        assert_eq!(doc.frames()[1].get(2, 2), Some(RED));
        assert_eq!(doc.frames()[1].get(1, 1), Some(TRANSPARENT));
    }

    #[test]
    fn test_clear_frame() {
        let mut doc = doc8();
        doc.control(Control::PaintBucket);
        doc.pointer_at((0, 0), PointerButton::Primary);
        let effects = doc.control(Control::ClearFrame);
        assert_eq!(doc.current_frame().painted_count(), 0);
        assert!(effects.canvas.pixels().all(|p| *p == TRANSPARENT));
    }

    #[test]
    fn test_onion_skin_tracks_previous_frame() {
        let mut doc = doc8();
        doc.pointer_at((0, 0), PointerButton::Primary);

        let first = doc.control(Control::Pen).status.unwrap();
        assert_eq!(first.onion_skin.dimensions(), (0, 0));

        let second = doc.control(Control::AddFrame).status.unwrap();
        assert_eq!(second.onion_skin.dimensions(), (64, 64));
        assert_eq!(*second.onion_skin.get_pixel(7, 7), Rgba([255, 0, 0, 120]));
        assert_eq!(second.onion_skin.get_pixel(8, 8)[3], 0);
    }

    #[test]
    fn test_set_alpha_overwrites_both() {
        let mut doc = doc8();
        doc.set_alpha(40);
        assert_eq!(doc.color(PointerButton::Primary), Rgba([255, 0, 0, 40]));
        assert_eq!(doc.color(PointerButton::Secondary), Rgba([0, 0, 255, 40]));
    }

    #[test]
    fn test_tick_runs_over_document_frames() {
        let mut doc = doc8();
        doc.control(Control::AddFrame);
        doc.playback_mut().set_scaled(false);
        assert!(doc.tick().is_none());

        doc.playback_mut().set_playing(true);
        let img = doc.tick().unwrap();
        assert_eq!(img.dimensions(), (8, 8));
        assert_eq!(doc.playback().preview_index(), 1);
        assert_eq!(doc.cursor().index(), 1);
    }
}
