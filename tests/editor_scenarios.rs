//! End-to-end editing scenarios against the public document API.
//!
//! Each test plays the role of the GUI shell: it resolves pointer positions,
//! presses controls, and checks what the document hands back.

use image::Rgba;
use spritegrid::color::TRANSPARENT;
use spritegrid::shapes::rasterize_ellipse_outline;
use spritegrid::{Control, Document, GridSize, PixelFrame, PointerButton, Tool};

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

// ============================================================================
// Core editing flows
// ============================================================================

#[test]
fn test_new_document_then_pen_stroke() {
    let mut doc = Document::new(GridSize::S8);
    assert_eq!(doc.frame_count(), 1);
    assert_eq!(doc.cursor().index(), 0);
    assert_eq!(doc.current_frame(), &PixelFrame::square(8));

    doc.set_color(RED, PointerButton::Primary);
    // Logical (2, 3) on an 8x8 grid is display (128..191, 192..255).
    let effects = doc.pointer((150, 200), PointerButton::Primary);

    assert_eq!(doc.current_frame().get(2, 3), Some(RED));
    assert_eq!(doc.current_frame().painted_count(), 1);
    assert_eq!(*effects.canvas.get_pixel(2, 3), RED);
}

#[test]
fn test_bucket_fill_blank_frame() {
    let mut doc = Document::new(GridSize::S8);
    doc.set_color(RED, PointerButton::Primary);
    doc.control(Control::PaintBucket);
    doc.pointer((0, 0), PointerButton::Primary);

    let frame = doc.current_frame();
    assert_eq!(frame.image().pixels().filter(|p| **p == RED).count(), 64);
}

#[test]
fn test_previous_frame_never_goes_negative() {
    let mut doc = Document::new(GridSize::S16);
    doc.control(Control::AddFrame);
    doc.control(Control::AddFrame);
    for _ in 0..10 {
        let effects = doc.control(Control::PreviousFrame);
        assert_eq!(effects.status.unwrap().frame_label, (doc.cursor().index() + 1).to_string());
    }
    assert_eq!(doc.cursor().index(), 0);
}

#[test]
fn test_delete_first_frame_leaves_sequence() {
    let mut doc = Document::new(GridSize::S8);
    doc.control(Control::AddFrame);
    doc.control(Control::PreviousFrame);
    doc.control(Control::DeleteFrame);
    assert_eq!(doc.frame_count(), 2);
    assert_eq!(doc.cursor().index(), 0);
}

#[test]
fn test_delete_never_empties_document() {
    let mut doc = Document::new(GridSize::S8);
    for _ in 0..3 {
        doc.control(Control::AddFrame);
    }
    for _ in 0..10 {
        doc.control(Control::DeleteFrame);
    }
    assert_eq!(doc.frame_count(), 1);
    assert_eq!(doc.cursor().index(), 0);
}

// ============================================================================
// Multi-step gestures
// ============================================================================

#[test]
fn test_ellipse_gesture_matches_rasterizer() {
    let mut doc = Document::new(GridSize::S32);
    doc.set_color(RED, PointerButton::Secondary);
    doc.control(Control::Ellipse);
    assert_eq!(doc.tool(), Tool::Ellipse);

    // Display divisor for 32 is 16.
    doc.pointer((4 * 16, 2 * 16), PointerButton::Secondary);
    doc.pointer((20 * 16, 11 * 16), PointerButton::Secondary);

    let expected = rasterize_ellipse_outline((4, 2), (20, 11));
    assert_eq!(doc.current_frame().painted_count(), expected.len());
    for (x, y) in expected {
        assert_eq!(doc.current_frame().get(x, y), Some(RED), "pixel ({x}, {y})");
    }
}

#[test]
fn test_switching_frames_mid_gesture_starts_over() {
    let mut doc = Document::new(GridSize::S8);
    doc.set_color(RED, PointerButton::Primary);
    doc.control(Control::Rectangle);
    doc.pointer_at((0, 0), PointerButton::Primary);
    doc.control(Control::AddFrame);
    doc.pointer_at((5, 5), PointerButton::Primary);

    assert_eq!(doc.current_frame().painted_count(), 0);
    doc.pointer_at((7, 7), PointerButton::Primary);
    assert_eq!(doc.current_frame().painted_count(), 8);
}

#[test]
fn test_shape_clipped_at_grid_edge() {
    let mut doc = Document::new(GridSize::S8);
    doc.set_color(RED, PointerButton::Primary);
    doc.control(Control::Ellipse);
    doc.pointer_at((4, 4), PointerButton::Primary);
    doc.pointer_at((14, 14), PointerButton::Primary);

    let frame = doc.current_frame();
    assert!(frame.painted_count() > 0);
    assert_eq!(frame.get(4, 9), None);
}

#[test]
fn test_fill_inside_rectangle_only() {
    let mut doc = Document::new(GridSize::S16);
    doc.set_color(RED, PointerButton::Primary);
    doc.set_color(Rgba([0, 0, 0, 255]), PointerButton::Secondary);

    doc.control(Control::Rectangle);
    doc.pointer_at((2, 2), PointerButton::Secondary);
    doc.pointer_at((9, 9), PointerButton::Secondary);

    doc.control(Control::PaintBucket);
    doc.pointer_at((5, 5), PointerButton::Primary);

    let frame = doc.current_frame();
    let red = frame.image().pixels().filter(|p| **p == RED).count();
    assert_eq!(red, 36);
    assert_eq!(frame.get(0, 0), Some(TRANSPARENT));
    assert_eq!(frame.get(12, 12), Some(TRANSPARENT));
}

#[test]
fn test_erase_and_clear() {
    let mut doc = Document::new(GridSize::S8);
    doc.set_color(RED, PointerButton::Primary);
    doc.control(Control::PaintBucket);
    doc.pointer_at((0, 0), PointerButton::Primary);

    doc.control(Control::Eraser);
    doc.pointer_at((3, 3), PointerButton::Primary);
    assert_eq!(doc.current_frame().painted_count(), 63);

    doc.control(Control::ClearFrame);
    assert_eq!(doc.current_frame().painted_count(), 0);
    assert_eq!(doc.tool(), Tool::Eraser);
}

// ============================================================================
// Onion skin and playback
// ============================================================================

#[test]
fn test_onion_skin_only_after_first_frame() {
    let mut doc = Document::new(GridSize::S16);
    doc.set_color(RED, PointerButton::Primary);
    doc.pointer_at((0, 0), PointerButton::Primary);

    let status = doc.control(Control::AddFrame).status.unwrap();
    assert_eq!(status.frame_count, 2);
    assert_eq!(status.onion_skin.dimensions(), (32, 32));
    assert_eq!(*status.onion_skin.get_pixel(1, 1), Rgba([255, 0, 0, 120]));

    let status = doc.control(Control::PreviousFrame).status.unwrap();
    assert_eq!(status.onion_skin.dimensions(), (0, 0));
}

#[test]
fn test_playback_loops_independently_of_cursor() {
    let mut doc = Document::new(GridSize::S64);
    doc.control(Control::AddFrame);
    doc.control(Control::AddFrame);
    doc.control(Control::PreviousFrame);

    doc.playback_mut().set_playing(true);
    let indices: Vec<usize> = (0..4)
        .map(|_| {
            let image = doc.tick().unwrap();
            assert_eq!(image.dimensions(), (128, 128));
            doc.playback().preview_index()
        })
        .collect();
    assert_eq!(indices, vec![1, 2, 0, 1]);
    assert_eq!(doc.cursor().index(), 1);

    doc.playback_mut().set_playing(false);
    assert!(doc.tick().is_none());
    assert_eq!(doc.playback().preview_index(), 1);
}
