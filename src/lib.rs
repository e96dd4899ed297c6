//! Spritegrid - pixel-grid sprite and animation editing engine
//!
//! This library provides:
//! - Square RGBA frames and the raster tools that edit them (pen, eraser,
//!   flood fill, rectangle and ellipse outlines)
//! - An animation document with frame navigation, two-click shape gestures,
//!   onion skinning and a playback preview
//! - Pointer-to-grid coordinate mapping for every supported grid size
//! - JSON project persistence plus PNG and GIF export

pub mod cli;
pub mod color;
pub mod config;
pub mod document;
pub mod fill;
pub mod frame;
pub mod gif;
pub mod onion;
pub mod output;
pub mod playback;
pub mod project;
pub mod scale;
pub mod shapes;

pub use document::{Control, Document, Effects, PointerButton, Tool};
pub use frame::PixelFrame;
pub use scale::GridSize;
