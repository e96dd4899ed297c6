//! CLI dispatch for the `sgrid draw` command.
//!
//! Parses a list of editor events and replays them against a project, the
//! same way a GUI shell would feed clicks and button presses to the core.

use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;

use crate::color::{parse_color, to_hex, Color};
use crate::config::CliOverrides;
use crate::document::{Control, Document, PointerButton};
use crate::project;
use crate::shapes::Point;

use super::{document_settings, open_project, resolve_config, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// One replayable editor event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Tool or frame control
    Control(Control),
    /// Pointer interaction at a grid coordinate
    Click(Point, PointerButton),
    /// Pointer interaction at a display coordinate
    Pointer(Point, PointerButton),
    /// Bind a color to a button
    Color(Color, PointerButton),
    /// Set the alpha of both colors
    Alpha(u8),
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected X,Y, got '{}'", s))?;
    let x = x.trim().parse().map_err(|_| format!("invalid x coordinate '{}'", x))?;
    let y = y.trim().parse().map_err(|_| format!("invalid y coordinate '{}'", y))?;
    Ok((x, y))
}

impl FromStr for Event {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((key, value)) = s.split_once('=') {
            return match key {
                "click" => Ok(Event::Click(parse_point(value)?, PointerButton::Primary)),
                "rclick" => Ok(Event::Click(parse_point(value)?, PointerButton::Secondary)),
                "point" => Ok(Event::Pointer(parse_point(value)?, PointerButton::Primary)),
                "rpoint" => Ok(Event::Pointer(parse_point(value)?, PointerButton::Secondary)),
                "color" => parse_color(value)
                    .map(|c| Event::Color(c, PointerButton::Primary))
                    .map_err(|e| e.to_string()),
                "rcolor" => parse_color(value)
                    .map(|c| Event::Color(c, PointerButton::Secondary))
                    .map_err(|e| e.to_string()),
                "alpha" => value
                    .trim()
                    .parse()
                    .map(Event::Alpha)
                    .map_err(|_| format!("alpha must be 0-255, got '{}'", value)),
                other => Err(format!("unknown event '{}'", other)),
            };
        }

        let control = match s {
            "pen" => Control::Pen,
            "eraser" => Control::Eraser,
            "bucket" | "paint-bucket" => Control::PaintBucket,
            "rect" | "rectangle" => Control::Rectangle,
            "ellipse" => Control::Ellipse,
            "add-frame" => Control::AddFrame,
            "prev" | "previous-frame" => Control::PreviousFrame,
            "next" | "next-frame" => Control::NextFrame,
            "delete-frame" => Control::DeleteFrame,
            "clear-frame" => Control::ClearFrame,
            other => return Err(format!("unknown event '{}'", other)),
        };
        Ok(Event::Control(control))
    }
}

/// Apply events in order.
pub fn apply_events(doc: &mut Document, events: &[Event]) {
    for event in events {
        match *event {
            Event::Control(control) => {
                doc.control(control);
            }
            Event::Click(point, button) => {
                doc.pointer_at(point, button);
            }
            Event::Pointer(raw, button) => {
                doc.pointer(raw, button);
            }
            Event::Color(color, button) => doc.set_color(color, button),
            Event::Alpha(alpha) => doc.set_alpha(alpha),
        }
    }
}

/// Execute the draw command.
pub fn run_draw(
    input: &Path,
    events: &[String],
    output: Option<&Path>,
    overrides: &CliOverrides,
    dry_run: bool,
    config_path: Option<&Path>,
) -> ExitCode {
    let parsed: Result<Vec<Event>, String> = events.iter().map(|e| e.parse()).collect();
    let parsed = match parsed {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let config = match resolve_config(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let settings = match document_settings(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let mut doc = match open_project(input, settings) {
        Ok(d) => d,
        Err(code) => return code,
    };

    let before: usize = doc.frames().iter().map(|f| f.painted_count()).sum();
    apply_events(&mut doc, &parsed);
    let after: usize = doc.frames().iter().map(|f| f.painted_count()).sum();

    if dry_run {
        println!(
            "{} event(s): {} frame(s), painted pixels {} -> {}",
            parsed.len(),
            doc.frame_count(),
            before,
            after
        );
        println!(
            "colors: primary {}, secondary {}",
            to_hex(doc.color(PointerButton::Primary)),
            to_hex(doc.color(PointerButton::Secondary))
        );
        return ExitCode::from(EXIT_SUCCESS);
    }

    let target = output.unwrap_or(input);
    match project::save(&doc, target) {
        Ok(()) => {
            eprintln!("Wrote: {}", target.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
