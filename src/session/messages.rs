//! Message types for the editing session
//!
//! Each line of input becomes one `Msg`. Messages are handled strictly in
//! order, one at a time.

use std::path::PathBuf;
use std::str::FromStr;

use crate::config::TextColor;
use crate::domain::{OverlayId, Point, Vector};
use crate::render::filter::{FilterKind, UnknownFilter};

// ============================================================================
// Text overlay messages
// ============================================================================

/// Pointer drag on an overlay, reported as absolute positions
#[derive(Debug, Clone, PartialEq)]
pub enum DragAction {
    /// Press on whatever overlay is topmost at the position
    Start(Point),
    /// Press on a specific overlay
    StartOn(OverlayId, Point),
    /// Pointer moved
    Move(Point),
    /// Pointer released
    End,
}

/// All text overlay messages
#[derive(Debug, Clone, PartialEq)]
pub enum TextMsg {
    /// Place new text at the canvas center
    Add(String),
    /// Move an overlay by an incremental delta
    Nudge(OverlayId, Vector),
    /// Pointer drag actions
    Drag(DragAction),
    /// Color for new overlays
    SetColor(TextColor),
    /// Shadow for new overlays
    SetShadow(bool),
}

// ============================================================================
// Session messages
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Take a new photo: from a file, or through the picker
    Capture(Option<PathBuf>),
    /// Discard the photo and overlays
    Close,
    Filter(FilterKind),
    Text(TextMsg),
    /// Print overlays and session status
    List,
    Save,
    Share,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  capture [path]          take a photo (file path, or pick one)
  close                   discard the photo and all text
  filter none|sepia|mono  apply a filter
  text <words>            add text at the center
  drag <id> <dx> <dy>     move text by a delta
  grab [id] <x> <y>       press on text
  to <x> <y>              move the pointer while pressed
  release                 let go
  color <r> <g> <b>       color for new text (0-1)
  shadow on|off           shadow for new text
  list                    show text overlays
  save                    save to the photo library
  share                   hand the photo to the share target
  quit";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("`{command}` expects {expected}")]
    Usage {
        command: &'static str,
        expected: &'static str,
    },
    #[error(transparent)]
    Filter(#[from] UnknownFilter),
}

fn usage(command: &'static str, expected: &'static str) -> ParseError {
    ParseError::Usage { command, expected }
}

fn numbers<const N: usize>(
    args: &[&str],
    command: &'static str,
    expected: &'static str,
) -> Result<[f32; N], ParseError> {
    if args.len() != N {
        return Err(usage(command, expected));
    }
    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| usage(command, expected))?;
    }
    Ok(out)
}

fn overlay_id(arg: &str, command: &'static str, expected: &'static str) -> Result<OverlayId, ParseError> {
    arg.parse::<u64>()
        .map(OverlayId)
        .map_err(|_| usage(command, expected))
}

impl FromStr for Msg {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let msg = match command.to_ascii_lowercase().as_str() {
            "" => return Err(ParseError::Empty),
            "capture" | "open" => Msg::Capture((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "close" => Msg::Close,
            "filter" => {
                let [id] = args.as_slice() else {
                    return Err(usage("filter", "one of none, sepia, mono"));
                };
                Msg::Filter(id.parse()?)
            }
            "text" => {
                if rest.is_empty() {
                    return Err(usage("text", "the text to add"));
                }
                // `\n` in the input starts a new line
                Msg::Text(TextMsg::Add(rest.replace("\\n", "\n")))
            }
            "drag" => {
                const EXPECTED: &str = "<id> <dx> <dy>";
                let Some((id, delta)) = args.split_first() else {
                    return Err(usage("drag", EXPECTED));
                };
                let id = overlay_id(id, "drag", EXPECTED)?;
                let [dx, dy] = numbers::<2>(delta, "drag", EXPECTED)?;
                Msg::Text(TextMsg::Nudge(id, Vector::new(dx, dy)))
            }
            "grab" => {
                const EXPECTED: &str = "[id] <x> <y>";
                match args.len() {
                    2 => {
                        let [x, y] = numbers::<2>(&args, "grab", EXPECTED)?;
                        Msg::Text(TextMsg::Drag(DragAction::Start(Point::new(x, y))))
                    }
                    3 => {
                        let id = overlay_id(args[0], "grab", EXPECTED)?;
                        let [x, y] = numbers::<2>(&args[1..], "grab", EXPECTED)?;
                        Msg::Text(TextMsg::Drag(DragAction::StartOn(id, Point::new(x, y))))
                    }
                    _ => return Err(usage("grab", EXPECTED)),
                }
            }
            "to" => {
                let [x, y] = numbers::<2>(&args, "to", "<x> <y>")?;
                Msg::Text(TextMsg::Drag(DragAction::Move(Point::new(x, y))))
            }
            "release" => Msg::Text(TextMsg::Drag(DragAction::End)),
            "color" => {
                let [r, g, b] = numbers::<3>(&args, "color", "<r> <g> <b> between 0 and 1")?;
                Msg::Text(TextMsg::SetColor(TextColor::new(r, g, b)))
            }
            "shadow" => match args.as_slice() {
                ["on"] => Msg::Text(TextMsg::SetShadow(true)),
                ["off"] => Msg::Text(TextMsg::SetShadow(false)),
                _ => return Err(usage("shadow", "on or off")),
            },
            "list" => Msg::List,
            "save" => Msg::Save,
            "share" => Msg::Share,
            "help" | "?" => Msg::Help,
            "quit" | "exit" => Msg::Quit,
            other => return Err(ParseError::UnknownCommand(other.to_string())),
        };
        Ok(msg)
    }
}
