//! Turning typed lines into commands or events.

use koji_core::{Event, EventContext};

/// Simulator commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Status,
    Actions,
    Echoes,
    Idle,
    ToggleLlm,
}

/// What a line of input means.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Empty,
    Command(Command),
    Event(EventContext),
    Unknown(String),
}

// First match wins: "unknown face" before "face", "nothing" before "thing".
const KEYWORDS: &[(&[&str], Event)] = &[
    (&["loud", "bang", "noise", "crash"], Event::LoudNoise),
    (&["music", "song"], Event::Music),
    (&["rhythm", "beat", "bop"], Event::Rhythm),
    (&["familiar", "owner", "friend"], Event::FamiliarFace),
    (&["stranger", "unknown face", "who"], Event::UnknownFace),
    (&["face"], Event::FamiliarFace),
    (&["motion", "movement", "moving"], Event::MotionDetected),
    (&["silence", "quiet", "nothing"], Event::Silence),
    (&["object", "thing", "new", "whats that"], Event::UnknownObject),
    (&["pet", "petted", "stroke"], Event::Petted),
    (&["poke", "poked", "tap"], Event::Poked),
    (&["wait", "time", "pass"], Event::TimePassedLong),
];

/// Classify one line of user input.
pub fn parse_line(line: &str) -> Input {
    let line = line.trim().to_lowercase();
    if line.is_empty() {
        return Input::Empty;
    }

    let command = match line.as_str() {
        "quit" | "exit" | "q" => Some(Command::Quit),
        "help" | "?" => Some(Command::Help),
        "status" | "s" => Some(Command::Status),
        "actions" | "a" => Some(Command::Actions),
        "echoes" | "e" => Some(Command::Echoes),
        "idle" | "i" => Some(Command::Idle),
        "llm" => Some(Command::ToggleLlm),
        _ => None,
    };
    if let Some(command) = command {
        return Input::Command(command);
    }

    match parse_event(&line) {
        Some(event) => {
            let ctx = EventContext::new(event).with_source("keyboard");
            Input::Event(match intensity_hint(&line) {
                Some(hint) => ctx.with_intensity(hint),
                None => ctx,
            })
        }
        None => Input::Unknown(line),
    }
}

/// Map free text onto an event by keyword.
pub fn parse_event(text: &str) -> Option<Event> {
    let text = text.replace('!', "");
    let text = text.trim();
    KEYWORDS
        .iter()
        .find(|(words, _)| words.iter().any(|w| text.contains(w)))
        .map(|(_, event)| *event)
}

/// `!` or "loud" means intense; "soft" or "quiet" means mild.
pub fn intensity_hint(text: &str) -> Option<f64> {
    if text.contains('!') || text.contains("loud") {
        Some(0.9)
    } else if text.contains("soft") || text.contains("quiet") {
        Some(0.2)
    } else {
        None
    }
}

pub const HELP: &str = "\
Events:
  loud, bang, noise     - loud noise
  music, song           - music playing
  rhythm, beat          - beat detected
  face, familiar, owner - familiar face
  stranger, unknown     - unknown face
  motion, movement      - motion detected
  object, thing, new    - unknown object spotted
  pet, petted           - being petted
  poke, poked           - being poked
  silence, quiet        - silence
  wait, time            - time passes

Commands:
  status, s             - show current state
  actions, a            - show available actions
  echoes, e             - show lingering mood echoes
  idle, i               - play an idle micro-behavior
  llm                   - toggle LLM on/off
  help, ?               - show this help
  quit, exit, q         - exit

Add '!' for high intensity (e.g., 'loud!' or 'bang!'), 'soft' for low.
";
