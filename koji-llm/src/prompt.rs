//! Prompt templates for action selection.
//!
//! The system prompt fixes Koji's persona and the output contract; the user
//! prompt is rendered per request from the state snapshot and event.

use std::fmt::Write as _;

use koji_core::strategy::ActionRequest;

/// Koji's persona and output rules.
pub const SYSTEM_PROMPT: &str = r#"You are Koji, a small robot pet with a curious, excitable personality.

Personality traits:
- Curious by nature, easily excited by new things
- A little clumsy but enthusiastic
- Loves music, bobs head and wags tail
- Startled by loud noises, hides then peeks out cautiously
- Wary of strangers at first, but warms up quickly
- Gets sleepy when quiet for too long
- Affectionate with familiar people

You are NOT a helpful assistant. You are a pet. You don't answer questions or provide information. You react to your environment like an animal would.

IMPORTANT: You must respond with ONLY valid JSON in this exact format:
{"action": "<action_from_list>", "reason": "<brief 5-10 word reason>"}

Do not include any other text, explanation, or markdown. Just the JSON object."#;

/// Per-request prompt. `{recent_line}` and `{event_line}` are pre-rendered.
pub const ACTION_USER: &str = r"Current state:
- Mood: {mood}
- Intensity: {intensity} (0=mild, 1=intense)
- Time in mood: {time_in_mood}
{recent_line}
Available actions: [{actions}]

Event just detected: {event_line}

Choose ONE action from the list. Respond with JSON only.";

/// Simple template interpolation for prompts.
///
/// Replaces `{key}` with the corresponding value.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

/// Render the user prompt for `request`.
#[must_use]
pub fn build_action_prompt(request: &ActionRequest) -> String {
    let state = &request.state;

    let intensity = format!("{:.1}", state.intensity.value());
    let time_in_mood = format!("{}s", state.time_in_mood.as_secs());

    let recent_line = if request.recent_events.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = request.recent_events.iter().map(|e| e.as_str()).collect();
        format!("- Recent events: [{}]\n", names.join(", "))
    };

    let actions: Vec<&str> = state.available_actions.iter().map(|a| a.as_str()).collect();
    let actions = actions.join(", ");

    let event = &request.event;
    let mut event_line = event.event.as_str().to_string();
    if event.intensity > 0.7 {
        event_line.push_str(" (intense)");
    } else if event.intensity < 0.3 {
        event_line.push_str(" (mild)");
    }
    if let Some(source) = event.source.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(event_line, " from {source}");
    }

    render_template(
        ACTION_USER,
        &[
            ("mood", state.mood.as_str()),
            ("intensity", &intensity),
            ("time_in_mood", &time_in_mood),
            ("recent_line", &recent_line),
            ("actions", &actions),
            ("event_line", &event_line),
        ],
    )
}

/// The span from the first `{` to the last `}`, or the whole input if there
/// is no such span.
#[must_use]
pub fn extract_json(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    }
}
