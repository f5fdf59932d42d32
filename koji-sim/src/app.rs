//! Simulator state: one Koji, its variation engine, and an optional LLM.

use std::fmt::Write as _;
use std::time::Duration;

use chrono::{DateTime, Utc};
use koji_core::strategy::{self, ActionRequest};
use koji_core::{EmotionalState, EventContext, EventHistory, KojiConfig, VariationEngine};
use koji_llm::LlmStrategy;
use tracing::info;

use crate::input::{self, Command, Input};

/// Result of handling one line.
#[derive(Debug, Default)]
pub struct Reply {
    pub text: String,
    pub quit: bool,
}

impl Reply {
    fn say(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }
}

pub struct App {
    state: EmotionalState,
    engine: VariationEngine,
    history: EventHistory,
    llm: Option<LlmStrategy>,
    use_llm: bool,
    llm_timeout: Duration,
}

impl App {
    pub fn new(config: &KojiConfig, engine: VariationEngine, llm: Option<LlmStrategy>) -> Self {
        Self {
            state: EmotionalState::with_config(config.state.clone()),
            engine,
            history: EventHistory::new(config.history.recent_events),
            use_llm: llm.is_some(),
            llm,
            llm_timeout: Duration::from_millis(config.llm.request_timeout_ms),
        }
    }

    /// Periodic decay check. Returns text to print when the mood moved.
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> Option<String> {
        let held = self.state.duration_at(now);
        let before = self.state.mood();
        if !self.state.decay_at(now) {
            return None;
        }
        self.engine.record_mood_change_at(before, now);
        info!(from = %before, to = %self.state.mood(), "mood decayed");
        Some(format!(
            "\n[decay] {before} -> {} after {}s\n{}",
            self.state.mood(),
            held.as_secs(),
            self.status_at(now)
        ))
    }

    pub async fn handle_line(&mut self, line: &str) -> Reply {
        match input::parse_line(line) {
            Input::Empty => Reply::default(),
            Input::Command(command) => self.run_command(command),
            Input::Event(ctx) => Reply::say(self.handle_event(ctx).await),
            Input::Unknown(text) => {
                Reply::say(format!("Unknown event: {text} (type 'help' for options)\n"))
            }
        }
    }

    fn run_command(&mut self, command: Command) -> Reply {
        match command {
            Command::Quit => Reply {
                text: "Bye!\n".into(),
                quit: true,
            },
            Command::Help => Reply::say(input::HELP),
            Command::Status => Reply::say(self.status_at(Utc::now())),
            Command::Actions => Reply::say(self.actions()),
            Command::Echoes => Reply::say(self.echoes_at(Utc::now())),
            Command::Idle => Reply::say(self.idle()),
            Command::ToggleLlm => Reply::say(self.toggle_llm()),
        }
    }

    async fn handle_event(&mut self, ctx: EventContext) -> String {
        let now = Utc::now();
        self.history.push(ctx.event);

        let before = self.state.mood();
        let changed = self.state.process_event_at(&ctx, now);
        let mut out = if changed {
            self.engine.record_mood_change_at(before, now);
            format!("\n[event] {}: {before} -> {}\n", ctx.event, self.state.mood())
        } else {
            format!("\n[event] {}: no mood change (still {})\n", ctx.event, self.state.mood())
        };
        out.push_str(&self.status_at(now));

        match self.llm.as_ref().filter(|_| self.use_llm) {
            Some(llm) => {
                let request = ActionRequest {
                    state: self.state.snapshot_at(now),
                    event: ctx,
                    recent_events: self.history.as_vec(),
                };
                let decision = strategy::select_with_fallback(llm, &request, self.llm_timeout).await;
                let _ = writeln!(out, "  Koji chooses: {}", decision.action);
                let _ = writeln!(out, "  Reason: {}", decision.reason);
            }
            None => {
                let picked = self.engine.select_action_at(self.state.mood(), self.state.intensity(), now);
                let default = self.state.suggest_default_action();
                let _ = writeln!(out, "  Koji chooses: {picked}");
                let _ = writeln!(
                    out,
                    "  Default reaction: {} / {} / {}",
                    default.movement, default.expression, default.sound
                );
            }
        }
        out.push('\n');
        out
    }

    fn status_at(&self, now: DateTime<Utc>) -> String {
        format!(
            "\n  Mood:      {}\n  Intensity: {}\n  Duration:  {}s\n  Baseline:  {}\n  LLM:       {}\n\n",
            self.state.mood(),
            self.state.intensity(),
            self.state.duration_at(now).as_secs(),
            self.state.is_baseline(),
            if self.use_llm { "enabled" } else { "disabled" },
        )
    }

    fn actions(&self) -> String {
        let names: Vec<&str> = self.state.available_actions().iter().map(|a| a.as_str()).collect();
        let default = self.state.suggest_default_action();
        format!(
            "  Available actions: [{}]\n  Default action:    movement={}, expression={}, sound={}\n\n",
            names.join(", "),
            default.movement,
            default.expression,
            default.sound
        )
    }

    fn echoes_at(&self, now: DateTime<Utc>) -> String {
        let echoes = self.engine.active_echoes_at(now);
        if echoes.is_empty() {
            return "  No lingering moods.\n\n".into();
        }
        let mut out = String::new();
        for echo in echoes {
            let _ = writeln!(out, "  {:<10} strength {:.2}", echo.from_mood.as_str(), echo.strength);
        }
        out.push('\n');
        out
    }

    fn idle(&mut self) -> String {
        match self.engine.select_micro_behavior(self.state.mood()) {
            Some(behavior) => format!(
                "  [idle] {} ({}ms)\n\n",
                behavior.name,
                behavior.duration.as_millis()
            ),
            None => "  [idle] ...\n\n".into(),
        }
    }

    fn toggle_llm(&mut self) -> String {
        if self.llm.is_none() {
            return "LLM not configured. Restart with Ollama running.\n".into();
        }
        self.use_llm = !self.use_llm;
        if self.use_llm {
            "LLM enabled\n".into()
        } else {
            "LLM disabled (variation engine)\n".into()
        }
    }
}
