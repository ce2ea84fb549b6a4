use once_cell::sync::Lazy;
use ratatui::{
    Frame,
    layout::Rect,
    style::Stylize,
    text::{Line, Span},
    widgets::Paragraph,
};
use ratatui_macros::span;

pub struct KeyBinding {
    key: &'static str,
    description: &'static str,
}

static KEY_BINDINGS: Lazy<Vec<KeyBinding>> = Lazy::new(build_key_bindings);

fn build_key_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding {
            key: "j/k",
            description: "tasks",
        },
        KeyBinding {
            key: "Enter",
            description: "run",
        },
        KeyBinding {
            key: "t",
            description: "time",
        },
        KeyBinding {
            key: "e",
            description: "enable",
        },
        KeyBinding {
            key: "1-7",
            description: "days",
        },
        KeyBinding {
            key: "r",
            description: "refresh",
        },
        KeyBinding {
            key: "q",
            description: "quit",
        },
    ]
}

/// The single-row key legend at the bottom of the screen.
pub struct HelpLine;

impl HelpLine {
    pub fn render(f: &mut Frame, area: Rect) {
        let mut spans: Vec<Span> = vec![];
        for binding in KEY_BINDINGS.iter() {
            if !spans.is_empty() {
                spans.push(span!("  "));
            }
            spans.push(span!(binding.key).green().bold());
            spans.push(span!(" "));
            spans.push(span!(binding.description).gray());
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
