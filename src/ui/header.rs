//! Header and common widget rendering
//!
//! Title bar, the step progress line, the status line and the navigation bar.

use crate::app::StatusMessage;
use crate::components::KeybindingContext;
use crate::flow_state::Step;
use crate::theme::{Colors, Styles};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title bar for a step
pub fn render_title(f: &mut Frame, area: Rect, step: Step) {
    let title = Paragraph::new(format!("Cupcake Shop - {}", step.title()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border()),
        )
        .alignment(Alignment::Center)
        .style(Styles::title());
    f.render_widget(title, area);
}

/// Render "1 Quantity > 2 Flavor > 3 Pickup > 4 Summary" with the active step
/// highlighted
pub fn render_step_progress(f: &mut Frame, area: Rect, step: Step) {
    let mut spans = Vec::new();
    for (i, s) in Step::all_steps().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" > ", Styles::text_muted()));
        }
        let color = if *s == step {
            Colors::STEP_ACTIVE
        } else if s.order() < step.order() {
            Colors::STEP_COMPLETE
        } else {
            Colors::STEP_PENDING
        };
        spans.push(Span::styled(
            format!("{} {}", s.step_number(), step_label(*s)),
            Style::default().fg(color),
        ));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn step_label(step: Step) -> &'static str {
    match step {
        Step::Start => "Quantity",
        Step::Flavor => "Flavor",
        Step::Pickup => "Pickup",
        Step::Summary => "Summary",
    }
}

/// Render the status line
pub fn render_status(f: &mut Frame, area: Rect, status: Option<&StatusMessage>) {
    let Some(status) = status else {
        return;
    };
    let style = if status.is_error() {
        Styles::error()
    } else {
        Styles::success()
    };
    f.render_widget(
        Paragraph::new(format!(" {}", status.text())).style(style),
        area,
    );
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    area: Rect,
    keybinding_ctx: &KeybindingContext,
    step: Step,
    can_go_back: bool,
    can_advance: bool,
) {
    let mut spans = Vec::new();
    for item in keybinding_ctx.get_nav_items(step, can_go_back, can_advance) {
        spans.push(Span::styled(
            format!(" {} ", item.key_display),
            Style::default().fg(Colors::NAV_KEY),
        ));
        spans.push(Span::styled(
            format!("{}  ", item.action_label),
            Style::default().fg(Colors::NAV_HINT),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
