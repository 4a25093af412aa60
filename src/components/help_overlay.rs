//! Help overlay component
//!
//! Displays context-sensitive help for the active step in a centered window.

use super::keybindings::{HelpSection, KeybindingContext};
use crate::flow_state::Step;
use crate::theme::{Colors, Styles};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Help overlay component
pub struct HelpOverlay {
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the given step
    pub fn new(step: Step, keybinding_ctx: &KeybindingContext) -> Self {
        let sections = keybinding_ctx.get_help_content(step);
        Self {
            content: Self::build_content(&sections, step),
        }
    }

    fn build_content(sections: &[HelpSection], step: Step) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(vec![Span::styled(
            "  Cupcake Order Help  ",
            Styles::title(),
        )]));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  Current step: ", Styles::text_secondary()),
            Span::styled(
                format!("{} ({}/{})", step.title(), step.step_number(), Step::TOTAL_STEPS),
                Style::default().fg(Colors::FG_PRIMARY),
            ),
        ]));
        lines.push(Line::from(""));

        for section in sections {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}", section.title),
                Style::default()
                    .fg(Colors::WARNING)
                    .add_modifier(Modifier::BOLD),
            )]));
            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::styled(format!("    {:<8}", key), Style::default().fg(Colors::NAV_KEY)),
                    Span::styled(description.clone(), Styles::text()),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![Span::styled(
            "  Press ? to close",
            Styles::text_muted(),
        )]));
        lines
    }

    /// Number of content lines (used by tests and sizing)
    pub fn line_count(&self) -> usize {
        self.content.len()
    }

    /// Render the overlay centered in `area`
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(60, 70, area);
        f.render_widget(Clear, popup);

        let paragraph = Paragraph::new(self.content.clone())
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Styles::border()),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, popup);
    }
}

/// A rectangle of the given percentage size centered in `area`
pub fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - height_percent) / 2),
            Constraint::Percentage(height_percent),
            Constraint::Percentage((100 - height_percent) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}
