//! User interface rendering module
//!
//! - `header` - Title, step progress, status line and navigation bar
//! - `screens` - One screen per wizard step

mod header;
pub mod screens;

use crate::app::AppState;
use crate::components::{HelpOverlay, KeybindingContext};
use crate::flow_state::Step;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// UI renderer for the application
///
/// Lays out the frame and delegates each region to the header and screen
/// renderers. The active step decides which screen is drawn.
#[derive(Debug, Default)]
pub struct UiRenderer;

impl UiRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the complete UI based on application state
    pub fn render(&self, f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
        let area = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(1), // Step progress
                Constraint::Min(6),    // Step content
                Constraint::Length(1), // Status line
                Constraint::Length(1), // Navigation bar
            ])
            .split(area);

        let step = state.step();
        header::render_title(f, chunks[0], step);
        header::render_step_progress(f, chunks[1], step);

        match step {
            Step::Start => screens::render_start_screen(f, chunks[2], state),
            Step::Flavor => screens::render_flavor_screen(f, chunks[2], state),
            Step::Pickup => screens::render_pickup_screen(f, chunks[2], state),
            Step::Summary => screens::render_summary_screen(f, chunks[2], state),
        }

        header::render_status(f, chunks[3], state.status.as_ref());
        header::render_nav_bar(
            f,
            chunks[4],
            keybinding_ctx,
            step,
            state.flow.can_go_back(),
            state.flow.can_advance(),
        );

        if state.help_visible {
            HelpOverlay::new(step, keybinding_ctx).render(f, area);
        }
    }
}
