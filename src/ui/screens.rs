//! Order wizard screens.
//!
//! - `Start` - pick a box size
//! - `Flavor` - pick a flavor
//! - `Pickup` - pick a pickup date
//! - `Summary` - review the order before sending
//!
//! Each screen reads the latest order state; the chosen option is marked and
//! the running subtotal is shown under the list.

use crate::app::AppState;
use crate::order_state::format_price;
use crate::share::summary_lines;
use crate::theme::{Colors, Styles};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the quantity screen.
pub fn render_start_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let intro = Paragraph::new(vec![
        Line::from(Span::styled("  Order Cupcakes", Styles::title())),
        Line::from(Span::styled(
            format!(
                "  {} each, same-day pickup adds {}",
                format_price(state.flow.order().catalog().price_per_cupcake),
                format_price(state.flow.order().catalog().same_day_surcharge)
            ),
            Styles::text_secondary(),
        )),
    ]);
    f.render_widget(intro, chunks[0]);

    render_option_list(f, chunks[1], state, "How many cupcakes?");
}

/// Render the flavor screen.
pub fn render_flavor_screen(f: &mut Frame, area: Rect, state: &AppState) {
    render_picker(f, area, state, "Choose a flavor");
}

/// Render the pickup date screen.
///
/// The first date is same-day pickup and is labelled with the surcharge.
pub fn render_pickup_screen(f: &mut Frame, area: Rect, state: &AppState) {
    render_picker(f, area, state, "Choose a pickup date");
}

/// Render the summary screen.
pub fn render_summary_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let order = state.flow.order().state();

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));
    for row in summary_lines(order) {
        let (label, value) = row.split_once(": ").unwrap_or((row.as_str(), ""));
        let value_style = if label == "Total" {
            Styles::price()
        } else {
            Styles::text()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<13}", label), Styles::text_secondary()),
            Span::styled(value.to_string(), value_style),
        ]));
    }
    if order.is_same_day() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "  Includes {} same-day pickup surcharge",
                format_price(state.flow.order().catalog().same_day_surcharge)
            ),
            Styles::warning(),
        )));
    }

    let summary = Paragraph::new(lines).block(
        Block::default()
            .title(" Review your order ")
            .borders(Borders::ALL)
            .border_style(Styles::border()),
    );
    f.render_widget(summary, area);
}

fn render_picker(f: &mut Frame, area: Rect, state: &AppState, title: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    render_option_list(f, chunks[0], state, title);
    render_subtotal(f, chunks[1], state);
}

/// Option list with the chosen row marked and the cursor row highlighted
fn render_option_list(f: &mut Frame, area: Rect, state: &AppState, title: &str) {
    let chosen = state.chosen_index();
    let same_day = state.flow.order().state().pickup_options().first().cloned();
    let surcharge = format_price(state.flow.order().catalog().same_day_surcharge);
    let on_pickup = state.step() == crate::flow_state::Step::Pickup;

    let items: Vec<ListItem> = state
        .options()
        .into_iter()
        .enumerate()
        .map(|(i, option)| {
            let marker = if chosen == Some(i) { "(*) " } else { "( ) " };
            let mut spans = vec![Span::raw(marker), Span::raw(option.clone())];
            if on_pickup && same_day.as_deref() == Some(option.as_str()) {
                spans.push(Span::styled(
                    format!("  same day +{}", surcharge),
                    Style::default().fg(Colors::WARNING),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_style(Styles::border()),
        )
        .style(Styles::text())
        .highlight_style(Styles::selected())
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.cursor));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_subtotal(f: &mut Frame, area: Rect, state: &AppState) {
    let price = state.flow.order().state().price();
    let line = Line::from(vec![
        Span::styled("  Subtotal ", Styles::text_secondary()),
        Span::styled(format_price(price), Styles::price()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
