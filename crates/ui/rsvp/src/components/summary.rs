use color_eyre::Result;
use form::{LiveSummary, RegistrationFormModel};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    components::Component,
    theme::{Theme, UiGroup},
    tui::Frame,
};

/// Right-hand column: decorative assets on top, the live summary below.
///
/// Images cannot be shown in a terminal, so each asset is a framed
/// placeholder carrying its alt text and path.
pub struct SummaryPanel {
    theme: Theme,
}

impl SummaryPanel {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Component for SummaryPanel {
    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, model: &RegistrationFormModel) -> Result<()> {
        let theme = &self.theme;
        let profile = model.profile();
        let assets = &profile.copy.assets;

        let mut constraints: Vec<Constraint> = assets.iter().map(|_| Constraint::Length(4)).collect();
        constraints.push(Constraint::Min(0));
        let areas = Layout::vertical(constraints).split(area);

        for (asset, rect) in assets.iter().zip(areas.iter()) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_set(symbols::border::ROUNDED)
                .border_style(theme.style(UiGroup::Border));
            let body = vec![
                Line::from(Span::styled(asset.alt, theme.style(UiGroup::Label))),
                Line::from(Span::styled(asset.path, theme.style(UiGroup::Dimmed))),
            ];
            f.render_widget(Paragraph::new(body).block(block), *rect);
        }

        let summary = LiveSummary::from_fields(model.fields(), profile);
        let block = Block::default()
            .title(format!(" {} ", summary.title))
            .title_style(theme.style(UiGroup::Title))
            .borders(Borders::ALL)
            .border_set(symbols::border::ROUNDED)
            .border_style(theme.style(UiGroup::Border));

        let lines: Vec<Line> = summary
            .rows
            .into_iter()
            .map(|row| {
                Line::from(vec![
                    Span::styled(format!("{}: ", row.heading), theme.style(UiGroup::Label)),
                    Span::styled(row.value, theme.style(UiGroup::Value)),
                ])
            })
            .collect();

        let rect = areas[areas.len() - 1];
        f.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            rect,
        );
        Ok(())
    }
}
