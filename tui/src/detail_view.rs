use catalog_protocol::AssetDetail;
use catalog_protocol::AssetSummary;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use ratatui::widgets::Wrap;

/// Side panel describing the selected asset.
#[derive(Debug, Default)]
pub(crate) struct DetailView {
    detail: Option<AssetDetail>,
    link_cursor: usize,
    can_go_back: bool,
}

impl DetailView {
    pub(crate) fn show(&mut self, detail: AssetDetail, can_go_back: bool) {
        self.detail = Some(detail);
        self.link_cursor = 0;
        self.can_go_back = can_go_back;
    }

    #[cfg(test)]
    pub(crate) fn current(&self) -> Option<&AssetDetail> {
        self.detail.as_ref()
    }

    pub(crate) fn next_link(&mut self) {
        let count = self.detail.as_ref().map_or(0, |d| d.linked.len());
        if count > 0 {
            self.link_cursor = (self.link_cursor + 1) % count;
        }
    }

    pub(crate) fn selected_link(&self) -> Option<&AssetSummary> {
        self.detail.as_ref()?.linked.get(self.link_cursor)
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let Some(detail) = &self.detail else {
            return vec![Line::from(Span::styled(
                "Select a row to see its details.",
                Style::default().add_modifier(Modifier::DIM),
            ))];
        };
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let summary = &detail.description;
        let mut lines = Vec::new();
        if self.can_go_back {
            lines.push(Line::from(Span::styled(
                "< back (b)",
                Style::default().add_modifier(Modifier::DIM),
            )));
        }
        lines.push(Line::from(Span::styled(summary.name.clone(), bold)));
        lines.push(Line::from(format!(
            "{} / {}",
            summary.class, summary.subclass
        )));
        lines.push(Line::from(format!("Version: {}", detail.version)));
        if let Some(thumbnail) = &detail.thumbnail {
            lines.push(Line::from(format!("Thumbnail: {thumbnail}")));
        }
        if !summary.description.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(summary.description.clone()));
        }

        if !detail.attributes.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Attributes:", bold)));
            for (key, value) in &detail.attributes {
                lines.push(Line::from(format!("  {key}: {value}")));
            }
        }

        if !detail.resources.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Resources:", bold)));
            for resource in &detail.resources {
                lines.push(Line::from(format!(
                    "  {} [{}] {}",
                    resource.name, resource.class, resource.uri
                )));
            }
        }

        if !detail.linked.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Links:", bold)));
            for (index, link) in detail.linked.iter().enumerate() {
                let text = format!("{} {} {}", link.name, link.class, link.subclass);
                if index == self.link_cursor {
                    lines.push(Line::from(vec![
                        Span::raw("> "),
                        Span::styled(text, Style::default().add_modifier(Modifier::REVERSED)),
                    ]));
                } else {
                    lines.push(Line::from(format!("  {text}")));
                }
            }
        }
        lines
    }

    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines())
            .block(Block::default().borders(Borders::ALL).title("Details"))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
