use catalog_protocol::AssetSummary;
use catalog_protocol::Query;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Row;
use ratatui::widgets::StatefulWidget;
use ratatui::widgets::Table;
use ratatui::widgets::TableState;

const HEADER: [&str; 4] = ["Name", "Type", "Subtype", "Description"];
const WIDTHS: [Constraint; 4] = [
    Constraint::Percentage(25),
    Constraint::Percentage(15),
    Constraint::Percentage(15),
    Constraint::Percentage(45),
];
/// Border plus header line above the first data row.
const ROWS_TOP: u16 = 2;

/// The visible window of rows with a selection cursor.
#[derive(Debug, Default)]
pub(crate) struct TableView {
    rows: Vec<AssetSummary>,
    selected: usize,
    query: Option<Query>,
}

impl TableView {
    pub(crate) fn set_rows(&mut self, rows: Vec<AssetSummary>) {
        self.rows = rows;
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }

    /// New result set: rows replaced and cursor back on top.
    pub(crate) fn reset(&mut self, query: Option<&Query>, rows: Vec<AssetSummary>) {
        self.query = query.cloned();
        self.selected = 0;
        self.set_rows(rows);
    }

    /// Query whose rows are on screen.
    pub(crate) fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn rows(&self) -> &[AssetSummary] {
        &self.rows
    }

    #[cfg(test)]
    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    pub(crate) fn selected_row(&self) -> Option<&AssetSummary> {
        self.rows.get(self.selected)
    }

    /// Moves the cursor up; `false` when it already sits on the first row.
    pub(crate) fn move_up(&mut self) -> bool {
        if self.selected == 0 {
            return false;
        }
        self.selected -= 1;
        true
    }

    /// Moves the cursor down; `false` when it already sits on the last row.
    pub(crate) fn move_down(&mut self) -> bool {
        if self.selected + 1 >= self.rows.len() {
            return false;
        }
        self.selected += 1;
        true
    }

    /// Row index under terminal line `y` when the table was drawn at `area`.
    pub(crate) fn row_at(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if x <= area.x || x >= area.right().saturating_sub(1) {
            return None;
        }
        let first = area.y.saturating_add(ROWS_TOP);
        if y < first || y >= area.bottom().saturating_sub(1) {
            return None;
        }
        let index = usize::from(y - first);
        (index < self.rows.len()).then_some(index)
    }

    pub(crate) fn select(&mut self, index: usize) {
        if index < self.rows.len() {
            self.selected = index;
        }
    }

    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default().borders(Borders::ALL);
        if let Some(query) = &self.query {
            block = block.title(format!("Search results for: {query}"));
        }
        let header = Row::new(HEADER).style(Style::default().add_modifier(Modifier::BOLD));
        let rows = self.rows.iter().map(|row| {
            Row::new([
                row.name.as_str(),
                row.class.as_str(),
                row.subclass.as_str(),
                row.description.as_str(),
            ])
        });
        let table = Table::new(rows, WIDTHS)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = TableState::default();
        if !self.rows.is_empty() {
            state.select(Some(self.selected));
        }
        StatefulWidget::render(table, area, buf, &mut state);
    }
}
