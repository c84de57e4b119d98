use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::detail_view::DetailView;
use crate::scroll;
use crate::scroll::ScrollRequest;
use crate::search_input::InputResult;
use crate::search_input::SearchInput;
use crate::table_view::TableView;
use crate::tui::Tui;
use anyhow::Result;
use catalog_client::CatalogClient;
use catalog_core::DetailBrowser;
use catalog_core::PagerConfig;
use catalog_core::QuerySession;
use catalog_core::ScrollDirection;
use catalog_protocol::CatalogError;
use catalog_protocol::Query;
use catalog_protocol::sanitize;
use crossterm::event::Event;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use std::sync::Arc;
use tokio::select;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tracing::debug;
use tracing::warn;

const KEY_HINTS: &str =
    "/ search  ↑↓ move  PgUp/PgDn page  Enter open  Tab link  l follow  b back  q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Search,
}

pub(crate) struct App {
    session: Arc<QuerySession>,
    details: Arc<DetailBrowser>,
    app_event_tx: AppEventSender,
    scroll_tx: UnboundedSender<(Query, ScrollRequest)>,
    mode: Mode,
    search: SearchInput,
    table: TableView,
    detail: DetailView,
    status: Option<String>,
    /// Where the table was last drawn, for mouse hit testing.
    table_area: Rect,
    page_steps: usize,
}

pub(crate) async fn run(
    terminal: &mut Tui,
    client: Arc<dyn CatalogClient>,
    pager: PagerConfig,
    initial_query: Option<String>,
) -> Result<()> {
    use tokio_stream::StreamExt;

    let (app_event_tx, mut app_event_rx) = unbounded_channel();
    let mut app = App::new(client, pager, AppEventSender::new(app_event_tx));
    app.start(initial_query);

    let mut terminal_events = EventStream::new();
    terminal.draw(|frame| app.render(frame))?;
    while select! {
        Some(event) = app_event_rx.recv() => {
            app.handle_event(event);
            true
        }
        Some(event) = terminal_events.next() => {
            app.handle_terminal_event(event?)
        }
        else => false,
    } {
        terminal.draw(|frame| app.render(frame))?;
    }
    Ok(())
}

impl App {
    pub(crate) fn new(
        client: Arc<dyn CatalogClient>,
        pager: PagerConfig,
        app_event_tx: AppEventSender,
    ) -> Self {
        let session = Arc::new(QuerySession::new(Arc::clone(&client), pager));
        let details = Arc::new(DetailBrowser::new(client));
        let scroll_tx = spawn_scroll_worker(Arc::clone(&session), app_event_tx.clone());
        Self {
            session,
            details,
            app_event_tx,
            scroll_tx,
            mode: Mode::Browse,
            search: SearchInput::default(),
            table: TableView::default(),
            detail: DetailView::default(),
            status: None,
            table_area: Rect::default(),
            page_steps: scroll::page_steps(pager.display_count, pager.step_size),
        }
    }

    /// Issues `initial_query`, or the first suggestion when there is none.
    pub(crate) fn start(&mut self, initial_query: Option<String>) {
        match initial_query {
            Some(text) => self.submit_query(&text),
            None => {
                let session = Arc::clone(&self.session);
                let tx = self.app_event_tx.clone();
                tokio::spawn(async move {
                    match session.seed().await {
                        Ok(Some((query, rows))) => tx.send(AppEvent::QueryLoaded { query, rows }),
                        Ok(None) => {}
                        Err(err) => tx.send(AppEvent::QueryFailed(err)),
                    }
                });
            }
        }
    }

    fn submit_query(&mut self, text: &str) {
        let query = match sanitize(text) {
            Ok(query) => query,
            Err(err) => {
                self.report(&err);
                return;
            }
        };
        self.status = Some(format!("Searching for {query}..."));
        let session = Arc::clone(&self.session);
        let tx = self.app_event_tx.clone();
        tokio::spawn(async move {
            match session.issue(query.clone()).await {
                Ok(rows) => tx.send(AppEvent::QueryLoaded { query, rows }),
                Err(err) => tx.send(AppEvent::QueryFailed(err)),
            }
        });
    }

    /// Queues `request` against the query currently on screen.
    fn request_scroll(&self, request: ScrollRequest) {
        let Some(query) = self.table.query().cloned() else {
            debug!("no results to scroll");
            return;
        };
        if self.scroll_tx.send((query, request)).is_err() {
            warn!("scroll worker is gone; dropping {request:?}");
        }
    }

    fn open_selected(&self) {
        let Some(row) = self.table.selected_row().cloned() else {
            return;
        };
        let details = Arc::clone(&self.details);
        let tx = self.app_event_tx.clone();
        tokio::spawn(async move {
            match details.show(&row).await {
                Ok(detail) => tx.send(AppEvent::DetailLoaded(detail)),
                Err(err) => tx.send(AppEvent::DetailFailed(err)),
            }
        });
    }

    fn follow_link(&self) {
        let Some(link) = self.detail.selected_link().cloned() else {
            return;
        };
        let details = Arc::clone(&self.details);
        let tx = self.app_event_tx.clone();
        tokio::spawn(async move {
            match details.follow_link(&link).await {
                Ok(detail) => tx.send(AppEvent::DetailLoaded(detail)),
                Err(err) => tx.send(AppEvent::DetailFailed(err)),
            }
        });
    }

    fn go_back(&self) {
        if !self.details.can_go_back() {
            return;
        }
        let details = Arc::clone(&self.details);
        let tx = self.app_event_tx.clone();
        tokio::spawn(async move {
            match details.back().await {
                Ok(Some(detail)) => tx.send(AppEvent::DetailLoaded(detail)),
                Ok(None) => {}
                Err(err) => tx.send(AppEvent::DetailFailed(err)),
            }
        });
    }

    pub(crate) fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::QueryLoaded { query, rows } => {
                self.search.set_text(query.to_string());
                self.table.reset(Some(&query), rows);
                self.status = None;
            }
            AppEvent::QueryFailed(err) => {
                if !err.is_silent() {
                    self.table.reset(None, Vec::new());
                }
                self.report(&err);
            }
            AppEvent::Scrolled { query, rows } => {
                if self.table.query() == Some(&query) {
                    self.table.set_rows(rows);
                } else {
                    debug!(%query, "dropping rows of a replaced query");
                }
            }
            AppEvent::ScrollFailed(err) | AppEvent::DetailFailed(err) => self.report(&err),
            AppEvent::DetailLoaded(detail) => {
                self.detail.show(detail, self.details.can_go_back());
            }
        }
    }

    fn report(&mut self, err: &CatalogError) {
        if err.is_silent() {
            debug!("ignoring {err}");
            return;
        }
        self.status = Some(err.to_string());
    }

    /// Returns `false` once the user asked to quit.
    pub(crate) fn handle_terminal_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                true
            }
            _ => true,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        if self.mode == Mode::Search {
            match self.search.handle_key(key) {
                InputResult::Submitted(text) => {
                    self.mode = Mode::Browse;
                    self.submit_query(&text);
                }
                InputResult::Cancelled => self.mode = Mode::Browse,
                InputResult::None => {}
            }
            return true;
        }

        if let Some(request) = scroll::translate(&Event::Key(key), self.page_steps) {
            self.request_scroll(request);
            return true;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char('/') => self.mode = Mode::Search,
            KeyCode::Up => {
                if !self.table.move_up() {
                    self.request_scroll(ScrollRequest::one(ScrollDirection::Backward));
                }
            }
            KeyCode::Down => {
                if !self.table.move_down() {
                    self.request_scroll(ScrollRequest::one(ScrollDirection::Forward));
                }
            }
            KeyCode::Enter => self.open_selected(),
            KeyCode::Tab => self.detail.next_link(),
            KeyCode::Char('l') => self.follow_link(),
            KeyCode::Char('b') | KeyCode::Backspace => self.go_back(),
            _ => {}
        }
        true
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if let Some(request) = scroll::translate(&Event::Mouse(mouse), self.page_steps) {
            self.request_scroll(request);
            return;
        }
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some(index) = self.table.row_at(self.table_area, mouse.column, mouse.row) {
            self.table.select(index);
            self.open_selected();
        }
    }

    pub(crate) fn render(&mut self, frame: &mut Frame) {
        let [search_area, body, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let [table_area, detail_area] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(body);
        self.table_area = table_area;

        let searching = self.mode == Mode::Search;
        let buf = frame.buffer_mut();
        self.search.render(search_area, buf, searching);
        self.table.render(table_area, buf);
        self.detail.render(detail_area, buf);
        let status = match &self.status {
            Some(status) => Line::from(status.clone()),
            None => Line::styled(KEY_HINTS, Style::default().add_modifier(Modifier::DIM)),
        };
        Paragraph::new(status).render(status_area, buf);

        if searching {
            frame.set_cursor_position(self.search.cursor_pos(search_area));
        }
    }
}

/// Scrolls run one at a time, in arrival order, on a single task. Steps
/// queued for a query that has since been replaced are skipped.
fn spawn_scroll_worker(
    session: Arc<QuerySession>,
    app_event_tx: AppEventSender,
) -> UnboundedSender<(Query, ScrollRequest)> {
    let (tx, mut rx) = unbounded_channel::<(Query, ScrollRequest)>();
    tokio::spawn(async move {
        while let Some((requested, request)) = rx.recv().await {
            for _ in 0..request.steps {
                if session.query().as_ref() != Some(&requested) {
                    debug!(query = %requested, "skipping scroll for a replaced query");
                    break;
                }
                match session.scroll_with_query(request.direction).await {
                    Ok((query, rows)) => {
                        let current = query == requested;
                        app_event_tx.send(AppEvent::Scrolled { query, rows });
                        if !current {
                            break;
                        }
                    }
                    Err(err) => {
                        app_event_tx.send(AppEvent::ScrollFailed(err));
                        break;
                    }
                }
            }
        }
    });
    tx
}
