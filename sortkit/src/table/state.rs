//! Table widget state.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use domlet::{Element, RenderSurface};

use super::column::Column;
use super::config::{Paging, SortStrategy, TableConfig};
use super::cursor::{Cursor, LoadOutcome, LoadState};
use super::render::{self, BODY, EMPTY_PLACEHOLDER, ERROR, HEADER, LOADING};
use super::sort::{Direction, SortState, sort_rows};
use super::view::{RowView, TableView, header_cells};
use crate::error::{Error, Result};
use crate::source::{DataSource, FetchError, PageRequest, Row};

/// Unique identifier for a Table widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// Why a request was issued; decides how its response is applied.
#[derive(Debug, Clone)]
enum RequestKind {
    /// First page on render.
    Initial,
    /// Remote sort; the state becomes active once the page arrives.
    Sort(SortState),
    /// Next page on scroll.
    LoadMore,
}

/// An issued request. Its response only applies while `generation` is
/// still the table's current generation.
#[derive(Debug)]
struct Ticket {
    generation: u64,
    kind: RequestKind,
    target: Cursor,
    request: PageRequest,
}

/// Internal state for the Table widget.
pub(super) struct TableInner {
    id: TableId,
    pub columns: Vec<Column>,
    /// Loaded rows in display order.
    pub rows: Vec<Row>,
    pub sort: Option<SortState>,
    /// Window of the last page applied.
    pub cursor: Cursor,
    pub load_state: LoadState,
    /// Set once a short page arrived; never cleared.
    pub exhausted: bool,
    pub config: TableConfig,
    /// Bumped on every request and on destroy.
    generation: u64,
    initial_load_done: bool,
    destroyed: bool,
    pub(super) surface: Box<dyn RenderSurface>,
}

impl TableInner {
    fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    fn sortable_column(&self, id: &str) -> Result<&Column> {
        self.column(id)
            .filter(|c| c.sortable)
            .ok_or_else(|| Error::InvalidColumn(id.to_string()))
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.destroyed {
            return Err(Error::InvalidState("table was destroyed"));
        }
        Ok(())
    }

    fn page_request(&self, sort: Option<SortState>, target: Cursor) -> PageRequest {
        match self.config.paging {
            Paging::Paged { .. } => PageRequest::range(sort, target.range()),
            Paging::Unpaginated => PageRequest::all(sort),
        }
    }

    fn begin_request(&mut self, kind: RequestKind, target: Cursor) -> Result<Ticket> {
        let sort = match &kind {
            RequestKind::Sort(state) => Some(state.clone()),
            RequestKind::Initial | RequestKind::LoadMore => self.sort.clone(),
        };
        self.generation += 1;
        self.load_state = LoadState::Loading;
        log::debug!(
            "{} requesting {:?} (generation {})",
            self.id,
            kind,
            self.generation
        );
        self.paint_status()?;

        Ok(Ticket {
            generation: self.generation,
            request: self.page_request(sort, target),
            kind,
            target,
        })
    }

    /// Apply a current response.
    fn apply(&mut self, ticket: Ticket, page: Vec<Row>) -> Result<LoadOutcome> {
        let received = page.len();
        self.cursor = ticket.target;

        match ticket.kind {
            RequestKind::Initial => {
                self.rows = page;
                self.initial_load_done = true;
                if self.config.sort == SortStrategy::Local {
                    self.resort();
                }
                self.settle(received);
                self.paint_header()?;
                self.paint_body()?;
            }
            RequestKind::Sort(state) => {
                self.rows = page;
                self.sort = Some(state);
                // A sort can supersede the first page; its page counts as one.
                self.initial_load_done = true;
                self.settle(received);
                self.paint_header()?;
                self.paint_body()?;
            }
            RequestKind::LoadMore => {
                let first_new = self.rows.len();
                self.rows.extend(page);
                self.settle(received);
                self.paint_appended(first_new)?;
            }
        }

        log::debug!(
            "{} applied {} rows, {} loaded, state {:?}",
            self.id,
            received,
            self.rows.len(),
            self.load_state
        );
        self.paint_status()?;
        Ok(LoadOutcome::Loaded { rows: received })
    }

    fn fail(&mut self, error: FetchError) -> Result<()> {
        log::error!("{} failed to load data: {}", self.id, error);
        self.load_state = LoadState::Error(error);
        self.paint_status()
    }

    /// Loading state after a page of `received` rows.
    fn settle(&mut self, received: usize) {
        let short = match self.config.paging {
            Paging::Paged { step } => received < step,
            Paging::Unpaginated => true,
        };
        if short {
            self.exhausted = true;
        }
        self.load_state = if self.exhausted {
            LoadState::Exhausted
        } else {
            LoadState::Idle
        };
    }

    /// Re-apply the active sort to the loaded rows.
    fn resort(&mut self) {
        let Some(sort) = self.sort.clone() else {
            return;
        };
        if let Some(column) = self.column(&sort.column_id).cloned() {
            sort_rows(&mut self.rows, &column, sort.direction);
        }
    }

    fn sort_locally(&mut self, state: SortState) -> Result<()> {
        let column = self.sortable_column(&state.column_id)?.clone();
        sort_rows(&mut self.rows, &column, state.direction);
        self.sort = Some(state);
        self.paint_header()?;
        self.paint_body()
    }

    // -------------------------------------------------------------------------
    // Painting
    // -------------------------------------------------------------------------

    fn view(&self) -> TableView {
        TableView::compute(
            &self.columns,
            &self.rows,
            self.sort.as_ref(),
            &self.load_state,
            self.config.row_link_base.as_deref(),
        )
    }

    fn mount(&mut self) {
        let root = render::table_element(&self.id.to_string(), &self.view());
        self.surface.mount(root);
    }

    fn paint_header(&mut self) -> Result<()> {
        if !self.surface.is_mounted() {
            return Ok(());
        }
        let cells = header_cells(&self.columns, self.sort.as_ref());
        self.surface
            .replace_region(HEADER, render::header_elements(&cells))?;
        Ok(())
    }

    fn paint_body(&mut self) -> Result<()> {
        if !self.surface.is_mounted() {
            return Ok(());
        }
        let rows = self.row_views(0);
        self.surface
            .replace_region(BODY, render::row_elements(&rows))?;
        Ok(())
    }

    /// Render only rows from `first` on, appending to the body.
    fn paint_appended(&mut self, first: usize) -> Result<()> {
        if !self.surface.is_mounted() || first >= self.rows.len() {
            return Ok(());
        }
        let rows = self.row_views(first);
        self.surface
            .append_to_region(BODY, render::row_elements(&rows))?;
        Ok(())
    }

    fn paint_status(&mut self) -> Result<()> {
        if !self.surface.is_mounted() {
            return Ok(());
        }
        let view = self.view();
        self.surface.set_region_hidden(LOADING, !view.loading)?;
        self.surface
            .set_region_hidden(EMPTY_PLACEHOLDER, !view.empty)?;
        self.surface.replace_region(
            ERROR,
            view.error.as_deref().map(Element::text).into_iter().collect(),
        )?;
        self.surface
            .set_region_hidden(ERROR, view.error.is_none())?;
        Ok(())
    }

    fn row_views(&self, first: usize) -> Vec<RowView> {
        let link_base = self.config.row_link_base.as_deref();
        self.rows[first..]
            .iter()
            .map(|row| RowView::compute(&self.columns, row, link_base))
            .collect()
    }
}

/// A sortable table with incremental loading.
///
/// `Table` is a cheap-clone handle: clones share state, so a scroll handler
/// can trigger [`load_more`](Table::load_more) while a sort request is still
/// in flight. No lock is held across an `.await`; responses that arrive after
/// a newer request (or after [`destroy`](Table::destroy)) are discarded.
///
/// # Example
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> sortkit::Result<()> {
/// use domlet::Document;
/// use sortkit::source::{MemorySource, Row};
/// use sortkit::table::{Column, Direction, Table, TableConfig};
///
/// let source = MemorySource::new(vec![
///     Row::new().with("id", 1).with("title", "bob"),
///     Row::new().with("id", 2).with("title", "Alice"),
/// ]);
/// let table = Table::new(
///     vec![Column::new("title", "Name").sortable()],
///     TableConfig::remote(20),
///     Document::new(),
/// )
/// .with_source(source);
///
/// table.render().await?;
/// table.sort("title", Direction::Asc).await?;
/// assert_eq!(table.rows()[0].get("title"), Some(&"Alice".into()));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Table {
    id: TableId,
    inner: Arc<RwLock<TableInner>>,
    source: Option<Arc<dyn DataSource>>,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("id", &self.id)
            .field("has_source", &self.source.is_some())
            .finish_non_exhaustive()
    }
}

impl Table {
    /// Create a table rendering into `surface`.
    pub fn new(
        columns: Vec<Column>,
        config: TableConfig,
        surface: impl RenderSurface + 'static,
    ) -> Self {
        let id = TableId::new();
        let cursor = Cursor::first(config.step().unwrap_or(usize::MAX));
        let inner = TableInner {
            id,
            columns,
            rows: Vec::new(),
            sort: config.initial_sort.clone(),
            cursor,
            load_state: LoadState::Idle,
            exhausted: false,
            config,
            generation: 0,
            initial_load_done: false,
            destroyed: false,
            surface: Box::new(surface),
        };
        Self {
            id,
            inner: Arc::new(RwLock::new(inner)),
            source: None,
        }
    }

    /// Start with `rows` already loaded.
    pub fn with_rows(self, rows: Vec<Row>) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.rows = rows;
        }
        self
    }

    /// Load rows from `source`.
    pub fn with_source(self, source: impl DataSource + 'static) -> Self {
        self.with_shared_source(Arc::new(source))
    }

    /// Load rows from a shared source.
    pub fn with_shared_source(mut self, source: Arc<dyn DataSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, TableInner>> {
        self.inner
            .read()
            .map_err(|_| Error::InvalidState("table state poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, TableInner>> {
        self.inner
            .write()
            .map_err(|_| Error::InvalidState("table state poisoned"))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Get the column definitions.
    pub fn columns(&self) -> Vec<Column> {
        self.inner
            .read()
            .map(|g| g.columns.clone())
            .unwrap_or_default()
    }

    /// Loaded rows in display order.
    pub fn rows(&self) -> Vec<Row> {
        self.inner
            .read()
            .map(|g| g.rows.clone())
            .unwrap_or_default()
    }

    /// Values of one column for every loaded row.
    pub fn column_values(&self, column_id: &str) -> Vec<serde_json::Value> {
        self.inner
            .read()
            .map(|g| {
                g.rows
                    .iter()
                    .map(|row| row.get(column_id).cloned().unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of loaded rows.
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.rows.len()).unwrap_or(0)
    }

    /// Check if no rows are loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get current sort state.
    pub fn sort_state(&self) -> Option<SortState> {
        self.inner.read().ok().and_then(|g| g.sort.clone())
    }

    pub fn load_state(&self) -> LoadState {
        self.inner
            .read()
            .map(|g| g.load_state.clone())
            .unwrap_or_default()
    }

    /// Window of the last page applied.
    pub fn cursor(&self) -> Option<Cursor> {
        self.inner.read().ok().map(|g| g.cursor)
    }

    pub fn is_exhausted(&self) -> bool {
        self.inner.read().map(|g| g.exhausted).unwrap_or(false)
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.read().map(|g| g.destroyed).unwrap_or(true)
    }

    /// The view model for the current state.
    pub fn view(&self) -> Result<TableView> {
        Ok(self.read()?.view())
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Mount the table and load the first page.
    ///
    /// With a data source, the first render issues exactly one request for
    /// the first range with the initial sort. Later renders repaint what is
    /// loaded. Local tables sort their rows by the initial sort.
    pub async fn render(&self) -> Result<()> {
        let ticket = {
            let mut guard = self.write()?;
            guard.ensure_alive()?;
            if self.source.is_some() && !guard.initial_load_done {
                guard.mount();
                let target = guard.cursor.reset();
                Some(guard.begin_request(RequestKind::Initial, target)?)
            } else {
                if guard.config.sort == SortStrategy::Local {
                    guard.resort();
                }
                guard.initial_load_done = true;
                guard.mount();
                None
            }
        };

        match ticket {
            Some(ticket) => {
                if self.fetch(ticket).await? == LoadOutcome::Discarded {
                    log::info!("{} first page superseded by a newer request", self.id);
                }
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Sort by `column_id`.
    ///
    /// Local tables re-order the loaded rows. Remote tables reset the cursor
    /// and replace the rows with a freshly sorted first page; the sort state
    /// changes once that page arrives.
    pub async fn sort(&self, column_id: &str, direction: Direction) -> Result<()> {
        let state = SortState::new(column_id, direction);
        let ticket = {
            let mut guard = self.write()?;
            guard.ensure_alive()?;
            guard.sortable_column(column_id)?;

            match guard.config.sort {
                SortStrategy::Local => {
                    log::debug!("{} sorting locally by {:?}", self.id, state);
                    guard.sort_locally(state)?;
                    return Ok(());
                }
                SortStrategy::Remote => {
                    if self.source.is_none() {
                        return Err(Error::InvalidState("remote sort needs a data source"));
                    }
                    let target = guard.cursor.reset();
                    guard.begin_request(RequestKind::Sort(state), target)?
                }
            }
        };

        self.fetch(ticket).await.map(|_| ())
    }

    /// Load and append the next page.
    ///
    /// Skipped while loading, for local sort, once exhausted, and before the
    /// first page arrived.
    pub async fn load_more(&self) -> Result<LoadOutcome> {
        let ticket = {
            let mut guard = self.write()?;
            guard.ensure_alive()?;

            let skip = if guard.config.sort == SortStrategy::Local {
                Some("local sort")
            } else if guard.load_state.is_loading() {
                Some("already loading")
            } else if guard.exhausted {
                Some("exhausted")
            } else if !guard.initial_load_done {
                Some("first page not loaded")
            } else {
                None
            };
            if let Some(reason) = skip {
                log::debug!("{} load_more skipped: {}", self.id, reason);
                return Ok(LoadOutcome::Skipped);
            }

            if self.source.is_none() {
                return Err(Error::InvalidState("load_more needs a data source"));
            }
            let target = guard.cursor.next();
            guard.begin_request(RequestKind::LoadMore, target)?
        };

        self.fetch(ticket).await
    }

    /// Replace the loaded rows with externally fetched `rows`, keeping the
    /// active sort for local tables.
    pub fn add_rows(&self, rows: Vec<Row>) -> Result<()> {
        let mut guard = self.write()?;
        guard.ensure_alive()?;
        guard.rows = rows;
        if guard.config.sort == SortStrategy::Local {
            guard.resort();
        }
        guard.paint_body()?;
        guard.paint_status()
    }

    /// Unmount the table. Responses still in flight are ignored.
    pub fn destroy(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.destroyed = true;
            guard.generation += 1;
            guard.surface.unmount();
            log::debug!("{} destroyed", self.id);
        }
    }

    /// Run `ticket` against the source and apply the response if current.
    async fn fetch(&self, ticket: Ticket) -> Result<LoadOutcome> {
        let Some(source) = self.source.clone() else {
            return Err(Error::InvalidState("no data source"));
        };

        let result = source.fetch_page(&ticket.request).await;

        let mut guard = self.write()?;
        if guard.destroyed {
            log::debug!("{} ignoring response after destroy", self.id);
            return Ok(LoadOutcome::Discarded);
        }
        if guard.generation != ticket.generation {
            log::debug!(
                "{} discarding stale response (generation {} < {})",
                self.id,
                ticket.generation,
                guard.generation
            );
            return Ok(LoadOutcome::Discarded);
        }

        match result {
            Ok(page) => guard.apply(ticket, page),
            Err(error) => {
                guard.fail(error.clone())?;
                Err(Error::DataSource(error))
            }
        }
    }

    pub(super) fn with_inner<R>(&self, f: impl FnOnce(&TableInner) -> R) -> Result<R> {
        Ok(f(&*self.read()?))
    }
}
