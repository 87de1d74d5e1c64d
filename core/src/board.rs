use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use crate::*;

/// Called with every accepted click, after the board borrow has been released.
pub type ClickHandler = Rc<dyn Fn(&ClickDetail)>;

pub type BoardHandle<S> = Rc<RefCell<Board<S>>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoardState {
    Uninitialized,
    /// Drawn and listening for commands, clicks are ignored.
    Ready,
    ClickEnabled,
    ClickDisabled,
    TornDown,
}

impl BoardState {
    pub const fn accepts_clicks(self) -> bool {
        matches!(self, Self::ClickEnabled)
    }

    pub const fn is_torn_down(self) -> bool {
        matches!(self, Self::TornDown)
    }
}

/// Type-erased view of a mounted board, reachable through the handle in its ready notification.
pub trait BoardAccess {
    fn id(&self) -> &BoardId;
    fn size(&self) -> Coord2;
    fn cell(&self, pos: Coord2) -> Result<&Cell>;
    fn apply(&mut self, command: &Command) -> Result<()>;
    fn set_event_suppressed(&mut self, pos: Coord2, suppressed: bool) -> Result<()>;
    fn draw_cell(&mut self, pos: Coord2) -> Result<()>;
    fn draw_border(&mut self, pos: Coord2, color: Color, line_width: f64) -> Result<()>;
}

/// One grid instance: its cells, the surface it paints on and its connection to the bus.
pub struct Board<S> {
    id: BoardId,
    config: BoardConfig,
    mapper: CoordMapper,
    store: CellStore,
    renderer: Renderer,
    undo: UndoPolicy,
    surface: S,
    state: BoardState,
    hover: Option<Coord2>,
    on_click: Option<ClickHandler>,
    bus: Rc<Bus>,
    subscription: Option<SubscriptionId>,
}

impl<S: Surface + 'static> Board<S> {
    /// Validates the config, claims the id on the bus, draws the empty grid and announces readiness.
    ///
    /// Clicks are accepted right away when a handler is given. Without one the board still publishes
    /// click notifications once an `enable-click` command arrives.
    pub fn mount(
        config: BoardConfig,
        surface: S,
        bus: &Rc<Bus>,
        on_click: Option<ClickHandler>,
    ) -> Result<BoardHandle<S>> {
        config.validate()?;
        bus.register(&config.id)?;

        let id = config.id.clone();
        let board = Self {
            id: id.clone(),
            mapper: config.mapper(),
            store: CellStore::new(config.size(), config.blank_cell()),
            renderer: Renderer::new(&config),
            undo: config.undo_policy(),
            config,
            surface,
            state: BoardState::Uninitialized,
            hover: None,
            on_click,
            bus: Rc::clone(bus),
            subscription: None,
        };
        let handle = Rc::new(RefCell::new(board));

        let weak = Rc::downgrade(&handle);
        let subscription = bus.commands().subscribe(move |message: &Addressed<Command>| {
            let Some(board) = weak.upgrade() else {
                return;
            };
            match board.try_borrow_mut() {
                Ok(mut board) => board.receive(message),
                Err(_) => log::error!(
                    "board {} is busy, dropped {}",
                    message.id,
                    message.payload.name()
                ),
            };
        });

        {
            let mut board = handle.borrow_mut();
            board.subscription = Some(subscription);
            board.redraw();
            board.state = BoardState::Ready;
            if board.on_click.is_some() {
                board.state = BoardState::ClickEnabled;
            }
            log::debug!("board {} mounted in state {:?}", id, board.state);
        }

        let access: Rc<RefCell<dyn BoardAccess>> = handle.clone();
        bus.notify(Notification::Ready {
            detail: ReadyDetail::new(id),
            handle: Rc::downgrade(&access),
        });

        Ok(handle)
    }

    /// Handles one bus message. Messages for other boards are ignored, failed commands are logged.
    pub fn receive(&mut self, message: &Addressed<Command>) {
        if !message.is_for(&self.id) {
            log::trace!("board {} ignored {} for {}", self.id, message.payload.name(), message.id);
            return;
        }

        log::debug!("board {} <- {:?}", self.id, message.payload);
        if let Err(err) = self.apply(&message.payload) {
            log::warn!("board {} dropped {}: {}", self.id, message.payload.name(), err);
        }
    }

    pub fn apply(&mut self, command: &Command) -> Result<()> {
        use Command::*;

        if self.state.is_torn_down() {
            return Err(BoardError::TornDown);
        }

        match command {
            ChangeCellContent {
                cellx,
                celly,
                content,
                color,
                bgcolor,
            } => {
                let pos = self.store.validate_coords((*cellx, *celly))?;
                let content = self.undo.resolve(self.store.get(pos)?, content.clone());
                self.store.set(pos, content, *color, *bgcolor)?;
                self.draw_cell(pos)
            }
            ChangeAllCellsContent {
                content,
                color,
                bgcolor,
            } => {
                self.store
                    .set_all(content, color.as_ref(), bgcolor.as_ref())?;
                self.redraw();
                Ok(())
            }
            SetCellData { x, y, content } => self.store.set((*x, *y), content.clone(), None, None),
            SetAllCellData { content } => self.store.set_all(content, None, None),
            ClearCell { cellx, celly } => {
                let pos = (*cellx, *celly);
                self.store.clear_cell(pos)?;
                self.draw_cell(pos)
            }
            ClearRow { row } => {
                self.store.clear_row(*row)?;
                (0..self.config.cols).try_for_each(|col| self.draw_cell((col, *row)))
            }
            ClearCol { col } => {
                self.store.clear_column(*col)?;
                (0..self.config.rows).try_for_each(|row| self.draw_cell((*col, row)))
            }
            ClearAll => {
                self.store.clear_all();
                self.redraw();
                Ok(())
            }
            ContentRefresh => {
                self.redraw();
                Ok(())
            }
            EnableClick => {
                self.enable_click();
                Ok(())
            }
            DisableClick => {
                self.disable_click();
                Ok(())
            }
            SetCellEvent {
                cellx,
                celly,
                enabled,
            } => self.store.set_event_suppressed((*cellx, *celly), !enabled),
        }
    }

    pub fn draw_cell(&mut self, pos: Coord2) -> Result<()> {
        self.renderer.draw_cell(&mut self.surface, &self.store, pos)?;
        if self.hover == Some(pos) {
            self.renderer.draw_hover_overlay(&mut self.surface, pos)?;
        }
        Ok(())
    }

    /// Repaints grid and backgrounds only, cell content is left off.
    pub fn draw_board(&mut self) {
        self.renderer.draw_board(&mut self.surface, &self.store);
    }

    /// Full repaint from the store.
    pub fn redraw(&mut self) {
        self.renderer.redraw_all(&mut self.surface, &self.store);
        if let Some(pos) = self.hover {
            if let Err(err) = self.renderer.draw_hover_overlay(&mut self.surface, pos) {
                log::error!("board {}: {}", self.id, err);
            }
        }
    }

    pub fn draw_border(&mut self, pos: Coord2, color: Color, line_width: f64) -> Result<()> {
        self.renderer
            .draw_border(&mut self.surface, pos, color, line_width)
    }

    /// Snapshot of the cell under a pointer offset, if that click should be reported.
    pub fn click_detail(&self, px: Px, py: Px) -> Option<ClickDetail> {
        if !self.state.accepts_clicks() {
            return None;
        }

        let Some(pos) = self.mapper.cell_at(px, py) else {
            log::trace!("board {}: click at ({}, {}) is off the grid", self.id, px, py);
            return None;
        };
        let cell = self.store.cell(pos).ok()?;
        if cell.event_suppressed {
            log::trace!("board {}: click on suppressed cell {:?}", self.id, pos);
            return None;
        }

        Some(ClickDetail {
            id: self.id.clone(),
            mousex: px,
            mousey: py,
            cellx: pos.0,
            celly: pos.1,
            content: cell.content.clone(),
            color: cell.text_color,
            bgcolor: cell.background_color,
        })
    }

    /// Reports a click to the handler and on the bus. Returns whether the click was accepted.
    pub fn click(handle: &BoardHandle<S>, px: Px, py: Px) -> bool {
        let (detail, on_click, bus) = {
            let Ok(board) = handle.try_borrow() else {
                log::error!("board is busy, click at ({}, {}) dropped", px, py);
                return false;
            };
            let Some(detail) = board.click_detail(px, py) else {
                return false;
            };
            (detail, board.on_click.clone(), Rc::clone(&board.bus))
        };

        log::debug!("board {} clicked at {:?}", detail.id, detail.cell());
        if let Some(on_click) = on_click {
            on_click(&detail);
        }
        bus.notify(Notification::Click(detail));
        true
    }

    /// Moves the hover highlight to the cell under the pointer.
    pub fn pointer_move(&mut self, px: Px, py: Px) {
        if !self.config.hover_cell || self.state.is_torn_down() {
            return;
        }

        let target = self.mapper.cell_at(px, py);
        if target == self.hover {
            return;
        }
        self.clear_hover();
        if let Some(pos) = target {
            match self.renderer.draw_hover_overlay(&mut self.surface, pos) {
                Ok(()) => self.hover = Some(pos),
                Err(err) => log::error!("board {}: {}", self.id, err),
            }
        }
    }

    pub fn pointer_leave(&mut self) {
        if self.config.hover_cell {
            self.clear_hover();
        }
    }

    fn clear_hover(&mut self) {
        let Some(prev) = self.hover.take() else {
            return;
        };
        if let Err(err) = self
            .renderer
            .clear_hover_overlay(&mut self.surface, &self.store, prev)
        {
            log::error!("board {}: {}", self.id, err);
        }
    }
}

impl<S> Board<S> {
    pub fn id(&self) -> &BoardId {
        &self.id
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub const fn state(&self) -> BoardState {
        self.state
    }

    pub fn size(&self) -> Coord2 {
        self.store.size()
    }

    pub const fn mapper(&self) -> &CoordMapper {
        &self.mapper
    }

    pub fn store(&self) -> &CellStore {
        &self.store
    }

    /// Direct store access. Changes made here are not drawn until the next redraw.
    pub fn store_mut(&mut self) -> &mut CellStore {
        &mut self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn cell(&self, pos: Coord2) -> Result<&Cell> {
        self.store.cell(pos)
    }

    pub fn get(&self, pos: Coord2) -> Result<&Content> {
        self.store.get(pos)
    }

    pub fn hovered(&self) -> Option<Coord2> {
        self.hover
    }

    pub fn enable_click(&mut self) {
        if !self.state.is_torn_down() {
            log::debug!("board {}: click enabled", self.id);
            self.state = BoardState::ClickEnabled;
        }
    }

    pub fn disable_click(&mut self) {
        if !self.state.is_torn_down() {
            log::debug!("board {}: click disabled", self.id);
            self.state = BoardState::ClickDisabled;
        }
    }

    /// Leaves the bus and frees the id. The board stays readable but accepts nothing further.
    pub fn teardown(&mut self) {
        if self.state.is_torn_down() {
            return;
        }

        if let Some(subscription) = self.subscription.take() {
            self.bus.commands().unsubscribe(subscription);
        }
        self.bus.unregister(&self.id);
        self.on_click = None;
        self.hover = None;
        self.state = BoardState::TornDown;
        log::debug!("board {} torn down", self.id);
    }
}

impl<S> Drop for Board<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<S> fmt::Debug for Board<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("id", &self.id)
            .field("size", &self.size())
            .field("state", &self.state)
            .field("hover", &self.hover)
            .finish_non_exhaustive()
    }
}

impl<S: Surface + 'static> BoardAccess for Board<S> {
    fn id(&self) -> &BoardId {
        &self.id
    }

    fn size(&self) -> Coord2 {
        self.store.size()
    }

    fn cell(&self, pos: Coord2) -> Result<&Cell> {
        self.store.cell(pos)
    }

    fn apply(&mut self, command: &Command) -> Result<()> {
        Board::apply(self, command)
    }

    fn set_event_suppressed(&mut self, pos: Coord2, suppressed: bool) -> Result<()> {
        self.store.set_event_suppressed(pos, suppressed)
    }

    fn draw_cell(&mut self, pos: Coord2) -> Result<()> {
        Board::draw_cell(self, pos)
    }

    fn draw_border(&mut self, pos: Coord2, color: Color, line_width: f64) -> Result<()> {
        Board::draw_border(self, pos, color, line_width)
    }
}
