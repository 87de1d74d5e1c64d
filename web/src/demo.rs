use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use cellboard_core::{
    BoardConfig, BoardId, BoardRef, Bus, ClickDetail, Color, Command, Content, Notification,
    SubscriptionId,
};
use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::board_view::BoardView;
use crate::bridge::DomBridge;

const BUNDLED_LAYOUT: &str = include_str!("demo.toml");

const BORDER_WIDTH: f64 = 4.0;

/// One board on the demo page and what clicking it does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoBoard {
    #[serde(flatten)]
    pub config: BoardConfig,
    /// Content written into a clicked cell.
    pub paint: Content,
    #[serde(default)]
    pub paint_color: Option<Color>,
    /// Border drawn around the last clicked cell.
    #[serde(default)]
    pub border: Option<Color>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DemoLayout {
    #[serde(default)]
    pub boards: Vec<DemoBoard>,
}

impl DemoLayout {
    pub fn bundled() -> Result<Self, toml::de::Error> {
        toml::from_str(BUNDLED_LAYOUT)
    }

    pub fn board(&self, id: &BoardId) -> Option<&DemoBoard> {
        self.boards.iter().find(|board| board.config.id == *id)
    }
}

/// Game logic for the demo page. Talks to boards only through the bus and the handles they announce.
pub struct DemoController {
    bus: Rc<Bus>,
    layout: DemoLayout,
    handles: RefCell<BTreeMap<BoardId, BoardRef>>,
    subscription: RefCell<Option<SubscriptionId>>,
}

impl DemoController {
    /// Starts listening for boards. Must happen before they mount to see their ready notifications.
    pub fn attach(bus: &Rc<Bus>, layout: DemoLayout) -> Rc<Self> {
        let controller = Rc::new(Self {
            bus: Rc::clone(bus),
            layout,
            handles: RefCell::new(BTreeMap::new()),
            subscription: RefCell::new(None),
        });

        let weak = Rc::downgrade(&controller);
        let subscription = bus.notifications().subscribe(move |notification| {
            if let Some(controller) = weak.upgrade() {
                controller.notify(notification);
            }
        });
        controller.subscription.replace(Some(subscription));
        controller
    }

    fn notify(&self, notification: &Notification) {
        let id = notification.id();
        let Some(board) = self.layout.board(id) else {
            return;
        };

        match notification {
            Notification::Ready { handle, .. } => {
                log::info!("board {} ready", id);
                self.handles
                    .borrow_mut()
                    .insert(id.clone(), handle.clone());
                self.bus.send(id.clone(), Command::EnableClick);
            }
            Notification::Click(detail) => self.paint(board, detail),
        }
    }

    fn paint(&self, board: &DemoBoard, detail: &ClickDetail) {
        self.bus.send(
            detail.id.clone(),
            Command::ChangeCellContent {
                cellx: detail.cellx,
                celly: detail.celly,
                content: board.paint.clone(),
                color: board.paint_color,
                bgcolor: None,
            },
        );

        let Some(color) = board.border else {
            return;
        };
        let handle = self
            .handles
            .borrow()
            .get(&detail.id)
            .and_then(|handle| handle.upgrade());
        let Some(handle) = handle else {
            return;
        };
        match handle.try_borrow_mut() {
            Ok(mut board) => {
                if let Err(err) = board.draw_border(detail.cell(), color, BORDER_WIDTH) {
                    log::warn!("border on {}: {}", detail.id, err);
                }
            }
            Err(_) => log::error!("board {} busy, border skipped", detail.id),
        }
    }
}

impl Drop for DemoController {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.bus.notifications().unsubscribe(subscription);
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct DemoProps {
    pub layout: DemoLayout,
    /// Mirror the bus onto document events.
    #[prop_or(true)]
    pub bridge: bool,
}

#[function_component(DemoApp)]
pub fn demo_app(props: &DemoProps) -> Html {
    let bus: Rc<Bus> = (*use_memo((), |_| Bus::new())).clone();
    // created while rendering so it is subscribed before any board mounts
    let _controller = use_memo(props.layout.clone(), {
        let bus = Rc::clone(&bus);
        move |layout| DemoController::attach(&bus, layout.clone())
    });
    let _bridge = use_memo(props.bridge, {
        let bus = Rc::clone(&bus);
        move |&bridge| bridge.then(|| DomBridge::attach(&bus))
    });

    html! {
        <main class="cellboard-demo">
            { for props.layout.boards.iter().map(|board| html! {
                <BoardView
                    key={board.config.id.to_string()}
                    config={board.config.clone()}
                    bus={Rc::clone(&bus)}
                />
            }) }
        </main>
    }
}
