use std::cell::RefCell;
use std::rc::Rc;

use cellboard_core::{Board, BoardConfig, BoardHandle, Bus, ClickDetail, ClickHandler};
use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent};
use yew::prelude::*;

use crate::canvas::CanvasSurface;

#[derive(Properties, Clone)]
pub struct BoardProps {
    pub config: BoardConfig,
    pub bus: Rc<Bus>,
    #[prop_or_default]
    pub onclick: Option<Callback<ClickDetail>>,
}

impl PartialEq for BoardProps {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && Rc::ptr_eq(&self.bus, &other.bus)
            && self.onclick == other.onclick
    }
}

/// What a mounted board depends on. A change in any of these remounts the board, a changed
/// callback alone does not.
#[derive(Clone)]
struct MountKey {
    config: BoardConfig,
    bus: Rc<Bus>,
    has_onclick: bool,
}

impl MountKey {
    fn new(props: &BoardProps) -> Self {
        Self {
            config: props.config.clone(),
            bus: Rc::clone(&props.bus),
            has_onclick: props.onclick.is_some(),
        }
    }
}

impl PartialEq for MountKey {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && Rc::ptr_eq(&self.bus, &other.bus)
            && self.has_onclick == other.has_onclick
    }
}

type CurrentCallback = Rc<RefCell<Option<Callback<ClickDetail>>>>;

/// Forwards board clicks to whichever callback the latest render left in `current`.
fn forward_clicks(current: CurrentCallback) -> ClickHandler {
    Rc::new(move |detail: &ClickDetail| {
        let callback = current.borrow().clone();
        if let Some(callback) = callback {
            callback.emit(detail.clone());
        }
    })
}

/// A mounted board together with the pointer listeners feeding it.
struct MountedBoard {
    handle: BoardHandle<CanvasSurface>,
    _listeners: [EventListener; 3],
}

impl MountedBoard {
    fn new(
        canvas: &HtmlCanvasElement,
        key: &MountKey,
        onclick: &CurrentCallback,
    ) -> Result<Self, JsValue> {
        let surface = CanvasSurface::new(canvas)?;
        let on_click = key.has_onclick.then(|| forward_clicks(Rc::clone(onclick)));
        let handle = Board::mount(key.config.clone(), surface, &key.bus, on_click)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        let click = {
            let handle = handle.clone();
            EventListener::new(canvas, "click", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    Board::click(&handle, event.offset_x(), event.offset_y());
                }
            })
        };
        let hover = {
            let handle = handle.clone();
            EventListener::new(canvas, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                if let Ok(mut board) = handle.try_borrow_mut() {
                    board.pointer_move(event.offset_x(), event.offset_y());
                }
            })
        };
        let leave = {
            let handle = handle.clone();
            EventListener::new(canvas, "mouseleave", move |_| {
                if let Ok(mut board) = handle.try_borrow_mut() {
                    board.pointer_leave();
                }
            })
        };

        Ok(Self {
            handle,
            _listeners: [click, hover, leave],
        })
    }
}

impl Drop for MountedBoard {
    fn drop(&mut self) {
        match self.handle.try_borrow_mut() {
            Ok(mut board) => board.teardown(),
            Err(_) => log::error!("board busy during unmount"),
        }
    }
}

/// Title label and canvas for one board. The board is mounted once the canvas exists and torn down
/// when the component goes away or its config or bus changes.
#[function_component(BoardView)]
pub fn board_view(props: &BoardProps) -> Html {
    let canvas_ref = use_node_ref();
    let (width, height) = props.config.mapper().surface_size();
    let onclick: CurrentCallback = use_mut_ref(|| None);
    *onclick.borrow_mut() = props.onclick.clone();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(MountKey::new(props), move |key| {
            let mounted = canvas_ref
                .cast::<HtmlCanvasElement>()
                .ok_or_else(|| JsValue::from_str("canvas not rendered"))
                .and_then(|canvas| MountedBoard::new(&canvas, key, &onclick));
            let mounted = match mounted {
                Ok(mounted) => Some(mounted),
                Err(err) => {
                    log::error!("board {} not mounted: {:?}", key.config.id, err);
                    None
                }
            };
            move || drop(mounted)
        });
    }

    let title = props.config.title.clone();
    html! {
        <div class="board-cell" data-board={props.config.id.to_string()}>
            <h1>{ title.clone() }</h1>
            <canvas
                ref={canvas_ref}
                width={width.to_string()}
                height={height.to_string()}
                aria-label={title}
            />
        </div>
    }
}
