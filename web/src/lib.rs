use clap::Parser;
use wasm_bindgen::prelude::*;

pub mod board_view;
pub mod bridge;
pub mod canvas;
pub mod demo;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Do not mirror bus traffic onto document events
    #[arg(long)]
    no_bridge: bool,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let layout = demo::DemoLayout::bundled().expect("Invalid bundled demo layout");
    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("Demo started with {} boards", layout.boards.len());
    yew::Renderer::<demo::DemoApp>::with_root_and_props(
        root,
        demo::DemoProps {
            layout,
            bridge: !args.no_bridge,
        },
    )
    .render();
}
