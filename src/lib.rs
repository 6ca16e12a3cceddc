pub mod api;
pub mod banner;
pub mod board;
pub mod config;
pub mod error;
pub mod markup;
pub mod model;

use gloo::console::{error, log};
use web_sys::Element;

use crate::board::{ActivityBoard, BoardProps};
use crate::config::BoardConfig;
use crate::error::{Error, Result};

const MOUNT_ID: &str = "app";

fn mount_point() -> Result<Element> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| Error::Config("no document".into()))?;
    document
        .get_element_by_id(MOUNT_ID)
        .ok_or_else(|| Error::Config(format!("missing <div id=\"{MOUNT_ID}\">")))
}

/// Reads the config off `#app` and mounts the board there.
pub fn run() {
    match mount_point() {
        Ok(root) => {
            let config = BoardConfig::from_element(&root).unwrap_or_else(|e| {
                error!(format!("{e}; using defaults"));
                BoardConfig::default()
            });
            log!(format!("Mounting activity board (api base {:?})", config.api_base));
            yew::Renderer::<ActivityBoard>::with_root_and_props(root, BoardProps { config }).render();
        }
        Err(e) => {
            error!(format!("{e}; mounting on <body>"));
            yew::Renderer::<ActivityBoard>::with_props(BoardProps {
                config: BoardConfig::default(),
            })
            .render();
        }
    }
}
