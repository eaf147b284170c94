use three_d::*;

use crate::game::GameEvent;
use crate::input::Command;
use crate::renderer::GameRenderer;
use crate::ticker::Ticker;

pub mod config;
pub mod game;
pub mod input;
mod renderer;
pub mod ticker;

pub use config::{ConfigError, GameConfig};
pub use game::{Apple, Direction, GameState, Grid, Position, Snake};

/// Opens the window and runs the game until the window closes or Escape is
/// pressed. On `wasm32` this returns as soon as the loop is scheduled.
pub fn run(config: GameConfig, settings: WindowSettings) -> Result<(), WindowError> {
    let window = Window::new(settings)?;
    let grid = config.grid();
    log::info!(
        "Window created: {}x{} cells at {} steps/s",
        grid.width,
        grid.height,
        config.speed
    );

    let context = window.gl();
    let mut game = GameState::new(grid);
    let mut renderer = GameRenderer::new(&context, &config);
    let mut ticker = Ticker::new(config.step_interval());

    window.render_loop(move |frame_input| {
        for command in input::commands(&frame_input.events) {
            match command {
                Command::Steer(direction) => game.steer(direction),
                Command::Quit => {
                    log::info!("Quit requested");
                    return FrameOutput {
                        exit: true,
                        ..Default::default()
                    };
                }
            }
        }

        if ticker.advance(frame_input.elapsed_time) {
            match game.update() {
                GameEvent::Moved => {}
                GameEvent::Ate { length } => log::debug!("Apple eaten, length now {length}"),
                GameEvent::Reset { length } => {
                    log::info!("Snake hit itself at length {length}, resetting")
                }
            }
        }

        renderer.resize(frame_input.viewport);
        renderer.render(&game, &frame_input.screen());

        FrameOutput::default()
    });

    Ok(())
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::GameConfig;

    #[wasm_bindgen(start)]
    pub fn init() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Debug)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or("no document")?;
        let canvas = document
            .get_element_by_id("canvas")
            .ok_or("missing <canvas id=\"canvas\">")?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(JsValue::from)?;

        let config = match canvas.get_attribute("data-config") {
            Some(json) => GameConfig::from_json(&json).unwrap_or_else(|err| {
                log::warn!("Ignoring data-config: {err}");
                GameConfig::default()
            }),
            None => GameConfig::default(),
        };

        let mut settings = config.window_settings();
        settings.canvas = Some(canvas.clone());

        if let Some(loading_el) = document.get_element_by_id("loading") {
            loading_el.set_attribute("style", "display: none")?;
        }
        // Key events only arrive while the canvas has focus.
        canvas.focus().unwrap_or(());

        crate::run(config, settings).map_err(|err| JsValue::from_str(&err.to_string()))
    }
}
