//! Hidden, resizable window centred on the primary monitor; Escape closes it.
//!
//! Pass a `.toml` or `.ron` file to override the session settings.

use glfw_facade::prelude::*;
use glfw_facade::logging;
use std::cell::Cell;
use std::rc::Rc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let mut config = match std::env::args().nth(1) {
        Some(path) => FacadeConfig::load_from_file(&path)?,
        None => FacadeConfig::default(),
    };
    config.hints.visible = false;
    config.hints.resizable = true;
    config.swap_interval.get_or_insert(1);

    let context = Context::glfw(&config)?;
    let mut window = Window::new(&context, 300, 300, "Hello World!")?;

    let escape_released = Rc::new(Cell::new(false));
    let flag = Rc::clone(&escape_released);
    window.set_key_callback(move |key, _, action, _| {
        if key == Key::Escape && action == Action::Release {
            flag.set(true);
        }
    });

    match Monitor::primary(&context).and_then(|monitor| monitor.video_mode()) {
        Some(mode) => {
            let size = window.size();
            let width = i32::try_from(mode.width).unwrap_or(i32::MAX);
            let height = i32::try_from(mode.height).unwrap_or(i32::MAX);
            window.set_position((width - size.width) / 2, (height - size.height) / 2);
        }
        None => log::warn!("No primary monitor, leaving the window where it is"),
    }

    // Also applies the configured swap interval
    window.make_context_current();
    window.show();
    log::info!("Window {:?} shown, press Escape to close", window.handle());

    while !window.should_close() {
        window.swap_buffers();
        context.poll_events();
        if escape_released.get() {
            window.set_should_close(true);
        }
    }

    window.free_callbacks();
    window.destroy();
    log::info!("Bye after {:.1}s", context.time());
    Ok(())
}
