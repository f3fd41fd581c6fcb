//! Example: watch a player container with both strategies

use sizewatch::{ResizeWatcher, RESIZE, SIDE_CHANNEL_CLASS};
use sizewatch_dom::{Size, Window, WindowConfig};
use tracing_subscriber::EnvFilter;

fn run(native: bool) -> anyhow::Result<()> {
    let window = Window::new(WindowConfig { resize_observer: native });
    // Stands in for the player stylesheet
    window.add_fill_parent_class(SIDE_CHANNEL_CLASS);

    let player = {
        let mut doc = window.document_mut();
        let player = doc.create_element("div");
        doc.set_attribute(player, "id", "player-1")?;
        let body = doc.body();
        doc.append_child(body, player)?;
        player
    };

    let mut watcher = ResizeWatcher::new(window.clone());
    watcher.add_event_listener(RESIZE, |event| {
        println!("  resize at {:.3}ms", event.timestamp);
    });
    watcher.init("player-1")?;
    println!("{:?} strategy:", watcher.strategy());

    for (width, height) in [(640.0, 360.0), (1280.0, 720.0)] {
        window.set_element_size(player, Size::new(width, height))?;
        window.deliver_resize_observations();
    }

    watcher.destroy();
    window.set_element_size(player, Size::new(320.0, 180.0))?;
    window.deliver_resize_observations();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    run(true)?;
    run(false)?;
    Ok(())
}
