use crate::api::{HttpUserApi, UserApi};
use crate::config::Config;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use anyhow::Context;
use std::sync::Arc;

/// Run the screen until the user quits.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let http = HttpUserApi::new(&config.api).context("Failed to set up user API")?;
    tracing::info!(endpoint = %http.endpoint(), "Starting user list screen");
    let api: Arc<dyn UserApi> = Arc::new(http);

    let (mut terminal, guard) = setup_terminal().context("Failed to set up terminal")?;
    let mut app = App::new(api, &config.ui);
    let mut events = EventHandler::new(config.ui.tick_rate());
    let redraw = app.redraw_handle();

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        tokio::select! {
            event = events.next() => match event {
                Some(AppEvent::Key(key)) => handle_key(&mut app, key),
                Some(AppEvent::Tick) => app.on_tick(),
                Some(AppEvent::Resize(cols, rows)) => {
                    tracing::trace!(cols, rows, "Terminal resized");
                }
                Some(AppEvent::FocusGained) => app.on_focus_gained(),
                Some(AppEvent::FocusLost) => app.on_focus_lost(),
                None => {
                    tracing::warn!("Input reader stopped");
                    app.request_quit();
                }
            },
            _ = redraw.notified() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupt received");
                app.request_quit();
            }
        }
    }

    app.shutdown().await;
    drop(guard);
    tracing::info!("User list screen closed");
    Ok(())
}
