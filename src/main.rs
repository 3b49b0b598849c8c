mod audio;

use std::{cell::RefCell, io, rc::Rc};

use log::{warn, Level, LevelFilter, Log, Metadata, Record};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use silog_kitchen::input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use silog_kitchen::kitchen::rules::TICKS_PER_SEC;
use silog_kitchen::kitchen::save::{KeyValueStore, MemoryStore};
use silog_kitchen::kitchen::KitchenGame;
use silog_kitchen::time::GameTime;

use audio::Sounds;

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = js_sys::JsString::from(format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&msg),
            Level::Warn => web_sys::console::warn_1(&msg),
            _ => web_sys::console::log_1(&msg),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// localStorage when the browser allows it, otherwise an in-memory store
/// that lasts until the tab closes.
fn open_store() -> Box<dyn KeyValueStore> {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(store) = silog_kitchen::kitchen::save::LocalStore::open() {
            return Box::new(store);
        }
    }
    warn!("localStorage が使えないため、進行状況はこのタブを閉じると消えます");
    Box::new(MemoryStore::new())
}

fn today() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    )
}

fn seed() -> u64 {
    let entropy = (js_sys::Math::random() * u32::MAX as f64) as u64;
    ((js_sys::Date::now() as u64) << 20) ^ entropy
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Query the grid container's bounding rect and convert a pointer position
/// to a terminal cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let x = mouse_x as f64 - rect.left();
    let y = mouse_y as f64 - rect.top();
    let col = pixel_x_to_col(x, rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(y, rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }

    let mut game = KitchenGame::new(open_store(), seed());
    game.ui.today = today();

    let game = Rc::new(RefCell::new(game));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Pointer: press starts a drag, move follows it, release drops or taps.
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let cell = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs);

            let event = match (mouse_event.event, cell) {
                (MouseEventKind::Pressed, Some((col, row)))
                    if mouse_event.button == MouseButton::Left =>
                {
                    cs.hit_test(col, row).map(InputEvent::Press)
                }
                (MouseEventKind::Moved, Some((col, row))) => Some(InputEvent::Move { col, row }),
                (MouseEventKind::Released, Some((col, row))) => Some(InputEvent::Release {
                    target: cs.hit_test(col, row),
                    drop: cs.drop_test(col, row),
                }),
                // released outside the grid still ends a drag
                (MouseEventKind::Released, None) => Some(InputEvent::Release {
                    target: None,
                    drop: None,
                }),
                _ => None,
            };
            drop(cs);

            if let Some(event) = event {
                game.borrow_mut().handle_input(&event);
            }
        }
    });

    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut().handle_input(&InputEvent::Key(c));
            }
        }
    });

    let game_time = RefCell::new(GameTime::new(TICKS_PER_SEC));
    let sounds = RefCell::new(Sounds::new());
    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let mut g = game.borrow_mut();
            let ticks = game_time.borrow_mut().update(now_ms());
            if ticks > 0 {
                g.tick(ticks);
            }

            let events = g.kitchen.drain_events();
            sounds.borrow_mut().play_all(&events, g.ui.muted);

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }
            g.render(f, size, &click_state);
        }
    });

    Ok(())
}
