//! Browser host: finds (or creates) the canvas, wires the start button, score
//! text and keyboard, and runs the engine from a requestAnimationFrame loop.
//!
//! All state sits in one thread-local `Host`; every listener and frame
//! callback borrows it for one synchronous step, so a key press always
//! finishes its move-or-revert before the next frame runs.
use crate::config::HostConfig;
use crate::engine::{Cell, EMPTY, Engine, Outcome, Position};
use crate::input::command_for_key;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, window};

const BACKGROUND: &str = "#111";

/// Fill style per cell id. Index 0 is empty and never painted.
const PALETTE: [&str; 8] = [
    BACKGROUND, // empty
    "cyan",     // I
    "blue",     // J
    "orange",   // L
    "yellow",   // O
    "green",    // S
    "purple",   // T
    "red",      // Z
];

struct Host {
    ctx: CanvasRenderingContext2d,
    score_el: Option<Element>,
    engine: Engine,
    last_frame_ms: Option<f64>,
    shown_score: Option<u32>,
    loop_running: bool,
}

thread_local! {
    static HOST: std::cell::RefCell<Option<Host>> = const { std::cell::RefCell::new(None) };
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub(crate) fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// Attach the game to the page described by `config`. The game starts when
/// the start button is clicked, or right away if the page has none. Mounting
/// again restarts the running game instead of stacking listeners.
pub fn mount(config: HostConfig) -> Result<(), JsValue> {
    if HOST.with(|cell| cell.borrow().is_some()) {
        log("[tetris] already mounted, restarting");
        begin();
        return Ok(());
    }

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas = canvas_element(&doc, &config.canvas_id)?;
    canvas.set_width((config.game.width as f64 * config.cell_size) as u32);
    canvas.set_height((config.game.height as f64 * config.cell_size) as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    // resizing reset the transform; from here on one unit is one cell
    ctx.scale(config.cell_size, config.cell_size)?;

    let host = Host {
        ctx,
        score_el: doc.get_element_by_id(&config.score_id),
        engine: Engine::new(config.game.clone()),
        last_frame_ms: None,
        shown_score: None,
        loop_running: false,
    };
    render(&host);
    HOST.with(|cell| *cell.borrow_mut() = Some(host));

    install_key_listener(&doc)?;
    match doc.get_element_by_id(&config.start_button_id) {
        Some(button) => install_start_button(button)?,
        None => begin(),
    }
    Ok(())
}

/// Engine view of the mounted game, if any.
#[cfg(feature = "serde_json")]
pub fn snapshot() -> Option<crate::engine::Snapshot> {
    HOST.with(|cell| cell.borrow().as_ref().map(|host| host.engine.snapshot()))
}

fn canvas_element(doc: &Document, id: &str) -> Result<HtmlCanvasElement, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return el.dyn_into::<HtmlCanvasElement>().map_err(JsValue::from);
    }
    let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
    c.set_id(id);
    c.set_attribute("style", "display:block; margin:24px auto; border:2px solid #222; background:#111;")
        .ok();
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&c)?;
    Ok(c)
}

fn install_start_button(button: Element) -> Result<(), JsValue> {
    let target = button.clone();
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        if let Some(el) = target.dyn_ref::<HtmlElement>() {
            el.style().set_property("display", "none").ok();
        }
        begin();
    }) as Box<dyn FnMut(_)>);
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn install_key_listener(doc: &Document) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        let Some(command) = command_for_key(&evt.key()) else {
            return;
        };
        // keep arrows from scrolling the page
        evt.prevent_default();
        HOST.with(|cell| {
            if let Some(host) = cell.borrow_mut().as_mut() {
                report(host.engine.apply(command));
            }
        });
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// (Re)start the engine and make sure exactly one frame loop is running.
fn begin() {
    let needs_loop = HOST.with(|cell| {
        let mut guard = cell.borrow_mut();
        let Some(host) = guard.as_mut() else {
            return false;
        };
        host.engine.start();
        host.last_frame_ms = None;
        log("[tetris] game started");
        !std::mem::replace(&mut host.loop_running, true)
    });
    if needs_loop {
        start_frame_loop();
    }
}

fn start_frame_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        HOST.with(|cell| {
            if let Some(host) = cell.borrow_mut().as_mut() {
                frame(host, ts);
            }
        });
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(callback: &FrameCallback) {
    if let (Some(w), Some(cb)) = (window(), callback.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn frame(host: &mut Host, now_ms: f64) {
    // first frame after a (re)start only sets the clock
    let elapsed = host.last_frame_ms.map_or(0.0, |last| now_ms - last);
    host.last_frame_ms = Some(now_ms);
    if let Some(outcome) = host.engine.tick(elapsed) {
        report(outcome);
    }
    render(host);
    update_score(host);
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Locked { rows_cleared } if rows_cleared > 0 => {
            log(&format!("[tetris] cleared {} row(s)", rows_cleared));
        }
        Outcome::ToppedOut { rows_cleared } => {
            log(&format!(
                "[tetris] top-out after clearing {} row(s); arena reset",
                rows_cleared
            ));
        }
        _ => {}
    }
}

fn render(host: &Host) {
    let arena = host.engine.arena();
    host.ctx.set_fill_style_str(BACKGROUND);
    host.ctx
        .fill_rect(0.0, 0.0, arena.width() as f64, arena.height() as f64);
    draw_cells(&host.ctx, arena.rows(), Position::default());
    let player = host.engine.player();
    draw_cells(&host.ctx, player.matrix.rows(), player.pos);
}

fn draw_cells(ctx: &CanvasRenderingContext2d, rows: &[Vec<Cell>], offset: Position) {
    for (y, row) in rows.iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            if value == EMPTY {
                continue;
            }
            ctx.set_fill_style_str(fill_style(value));
            ctx.fill_rect(
                (offset.x + x as i32) as f64,
                (offset.y + y as i32) as f64,
                1.0,
                1.0,
            );
        }
    }
}

fn fill_style(cell: Cell) -> &'static str {
    PALETTE.get(cell as usize).copied().unwrap_or("white")
}

fn update_score(host: &mut Host) {
    let score = host.engine.score();
    if host.shown_score == Some(score) {
        return;
    }
    if let Some(el) = &host.score_el {
        el.set_text_content(Some(&score.to_string()));
    }
    host.shown_score = Some(score);
}
