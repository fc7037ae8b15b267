use std::io::stdin;
use std::thread;

use anyhow::Context;
use games::{canvas::Canvas, color::{OUTLINE_COLOR, TRACE_COLOR, TRACE_COLOR_TOLERANCE}};
use tracing::{error, warn};

use crate::{context::GameContextRef, session_store::GameId};

/// Canvas pixels per character in `render` previews.
const PREVIEW_CELL: u32 = 10;

pub fn console_input_thread(context_ref: GameContextRef) {
    thread::spawn(move || {
        pollster::block_on(console_input_loop(context_ref))
    });
}

pub async fn console_input_loop(context_ref: GameContextRef) {
    loop {
        let mut input = String::new();
        match stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("stopped reading console input: {e}");
                break;
            }
        }
        match process_console_input(input.trim(), &context_ref).await {
            Ok(output) => println!("{output}"),
            Err(e) => error!("console: {e}"),
        }
    }
}

pub async fn process_console_input(input: &str, context_ref: &GameContextRef) -> anyhow::Result<String> {
    let (message_type, rem) = match input.find(' ') {
        Some(i) => (&input[..i], input[i + 1..].trim()),
        None => (input, ""),
    };

    Ok(match message_type {
        "status" => {
            let summary = context_ref.read().await.summary();
            serde_json::to_string_pretty(&summary)?
        }
        "show" => {
            let game_id = parse_game_id(rem)?;
            let state = context_ref.read().await.get_dalgona(game_id)?.state();
            serde_json::to_string_pretty(&state)?
        }
        "reset" => {
            let game_id = parse_game_id(rem)?;
            context_ref.write().await.get_dalgona_mut(game_id)?.session.reset();
            format!("game {game_id} reset")
        }
        "drop" => {
            let game_id = parse_game_id(rem)?;
            context_ref.write().await.dalgona.remove(game_id).with_context(|| format!("no game {game_id}"))?;
            format!("game {game_id} dropped")
        }
        "render" => {
            let game_id = parse_game_id(rem)?;
            let canvas = context_ref.read().await.get_dalgona(game_id)?.session.render();
            ascii_preview(&canvas, PREVIEW_CELL)
        }
        _ => "input not recognized (status | show <id> | reset <id> | drop <id> | render <id>)".to_string(),
    })
}

fn parse_game_id(input: &str) -> anyhow::Result<GameId> {
    input.parse::<GameId>().with_context(|| format!("expected a game id, got '{input}'"))
}

/// One character per `cell`×`cell` block: `*` where any trace pixel is, `#` for outline, space otherwise.
pub fn ascii_preview(canvas: &Canvas, cell: u32) -> String {
    let mut out = String::new();
    for cy in (0..canvas.height()).step_by(cell as usize) {
        for cx in (0..canvas.width()).step_by(cell as usize) {
            let mut glyph = ' ';
            for y in cy..(cy + cell).min(canvas.height()) {
                for x in cx..(cx + cell).min(canvas.width()) {
                    match canvas.pixel(x, y) {
                        Some(color) if color.is_near(TRACE_COLOR, TRACE_COLOR_TOLERANCE) => glyph = '*',
                        Some(color) if color == OUTLINE_COLOR && glyph == ' ' => glyph = '#',
                        _ => {}
                    }
                }
            }
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}
