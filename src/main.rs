//! Tile Runner headless host
//!
//! Plays a scripted run through the built-in levels and logs what happens.
//! Usage: `tile-runner [tuning.json]` (set `RUST_LOG=debug` for gameplay
//! events).

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, Result};

#[cfg(not(target_arch = "wasm32"))]
use tile_runner::consts::TILE_SIZE;
#[cfg(not(target_arch = "wasm32"))]
use tile_runner::sim::{Entity, Theme};
#[cfg(not(target_arch = "wasm32"))]
use tile_runner::{AsciiLevels, GameEvent, GamePhase, GameState, TickInput, Tuning, tick};

/// Host frame time (60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const FRAME_MS: f32 = 1000.0 / 60.0;

/// Give up after five simulated minutes
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u64 = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
const OVERWORLD: &str = "
    ..................................................
    ..................................................
    ..................................................
    ..................................................
    ...................?..............................
    ..................................................
    ...............B?B?B.............o.o.o............
    ..................................................
    ...................................===............
    .........................[]....................G..
    .P.........E.............[]......E.........E...G..
    ##################################################
    ##################################################
";

#[cfg(not(target_arch = "wasm32"))]
const UNDERGROUND: &str = "
    BBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB
    B......................................B
    B......................................B
    B.......o.o.o..........................B
    B......BBBBBBB.........?..?............B
    B......................................B
    B..........................o...........B
    B.........................===.......G..B
    B.P.........E...........E...........G..B
    ########################################
    ########################################
";

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    env_logger::init();
    log::info!("Tile Runner (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading tuning file {path}"))?;
            Tuning::from_json(&json).with_context(|| format!("parsing tuning file {path}"))?
        }
        None => Tuning::default(),
    };

    let levels = AsciiLevels::new([
        (Theme::overworld("World 1-1"), OVERWORLD),
        (Theme::underground("World 1-2"), UNDERGROUND),
    ])
    .context("parsing built-in levels")?;

    let mut state = GameState::new(0x5EED, tuning);
    state.start_game(&levels);

    let mut deaths = 0u32;
    let mut frame = 0u64;
    while frame < MAX_FRAMES {
        let input = scripted_input(&state, frame);
        tick(&mut state, &levels, &input, FRAME_MS);
        frame += 1;

        for event in &state.events {
            match event {
                GameEvent::ParticleBurst(_) => {}
                GameEvent::ScoreGained { amount } => {
                    log::debug!("+{amount} (score {})", state.score)
                }
                other => log::info!("frame {frame}: {other:?}"),
            }
        }

        match state.phase {
            GamePhase::GameWon => break,
            GamePhase::GameOver if deaths < 3 => {
                deaths += 1;
                log::info!("retrying level {} (attempt {})", state.level_index, deaths + 1);
                state.restart(&levels);
            }
            GamePhase::GameOver => break,
            _ => {}
        }
    }

    let summary = serde_json::json!({
        "phase": state.phase,
        "level": state.level_index,
        "score": state.score,
        "frames": frame,
        "deaths": deaths,
        "player": state.player.body.pos,
        "camera_x": state.camera.x(),
        "entities_left": state.entities.len(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `tick` themselves
}

/// Run right, hopping over enemies and walls just ahead
#[cfg(not(target_arch = "wasm32"))]
fn scripted_input(state: &GameState, frame: u64) -> TickInput {
    let body = &state.player.body;
    let ahead = body.pos.x + body.size.x + 60.0;
    let threat = state.live_entities().any(|e| {
        let other = e.body();
        matches!(e, Entity::Enemy(_))
            && other.pos.x > body.pos.x
            && other.pos.x < ahead
    });
    let wall = state.tiles().is_some_and(|tiles| {
        let row = (body.pos.y / TILE_SIZE).floor() as i32;
        let col = (ahead / TILE_SIZE).floor() as i32;
        tiles.get(row, col).is_solid()
    });

    TickInput {
        move_left: false,
        move_right: true,
        jump: threat || wall || frame % 90 == 0,
    }
}
