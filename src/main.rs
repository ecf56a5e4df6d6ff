//! Catch the Stars headless demo
//!
//! Plays a scripted session against the in-memory frame buffer and prints the
//! last frame as ASCII art.
//!
//! Usage: `catch-the-stars [seed] [tuning.json]`

use std::error::Error;

use catch_the_stars::consts::{FRAME_MS, SCREEN_HEIGHT, SCREEN_WIDTH};
use catch_the_stars::platform::mock::{RecordingMusic, RecordingTone, ScriptedButton};
use catch_the_stars::platform::{Atlas, Bitmap, MonoFrameBuffer, Sprite, SpriteSheet};
use catch_the_stars::{Game, PlayPhase, Scene, Settings, Tuning};

type DemoGame = Game<MonoFrameBuffer, ScriptedButton, RecordingTone, RecordingMusic>;

/// Frames to hold the button for each kind of press
const SHORT_HOLD: usize = 2;
const LONG_HOLD: usize = 10;

/// Give up after this many frames (about five minutes of play)
const MAX_FRAMES: usize = 9000;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse::<u64>()?,
        None => 2024,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
        None => Tuning::default(),
    };
    log::info!("Catch the Stars demo, seed {}", seed);

    let mut game = Game::new(
        tuning,
        Settings::default(),
        demo_atlas()?,
        seed,
        MonoFrameBuffer::default_size(),
        ScriptedButton::new(),
        RecordingTone::default(),
        RecordingMusic::default(),
    );
    game.boot();

    let mut now = 0;
    now = wait(&mut game, now, 10);
    // Splash -> menu -> "Start Game"
    now = press(&mut game, now, SHORT_HOLD);
    now = press(&mut game, now, LONG_HOLD);
    now = wait(&mut game, now, 20);
    // Two instruction screens, then "Ready?"
    now = press(&mut game, now, SHORT_HOLD);
    now = press(&mut game, now, SHORT_HOLD);
    now = press(&mut game, now, LONG_HOLD);

    let mut shots = 0;
    while game.frames() < MAX_FRAMES as u64 {
        match game.director().scene() {
            Scene::Playing(PlayPhase::Aiming) => {
                // Vary the aim and let the power bar move a little between shots
                for _ in 0..(shots % 5) {
                    now = press(&mut game, now, SHORT_HOLD);
                }
                now = wait(&mut game, now, 12 * (1 + shots % 3));
                now = press(&mut game, now, LONG_HOLD);
                shots += 1;
            }
            Scene::Playing(PlayPhase::LevelComplete) => {
                now = wait(&mut game, now, 30);
                now = press(&mut game, now, SHORT_HOLD);
            }
            Scene::GameOver => {
                now = wait(&mut game, now, 30);
                break;
            }
            _ => now = wait(&mut game, now, 1),
        }
    }

    println!("{}", game.display().to_ascii());
    match game.director().last_summary() {
        Some(summary) => println!(
            "{} score {} (best {}) after {} shots",
            summary.headline, summary.score, summary.high_score, shots
        ),
        None => println!("still playing after {} frames", game.frames()),
    }
    println!(
        "{} frames, {} beeps, {} tunes",
        game.frames(),
        game.tone().plays(),
        game.music().calls().len()
    );
    Ok(())
}

fn wait(game: &mut DemoGame, now: u64, frames: usize) -> u64 {
    game.run_frames(now, FRAME_MS, frames)
}

/// Hold the button for `hold` frames, then release it
fn press(game: &mut DemoGame, now: u64, hold: usize) -> u64 {
    game.button_mut().hold(hold).release(1);
    game.run_frames(now, FRAME_MS, hold + 1)
}

/// Placeholder art so the demo runs without image files
fn demo_atlas() -> Result<Atlas, Box<dyn Error>> {
    let splash = splash_bitmap().ok_or("splash bitmap has the wrong size")?;
    let critter = |rows: [&[&str]; 2]| SpriteSheet::new(rows.iter().map(|r| Bitmap::from_rows(r)).collect());

    Ok(Atlas::new()
        .with(Sprite::Splash, SpriteSheet::single(splash))
        .with(
            Sprite::Bird,
            critter([&["#...#", ".#.#.", "..#.."], &["..#..", ".#.#.", "#...#"]]),
        )
        .with(
            Sprite::Bird3,
            critter([&["#...#", ".###.", "..#.."], &["..#..", ".###.", "#...#"]]),
        )
        .with(
            Sprite::Cat,
            critter([&["#..#...", "####..#", ".#####.", ".#..#.."], &["#..#...", "####..#", ".#####.", "#....#."]]),
        )
        .with(
            Sprite::Dog,
            critter([&["##.....", ".######", ".######", ".#...#."], &["##.....", ".######", ".######", "#.....#"]]),
        ))
}

/// Framed screen with a field of dots
fn splash_bitmap() -> Option<Bitmap> {
    let stride = SCREEN_WIDTH.div_ceil(8) as usize;
    let mut data = vec![0u8; stride * SCREEN_HEIGHT as usize];
    for y in 0..SCREEN_HEIGHT as usize {
        for x in 0..SCREEN_WIDTH as usize {
            let edge = x == 0 || y == 0 || x == SCREEN_WIDTH as usize - 1 || y == SCREEN_HEIGHT as usize - 1;
            let dot = x % 9 == 4 && y % 7 == 3;
            if edge || dot {
                data[y * stride + x / 8] |= 0x80 >> (x % 8);
            }
        }
    }
    Bitmap::new(SCREEN_WIDTH, SCREEN_HEIGHT, data)
}
