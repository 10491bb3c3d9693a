//! Fruit Helix entry point
//!
//! The browser build is driven from JavaScript through `fruit_helix::web`.
//! Natively this runs one level headless with the autopilot steering and
//! prints how it went.
//!
//! Usage: `fruit-helix [level] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use fruit_helix::Game;
    use fruit_helix::consts::FRAME_DT;
    use fruit_helix::persistence::FileStore;
    use fruit_helix::sim::{GameEvent, GamePhase, steer};

    env_logger::init();
    log::info!("Fruit Helix (native) starting...");

    let mut args = std::env::args().skip(1);
    let level: u8 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let data_dir = std::env::var("FRUIT_HELIX_DATA").unwrap_or_else(|_| ".fruit-helix".into());
    let mut game = Game::new(FileStore::new(data_dir), seed);
    log::info!("{} level(s) unlocked", game.unlocked_levels());

    if let Err(e) = game.start_level(level) {
        eprintln!("Cannot start: {}", e);
        std::process::exit(1);
    }

    let step = game.settings().keyboard_rotation_step;
    // Generous cap: the countdown ends any level well before this
    let max_frames = 60 * 60 * 5;
    for _ in 0..max_frames {
        let intent = steer(game.session(), step);
        game.set_rotation_intent(intent);
        game.update(FRAME_DT);

        for event in game.drain_events() {
            match event {
                GameEvent::FruitCollected(kind) => log::info!("{}", kind.powerup_message()),
                GameEvent::GapPassed { .. } | GameEvent::Bounced { .. } => log::debug!("{:?}", event),
                _ => log::info!("{:?}", event),
            }
        }

        if game.phase() != GamePhase::Playing {
            break;
        }
    }

    let snap = game.snapshot();
    println!("Level {} ({})", snap.level, snap.level_name);
    match (snap.completion, snap.game_over) {
        (Some(done), _) => {
            println!(
                "Complete! score {} + time bonus {} = {}",
                done.score, done.time_bonus, done.final_score
            );
            if done.has_next {
                println!("Level {} unlocked", done.level + 1);
            }
        }
        (None, Some(reason)) => println!("Game over: {} (score {})", reason.as_str(), snap.score),
        (None, None) => println!("Stopped on floor {} of {}", snap.current_floor, snap.total_floors),
    }
    println!(
        "Lives {}, {}s left, {} level(s) unlocked",
        snap.lives,
        snap.time_remaining_secs,
        game.unlocked_levels()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is fruit_helix::web::wasm_start, this is just to satisfy the compiler
}
