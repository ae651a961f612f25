//! Demo producer: a few threads logging nested groups the way a game loop
//! would, so the console has something to show without a log file.

use std::thread;
use std::time::Duration;
use visual_console_layout::ConsoleHandle;
use visual_console_model::{FontWeight, LogStyleSpec};

/// One round of the scripted session
fn load_level(handle: &ConsoleHandle, round: usize) {
    let level = format!("level-{round}");
    handle.open_group_with_preset(level.as_str(), format!("Loading level {round}"), "c");

    handle.open_group_default("assets", "Assets");
    for asset in ["terrain", "player", "enemies"] {
        handle.log_with_preset(format!("loaded {asset}"), "a");
    }
    if round % 2 == 1 {
        handle.warn("texture 'sky' missing, using fallback");
    }
    handle.close_group("assets");

    handle.open_group(
        "spawn",
        "Spawning",
        &LogStyleSpec::default()
            .text_color("black")
            .background_color("gold")
            .font_weight(FontWeight::Bold),
    );
    for i in 0..(round % 4 + 1) {
        handle.log_with_context(
            format!("enemy #{i} at ({}, {})", i * 3, round),
            &LogStyleSpec::default().background_color("steelblue"),
            "Spawner",
        );
    }
    handle.close_group("spawn");

    if round % 5 == 4 {
        handle.error(format!("level {round} failed to validate"));
    }
    if round % 7 == 6 {
        handle.assert_log(format!("spawn count drifted in round {round}"));
    }
    handle.close_group(level.as_str());
}

/// Spawn the demo producers
pub fn spawn(handle: ConsoleHandle) {
    let scripted = handle.clone();
    thread::spawn(move || {
        for round in 0.. {
            load_level(&scripted, round);
            thread::sleep(Duration::from_millis(1500));
        }
    });

    // A second producer logging top-level ticks concurrently
    thread::spawn(move || {
        for frame in 0u64.. {
            thread::sleep(Duration::from_millis(700));
            handle.log_with_preset(format!("frame {frame}"), "k");
        }
    });
}
