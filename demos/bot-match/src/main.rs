//! A scripted two-team match against in-memory collaborators.
//!
//! Four bots join one arena, the countdown runs, red destroys blue's
//! egg, blue is wiped out, and the arena resets itself — all visible as
//! structured log output. The driver runs faster than the real 20 Hz
//! cadence so the whole match takes a few seconds of wall time.
//!
//! Run with: `RUST_LOG=info cargo run -p bot-match`

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use eggwars::prelude::*;
use eggwars_core::{Aabb, DropError, PlayerStats, Title};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// In-memory collaborators
// ---------------------------------------------------------------------------

#[derive(Default)]
struct DemoWorld {
    blocks: Mutex<HashMap<BlockPos, BlockKind>>,
    dropped: Mutex<u64>,
}

impl World for DemoWorld {
    fn set_block(&self, pos: BlockPos, block: BlockKind) {
        info!(?pos, ?block, "world: set block");
        self.blocks.lock().unwrap().insert(pos, block);
    }

    fn drop_resource(&self, _pos: Vec3, kind: ResourceKind) -> Result<(), DropError> {
        *self.dropped.lock().unwrap() += 1;
        info!(kind = kind.display_name(), "world: resource dropped");
        Ok(())
    }

    fn resource_item_count(&self, _region: Aabb) -> usize {
        0
    }

    fn clear_dropped_resources(&self) {
        let cleared = std::mem::take(&mut *self.dropped.lock().unwrap());
        info!(cleared, "world: dropped resources cleared");
    }
}

struct LoggingConnector;

impl PlayerConnector for LoggingConnector {
    fn teleport(&self, player: PlayerId, pos: Vec3) {
        info!(%player, %pos, "teleport");
    }
    fn set_mode(&self, player: PlayerId, mode: GameMode) {
        info!(%player, ?mode, "mode change");
    }
    fn restore_vitals(&self, _player: PlayerId) {}
    fn clear_inventory(&self, _player: PlayerId) {}
    fn give_resource(&self, player: PlayerId, kind: ResourceKind, count: u32) {
        info!(%player, kind = kind.display_name(), count, "resource given");
    }
    fn give_basic_kit(&self, player: PlayerId) {
        info!(%player, "basic kit given");
    }
    fn send_notice(&self, player: PlayerId, notice: Notice) {
        info!(%player, "{}", notice.text);
    }
    fn send_title(&self, player: PlayerId, title: Title) {
        info!(%player, "{} / {}", title.title, title.subtitle);
    }
}

// ---------------------------------------------------------------------------
// The scripted match
// ---------------------------------------------------------------------------

const RED_EGG: BlockPos = BlockPos { x: 50, y: 65, z: 5 };
const BLUE_EGG: BlockPos = BlockPos { x: -50, y: 65, z: 5 };

fn build_manager(stats: Arc<MemoryStatsStore>) -> GameManager {
    let teams = vec![
        eggwars_arena::Team::new(
            "red".into(),
            TeamColor::Red,
            Vec3::new(50.0, 64.0, 0.0),
            RED_EGG,
            Vec::new(),
        ),
        eggwars_arena::Team::new(
            "blue".into(),
            TeamColor::Blue,
            Vec3::new(-50.0, 64.0, 0.0),
            BLUE_EGG,
            Vec::new(),
        ),
    ];
    let arena = Arena::new(
        eggwars_arena::ArenaSettings {
            name: "atoll".into(),
            min_players: 4,
            max_players: 4,
            lobby_spawn: Vec3::new(0.0, 80.0, 0.0),
            spectator_spawn: Vec3::new(0.0, 90.0, 0.0),
        },
        teams,
        Arc::new(DemoWorld::default()),
        Arc::new(LoggingConnector),
        stats,
    );

    let mut manager = GameManager::new();
    manager.add_arena(
        arena,
        vec![
            (Vec3::new(48.0, 64.0, 0.0), ResourceKind::Iron),
            (Vec3::new(-48.0, 64.0, 0.0), ResourceKind::Iron),
            (Vec3::new(0.0, 70.0, 0.0), ResourceKind::Diamond),
        ],
    );
    manager
}

/// Injects the bots' actions at fixed points on the raw-tick timeline.
/// The countdown occupies the first 600 ticks (30 s at 20 ticks/s).
fn script(manager: &mut GameManager, tick: u64) {
    let arena_name = "atoll";
    match tick {
        1 => {
            for bot in 1..=4u64 {
                if let Err(err) = manager.join_arena(PlayerId(bot), arena_name) {
                    info!(bot, %err, "join refused");
                }
            }
        }
        // Round is live; red bot 1 bridges toward blue.
        700 => {
            let arena = manager.arena_mut(arena_name).expect("arena exists");
            arena.try_place_block(PlayerId(1), Vec3::new(10.0, 64.0, 0.0));
            arena.try_place_block(PlayerId(1), Vec3::new(11.0, 64.0, 0.0));
        }
        // Bot 1 reaches the blue island and cracks the egg.
        900 => {
            let arena = manager.arena_mut(arena_name).expect("arena exists");
            arena.try_break_block(PlayerId(1), BLUE_EGG.center());
        }
        // Blue's last stand fails.
        1000 => {
            let arena = manager.arena_mut(arena_name).expect("arena exists");
            arena.handle_fatal_damage(PlayerId(2), Some(PlayerId(1)));
        }
        1050 => {
            let arena = manager.arena_mut(arena_name).expect("arena exists");
            arena.handle_fatal_damage(PlayerId(4), Some(PlayerId(3)));
        }
        _ => {}
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let stats = Arc::new(MemoryStatsStore::new());
    let mut manager = build_manager(stats.clone());

    // 128 Hz fast-forwards the match; one driver tick is still one raw
    // game tick, so all in-game timings keep their proportions.
    let mut driver = TickDriver::with_rate(128);

    loop {
        let tick_info = driver.wait_for_tick().await;
        script(&mut manager, tick_info.tick);
        manager.tick();

        if let Some(arena) = manager.arena("atoll") {
            if tick_info.tick % 200 == 0 {
                for line in eggwars::render_scoreboard(arena, PlayerId(1)) {
                    info!(tick = tick_info.tick, "board | {line}");
                }
            }
            // The arena resets to waiting once the outro delay elapses.
            if tick_info.tick > 1100 && arena.state() == GameState::Waiting {
                break;
            }
        }
    }

    manager.shutdown();

    let snapshot: Vec<(PlayerId, PlayerStats)> = {
        let mut all: Vec<_> = stats.snapshot().into_iter().collect();
        all.sort_by_key(|(p, _)| p.0);
        all
    };
    for (player, stats) in snapshot {
        info!(
            %player,
            kills = stats.kills,
            deaths = stats.deaths,
            wins = stats.wins,
            "final record"
        );
    }
}
