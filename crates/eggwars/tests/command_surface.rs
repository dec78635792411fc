//! The embedding-facing surface: commands and scoreboard rendering,
//! run against a real manager with no-op collaborators.

use std::sync::Arc;

use eggwars::{dispatch, render_scoreboard, Command, ShopCatalog};
use eggwars_arena::{Arena, ArenaSettings, GameManager, GameState, Team, COUNTDOWN_SECONDS};
use eggwars_core::{
    Aabb, BlockKind, BlockPos, DropError, GameMode, Notice, PlayerConnector, PlayerId,
    ResourceKind, TeamColor, Title, Vec3, World, TICKS_PER_SECOND,
};
use eggwars_stats::{MemoryStatsStore, StatsStore};

struct NullWorld;

impl World for NullWorld {
    fn set_block(&self, _pos: BlockPos, _block: BlockKind) {}
    fn drop_resource(&self, _pos: Vec3, _kind: ResourceKind) -> Result<(), DropError> {
        Ok(())
    }
    fn resource_item_count(&self, _region: Aabb) -> usize {
        0
    }
    fn clear_dropped_resources(&self) {}
}

struct NullConnector;

impl PlayerConnector for NullConnector {
    fn teleport(&self, _player: PlayerId, _pos: Vec3) {}
    fn set_mode(&self, _player: PlayerId, _mode: GameMode) {}
    fn restore_vitals(&self, _player: PlayerId) {}
    fn clear_inventory(&self, _player: PlayerId) {}
    fn give_resource(&self, _player: PlayerId, _kind: ResourceKind, _count: u32) {}
    fn give_basic_kit(&self, _player: PlayerId) {}
    fn send_notice(&self, _player: PlayerId, _notice: Notice) {}
    fn send_title(&self, _player: PlayerId, _title: Title) {}
}

fn manager_with_arena(stats: Arc<MemoryStatsStore>) -> GameManager {
    let teams = vec![
        Team::new(
            "red".into(),
            TeamColor::Red,
            Vec3::new(50.0, 64.0, 0.0),
            BlockPos { x: 50, y: 65, z: 5 },
            Vec::new(),
        ),
        Team::new(
            "blue".into(),
            TeamColor::Blue,
            Vec3::new(-50.0, 64.0, 0.0),
            BlockPos { x: -50, y: 65, z: 5 },
            Vec::new(),
        ),
    ];
    let arena = Arena::new(
        ArenaSettings {
            name: "atoll".into(),
            min_players: 2,
            max_players: 4,
            lobby_spawn: Vec3::new(0.0, 80.0, 0.0),
            spectator_spawn: Vec3::new(0.0, 90.0, 0.0),
        },
        teams,
        Arc::new(NullWorld),
        Arc::new(NullConnector),
        stats,
    );
    let mut manager = GameManager::new();
    manager.add_arena(arena, Vec::new());
    manager
}

fn run_countdown(manager: &mut GameManager) {
    for _ in 0..COUNTDOWN_SECONDS as u64 * TICKS_PER_SECOND {
        manager.tick();
    }
}

#[test]
fn test_join_leave_and_list_speak_to_the_player() {
    let stats = Arc::new(MemoryStatsStore::new());
    let mut manager = manager_with_arena(stats.clone());
    let shop = ShopCatalog::builtin();
    let p = PlayerId(1);

    let out = dispatch(
        &mut manager,
        stats.as_ref(),
        &shop,
        p,
        false,
        &Command::Join { arena: "atoll".into() },
    );
    assert_eq!(out.lines, vec!["✓ Joined arena 'atoll'.".to_string()]);

    let out = dispatch(
        &mut manager,
        stats.as_ref(),
        &shop,
        p,
        false,
        &Command::Join { arena: "atoll".into() },
    );
    assert!(out.lines[0].contains("already in an arena"));

    let out = dispatch(&mut manager, stats.as_ref(), &shop, p, false, &Command::List);
    assert_eq!(out.lines, vec!["atoll — waiting (1/4)".to_string()]);

    let out = dispatch(&mut manager, stats.as_ref(), &shop, p, false, &Command::Leave);
    assert_eq!(out.lines, vec!["✓ You left the arena.".to_string()]);

    let out = dispatch(&mut manager, stats.as_ref(), &shop, p, false, &Command::Leave);
    assert!(out.lines[0].contains("not in any arena"));
}

#[test]
fn test_admin_commands_are_gated() {
    let stats = Arc::new(MemoryStatsStore::new());
    let mut manager = manager_with_arena(stats.clone());
    let shop = ShopCatalog::builtin();
    let p = PlayerId(1);

    let denied = dispatch(&mut manager, stats.as_ref(), &shop, p, false, &Command::Reload);
    assert!(denied.lines[0].contains("permission"));
    assert!(!denied.reload_requested);

    let allowed = dispatch(&mut manager, stats.as_ref(), &shop, p, true, &Command::Reload);
    assert!(allowed.reload_requested);

    let stub = dispatch(
        &mut manager,
        stats.as_ref(),
        &shop,
        p,
        true,
        &Command::Create { arena: "skyring".into() },
    );
    assert!(stub.lines[0].contains("catalog file"));
}

#[test]
fn test_stats_prefer_the_live_session() {
    let stats = Arc::new(MemoryStatsStore::new());
    stats.save(
        PlayerId(1),
        eggwars_core::PlayerStats {
            kills: 3,
            deaths: 1,
            wins: 2,
        },
    );
    let mut manager = manager_with_arena(stats.clone());
    let shop = ShopCatalog::builtin();

    // Outside an arena the store is the source.
    let out = dispatch(
        &mut manager,
        stats.as_ref(),
        &shop,
        PlayerId(1),
        false,
        &Command::Stats,
    );
    assert_eq!(out.lines, vec!["Kills: 3", "Deaths: 1", "Wins: 2"]);

    // A session loads the same counters and carries them live.
    manager.join_arena(PlayerId(1), "atoll").unwrap();
    let out = dispatch(
        &mut manager,
        stats.as_ref(),
        &shop,
        PlayerId(1),
        false,
        &Command::Stats,
    );
    assert_eq!(out.lines, vec!["Kills: 3", "Deaths: 1", "Wins: 2"]);
}

#[test]
fn test_shop_command_lists_the_catalog() {
    let stats = Arc::new(MemoryStatsStore::new());
    let mut manager = manager_with_arena(stats.clone());
    let shop = ShopCatalog::builtin();

    let out = dispatch(
        &mut manager,
        stats.as_ref(),
        &shop,
        PlayerId(1),
        false,
        &Command::Shop,
    );
    assert!(out.lines.iter().any(|l| l.contains("Blocks")));
    assert!(out.lines.iter().any(|l| l.contains("Stone Sword")));
}

#[test]
fn test_scoreboard_follows_the_arena_state() {
    let stats = Arc::new(MemoryStatsStore::new());
    let mut manager = manager_with_arena(stats.clone());

    manager.join_arena(PlayerId(1), "atoll").unwrap();
    let board = render_scoreboard(manager.arena("atoll").unwrap(), PlayerId(1));
    assert_eq!(
        board,
        vec!["Map: atoll", "Players: 1/4", "Waiting for players..."]
    );

    manager.join_arena(PlayerId(2), "atoll").unwrap();
    let board = render_scoreboard(manager.arena("atoll").unwrap(), PlayerId(1));
    assert_eq!(board[2], format!("Starting in: {COUNTDOWN_SECONDS}s"));

    run_countdown(&mut manager);
    let arena = manager.arena("atoll").unwrap();
    assert_eq!(arena.state(), GameState::Active);
    let board = render_scoreboard(arena, PlayerId(1));
    assert_eq!(board, vec!["red ✓ [1] ← YOU", "blue ✓ [1]"]);

    let board = render_scoreboard(arena, PlayerId(2));
    assert_eq!(board, vec!["red ✓ [1]", "blue ✓ [1] ← YOU"]);

    // A decided round renders nothing while the outro runs.
    let blue_egg = BlockPos { x: -50, y: 65, z: 5 };
    let arena = manager.arena_mut("atoll").unwrap();
    arena.try_break_block(PlayerId(1), blue_egg.center());
    arena.handle_fatal_damage(PlayerId(2), Some(PlayerId(1)));
    assert_eq!(arena.state(), GameState::Ending);
    assert!(render_scoreboard(arena, PlayerId(1)).is_empty());
}
