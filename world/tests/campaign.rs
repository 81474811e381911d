use gremlins_core::{
    CampaignError, CampaignSettings, CellCoord, Command, Direction, Event, FireKey, FrameInput,
    GameStatus, LayoutError, LevelProgress, LevelSettings, Outcome, PixelPoint, GRID_COLUMNS,
    GRID_ROWS, RESTART_DELAY_FRAMES,
};
use gremlins_world::{self as world, query, Game};

/// Renders a stone-bordered layout with the listed `(column, row, symbol)` cells.
fn layout(cells: &[(u32, u32, char)]) -> String {
    let mut rows: Vec<Vec<char>> = (0..GRID_ROWS)
        .map(|row| {
            (0..GRID_COLUMNS)
                .map(|column| {
                    if row == 0 || column == 0 || row == GRID_ROWS - 1 || column == GRID_COLUMNS - 1
                    {
                        'X'
                    } else {
                        ' '
                    }
                })
                .collect()
        })
        .collect();
    for &(column, row, symbol) in cells {
        rows[row as usize][column as usize] = symbol;
    }
    rows.iter()
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn level(layout: String) -> LevelSettings {
    LevelSettings {
        layout,
        wizard_cooldown: 1.0,
        enemy_cooldown: 10.0,
    }
}

fn start(lives: u32, levels: Vec<LevelSettings>) -> (Game, Vec<Event>) {
    let mut events = Vec::new();
    let game = Game::start(CampaignSettings { lives, levels }, 7, &mut events)
        .expect("campaign starts");
    (game, events)
}

fn tick(game: &mut Game, input: FrameInput, events: &mut Vec<Event>) {
    world::apply(game, Command::Tick { input }, events);
}

fn exit_beside_entrance() -> String {
    layout(&[(30, 31, 'W'), (31, 31, 'E')])
}

/// Wizard boxed in with a gremlin directly to its east.
fn gremlin_beside_entrance() -> String {
    layout(&[
        (1, 1, 'W'),
        (2, 1, 'G'),
        (3, 1, 'X'),
        (1, 2, 'X'),
        (2, 2, 'X'),
        (34, 31, 'E'),
    ])
}

#[test]
fn empty_campaigns_are_rejected() {
    let mut events = Vec::new();
    let error = Game::start(
        CampaignSettings {
            lives: 3,
            levels: Vec::new(),
        },
        1,
        &mut events,
    )
    .expect_err("no levels");
    assert_eq!(error, CampaignError::NoLevels);

    let error = Game::start(
        CampaignSettings {
            lives: 0,
            levels: vec![level(exit_beside_entrance())],
        },
        1,
        &mut events,
    )
    .expect_err("no lives");
    assert_eq!(error, CampaignError::NoLives);
    assert!(events.is_empty());
}

#[test]
fn reaching_the_exit_starts_the_next_level() {
    let (mut game, events) = start(3, vec![level(exit_beside_entrance()); 2]);
    assert_eq!(
        events,
        vec![Event::LevelStarted {
            progress: LevelProgress {
                number: 1,
                total: 2
            }
        }]
    );

    let mut events = Vec::new();
    for _ in 0..10 {
        tick(&mut game, FrameInput::moving(Direction::East), &mut events);
    }
    assert_eq!(
        query::player(&game).map(|player| player.position),
        Some(PixelPoint::new(620, 620))
    );

    assert!(game.check_tile_event(&mut events));
    assert_eq!(query::progress(&game).number, 2);
    assert_eq!(
        query::player(&game).map(|player| player.position),
        Some(PixelPoint::new(600, 620))
    );
    assert!(!game.check_tile_event(&mut events));
}

#[test]
fn exit_on_the_last_level_wins() {
    let (mut game, _) = start(3, vec![level(exit_beside_entrance())]);
    let mut events = Vec::new();
    for _ in 0..11 {
        tick(&mut game, FrameInput::moving(Direction::East), &mut events);
    }

    assert!(events.contains(&Event::ExitReached {
        cell: CellCoord::new(31, 31)
    }));
    assert_eq!(
        events.last(),
        Some(&Event::GameEnded {
            outcome: Outcome::Won
        })
    );
    assert_eq!(query::status(&game), GameStatus::Finished(Outcome::Won));
}

#[test]
fn invalid_layouts_are_skipped() {
    let broken = layout(&[(30, 31, 'W')]);
    let (game, events) = start(3, vec![level(broken), level(exit_beside_entrance())]);

    assert_eq!(
        events,
        vec![
            Event::LayoutRejected {
                number: 1,
                reason: LayoutError::MissingExit
            },
            Event::LevelStarted {
                progress: LevelProgress {
                    number: 2,
                    total: 2
                }
            },
        ]
    );
    assert_eq!(query::status(&game), GameStatus::Playing);
}

#[test]
fn campaign_of_invalid_layouts_is_won_immediately() {
    let (game, events) = start(3, vec![level(String::from("X"))]);
    assert_eq!(
        events.last(),
        Some(&Event::GameEnded {
            outcome: Outcome::Won
        })
    );
    assert_eq!(query::status(&game), GameStatus::Finished(Outcome::Won));
    assert!(query::player(&game).is_none());
}

#[test]
fn weapon_fires_once_per_cooldown() {
    let (mut game, _) = start(3, vec![level(layout(&[(1, 1, 'W'), (34, 31, 'E')]))]);
    let mut events = Vec::new();
    for _ in 0..60 {
        tick(&mut game, FrameInput::firing(FireKey::Primary), &mut events);
    }
    let fired = |events: &[Event]| {
        events
            .iter()
            .filter(|event| matches!(event, Event::ProjectileFired { .. }))
            .count()
    };
    assert_eq!(fired(&events), 1);

    tick(&mut game, FrameInput::firing(FireKey::Primary), &mut events);
    assert_eq!(fired(&events), 2);
}

#[test]
fn powerup_keys_do_nothing_without_a_powerup() {
    let (mut game, _) = start(3, vec![level(layout(&[(1, 1, 'W'), (34, 31, 'E')]))]);
    let mut events = Vec::new();
    tick(&mut game, FrameInput::firing(FireKey::Thunder), &mut events);
    tick(&mut game, FrameInput::firing(FireKey::Hydro), &mut events);
    assert!(query::projectile_view(&game).iter().next().is_none());
}

#[test]
fn fireball_cancels_slimeball() {
    let mut cells = vec![(1, 1, 'W'), (6, 1, 'G'), (7, 1, 'X'), (34, 31, 'E')];
    cells.extend((1..=7).map(|column| (column, 2, 'X')));
    let (mut game, _) = start(3, vec![level(layout(&cells))]);

    let mut events = Vec::new();
    tick(&mut game, FrameInput::firing(FireKey::Primary), &mut events);
    assert_eq!(query::projectile_view(&game).iter().count(), 2);

    for _ in 0..19 {
        tick(&mut game, FrameInput::default(), &mut events);
    }
    assert!(query::projectile_view(&game).iter().next().is_none());
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::EnemyKilled { .. } | Event::PlayerHit { .. })));
}

#[test]
fn fireball_kills_gremlin_and_it_respawns_far_away() {
    let mut cells = vec![(1, 1, 'W'), (12, 1, 'G'), (13, 1, 'X'), (34, 31, 'E')];
    cells.extend((1..=13).map(|column| (column, 2, 'X')));
    let (mut game, _) = start(3, vec![level(layout(&cells))]);

    let mut events = Vec::new();
    for frame in 0..240 {
        let input = if frame == 0 || frame == 60 {
            FrameInput::firing(FireKey::Primary)
        } else {
            FrameInput::default()
        };
        tick(&mut game, input, &mut events);
        if events
            .iter()
            .any(|event| matches!(event, Event::EnemyKilled { .. }))
        {
            break;
        }
    }

    let kills: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::EnemyKilled { enemy, respawn } => Some((*enemy, *respawn)),
            _ => None,
        })
        .collect();
    assert_eq!(kills.len(), 1);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::PlayerHit { .. })));
    assert!(query::projectile_view(&game).iter().next().is_none());

    let (enemy, respawn) = kills[0];
    let wizard = query::player(&game).expect("level is loaded").position;
    assert_eq!(wizard, PixelPoint::new(20, 20));
    assert!(respawn.manhattan_distance(wizard) >= 200);

    let enemies = query::enemy_view(&game);
    let gremlin = enemies
        .iter()
        .find(|snapshot| snapshot.id == enemy)
        .expect("gremlin survives as a respawn");
    assert!(gremlin.position.manhattan_distance(respawn) <= 2);
    let cell = respawn.cell().expect("respawn inside the grid");
    assert!(query::level(&game).is_some_and(|level| level.grid().is_empty(cell)));
}

#[test]
fn lives_carry_over_to_the_next_level() {
    let (mut game, _) = start(
        3,
        vec![level(gremlin_beside_entrance()), level(exit_beside_entrance())],
    );

    let mut events = Vec::new();
    for _ in 0..300 {
        tick(&mut game, FrameInput::default(), &mut events);
        if events
            .iter()
            .any(|event| matches!(event, Event::PlayerHit { .. }))
        {
            break;
        }
    }
    assert_eq!(query::hud(&game).map(|hud| hud.lives), Some(2));

    world::apply(&mut game, Command::AdvanceLevel, &mut events);
    assert_eq!(query::status(&game), GameStatus::Playing);
    assert_eq!(query::progress(&game).number, 2);
    let hud = query::hud(&game).expect("level is loaded");
    assert_eq!(hud.lives, 2);
    assert_eq!(hud.progress.number, 2);
    assert_eq!(
        query::player(&game).map(|player| player.position),
        Some(PixelPoint::new(600, 620))
    );
}

#[test]
fn gremlin_in_a_corridor_takes_every_life() {
    let (mut game, _) = start(3, vec![level(gremlin_beside_entrance())]);

    let mut events = Vec::new();
    for _ in 0..600 {
        tick(&mut game, FrameInput::default(), &mut events);
        if query::status(&game) != GameStatus::Playing {
            break;
        }
    }

    let hits: Vec<u32> = events
        .iter()
        .filter_map(|event| match event {
            Event::PlayerHit { lives_remaining } => Some(*lives_remaining),
            _ => None,
        })
        .collect();
    assert_eq!(hits, vec![2, 1, 0]);
    assert_eq!(query::status(&game), GameStatus::Finished(Outcome::Lost));
    assert_eq!(query::hud(&game).map(|hud| hud.lives), Some(0));
}

#[test]
fn restart_waits_for_the_delay() {
    let (mut game, _) = start(2, vec![level(exit_beside_entrance())]);
    let mut events = Vec::new();
    world::apply(
        &mut game,
        Command::EndGame {
            outcome: Outcome::Lost,
        },
        &mut events,
    );
    assert_eq!(query::status(&game), GameStatus::Finished(Outcome::Lost));

    world::apply(&mut game, Command::Restart, &mut events);
    assert_eq!(query::status(&game), GameStatus::Finished(Outcome::Lost));

    for _ in 0..RESTART_DELAY_FRAMES {
        tick(&mut game, FrameInput::default(), &mut events);
    }
    assert!(query::restart_ready(&game));

    events.clear();
    world::apply(&mut game, Command::Restart, &mut events);
    assert_eq!(query::status(&game), GameStatus::Playing);
    assert_eq!(query::progress(&game).number, 1);
    assert_eq!(query::hud(&game).map(|hud| hud.lives), Some(2));
}

#[test]
fn advance_level_skips_ahead() {
    let (mut game, _) = start(3, vec![level(exit_beside_entrance()); 3]);
    let mut events = Vec::new();
    world::apply(&mut game, Command::AdvanceLevel, &mut events);
    assert_eq!(query::progress(&game).number, 2);
    world::apply(&mut game, Command::AdvanceLevel, &mut events);
    world::apply(&mut game, Command::AdvanceLevel, &mut events);
    assert_eq!(query::status(&game), GameStatus::Finished(Outcome::Won));
}

#[test]
fn hud_reports_weapon_cooldowns() {
    let (mut game, _) = start(3, vec![level(layout(&[(1, 1, 'W'), (34, 31, 'E')]))]);
    let mut events = Vec::new();
    tick(&mut game, FrameInput::firing(FireKey::Primary), &mut events);

    let hud = query::hud(&game).expect("level is loaded");
    assert_eq!(hud.lives, 3);
    assert!(hud.powerups.is_empty());
    assert_eq!(hud.cooldowns.len(), 1);
    assert_eq!(hud.cooldowns[0].key, FireKey::Primary);
    assert!(hud.cooldowns[0].fraction > 0.9);
}
