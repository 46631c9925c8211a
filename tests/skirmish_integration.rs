//! Move order integration tests

use std::sync::Arc;

use grid_tactics::core::{EntityId, Side};
use grid_tactics::tactics::*;

fn open_level(width: u32, height: u32) -> Level {
    Level::new(Grid::new(width, height))
}

fn trooper(ap: i32) -> Arc<UnitType> {
    let attrs = UnitAttributes::uniform(3, 0, 0).opaque(Terrain::Wall).impassable(Terrain::Wall);
    let mut unit = UnitType::new("trooper", ap, attrs);
    unit.move_speed = 1.0;
    Arc::new(unit)
}

fn spawn(level: &mut Level, unit: Arc<UnitType>, at: (i32, i32), side: u8) -> EntityId {
    let id = level
        .spawn(unit, at.into(), Side(side), Box::new(AnimationController::instant()))
        .unwrap();
    level.on_setup();
    id
}

fn run_to_completion(level: &mut Level, action: &mut ActionMove, dt: f32) -> Vec<MaintenanceStatus> {
    let mut statuses = Vec::new();
    for _ in 0..1000 {
        level.think(dt);
        let status = action.maintain(level, dt);
        statuses.push(status);
        if status == MaintenanceStatus::Complete {
            break;
        }
    }
    statuses
}

#[test]
fn test_reachable_set_on_open_board() {
    let mut level = open_level(5, 5);
    let id = spawn(&mut level, trooper(3), (0, 0), 1);

    let mut action = ActionMove::new(id);
    assert!(action.prep(&mut level));

    let origin = Coordinate::new(0, 0);
    let mut expected: Vec<Coordinate> = (0..5)
        .flat_map(|y| (0..5).map(move |x| Coordinate::new(x, y)))
        .filter(|c| c.manhattan_distance(&origin) <= 3)
        .collect();
    expected.sort();

    // From a corner the distance-3 diamond is clipped to 10 cells
    assert_eq!(action.reachable(), expected);
    assert_eq!(expected.len(), 10);

    let mut highlighted = level.grid.highlighted(Highlight::REACHABLE);
    highlighted.sort();
    assert_eq!(highlighted, expected);
}

#[test]
fn test_commit_and_walk_spends_all_ap() {
    let mut level = open_level(5, 5);
    let id = spawn(&mut level, trooper(3), (0, 0), 1);

    let mut action = ActionMove::new(id);
    action.prep(&mut level);
    assert_eq!(action.mouse_click(&mut level, 2.5, 1.5), ActionCommit::StandardAction);

    let ent = level.entity(id).unwrap();
    assert_eq!(ent.path.len(), 3);
    assert_eq!(ent.path.back(), Some(&Coordinate::new(2, 1)));
    assert_eq!(ent.ap, 2);

    let statuses = run_to_completion(&mut level, &mut action, 0.25);
    assert_eq!(statuses.last(), Some(&MaintenanceStatus::Complete));

    let ent = level.entity(id).unwrap();
    assert_eq!(ent.cell(), Coordinate::new(2, 1));
    assert_eq!(ent.checkpoint(), Coordinate::new(2, 1));
    assert_eq!(ent.ap, 0);
    assert!(!ent.is_moving());
    assert_eq!(ent.animator.state(), AnimState::Ready);
    assert!(level.grid.highlighted(Highlight::REACHABLE).is_empty());
}

#[test]
fn test_click_out_of_range_is_rejected() {
    let mut level = open_level(5, 5);
    let id = spawn(&mut level, trooper(3), (0, 0), 1);

    let mut action = ActionMove::new(id);
    action.prep(&mut level);
    assert_eq!(action.mouse_click(&mut level, 4.5, 4.5), ActionCommit::NoAction);

    // Still prepared, nothing spent, a valid click still works
    let ent = level.entity(id).unwrap();
    assert_eq!(ent.ap, 3);
    assert!(!ent.is_moving());
    assert_eq!(action.state(), MoveState::Prepared);
    assert_eq!(action.mouse_click(&mut level, 1.0, 1.0), ActionCommit::StandardAction);
}

#[test]
fn test_click_outside_board_is_rejected() {
    let mut level = open_level(5, 5);
    let id = spawn(&mut level, trooper(3), (0, 0), 1);

    let mut action = ActionMove::new(id);
    action.prep(&mut level);
    assert_eq!(action.mouse_click(&mut level, -0.5, 0.0), ActionCommit::NoAction);
    assert_eq!(action.mouse_click(&mut level, 0.0, 7.0), ActionCommit::NoAction);
}

#[test]
fn test_full_vision_on_open_board() {
    let grid = Grid::new(5, 5);
    let unit = trooper(3);
    let visible = visible_from(&grid, Coordinate::new(2, 2), 3, |t| unit.attributes.concealment(t));
    assert_eq!(visible.len(), 25);
}

#[test]
fn test_adjacent_opaque_cell_shadows_far_side() {
    let mut grid = Grid::new(5, 5);
    grid.set_terrain(Coordinate::new(3, 2), Terrain::Wall);
    let unit = trooper(3);
    let visible = visible_from(&grid, Coordinate::new(2, 2), 3, |t| unit.attributes.concealment(t));

    let hidden: Vec<Coordinate> = [(4, 1), (4, 2), (4, 3)].into_iter().map(Coordinate::from).collect();
    for coord in &hidden {
        assert!(!visible.contains(&grid.to_vertex(*coord).unwrap()), "{:?} should be hidden", coord);
    }
    assert!(visible.contains(&grid.to_vertex(Coordinate::new(3, 2)).unwrap()));
    assert_eq!(visible.len(), 22);
}

#[test]
fn test_walking_reveals_enemy_and_signals_interrupt() {
    // Enemy sits behind a wall until the trooper rounds the corner
    let grid = Grid::from_rows(&[
        ".....",
        ".#...",
        ".#...",
        ".....",
    ])
    .unwrap();
    let mut level = Level::new(grid);
    let me = spawn(&mut level, trooper(6), (0, 0), 1);
    let enemy = spawn(&mut level, trooper(6), (2, 2), 2);
    assert!(level.visible_enemies(me).is_empty());

    let mut action = ActionMove::new(me);
    action.prep(&mut level);
    assert_eq!(action.mouse_click(&mut level, 3.5, 0.5), ActionCommit::StandardAction);

    let mut spotted = false;
    for _ in 0..100 {
        level.think(0.25);
        match action.maintain(&mut level, 0.25) {
            MaintenanceStatus::CheckForInterrupts => {
                if level.visible_enemies(me) == vec![enemy] {
                    spotted = true;
                    assert!(!action.pause(&mut level));
                    break;
                }
            }
            MaintenanceStatus::Complete => break,
            MaintenanceStatus::InProgress => {}
        }
    }

    assert!(spotted);
    assert_eq!(action.state(), MoveState::Cancelled);
    assert!(!level.entity(me).unwrap().is_moving());
}

#[test]
fn test_new_round_allows_another_move() {
    let mut level = open_level(6, 1);
    let id = spawn(&mut level, trooper(2), (0, 0), 1);

    let mut first = ActionMove::new(id);
    first.prep(&mut level);
    first.mouse_click(&mut level, 2.0, 0.0);
    run_to_completion(&mut level, &mut first, 0.5);
    assert_eq!(level.entity(id).unwrap().ap, 0);

    // Out of AP: only the current cell is reachable
    let mut idle = ActionMove::new(id);
    assert!(idle.prep(&mut level));
    assert_eq!(idle.reachable(), vec![Coordinate::new(2, 0)]);
    idle.cancel(&mut level);

    level.on_round();
    let mut second = ActionMove::new(id);
    second.prep(&mut level);
    assert_eq!(second.mouse_click(&mut level, 4.0, 0.0), ActionCommit::StandardAction);
    run_to_completion(&mut level, &mut second, 0.5);

    let ent = level.entity(id).unwrap();
    assert_eq!(ent.cell(), Coordinate::new(4, 0));
    assert_eq!(ent.ap, 0);
}

#[test]
fn test_scenario_file_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/scenarios/river_ford.toml");
    let (level, ids) = Scenario::load(&path).unwrap().build().unwrap();

    assert_eq!(ids.len(), 2);
    assert_eq!(level.grid.width(), 10);
    assert_eq!(level.grid.height(), 6);

    let trooper = level.entity(ids[0]).unwrap();
    assert_eq!(trooper.unit_type.name, "trooper");
    assert_eq!(trooper.ap, 10);
    assert_eq!(trooper.health, 12);
}
