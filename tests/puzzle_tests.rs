use grid_puzzle_runner::{
    grid::{Direction, Grid, Size},
    palette::Palette,
    puzzle::{input::parse_char_grid, FloodFill, PerimeterWalk, Puzzle, Registry},
    PuzzleError,
};
use image::Rgba;

const SMALL_MAZE: &str = "#####\n#S..#\n#.#.#\n#...#\n#####\n";

fn run_to_end(puzzle: &mut dyn Puzzle, limit: usize) -> usize {
    let mut steps = 0;

    while !puzzle.is_finished() && steps < limit {
        puzzle.execute_step();
        steps += 1;
    }

    steps
}

#[test]
fn test_size_from_str() {
    let size: Size = "24x14".parse().unwrap();
    assert_eq!(size, Size::new(24, 14));
    assert_eq!(size.area(), 336);

    assert!("24".parse::<Size>().is_err());
    assert!("ax14".parse::<Size>().is_err());
}

#[test]
fn test_grid_bounds_and_steps() {
    let mut grid = Grid::new(3, 2, &mut |x, y| x + y * 3);

    assert_eq!(grid.get(2, 1), Some(&5));
    assert_eq!(grid.get(3, 0), None);
    assert!(grid.set(3, 0, 9).is_err());

    assert_eq!(grid.step((0, 0), Direction::Left), None);
    assert_eq!(grid.step((0, 0), Direction::Right), Some((1, 0)));
    assert_eq!(grid.step((2, 1), Direction::Down), None);
    assert_eq!(grid.neighbor_positions((1, 0)).len(), 3);

    grid.set(1, 1, 42).unwrap();
    assert_eq!(grid.position_of(|&v| v == 42), Some((1, 1)));
}

#[test]
fn test_turn_right_cycles() {
    let mut direction = Direction::Right;

    for _ in 0..4 {
        direction = direction.turn_right();
    }

    assert_eq!(direction, Direction::Right);
    assert_eq!(Direction::Up.turn_right(), Direction::Right);
}

#[test]
fn test_parse_char_grid() {
    let grid = parse_char_grid("ab\r\ncd\r\n\n\n").unwrap();

    assert_eq!(grid.dimensions(), Size::new(2, 2));
    assert_eq!(grid.get(1, 1), Some(&'d'));
}

#[test]
fn test_parse_char_grid_rejects_bad_input() {
    assert!(matches!(parse_char_grid(""), Err(PuzzleError::Input(_))));
    assert!(matches!(parse_char_grid("\n\n"), Err(PuzzleError::Input(_))));
    assert!(matches!(parse_char_grid("abc\nab\n"), Err(PuzzleError::Input(_))));
}

#[test]
fn test_palette_paint_and_unmapped() {
    let palette = Palette::new([('.', [0, 0, 0]), ('#', [10, 20, 30])]);
    let grid = parse_char_grid(".#\n#.").unwrap();

    let image = palette.paint(&grid).unwrap();
    assert_eq!(image.dimensions(), (2, 2));
    assert_eq!(*image.get_pixel(1, 0), Rgba([10, 20, 30, 255]));

    let grid = parse_char_grid(".?").unwrap();
    assert!(matches!(palette.paint(&grid), Err(PuzzleError::UnmappedChar('?'))));
}

#[test]
fn test_palette_load_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("palette.json");
    std::fs::write(&path, r#"{".": [0, 0, 0], "x": [255, 0, 0]}"#).unwrap();

    let palette = Palette::load(&path).unwrap();
    assert_eq!(palette.len(), 2);
    assert_eq!(palette.get('x'), Some(Rgba([255, 0, 0, 255])));

    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(Palette::load(&path), Err(PuzzleError::Palette(_))));
}

#[test]
fn test_perimeter_walk_takes_perimeter_steps() {
    let mut walk = PerimeterWalk::from_input("x...\n....\n....\n").unwrap();

    // 2 * (4 + 3) - 4 cells on the border
    for _ in 0..9 {
        walk.execute_step();
        assert!(!walk.is_finished());
    }

    walk.execute_step();
    assert!(walk.is_finished());
    assert_eq!(walk.result().unwrap(), "10");
    assert_eq!(walk.result().unwrap(), "10");
}

#[test]
fn test_perimeter_walk_moves_walker_pixel() {
    let mut walk = PerimeterWalk::from_input("x..\n...\n").unwrap();
    let red = Rgba([255, 0, 0, 255]);
    let black = Rgba([0, 0, 0, 255]);

    assert_eq!(*walk.image().get_pixel(0, 0), red);

    walk.execute_step();

    assert_eq!(*walk.image().get_pixel(0, 0), black);
    assert_eq!(*walk.image().get_pixel(1, 0), red);
}

#[test]
fn test_single_cell_finishes_after_one_step() {
    let mut walk = PerimeterWalk::from_input("x\n").unwrap();

    assert!(!walk.is_finished());
    walk.execute_step();

    assert!(walk.is_finished());
    assert_eq!(walk.result().unwrap(), "1");

    let mut fill = FloodFill::from_input("S").unwrap();
    fill.execute_step();

    assert!(fill.is_finished());
    assert_eq!(fill.result().unwrap(), "1");
}

#[test]
fn test_result_before_finish_is_premature() {
    let walk = PerimeterWalk::from_input("x.\n..\n").unwrap();
    assert!(matches!(walk.result(), Err(PuzzleError::PrematureQuery)));

    let mut fill = FloodFill::from_input(SMALL_MAZE).unwrap();
    fill.execute_step();
    assert!(matches!(fill.result(), Err(PuzzleError::PrematureQuery)));
}

#[test]
fn test_flood_fill_counts_reachable_cells() {
    let mut fill = FloodFill::from_input(SMALL_MAZE).unwrap();

    // farthest open cell is 4 moves away, one more step finds nothing
    let steps = run_to_end(&mut fill, 100);

    assert_eq!(steps, 5);
    assert_eq!(fill.result().unwrap(), "8");
}

#[test]
fn test_flood_fill_ignores_walled_off_cells() {
    let mut fill = FloodFill::from_input("S#.\n.#.\n").unwrap();

    run_to_end(&mut fill, 100);

    assert_eq!(fill.result().unwrap(), "2");
}

#[test]
fn test_flood_fill_requires_start() {
    assert!(matches!(FloodFill::from_input("..\n.."), Err(PuzzleError::Input(_))));
}

#[test]
fn test_builtin_puzzles_load_and_finish() {
    let registry = Registry::builtin();

    for name in registry.names() {
        let mut puzzle = registry.create(name).unwrap();
        run_to_end(puzzle.as_mut(), 100_000);

        assert!(puzzle.is_finished(), "{} did not finish", name);
        assert!(!puzzle.result().unwrap().is_empty());
    }
}

#[test]
fn test_registry_lookup() {
    let registry = Registry::builtin();

    assert_eq!(registry.len(), 2);
    assert!(registry.contains(PerimeterWalk::NAME));
    assert!(registry.contains(FloodFill::NAME));
    assert!(matches!(
        registry.create("missing"),
        Err(PuzzleError::NotFound { name }) if name == "missing"
    ));
}

#[test]
fn test_registry_rejects_duplicates() {
    fn tiny() -> Result<Box<dyn Puzzle>, PuzzleError> {
        Ok(Box::new(PerimeterWalk::from_input("x")?))
    }

    let mut registry = Registry::new();
    assert!(registry.is_empty());

    registry.register("tiny", tiny).unwrap();
    assert!(matches!(
        registry.register("tiny", tiny),
        Err(PuzzleError::DuplicateName { .. })
    ));
    assert_eq!(registry.first(), Some("tiny"));
}
