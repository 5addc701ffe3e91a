use std::collections::HashSet;

use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use grid_puzzle_runner::colormap::{distinct_chars, ColorTable, Format, Mode};
use grid_puzzle_runner::Palette;

const TEST_SEED: u64 = 42;

fn chars(count: usize) -> Vec<char> {
    (0..count as u32).filter_map(|i| char::from_u32('!' as u32 + i)).collect()
}

#[test]
fn test_distinct_chars_sorted_without_line_breaks() {
    assert_eq!(distinct_chars("#.S\r\n..#\n"), vec!['#', '.', 'S']);
    assert!(distinct_chars("\n\n").is_empty());
}

#[test]
fn test_mode_parsing() {
    assert_eq!("black-to-green".parse::<Mode>(), Ok(Mode::BlackToGreen));
    assert_eq!("RANDOM".parse::<Mode>(), Ok(Mode::Random));
    assert!("rainbow".parse::<Mode>().is_err());
    assert_eq!(Mode::GreenToBlack.to_string(), "green-to-black");

    assert_eq!("json".parse::<Format>(), Ok(Format::Json));
    assert!("yaml".parse::<Format>().is_err());
}

#[test]
fn test_gradient_endpoints() {
    let mut rng = XorShiftRng::seed_from_u64(TEST_SEED);
    let input = chars(5);

    let ascending = ColorTable::generate(Mode::BlackToGreen, &input, &mut rng);
    let entries = ascending.entries();
    assert_eq!(entries[0], ('!', Some([0, 0, 0])));
    assert_eq!(entries[2].1, Some([0, 128, 0]));
    assert_eq!(entries[4].1, Some([0, 255, 0]));

    let descending = ColorTable::generate(Mode::GreenToBlack, &input, &mut rng);
    assert_eq!(descending.entries()[0].1, Some([0, 255, 0]));
    assert_eq!(descending.entries()[4].1, Some([0, 0, 0]));
}

#[test]
fn test_gradient_single_char_is_green() {
    let mut rng = XorShiftRng::seed_from_u64(TEST_SEED);

    for mode in [Mode::BlackToGreen, Mode::GreenToBlack] {
        let table = ColorTable::generate(mode, &['.'], &mut rng);
        assert_eq!(table.entries(), &[('.', Some([0, 255, 0]))]);
    }
}

#[test]
fn test_random_channels_are_distinct() {
    let mut rng = XorShiftRng::seed_from_u64(TEST_SEED);
    let input = chars(40);

    let table = ColorTable::generate(Mode::Random, &input, &mut rng);
    assert!(table.is_complete());

    for channel in 0..3 {
        let values: HashSet<u8> = table
            .entries()
            .iter()
            .filter_map(|(_, rgb)| rgb.map(|rgb| rgb[channel]))
            .collect();

        assert_eq!(values.len(), input.len());
    }
}

#[test]
fn test_random_is_reproducible_with_seed() {
    let input = chars(10);

    let first = ColorTable::generate(Mode::Random, &input, &mut XorShiftRng::seed_from_u64(TEST_SEED));
    let second = ColorTable::generate(Mode::Random, &input, &mut XorShiftRng::seed_from_u64(TEST_SEED));

    assert_eq!(first, second);
}

#[test]
fn test_empty_template() {
    let mut rng = XorShiftRng::seed_from_u64(TEST_SEED);
    let table = ColorTable::generate(Mode::Empty, &['#', '.'], &mut rng);

    assert!(!table.is_complete());
    assert!(table.to_palette().is_none());
    assert_eq!(table.render(Format::Rust).unwrap(), "('#', [, , ]),\n('.', [, , ])\n");
}

#[test]
fn test_rust_output() {
    let mut rng = XorShiftRng::seed_from_u64(TEST_SEED);
    let table = ColorTable::generate(Mode::BlackToGreen, &['#', '.'], &mut rng);

    assert_eq!(table.to_rust(), "('#', [0, 0, 0]),\n('.', [0, 255, 0])\n");
}

#[test]
fn test_json_output_loads_as_palette() {
    let mut rng = XorShiftRng::seed_from_u64(TEST_SEED);
    let table = ColorTable::generate(Mode::Random, &['#', '.', 'S'], &mut rng);

    let json = table.render(Format::Json).unwrap();
    let palette: Palette = serde_json::from_str(&json).unwrap();

    assert_eq!(Some(palette), table.to_palette());
    assert_eq!(table.to_palette().unwrap().len(), 3);
}

#[cfg(feature = "cli")]
#[test]
fn test_clipboard_copy_falls_back_to_printing() {
    use grid_puzzle_runner::colormap::copy_to_clipboard;

    let mut rng = XorShiftRng::seed_from_u64(TEST_SEED);
    let raw = ColorTable::generate(Mode::BlackToGreen, &['#', '.'], &mut rng).to_rust();

    assert!(!copy_to_clipboard(None, &raw));

    // headless machines have no clipboard; only check the round trip where one exists
    if let Ok(mut clipboard) = arboard::Clipboard::new() {
        if copy_to_clipboard(Some(&mut clipboard), &raw) {
            assert_eq!(clipboard.get_text().unwrap(), raw);
        }
    }
}
