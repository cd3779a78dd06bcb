//! Tests for configuration constants and their consistency

#[cfg(test)]
mod tests {
    use jigtile::analysis::patterns::Pattern;
    use jigtile::io::configuration::{
        DEFAULT_DENSITY, DEFAULT_GRID_SIDE, DEFAULT_MONSTERS, DEFAULT_TILE_SIDE, MIN_TILE_SIDE,
        MONSTER_COLOR, OFF_PIXEL, ON_PIXEL, ROUGH_COLOR, TILE_ID_MIN, TILE_ID_SPAN, WATER_COLOR,
    };

    // Tests the default puzzle fits the id range and can hold its monsters
    // Verified by raising the default grid side to 100
    #[test]
    fn test_defaults_consistent() {
        assert!(DEFAULT_TILE_SIDE >= MIN_TILE_SIDE);
        assert!(DEFAULT_GRID_SIDE * DEFAULT_GRID_SIDE <= TILE_ID_SPAN);
        assert!((0.0..=1.0).contains(&DEFAULT_DENSITY));

        let monster = Pattern::sea_monster().unwrap();
        let image_side = DEFAULT_GRID_SIDE * (DEFAULT_TILE_SIDE - 2);
        assert!(DEFAULT_MONSTERS * monster.height() <= image_side);
        assert!(monster.width() <= image_side);
    }

    // Tests generated ids stay four digits
    // Verified by widening the span to 10000
    #[test]
    fn test_tile_id_range() {
        assert_eq!(TILE_ID_MIN, 1000);
        assert!(TILE_ID_MIN + TILE_ID_SPAN as u64 - 1 <= 9999);
    }

    // Tests pixel characters and export colours are distinguishable
    // Verified by using the water colour for monsters
    #[test]
    fn test_distinct_symbols() {
        assert_ne!(ON_PIXEL, OFF_PIXEL);
        assert_ne!(WATER_COLOR, ROUGH_COLOR);
        assert_ne!(ROUGH_COLOR, MONSTER_COLOR);
        assert_ne!(WATER_COLOR, MONSTER_COLOR);
    }
}
