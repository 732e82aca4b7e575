use battleship_rl::{BoardError, Coordinate, Orientation, Ship, ShipType};

#[test]
fn test_new_and_cells() -> Result<(), BoardError> {
    let def = ShipType::new("Test", 3);
    let ship = Ship::new(def, Orientation::Horizontal, 2, 1, 5)?;
    assert_eq!(
        ship.cells(),
        &[Coordinate::new(2, 1), Coordinate::new(2, 2), Coordinate::new(2, 3)]
    );
    assert_eq!(ship.origin(), Coordinate::new(2, 1));
    assert_eq!(ship.orientation(), Orientation::Horizontal);
    Ok(())
}

#[test]
fn test_contains() -> Result<(), BoardError> {
    let def = ShipType::new("Test", 4);
    let ship = Ship::new(def, Orientation::Vertical, 0, 0, 5)?;
    for r in 0..4 {
        assert!(ship.contains(Coordinate::new(r, 0)));
    }
    assert!(!ship.contains(Coordinate::new(4, 0)));
    assert!(!ship.contains(Coordinate::new(0, 1)));
    Ok(())
}

#[test]
fn test_register_hit_and_sunk() -> Result<(), BoardError> {
    let def = ShipType::new("Test", 2);
    let mut ship = Ship::new(def, Orientation::Horizontal, 1, 1, 4)?;
    assert!(!ship.is_sunk());
    assert!(ship.guess(Coordinate::new(1, 1)));
    assert!(!ship.is_sunk());
    assert!(ship.guess(Coordinate::new(1, 2)));
    assert!(ship.is_sunk());
    // miss
    assert!(!ship.guess(Coordinate::new(0, 0)));
    Ok(())
}

#[test]
fn test_out_of_bounds_and_overlap() {
    let def = ShipType::new("Test", 3);
    assert_eq!(
        Ship::new(def, Orientation::Vertical, 2, 0, 4).unwrap_err(),
        BoardError::ShipOutOfBounds
    );

    let a = Ship::new(def, Orientation::Horizontal, 1, 0, 4).unwrap();
    let b = Ship::new(def, Orientation::Vertical, 0, 2, 4).unwrap();
    let c = Ship::new(def, Orientation::Vertical, 0, 3, 4).unwrap();
    assert!(a.overlaps(&b));
    assert!(!a.overlaps(&c));
}
