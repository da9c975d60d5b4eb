use crate::ship::ShipClass;

pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 10;

/// Standard fleet, largest first. Slot indices used by the placement API
/// refer to positions in this array.
pub const FLEET: [ShipClass; NUM_SHIPS] = [
    ShipClass::Carrier,
    ShipClass::Submarine,
    ShipClass::Submarine,
    ShipClass::Destroyer,
    ShipClass::Destroyer,
    ShipClass::Destroyer,
    ShipClass::Frigate,
    ShipClass::Frigate,
    ShipClass::Frigate,
    ShipClass::Frigate,
];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 4 + 3 + 3 + 2 + 2 + 2 + 1 + 1 + 1 + 1;

/// Random draws allowed per ship before autonomous placement starts over.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Full restarts allowed before autonomous placement gives up.
pub const MAX_FLEET_RESTARTS: usize = 32;

pub const DEFAULT_NICKNAME: &str = "Anonymous";

/// Convert a ship name to its class, ignoring ASCII case. Returns `None` if the
/// name does not match any class in the fleet.
pub fn ship_class_from_name(name: &str) -> Option<ShipClass> {
    FLEET
        .iter()
        .copied()
        .find(|class| class.name().eq_ignore_ascii_case(name))
}
