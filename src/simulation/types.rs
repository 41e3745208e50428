//! Core types for the junction simulation
//!
//! These are standalone types that don't depend on Bevy.

/// A unique identifier for a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub u32);

/// A unique identifier for a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignalId(pub u32);

/// A cardinal direction. For vehicles this is the direction of travel,
/// which also selects the governing signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit vector pointing in the direction of travel
    pub fn unit(self) -> Position {
        match self {
            Direction::North => Position::new(0.0, 1.0),
            Direction::South => Position::new(0.0, -1.0),
            Direction::East => Position::new(1.0, 0.0),
            Direction::West => Position::new(-1.0, 0.0),
        }
    }

    /// Unit vector pointing to the right of the direction of travel
    pub fn right(self) -> Position {
        let u = self.unit();
        Position::new(u.y, -u.x)
    }

    /// Whether this direction belongs to the north/south signal pair
    pub fn is_north_south(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    /// Heading in radians, north = 0 and clockwise positive
    pub fn heading(self) -> f32 {
        match self {
            Direction::North => 0.0,
            Direction::East => std::f32::consts::FRAC_PI_2,
            Direction::South => std::f32::consts::PI,
            Direction::West => -std::f32::consts::FRAC_PI_2,
        }
    }
}

/// Which of the two lanes on a vehicle's side of the road it occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    /// Inner lane, next to the centreline
    Left,
    /// Outer lane, next to the kerb
    Right,
}

impl Lane {
    pub const ALL: [Lane; 2] = [Lane::Left, Lane::Right];

    /// Lateral distance from the road centreline
    pub fn offset(self) -> f32 {
        match self {
            Lane::Left => INNER_LANE_OFFSET,
            Lane::Right => OUTER_LANE_OFFSET,
        }
    }
}

/// Type of vehicle in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleKind {
    Car,
    Truck,
    Bus,
}

impl VehicleKind {
    /// Relative spawn weights, cars most common and buses rarest
    pub const WEIGHTS: [(VehicleKind, u32); 3] = [
        (VehicleKind::Car, 60),
        (VehicleKind::Truck, 25),
        (VehicleKind::Bus, 15),
    ];

    /// Pick a kind from a roll in `0..total_weight()`
    pub fn from_roll(mut roll: u32) -> Self {
        for (kind, weight) in Self::WEIGHTS {
            if roll < weight {
                return kind;
            }
            roll -= weight;
        }
        VehicleKind::Car
    }

    pub fn total_weight() -> u32 {
        Self::WEIGHTS.iter().map(|(_, w)| w).sum()
    }
}

/// The colour state of a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Red,
    Yellow,
    Green,
}

impl Phase {
    /// Only green permits entry into the junction
    pub fn permits_entry(self) -> bool {
        self == Phase::Green
    }
}

/// A 2D position in the simulation plane, junction centre at the origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(&self, other: &Position, t: f32) -> Position {
        Position {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    pub fn dot(&self, other: &Position) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn scale(&self, factor: f32) -> Position {
        Position::new(self.x * factor, self.y * factor)
    }

    pub fn add(&self, other: &Position) -> Position {
        Position::new(self.x + other.x, self.y + other.y)
    }

    /// Signed distance travelled towards and past the junction centre when
    /// moving in `direction`. Negative before the centre, positive after.
    pub fn along(&self, direction: Direction) -> f32 {
        self.dot(&direction.unit())
    }

    /// Lateral offset to the right of `direction`'s centreline
    pub fn lateral(&self, direction: Direction) -> f32 {
        self.dot(&direction.right())
    }

    /// Build a position from along-axis and lateral coordinates
    pub fn on_axis(direction: Direction, along: f32, lateral: f32) -> Position {
        direction
            .unit()
            .scale(along)
            .add(&direction.right().scale(lateral))
    }
}

/// Side length of the square junction footprint
pub const JUNCTION_SIZE: f32 = 80.0;

/// Distance from the junction centre within which a vehicle obeys its signal
pub const APPROACH_BUFFER: f32 = 60.0;

/// Distance from the junction centre at which a queueing vehicle stops
pub const WAITING_OFFSET: f32 = 75.0;

/// Lateral offset of the inner lane from the centreline
pub const INNER_LANE_OFFSET: f32 = 10.0;

/// Lateral offset of the outer lane from the centreline
pub const OUTER_LANE_OFFSET: f32 = 25.0;

/// Half-length of each road arm; vehicles beyond this re-enter from the far end
pub const ROAD_EXTENT: f32 = 240.0;

/// Distance covered by a single progressing motion leg
pub const LEG_DISTANCE: f32 = 80.0;

/// Duration of a motion leg at 1.0x speed, in milliseconds
pub const BASE_LEG_DURATION_MS: u64 = 3_000;

/// Longest leg any speed multiplier can produce, in milliseconds
pub const MAX_LEG_DURATION_MS: u64 = BASE_LEG_DURATION_MS * 1_000;

/// Distance of each signal head from the junction centre
pub const SIGNAL_OFFSET: f32 = 50.0;

/// Opacity used to draw vehicles queueing at a light
pub const WAITING_OPACITY: f32 = 0.6;
