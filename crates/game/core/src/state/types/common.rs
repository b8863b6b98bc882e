use std::fmt;
use std::num::NonZeroU32;

/// Unique identifier for any entity tracked in the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
///
/// Screen convention: `y` grows downward (south).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Neighbouring tile one step in `direction`.
    pub const fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.translate(dx, dy)
    }

    /// King-move distance; diagonal neighbours are at distance 1.
    pub fn chebyshev(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Eight-way step direction in screen coordinates (north is `y - 1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    /// Direction of a unit step from `from` toward `to`, or `None` when they coincide.
    pub fn toward(from: Position, to: Position) -> Option<Self> {
        let dx = (to.x - from.x).signum();
        let dy = (to.y - from.y).signum();
        Self::ALL.into_iter().find(|dir| dir.delta() == (dx, dy))
    }
}

/// Relative time unit used by the turn schedule.
///
/// Signed because queue priorities are re-based by subtracting the consumed
/// priority, and `adjust_priorities` accepts arbitrary deltas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub i64);

impl Tick {
    pub const ZERO: Self = Self(0);
}

impl std::ops::Add for Tick {
    type Output = Tick;
    fn add(self, rhs: Tick) -> Tick {
        Tick(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Tick {
    fn add_assign(&mut self, rhs: Tick) {
        self.0 += rhs.0;
    }
}

impl std::ops::Sub for Tick {
    type Output = Tick;
    fn sub(self, rhs: Tick) -> Tick {
        Tick(self.0 - rhs.0)
    }
}

impl std::ops::Neg for Tick {
    type Output = Tick;
    fn neg(self) -> Tick {
        Tick(-self.0)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strictly positive actor speed. Higher speed means shorter delays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Speed(NonZeroU32);

impl Speed {
    pub const MIN: Self = Self(NonZeroU32::MIN);

    /// Returns `None` for a zero speed.
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Splits `base_cost` into whole ticks for this speed.
    ///
    /// `carry` is the remainder left by the actor's previous delay, in
    /// `1 / speed` tick units; the returned carry feeds the next call. Summed
    /// over consecutive actions the delays stay within one tick of
    /// `n * base_cost / speed`. A delay is never shorter than one tick, so
    /// speeds above `base_cost` are capped there and drop their carry.
    pub fn delay(self, base_cost: Tick, carry: u32) -> (Tick, u32) {
        let speed = i64::from(self.get());
        let total = base_cost.0 + i64::from(carry);
        let ticks = total.div_euclid(speed);
        if ticks < 1 {
            return (Tick(1), 0);
        }
        // rem_euclid of a positive divisor fits below `speed`.
        (Tick(ticks), total.rem_euclid(speed) as u32)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer resource meter (e.g., health) tracked per actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub const fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }

    pub const fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub const fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Restores up to `amount`, returning how much was actually recovered.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let recovered = amount.min(self.maximum.saturating_sub(self.current));
        self.current += recovered;
        recovered
    }

    /// Drains up to `amount`, returning how much was actually removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let drained = amount.min(self.current);
        self.current -= drained;
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_uses_screen_coordinates() {
        let origin = Position::new(5, 5);
        assert_eq!(origin.offset(Direction::North), Position::new(5, 4));
        assert_eq!(origin.offset(Direction::SouthWest), Position::new(4, 6));
        assert_eq!(
            Direction::toward(origin, Position::new(9, 1)),
            Some(Direction::NorthEast)
        );
        assert_eq!(Direction::toward(origin, origin), None);
    }

    #[test]
    fn speed_rejects_zero() {
        assert!(Speed::new(0).is_none());
        assert_eq!(Speed::new(3).map(Speed::get), Some(3));
    }

    #[test]
    fn delay_is_cost_over_speed_and_never_zero() {
        let normal = Speed::new(10).unwrap();
        let fast = Speed::new(20).unwrap();
        let blazing = Speed::new(1000).unwrap();

        assert_eq!(normal.delay(Tick(100), 0), (Tick(10), 0));
        assert_eq!(fast.delay(Tick(100), 0), (Tick(5), 0));
        assert_eq!(blazing.delay(Tick(100), 0), (Tick(1), 0));
    }

    #[test]
    fn delay_carries_the_remainder() {
        let goblin = Speed::new(12).unwrap();
        let mut carry = 0;
        let mut total = 0;
        let mut delays = Vec::new();
        for _ in 0..6 {
            let (delay, next) = goblin.delay(Tick(100), carry);
            carry = next;
            total += delay.0;
            delays.push(delay.0);
        }

        // 100 / 12 = 8 1/3 ticks per action.
        assert_eq!(delays, vec![8, 8, 9, 8, 8, 9]);
        assert_eq!(total, 50);
        assert_eq!(carry, 0);
    }

    #[test]
    fn meter_restore_and_drain_clamp() {
        let mut hp = ResourceMeter::new(7, 10);
        assert_eq!(hp.restore(5), 3);
        assert!(hp.is_full());
        assert_eq!(hp.drain(25), 10);
        assert!(hp.is_empty());
    }
}
