use anyhow::{Result, ensure};

/// A parked car: a registration number and a color label.
///
/// Immutable once created; owned exclusively by the slot holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    /// Registration number, e.g. "KA-01-HH-1234".
    pub number: String,
    /// Color label, e.g. "red".
    pub color: String,
}

impl Car {
    pub fn new(number: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            color: color.into(),
        }
    }
}

/// Configurable message text.
///
/// Only the lot-full line varies between deployments; the remaining messages
/// have a fixed format and live next to the commands that print them.
#[derive(Debug, Clone)]
pub struct Messages {
    /// Line printed when `park` finds no free spot.
    pub lot_full: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            lot_full: "Sorry, the parking lot is full.".to_string(),
        }
    }
}

/// Construction-time configuration for a [`Lot`].
///
/// Note: fields are public for simplicity; the config is consumed whole by
/// [`Lot::new`].
#[derive(Debug, Clone)]
pub struct LotConfig {
    /// Number of spots in the lot. Fixed for the lot's lifetime.
    pub capacity: usize,
    /// Cars already parked when the lot opens, placed first-fit from spot 1.
    pub seed: Vec<Car>,
    /// Message text overrides.
    pub messages: Messages,
}

impl Default for LotConfig {
    fn default() -> Self {
        Self {
            capacity: 20,
            seed: Vec::new(),
            messages: Messages::default(),
        }
    }
}

/// Outcome of freeing a spot by its 1-based number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// The spot held a car and is now free.
    Freed,
    /// The spot was already free.
    AlreadyFree,
    /// The number lies outside `[1, capacity]`; nothing happened.
    OutOfRange,
}

/// Mutable parking lot state owned by the interpreter.
///
/// The lot is an ordered sequence of slots, each either holding a [`Car`] or
/// free. The slot count equals the configured capacity for the lot's whole
/// lifetime. Spots are numbered from 1 in messages and indexed from 0 here.
#[derive(Debug)]
pub struct Lot {
    slots: Vec<Option<Car>>,
    /// Message text the commands print from.
    pub messages: Messages,
    /// When set to true, indicates that an interactive loop should exit.
    pub should_exit: bool,
}

impl Lot {
    /// Build a lot from its configuration, parking the seed cars first-fit.
    ///
    /// Fails when the seed holds more cars than the lot has spots.
    pub fn new(config: LotConfig) -> Result<Self> {
        ensure!(
            config.seed.len() <= config.capacity,
            "lot of capacity {} cannot hold {} pre-seeded cars",
            config.capacity,
            config.seed.len()
        );
        let mut slots = vec![None; config.capacity];
        for (slot, car) in slots.iter_mut().zip(config.seed) {
            *slot = Some(car);
        }
        Ok(Self {
            slots,
            messages: config.messages,
            should_exit: false,
        })
    }

    /// Number of spots in the lot.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The car occupying the 0-based `index`, if any.
    pub fn car_at(&self, index: usize) -> Option<&Car> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Park a car in the lowest-indexed free slot.
    ///
    /// Returns the 0-based index of the slot taken, or `None` when the lot is
    /// full (in which case the car is dropped and the lot is unchanged).
    pub fn park(&mut self, car: Car) -> Option<usize> {
        let index = self.slots.iter().position(|slot| slot.is_none())?;
        self.slots[index] = Some(car);
        Some(index)
    }

    /// Free the spot addressed by a 1-based `spot_number`.
    ///
    /// Numbers outside `[1, capacity]` — zero and negatives included — leave
    /// the lot untouched and report [`LeaveOutcome::OutOfRange`].
    pub fn free_spot(&mut self, spot_number: i64) -> LeaveOutcome {
        if spot_number <= 0 || spot_number > self.capacity() as i64 {
            return LeaveOutcome::OutOfRange;
        }
        match self.slots[spot_number as usize - 1].take() {
            Some(_) => LeaveOutcome::Freed,
            None => LeaveOutcome::AlreadyFree,
        }
    }
}
