use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Year(pub u32);

/// Simulation time in elapsed contribution months, counted from 1.
/// Month 12k closes year k. There is no intra-month clock; the
/// contribution and the period return both land on the month boundary,
/// contribution first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Month(pub u64);

impl Month {
    pub const MONTHS_PER_YEAR: u64 = 12;

    /// True on the closing month of a year (12, 24, ...).
    pub fn is_year_end(self) -> bool {
        self.0 > 0 && self.0 % Self::MONTHS_PER_YEAR == 0
    }

    /// The year this month closes, if it is a year-end month.
    pub fn closes_year(self) -> Option<Year> {
        if self.is_year_end() {
            Some(Year((self.0 / Self::MONTHS_PER_YEAR) as u32))
        } else {
            None
        }
    }
}
