/// Mutable state of one simulated account: cumulative contributed principal
/// and current market value. Principal only ever grows and never passes the
/// ceiling; market value carries the full gain/loss history and is never
/// clamped, so it sits below principal after losses.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccountState {
    pub principal: f64,
    pub market_value: f64,
}

impl AccountState {
    pub fn new() -> Self {
        AccountState { principal: 0.0, market_value: 0.0 }
    }

    /// Advance one month: contribution step first, then the period return.
    ///
    /// The contribution is three-way against the ceiling: full while the
    /// whole amount fits (`<=`, so an exact fill takes the full branch),
    /// a partial top-up of exactly `ceiling - principal` on the month that
    /// crosses it, and nothing afterwards. The partial branch assigns
    /// `principal = ceiling` outright so the cap carries no accumulation
    /// drift. The return applies every month, capped or not, and principal
    /// is never touched by it.
    ///
    /// Returns true iff the ceiling transitioned to reached this month
    /// (exact fill or partial top-up), for caller-visible warnings.
    pub fn advance_month(&mut self, contribution: f64, ceiling: f64, period_return: f64) -> bool {
        let was_capped = self.principal >= ceiling;

        if self.principal + contribution <= ceiling {
            self.principal += contribution;
            self.market_value += contribution;
        } else if self.principal < ceiling {
            let top_up = ceiling - self.principal;
            self.principal = ceiling;
            self.market_value += top_up;
        }

        self.market_value *= 1.0 + period_return;

        !was_capped && self.principal >= ceiling
    }

    /// Unrealized gain: market value minus principal. Negative under water.
    pub fn gain(&self) -> f64 {
        self.market_value - self.principal
    }
}
