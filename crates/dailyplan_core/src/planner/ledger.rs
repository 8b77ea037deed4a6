//! Per-run capacity ledger.
//!
//! # Invariants
//! - A date is seeded at the daily capacity the first time it is touched.
//! - Remaining capacity never drops below zero.
//! - A ledger belongs to exactly one allocation call.

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Remaining schedulable hours per calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityLedger {
    daily_capacity: f64,
    remaining: BTreeMap<NaiveDate, f64>,
}

impl CapacityLedger {
    pub fn new(daily_capacity: f64) -> Self {
        Self {
            daily_capacity,
            remaining: BTreeMap::new(),
        }
    }

    /// Hours still free on `date`.
    pub fn available(&self, date: NaiveDate) -> f64 {
        self.remaining
            .get(&date)
            .copied()
            .unwrap_or(self.daily_capacity)
    }

    /// Books `hours` on `date`, clamped to what is still free.
    ///
    /// Returns the hours actually booked.
    pub fn reserve(&mut self, date: NaiveDate, hours: f64) -> f64 {
        let available = self.available(date);
        let booked = hours.clamp(0.0, available);
        self.remaining.insert(date, available - booked);
        booked
    }

    /// Hours already booked on `date`.
    pub fn booked(&self, date: NaiveDate) -> f64 {
        self.daily_capacity - self.available(date)
    }

    pub fn daily_capacity(&self) -> f64 {
        self.daily_capacity
    }

    /// Touched dates in ascending order with their remaining capacity.
    pub fn entries(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.remaining.iter().map(|(date, hours)| (*date, *hours))
    }
}

#[cfg(test)]
mod tests {
    use super::CapacityLedger;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn untouched_days_have_full_capacity() {
        let ledger = CapacityLedger::new(8.0);
        assert_eq!(ledger.available(day(3)), 8.0);
        assert_eq!(ledger.booked(day(3)), 0.0);
        assert_eq!(ledger.entries().count(), 0);
    }

    #[test]
    fn reserve_decrements_only_the_touched_day() {
        let mut ledger = CapacityLedger::new(8.0);
        assert_eq!(ledger.reserve(day(3), 6.0), 6.0);
        assert_eq!(ledger.available(day(3)), 2.0);
        assert_eq!(ledger.booked(day(3)), 6.0);
        assert_eq!(ledger.available(day(4)), 8.0);
    }

    #[test]
    fn reserve_never_overbooks() {
        let mut ledger = CapacityLedger::new(8.0);
        ledger.reserve(day(3), 6.0);
        assert_eq!(ledger.reserve(day(3), 5.0), 2.0);
        assert_eq!(ledger.available(day(3)), 0.0);
        assert_eq!(ledger.reserve(day(3), 1.0), 0.0);
        assert_eq!(ledger.entries().collect::<Vec<_>>(), vec![(day(3), 0.0)]);
    }
}
