//! Reduction of one hour's per-point samples into a site-wide record.

use super::types::HourlyRecord;

impl HourlyRecord {
    /// Builds the record for `hour` from the per-point power draws.
    ///
    /// `total_power` is the plain sum; `event_count` counts points with a
    /// strictly positive draw.
    ///
    /// # Examples
    ///
    /// ```
    /// use ev_demand_sim::sim::types::HourlyRecord;
    ///
    /// let record = HourlyRecord::from_samples(3, vec![0, 7, 2, 0]);
    /// assert_eq!(record.total_power, 9);
    /// assert_eq!(record.event_count, 2);
    /// ```
    pub fn from_samples(hour: usize, power_by_point: Vec<u64>) -> Self {
        let total_power: u64 = power_by_point.iter().sum();
        let event_count = power_by_point.iter().filter(|&&kw| kw > 0).count();
        Self {
            hour,
            power_by_point,
            total_power,
            event_count,
        }
    }
}
