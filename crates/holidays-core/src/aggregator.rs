//! Holiday aggregation
//!
//! Combines, filters and ranks holiday lists fetched from a `HolidaySource`:
//! - last three observed holidays, looking back into the previous year
//! - non-weekend holiday counts across countries, ranked
//! - holidays shared by two countries
//!
//! Holiday identity is the date. Deduplication and intersection go through
//! explicit `BTreeMap<NaiveDate, Holiday>` indexes, which also keep the
//! results in ascending date order.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use futures_util::future::{try_join, try_join_all};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::model::{CountryHolidayCount, Holiday};
use crate::source::HolidaySource;

/// Number of holidays returned by `last_three_holidays`
pub const RECENT_HOLIDAY_LIMIT: usize = 3;

/// Business operations over an upstream holiday source
#[derive(Clone)]
pub struct HolidayAggregator {
    source: Arc<dyn HolidaySource>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for HolidayAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidayAggregator").finish_non_exhaustive()
    }
}

impl HolidayAggregator {
    /// Create an aggregator reading "today" from the system clock
    pub fn new(source: Arc<dyn HolidaySource>) -> Self {
        Self::with_clock(source, Arc::new(SystemClock))
    }

    pub fn with_clock(source: Arc<dyn HolidaySource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }

    /// The most recent holidays up to and including today, newest first
    ///
    /// The previous year is only fetched when the current year yields fewer
    /// than three observed holidays. Its holidays are appended after the
    /// current year's, each year sorted on its own.
    pub async fn last_three_holidays(&self, country_code: &str) -> Result<Vec<Holiday>> {
        let today = self.clock.today();
        let current_year = today.year();

        let mut holidays = self.observed_holidays(current_year, country_code, today).await?;

        if holidays.len() < RECENT_HOLIDAY_LIMIT {
            debug!(
                country = country_code,
                found = holidays.len(),
                "Looking back into previous year"
            );
            let previous = self
                .observed_holidays(current_year - 1, country_code, today)
                .await?;
            holidays.extend(previous);
        }

        holidays.truncate(RECENT_HOLIDAY_LIMIT);

        info!(country = country_code, count = holidays.len(), "Resolved last holidays");
        Ok(holidays)
    }

    /// Non-weekend holiday counts per country, highest count first
    ///
    /// Countries are fetched concurrently. The first failure aborts the whole
    /// request and is reported as `Error::AggregationFailed`. Equal counts
    /// keep the order in which the countries were given.
    pub async fn non_weekend_holiday_counts<S: AsRef<str>>(
        &self,
        year: i32,
        country_codes: &[S],
    ) -> Result<Vec<CountryHolidayCount>> {
        let fetches = country_codes.iter().map(|code| async move {
            let code = code.as_ref();
            let count = self.count_non_weekend_holidays(year, code).await?;
            Ok::<_, Error>(CountryHolidayCount::new(code, count))
        });

        let mut counts = try_join_all(fetches).await.map_err(|e| {
            warn!(year, error = %e, "Failed to fetch public holidays count");
            Error::aggregation(e)
        })?;

        // Stable sort: ties keep input order
        counts.sort_by(|a, b| b.count.cmp(&a.count));

        info!(year, countries = counts.len(), "Counted non-weekend holidays");
        Ok(counts)
    }

    /// Holidays observed on the same date by both countries, ascending
    ///
    /// When the two countries name the date differently, the first country's
    /// local name is kept.
    pub async fn common_holidays(
        &self,
        year: i32,
        country_code1: &str,
        country_code2: &str,
    ) -> Result<Vec<Holiday>> {
        let (first, second) = try_join(
            self.source.fetch(year, country_code1),
            self.source.fetch(year, country_code2),
        )
        .await?;

        let common = intersect_by_date(first, &second);

        info!(
            year,
            first = country_code1,
            second = country_code2,
            count = common.len(),
            "Resolved common holidays"
        );
        Ok(common)
    }

    /// Number of holidays of `country_code` in `year` that fall on a weekday
    pub async fn count_non_weekend_holidays(&self, year: i32, country_code: &str) -> Result<usize> {
        let holidays = self.source.fetch(year, country_code).await?;
        let count = holidays.iter().filter(|h| !h.is_weekend()).count();

        debug!(country = country_code, year, total = holidays.len(), count, "Counted weekday holidays");
        Ok(count)
    }

    /// Holidays of one year not after `today`, newest first
    async fn observed_holidays(
        &self,
        year: i32,
        country_code: &str,
        today: NaiveDate,
    ) -> Result<Vec<Holiday>> {
        let mut holidays: Vec<Holiday> = self
            .source
            .fetch(year, country_code)
            .await?
            .into_iter()
            .filter(|h| h.date <= today)
            .collect();

        holidays.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(holidays)
    }
}

/// Intersect two holiday lists on date, keeping entries from `first`
fn intersect_by_date(first: Vec<Holiday>, second: &[Holiday]) -> Vec<Holiday> {
    let mut by_date: BTreeMap<NaiveDate, Holiday> = BTreeMap::new();
    for holiday in first {
        by_date.entry(holiday.date).or_insert(holiday);
    }

    let mut common: BTreeMap<NaiveDate, Holiday> = BTreeMap::new();
    for date in second.iter().map(|h| h.date) {
        if let Some(holiday) = by_date.remove(&date) {
            common.insert(date, holiday);
        }
    }

    common.into_values().collect()
}
