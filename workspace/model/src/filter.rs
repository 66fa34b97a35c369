use chrono::NaiveDate;

use crate::entities::Order;
use crate::error::{DatasetError, Result};

/// Selection applied to orders before any view is computed.
///
/// Both date bounds are inclusive and compare against the calendar date of
/// the purchase timestamp. An empty filter selects every order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DashboardFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Exact `order_status` to keep, e.g. `delivered`.
    pub status: Option<String>,
}

impl DashboardFilter {
    pub fn new(
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        status: Option<String>,
    ) -> Self {
        Self {
            start_date,
            end_date,
            status: status.filter(|s| !s.trim().is_empty()),
        }
    }

    /// Filter restricted to a purchase date range.
    pub fn date_range(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self::new(Some(start_date), Some(end_date), None)
    }

    /// True when the filter keeps every order.
    pub fn is_unbounded(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none() && self.status.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(DatasetError::InvalidFilter(format!(
                    "start date {} is after end date {}",
                    start, end
                )));
            }
        }
        Ok(())
    }

    pub fn matches(&self, order: &Order) -> bool {
        let date = order.purchase_date();
        self.start_date.is_none_or(|start| date >= start)
            && self.end_date.is_none_or(|end| date <= end)
            && self
                .status
                .as_deref()
                .is_none_or(|status| order.status == status)
    }

    /// Stable key used to cache views computed under this filter.
    pub fn cache_key(&self) -> String {
        format!(
            "{}_{}_{}",
            self.start_date.map(|d| d.to_string()).unwrap_or_default(),
            self.end_date.map(|d| d.to_string()).unwrap_or_default(),
            self.status.as_deref().unwrap_or_default()
        )
    }
}
