use chrono::{Datelike, NaiveDate, Weekday};

use super::CalendarId;

/// the days on which a set of trips is in service.
#[derive(Debug, Clone)]
pub struct ServiceCalendar {
    pub calendar_id: CalendarId,
    pub service_id: String,
    /// first date of service (inclusive)
    pub start_date: NaiveDate,
    /// last date of service (inclusive)
    pub end_date: NaiveDate,
    /// weekday mask, indexed from monday
    pub weekdays: [bool; 7],
    /// dates added to service regardless of the weekday mask and date range
    pub added_dates: Vec<NaiveDate>,
    /// dates removed from service
    pub removed_dates: Vec<NaiveDate>,
}

impl ServiceCalendar {
    /// true if trips on this calendar run on the given service date.
    /// explicit exceptions take precedence over the regular weekly pattern.
    pub fn is_active(&self, date: &NaiveDate) -> bool {
        if self.removed_dates.contains(date) {
            return false;
        }
        if self.added_dates.contains(date) {
            return true;
        }
        let in_range = self.start_date <= *date && *date <= self.end_date;
        in_range && self.runs_on(date.weekday())
    }

    pub fn runs_on(&self, weekday: Weekday) -> bool {
        self.weekdays[weekday.num_days_from_monday() as usize]
    }
}
