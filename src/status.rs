use crate::models::{Status, StatusCategory};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Items with this many days left or fewer (and not yet expired) are "soon".
pub const SOON_THRESHOLD_DAYS: i64 = 3;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Whole days from `now` until the start of `expiry`, rounded up. On the expiry
/// day itself this yields 0, so the item is not yet expired.
pub fn days_until(expiry: NaiveDate, now: NaiveDateTime) -> i64 {
    let millis = (expiry.and_time(NaiveTime::MIN) - now).num_milliseconds();
    let whole = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        whole
    } else {
        whole + 1
    }
}

pub fn category_for(days: i64) -> StatusCategory {
    if days < 0 {
        StatusCategory::Expired
    } else if days <= SOON_THRESHOLD_DAYS {
        StatusCategory::Soon
    } else {
        StatusCategory::Ok
    }
}

pub fn status_of(expiry: NaiveDate, now: NaiveDateTime) -> Status {
    let days = days_until(expiry, now);
    let category = category_for(days);
    let label = match category {
        StatusCategory::Expired => "Expired".to_string(),
        StatusCategory::Soon => format!("{days} day(s) left"),
        StatusCategory::Ok => format!("{days} day(s)"),
    };

    Status {
        category,
        label,
        days,
    }
}
