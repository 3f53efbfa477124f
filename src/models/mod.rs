use chrono::NaiveDate;

use crate::error::ApiError;

pub mod activity;
pub mod cruise;
pub mod flight;
pub mod hotel;
pub mod insurance;
pub mod note;
pub mod rental;
pub mod resource;
pub mod reward_program;
pub mod transportation;
pub mod trip;
pub mod user;

/// Rejects ranges whose end precedes their start. Open ranges pass.
pub fn check_date_range(
    label: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), ApiError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(ApiError::BadRequest(format!(
            "{} end date {} is before its start date {}",
            label, end, start
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn date_range_rules() {
        assert!(check_date_range("Trip", None, None).is_ok());
        assert!(check_date_range("Trip", Some(date("2024-05-01")), None).is_ok());
        assert!(check_date_range("Trip", Some(date("2024-05-01")), Some(date("2024-05-01"))).is_ok());
        assert!(matches!(
            check_date_range("Trip", Some(date("2024-05-02")), Some(date("2024-05-01"))),
            Err(ApiError::BadRequest(_))
        ));
    }
}
