use log::info;
use reqwest::{header::CONTENT_TYPE, Client};

use super::{
    errors::ScheduleError,
    models::calendar_model::{CalendarRequest, CalendarResponse},
};

/// Header carrying the host's session data to the schedule API.
pub const INIT_DATA_HEADER: &str = "X-Init-Data";

/// A trait, necessary for every entity that will be used for getting a calendar.
#[allow(async_fn_in_trait)]
pub trait ScheduleGetter {
    async fn get_calendar(
        &self,
        url: &str,
        init_data: &str,
        request: &CalendarRequest,
    ) -> Result<CalendarResponse, ScheduleError>;
}

impl<SG: ScheduleGetter> ScheduleGetter for &SG {
    async fn get_calendar(
        &self,
        url: &str,
        init_data: &str,
        request: &CalendarRequest,
    ) -> Result<CalendarResponse, ScheduleError> {
        (**self).get_calendar(url, init_data, request).await
    }
}

/// Allows to use Client for getting a calendar via a single POST to the schedule API.
impl ScheduleGetter for Client {
    async fn get_calendar(
        &self,
        url: &str,
        init_data: &str,
        request: &CalendarRequest,
    ) -> Result<CalendarResponse, ScheduleError> {
        info!(
            "Requesting calendar of {} ({}) from {} to {}",
            request.group_name, request.full_university_name, request.dt_from, request.dt_to
        );
        let response = self
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(INIT_DATA_HEADER, init_data)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_owned()
            } else {
                body
            };
            return Err(ScheduleError::Api { status, detail });
        }

        let body = response.bytes().await?;
        let calendar: CalendarResponse = serde_json::from_slice(&body)?;
        info!(
            "Received {} day(s) for {}",
            calendar.calendar.days.len(),
            calendar.calendar.group_name
        );
        Ok(calendar)
    }
}
