use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can stop a schedule request. The `Display` text is what the user sees.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Адрес API расписания не настроен (TT_API_URL)")]
    Configuration,
    #[error("Не удалось связаться с сервером: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Ошибка API {}: {detail}", .status.as_u16())]
    Api { status: StatusCode, detail: String },
    #[error("Не удалось разобрать ответ сервера: {0}")]
    Parse(#[from] serde_json::Error),
}
