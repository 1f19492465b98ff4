//! The view controller: holds which screen is shown, the query being edited and the
//! last calendar received, and keeps the host's buttons in line with all of it.
use log::{debug, error, info, warn};

use super::{
    errors::ScheduleError,
    form_store::FormStore,
    helpers::{build_calendar_request, form_valid, is_iso_date},
    host::{theme_variables, ChromeAction, Host, ImpactStyle, MainButton, ThemeVariables},
    models::{
        calendar_model::{CalendarRequest, CalendarResponse},
        Config, FormField, FormState, ViewState,
    },
    notifier::Notifier,
    render::render_schedule,
    schedule_getter::ScheduleGetter,
};

/// A request that left the controller and has not been answered yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub url: String,
    pub init_data: String,
    pub request: CalendarRequest,
}

pub struct ScheduleApp<SG, H, FS, N> {
    schedule_getter: SG,
    host: H,
    form_store: FS,
    notifier: N,
    config: Config,
    form: FormState,
    view: ViewState,
    loading: bool,
    response: Option<CalendarResponse>,
    theme: ThemeVariables,
    last_error: Option<String>,
}

impl<SG: ScheduleGetter, H: Host, FS: FormStore, N: Notifier> ScheduleApp<SG, H, FS, N> {
    /// Restores the last query from `form_store`. Nothing is sent to the host until
    /// [`ScheduleApp::start`].
    pub fn new(schedule_getter: SG, host: H, form_store: FS, notifier: N, config: Config) -> Self {
        let form = form_store.load();
        ScheduleApp {
            schedule_getter,
            host,
            form_store,
            notifier,
            config,
            form,
            view: ViewState::Form,
            loading: false,
            response: None,
            theme: ThemeVariables::new(),
            last_error: None,
        }
    }

    /// Tells the host we are ready, asks for the full viewport, applies its theme and
    /// starts following theme changes.
    pub fn start(&mut self) {
        if self.host.is_embedded() {
            info!("Running inside a host");
        }
        self.host.ready();
        self.host.expand();
        self.apply_theme();
        self.host.subscribe_theme_changed();
        self.sync_chrome();
    }

    /// Stops following the host and releases both buttons.
    pub fn teardown(&mut self) {
        self.host.unsubscribe_theme_changed();
        self.host.unbind_main_button();
        self.host.set_main_button(&MainButton::Hidden);
        self.host.unbind_back_button();
        self.host.hide_back_button();
    }

    /// Re-reads the host's colours. Also the handler for host theme changes.
    pub fn apply_theme(&mut self) {
        self.theme = theme_variables(self.host.color_scheme(), &self.host.theme_params());
        debug!("Applied {} theme variable(s)", self.theme.len());
    }

    /// Applies one edit and saves the form. Dates that are neither empty nor ISO are
    /// refused and `false` is returned.
    pub fn update_form(&mut self, field: FormField, value: impl Into<String>) -> bool {
        let value = value.into();
        let is_date = matches!(field, FormField::DateFrom | FormField::DateTo);
        if is_date && !value.is_empty() && !is_iso_date(&value) {
            warn!("Refusing {:?} = {:?}, expected YYYY-MM-DD", field, value);
            return false;
        }
        self.form.set(field, value);
        if let Err(err) = self.form_store.save(&self.form) {
            warn!("Cannot save form: {}", err);
        }
        self.sync_chrome();
        true
    }

    pub fn form_valid(&self) -> bool {
        form_valid(&self.form)
    }

    /// Entry point for actions bound to host buttons.
    pub async fn perform(&mut self, action: ChromeAction) {
        match action {
            ChromeAction::Submit => self.submit().await,
            ChromeAction::Back => self.back(),
        }
    }

    /// Asks the API for the calendar of the current query and shows it. Ignored while
    /// a request is running or the form is incomplete. Failures are shown to the user
    /// and leave the form on screen.
    pub async fn submit(&mut self) {
        let Some(pending) = self.begin_submit() else {
            return;
        };
        let result = self
            .schedule_getter
            .get_calendar(&pending.url, &pending.init_data, &pending.request)
            .await;
        self.finish_submit(result);
    }

    /// First half of [`ScheduleApp::submit`]: checks the gates, enters loading and
    /// returns what has to be sent. `None` when there is nothing to send; a missing
    /// endpoint is reported to the user right here.
    pub fn begin_submit(&mut self) -> Option<PendingRequest> {
        if self.loading || !self.form_valid() {
            debug!(
                "Submit ignored (loading: {}, valid: {})",
                self.loading,
                self.form_valid()
            );
            return None;
        }
        self.last_error = None;

        let Some(url) = self.config.endpoint().map(str::to_owned) else {
            self.report(ScheduleError::Configuration);
            return None;
        };
        self.loading = true;
        self.sync_chrome();
        self.host.impact_occurred(ImpactStyle::Light);
        Some(PendingRequest {
            url,
            init_data: self.host.init_data(),
            request: build_calendar_request(&self.form),
        })
    }

    /// Second half of [`ScheduleApp::submit`]: shows the calendar or the failure and
    /// always leaves loading.
    pub fn finish_submit(&mut self, result: Result<CalendarResponse, ScheduleError>) {
        match result {
            Ok(response) => {
                self.response = Some(response);
                self.view = ViewState::Schedule;
                info!("Showing schedule");
            }
            Err(err) => self.report(err),
        }
        self.loading = false;
        self.sync_chrome();
    }

    fn report(&mut self, err: ScheduleError) {
        let message = err.to_string();
        error!("Schedule request failed: {}", message);
        self.notifier.alert(&message);
        self.last_error = Some(message);
    }

    /// Returns to the form. The received calendar is kept.
    pub fn back(&mut self) {
        if self.view == ViewState::Schedule {
            info!("Back to the form");
        }
        self.view = ViewState::Form;
        self.sync_chrome();
    }

    /// Pushes the buttons derived from the current state to the host. Each button is
    /// unbound before it gets its action again, so a click never finds two handlers.
    pub fn sync_chrome(&mut self) {
        let main_button = MainButton::derive(self.view, self.form_valid(), self.loading);
        debug!("Main button: {:?}, view: {:?}", main_button, self.view);

        self.host.unbind_main_button();
        self.host.set_main_button(&main_button);
        if main_button.is_active() {
            self.host.bind_main_button(ChromeAction::Submit);
        }

        self.host.unbind_back_button();
        match self.view {
            ViewState::Schedule => {
                self.host.show_back_button();
                self.host.bind_back_button(ChromeAction::Back);
            }
            ViewState::Form => self.host.hide_back_button(),
        }
    }

    /// Text of whatever is on screen.
    pub fn render(&self) -> String {
        match self.view {
            ViewState::Schedule => render_schedule(&self.config.title, self.response.as_ref()),
            ViewState::Form => self.render_form(),
        }
    }

    fn render_form(&self) -> String {
        let status = if self.loading {
            "Загрузка…"
        } else if self.form_valid() {
            "Готово к отправке"
        } else {
            "Заполните университет, группу и даты"
        };
        format!(
            "{}\n\nУниверситет: {}\nГруппа: {}\nС: {}\nПо: {}\n\n{}",
            self.config.title,
            self.form.full_university_name,
            self.form.group_name,
            self.form.date_from,
            self.form.date_to,
            status
        )
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn response(&self) -> Option<&CalendarResponse> {
        self.response.as_ref()
    }

    pub fn theme(&self) -> &ThemeVariables {
        &self.theme
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn schedule_getter(&self) -> &SG {
        &self.schedule_getter
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
