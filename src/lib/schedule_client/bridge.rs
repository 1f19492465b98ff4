//! Host bridge over JSON lines: events from the embedding runtime come in on one
//! stream, commands for its chrome go out on another, one object per line.
use std::{
    future::Future,
    io::{self, BufRead, Write},
    pin::Pin,
};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::{
    app::{PendingRequest, ScheduleApp},
    errors::ScheduleError,
    form_store::FormStore,
    host::{ChromeAction, ColorScheme, Host, ImpactStyle, MainButton, ThemeParams, ThemeVariables},
    models::{calendar_model::CalendarResponse, FormField, ViewState},
    notifier::Notifier,
    schedule_getter::ScheduleGetter,
};

const EVENT_QUEUE_SIZE: usize = 64;

#[derive(Deserialize, Debug)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BridgeEvent {
    Init {
        #[serde(default)]
        init_data: String,
        #[serde(default)]
        color_scheme: Option<ColorScheme>,
        #[serde(default)]
        theme_params: ThemeParams,
    },
    ThemeChanged {
        #[serde(default)]
        color_scheme: Option<ColorScheme>,
        #[serde(default)]
        theme_params: ThemeParams,
    },
    MainButtonClicked,
    BackButtonClicked,
    Edit {
        field: FormField,
        value: String,
    },
}

#[derive(Serialize, Debug)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum BridgeCommand<'a> {
    Ready,
    Expand,
    MainButton {
        visible: bool,
        active: bool,
        text: &'a str,
    },
    BackButton {
        visible: bool,
    },
    Haptic {
        style: ImpactStyle,
    },
    Alert {
        message: &'a str,
    },
    Theme {
        variables: &'a ThemeVariables,
    },
    Render {
        view: ViewState,
        text: &'a str,
    },
}

fn write_command<W: Write>(out: &mut W, command: &BridgeCommand) {
    let written = serde_json::to_writer(&mut *out, command)
        .map_err(io::Error::from)
        .and_then(|_| writeln!(out))
        .and_then(|_| out.flush());
    if let Err(err) = written {
        warn!("Cannot write {:?} to host: {}", command, err);
    }
}

/// [`Host`] backed by a JSON-lines writer. Holds what the runtime reported about
/// itself and at most one bound action per button.
pub struct JsonLinesHost<W: Write> {
    out: W,
    init_data: String,
    color_scheme: Option<ColorScheme>,
    theme_params: ThemeParams,
    theme_subscribed: bool,
    main_action: Option<ChromeAction>,
    back_action: Option<ChromeAction>,
}

impl<W: Write> JsonLinesHost<W> {
    pub fn new(out: W) -> Self {
        JsonLinesHost {
            out,
            init_data: String::new(),
            color_scheme: None,
            theme_params: ThemeParams::default(),
            theme_subscribed: false,
            main_action: None,
            back_action: None,
        }
    }

    pub fn set_init_data(&mut self, init_data: String) {
        self.init_data = init_data;
    }

    pub fn set_theme(&mut self, color_scheme: Option<ColorScheme>, theme_params: ThemeParams) {
        self.color_scheme = color_scheme;
        self.theme_params = theme_params;
    }

    pub fn theme_subscribed(&self) -> bool {
        self.theme_subscribed
    }

    /// Action bound to the primary button right now, if any.
    pub fn main_action(&self) -> Option<ChromeAction> {
        self.main_action
    }

    pub fn back_action(&self) -> Option<ChromeAction> {
        self.back_action
    }

    pub fn emit(&mut self, command: &BridgeCommand) {
        write_command(&mut self.out, command);
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Host for JsonLinesHost<W> {
    fn ready(&mut self) {
        self.emit(&BridgeCommand::Ready);
    }

    fn expand(&mut self) {
        self.emit(&BridgeCommand::Expand);
    }

    fn color_scheme(&self) -> Option<ColorScheme> {
        self.color_scheme
    }

    fn theme_params(&self) -> ThemeParams {
        self.theme_params.clone()
    }

    fn subscribe_theme_changed(&mut self) {
        self.theme_subscribed = true;
    }

    fn unsubscribe_theme_changed(&mut self) {
        self.theme_subscribed = false;
    }

    fn set_main_button(&mut self, button: &MainButton) {
        let command = match button {
            MainButton::Hidden => BridgeCommand::MainButton {
                visible: false,
                active: false,
                text: "",
            },
            MainButton::Visible { text, active } => BridgeCommand::MainButton {
                visible: true,
                active: *active,
                text: *text,
            },
        };
        self.emit(&command);
    }

    fn bind_main_button(&mut self, action: ChromeAction) {
        self.main_action = Some(action);
    }

    fn unbind_main_button(&mut self) {
        self.main_action = None;
    }

    fn show_back_button(&mut self) {
        self.emit(&BridgeCommand::BackButton { visible: true });
    }

    fn hide_back_button(&mut self) {
        self.emit(&BridgeCommand::BackButton { visible: false });
    }

    fn bind_back_button(&mut self, action: ChromeAction) {
        self.back_action = Some(action);
    }

    fn unbind_back_button(&mut self) {
        self.back_action = None;
    }

    fn impact_occurred(&mut self, style: ImpactStyle) {
        self.emit(&BridgeCommand::Haptic { style });
    }

    fn init_data(&self) -> String {
        self.init_data.clone()
    }
}

/// Sends failures to the runtime as `alert` commands.
pub struct JsonLinesNotifier<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesNotifier<W> {
    pub fn new(out: W) -> Self {
        JsonLinesNotifier { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Notifier for JsonLinesNotifier<W> {
    fn alert(&mut self, message: &str) {
        write_command(&mut self.out, &BridgeCommand::Alert { message });
    }
}

type BridgeApp<SG, W, FS, N> = ScheduleApp<SG, JsonLinesHost<W>, FS, N>;

fn emit_theme<SG, W, FS, N>(app: &mut BridgeApp<SG, W, FS, N>)
where
    SG: ScheduleGetter,
    W: Write,
    FS: FormStore,
    N: Notifier,
{
    let variables = app.theme().clone();
    app.host_mut().emit(&BridgeCommand::Theme {
        variables: &variables,
    });
}

fn emit_render<SG, W, FS, N>(app: &mut BridgeApp<SG, W, FS, N>)
where
    SG: ScheduleGetter,
    W: Write,
    FS: FormStore,
    N: Notifier,
{
    let view = app.view();
    let text = app.render();
    app.host_mut().emit(&BridgeCommand::Render { view, text: &text });
}

fn start_session<SG, W, FS, N>(app: &mut BridgeApp<SG, W, FS, N>)
where
    SG: ScheduleGetter,
    W: Write,
    FS: FormStore,
    N: Notifier,
{
    app.start();
    emit_theme(app);
    emit_render(app);
}

/* host buttons only carry actions, a submit is started by the caller */
fn trigger<SG, W, FS, N>(
    app: &mut BridgeApp<SG, W, FS, N>,
    action: Option<ChromeAction>,
) -> Option<PendingRequest>
where
    SG: ScheduleGetter,
    W: Write,
    FS: FormStore,
    N: Notifier,
{
    match action {
        Some(ChromeAction::Submit) => app.begin_submit(),
        Some(ChromeAction::Back) => {
            app.back();
            None
        }
        None => {
            debug!("Click without a bound action dropped");
            None
        }
    }
}

/// Handles one event from the runtime. Clicks on a button without a bound action, and
/// any main button click while a request is running, are dropped.
fn handle_event<SG, W, FS, N>(
    app: &mut BridgeApp<SG, W, FS, N>,
    event: BridgeEvent,
) -> Option<PendingRequest>
where
    SG: ScheduleGetter,
    W: Write,
    FS: FormStore,
    N: Notifier,
{
    let pending = match event {
        BridgeEvent::Init {
            init_data,
            color_scheme,
            theme_params,
        } => {
            app.host_mut().set_init_data(init_data);
            app.host_mut().set_theme(color_scheme, theme_params);
            app.apply_theme();
            emit_theme(app);
            None
        }
        BridgeEvent::ThemeChanged {
            color_scheme,
            theme_params,
        } => {
            app.host_mut().set_theme(color_scheme, theme_params);
            if app.host().theme_subscribed() {
                app.apply_theme();
                emit_theme(app);
            }
            None
        }
        BridgeEvent::MainButtonClicked if app.loading() => {
            debug!("Main button clicked while loading, ignored");
            None
        }
        BridgeEvent::MainButtonClicked => {
            let action = app.host().main_action();
            trigger(app, action)
        }
        BridgeEvent::BackButtonClicked => {
            let action = app.host().back_action();
            trigger(app, action)
        }
        BridgeEvent::Edit { field, value } => {
            app.update_form(field, value);
            None
        }
    };
    emit_render(app);
    pending
}

async fn send_request<SG: ScheduleGetter>(
    schedule_getter: SG,
    pending: PendingRequest,
) -> Result<CalendarResponse, ScheduleError> {
    schedule_getter
        .get_calendar(&pending.url, &pending.init_data, &pending.request)
        .await
}

/// Reads `input` line by line on the blocking pool and hands the lines over through a
/// channel, so the runtime stays free while a request is running.
pub fn spawn_line_reader<R>(input: R) -> mpsc::Receiver<io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(EVENT_QUEUE_SIZE);
    tokio::task::spawn_blocking(move || {
        for line in input.lines() {
            let failed = line.is_err();
            if tx.blocking_send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}

fn parse_event(line: &str) -> Option<BridgeEvent> {
    if line.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(event) => Some(event),
        Err(err) => {
            warn!("Skipping malformed host event {:?}: {}", line, err);
            None
        }
    }
}

type InFlight<'g> = Pin<Box<dyn Future<Output = Result<CalendarResponse, ScheduleError>> + 'g>>;

enum Step {
    Answered(Result<CalendarResponse, ScheduleError>),
    Input(Option<io::Result<String>>),
}

/// Serves the runtime until `events` closes and the last request is answered. An
/// `init` event may come first to hand over session data and theme before the client
/// announces itself ready. Events keep flowing while a request runs.
pub async fn run_bridge<'g, SG, W, FS, N>(
    app: &mut BridgeApp<SG, W, FS, N>,
    mut events: mpsc::Receiver<io::Result<String>>,
) -> io::Result<()>
where
    SG: ScheduleGetter + Clone + 'g,
    W: Write,
    FS: FormStore,
    N: Notifier,
{
    let mut started = false;
    let mut input_open = true;
    let mut in_flight: Option<InFlight<'g>> = None;

    loop {
        let step = match in_flight.as_mut() {
            Some(request) => tokio::select! {
                result = request => Step::Answered(result),
                line = events.recv(), if input_open => Step::Input(line),
            },
            None if input_open => Step::Input(events.recv().await),
            None => break,
        };

        let line = match step {
            Step::Answered(result) => {
                in_flight = None;
                app.finish_submit(result);
                emit_render(app);
                continue;
            }
            Step::Input(Some(Ok(line))) => line,
            Step::Input(Some(Err(err))) => {
                warn!("Host input failed: {}", err);
                app.teardown();
                return Err(err);
            }
            Step::Input(None) => {
                input_open = false;
                continue;
            }
        };
        let Some(event) = parse_event(&line) else {
            continue;
        };

        if !started {
            started = true;
            if let BridgeEvent::Init {
                init_data,
                color_scheme,
                theme_params,
            } = event
            {
                app.host_mut().set_init_data(init_data);
                app.host_mut().set_theme(color_scheme, theme_params);
                start_session(app);
                continue;
            }
            start_session(app);
        }
        if let Some(pending) = handle_event(app, event) {
            let schedule_getter = app.schedule_getter().clone();
            in_flight = Some(Box::pin(send_request(schedule_getter, pending)));
        }
    }

    info!("Host closed the bridge");
    app.teardown();
    Ok(())
}
