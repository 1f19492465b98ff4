use std::{
    error::Error,
    io::{self, BufRead, Write},
};

use clap::Parser;
use figment::{
    providers::{Env, Format, Json},
    Figment,
};
use lib::schedule_client::{
    app::ScheduleApp,
    bridge::{run_bridge, spawn_line_reader, JsonLinesHost, JsonLinesNotifier},
    form_store::JsonFormStore,
    host::NoHost,
    models::{Args, Config, FormField},
    notifier::TerminalNotifier,
};
use log::info;
use reqwest::Client;

const HELP: &str = "Команды: university <название>, group <группа>, from <ГГГГ-ММ-ДД>, \
to <ГГГГ-ММ-ДД>, submit, back, show, quit";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    /* Setup logging, stdout belongs to the host protocol in bridge mode */
    let log_target = if args.bridge {
        env_logger::Target::Stderr
    } else {
        env_logger::Target::Stdout
    };
    env_logger::builder()
        .target(log_target)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    /* Get all the required resources */
    let config: Config = Figment::new()
        .merge(Json::file(&args.config_json_path))
        .merge(Env::prefixed("TT_"))
        .extract()?;
    info!(
        "Read config.json from {}",
        std::path::absolute(&args.config_json_path)?.display()
    );
    if config.endpoint().is_none() {
        info!("No schedule API configured, requests will fail until TT_API_URL is set");
    }
    let http_client = Client::new();
    let form_store = JsonFormStore::new(args.storage_json_path.clone());

    if args.bridge {
        let mut app = ScheduleApp::new(
            http_client,
            JsonLinesHost::new(io::stdout()),
            form_store,
            JsonLinesNotifier::new(io::stdout()),
            config,
        );
        run_bridge(&mut app, spawn_line_reader(io::BufReader::new(io::stdin()))).await?;
    } else {
        let mut app = ScheduleApp::new(http_client, NoHost, form_store, TerminalNotifier, config);
        run_terminal(&mut app).await?;
    }
    Ok(())
}

async fn run_terminal(
    app: &mut ScheduleApp<Client, NoHost, JsonFormStore, TerminalNotifier>,
) -> Result<(), Box<dyn Error>> {
    app.start();
    println!("{}\n\n{}", app.render(), HELP);

    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            break;
        }
        let (command, value) = match line.trim().split_once(' ') {
            Some((command, value)) => (command, value.trim()),
            None => (line.trim(), ""),
        };
        match command {
            "" => continue,
            "university" => {
                app.update_form(FormField::University, value);
            }
            "group" => {
                app.update_form(FormField::Group, value);
            }
            "from" | "to" => {
                let field = if command == "from" {
                    FormField::DateFrom
                } else {
                    FormField::DateTo
                };
                if !app.update_form(field, value) {
                    println!("Дата должна быть в формате ГГГГ-ММ-ДД");
                    continue;
                }
            }
            "submit" => app.submit().await,
            "back" => app.back(),
            "show" => {}
            "quit" | "exit" => break,
            _ => {
                println!("{}", HELP);
                continue;
            }
        }
        println!("{}", app.render());
    }

    app.teardown();
    Ok(())
}
