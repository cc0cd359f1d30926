mod app;
mod config;
mod error;
mod events;
mod snapshot;
mod view;

use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};

use crate::{
    app::AppState,
    config::{AppConfig, Command},
    error::Result,
    events::NavEvent,
};

fn main() -> ExitCode {
    let (settings, command) = match config::load() {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "moneytree={level},engine={level}",
            level = settings.level
        ))
        .with_writer(io::stderr)
        .init();

    let mut state = AppState::default();
    let Err(err) = run(&settings, &command, &mut state) else {
        return ExitCode::SUCCESS;
    };
    state.notice.report(&err);
    if let Some(line) = view::notice(&state.notice) {
        eprintln!("{line}");
    }
    ExitCode::FAILURE
}

fn run(settings: &AppConfig, command: &Command, state: &mut AppState) -> Result<()> {
    match command {
        Command::Accounts { flat } => {
            state.apply_accounts(snapshot::load_accounts(&settings.accounts)?)?;
            let out = if *flat {
                view::account_paths(&state.accounts, &settings.separator)
            } else {
                view::accounts(&state.accounts)
            };
            print!("{out}");
        }
        Command::Report { path } => {
            let report = snapshot::load_tabulation(&settings.tabulation)?;
            state.apply_report(report);
            if let Some(path) = path {
                let report = state
                    .navigator
                    .selected()
                    .map(|selected| std::sync::Arc::clone(selected.report()));
                if let Some(report) = report {
                    state.navigator = state
                        .navigator
                        .select_report(report, config::split_path(path))?;
                }
            }
            print_report(state);
        }
        Command::Browse => {
            if settings.tabulation == "-" {
                return Err(error::AppError::Validation(
                    "browse reads commands from stdin; pass the tabulation as a file".to_string(),
                ));
            }
            state.apply_report(snapshot::load_tabulation(&settings.tabulation)?);
            browse(state)?;
        }
    }
    Ok(())
}

fn print_report(state: &AppState) {
    if let Some(selected) = state.navigator.selected() {
        print!("{}", view::report(selected));
    }
}

fn browse(state: &mut AppState) -> Result<()> {
    print_report(state);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        let event = match events::parse(&line) {
            Ok(event) => event,
            Err(events::ParseError::Empty) => continue,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        if event == NavEvent::Quit {
            break;
        }

        if let Err(err) = state.handle(&event) {
            tracing::debug!("navigation event rejected: {err}");
            if let Some(line) = view::notice(&state.notice) {
                eprintln!("{line}");
            }
            continue;
        }
        print_report(state);
        stdout.flush()?;
    }
    Ok(())
}
