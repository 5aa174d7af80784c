//! Interactive single-page view over stdin/stdout.
//!
//! Input lines and fetch completions are multiplexed on one task, so the prompt
//! stays usable while a search is in flight.

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use weather_core::{Event, Session, render};

use crate::{cli::StderrNotifier, render::format_cards};

const HELP: &str = "\
commands:
  city <name>   edit the city (a line without a command does the same)
  search        fetch weather for the current city
  go <name>     edit the city and search
  show          print the current cards again
  quit          leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Edit(String),
    Search,
    EditAndSearch(String),
    Show,
    Help,
    Quit,
}

/// Blank lines mean nothing.
pub fn parse_line(line: &str) -> Option<Input> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let input = match (command, rest.is_empty()) {
        ("search", true) => Input::Search,
        ("show", true) => Input::Show,
        ("help", true) => Input::Help,
        ("quit" | "exit", true) => Input::Quit,
        ("city", _) => Input::Edit(rest.to_string()),
        ("go", false) => Input::EditAndSearch(rest.to_string()),
        _ => Input::Edit(line.to_string()),
    };

    Some(input)
}

pub async fn run(mut session: Session) -> anyhow::Result<()> {
    let mut notifier = StderrNotifier;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}");
    session.dispatch(Event::Mounted, &mut notifier);
    print_status(&session);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let Some(input) = parse_line(&line) else { continue };
                debug!(?input, "input");

                match input {
                    Input::Edit(city) => session.dispatch(Event::CityEdited(city), &mut notifier),
                    Input::Search => {
                        session.dispatch(Event::SearchRequested, &mut notifier);
                        print_status(&session);
                    }
                    Input::EditAndSearch(city) => {
                        session.dispatch(Event::CityEdited(city), &mut notifier);
                        session.dispatch(Event::SearchRequested, &mut notifier);
                        print_status(&session);
                    }
                    Input::Show => print_cards(&session),
                    Input::Help => println!("{HELP}"),
                    Input::Quit => break,
                }
            }
            event = session.next_completion() => {
                let shown = session.state().shown_request;
                session.dispatch(event, &mut notifier);
                if session.state().shown_request != shown {
                    print_cards(&session);
                }
            }
        }
    }

    Ok(())
}

fn print_status(session: &Session) {
    let state = session.state();
    if state.is_fetching() {
        println!("searching {}...", state.query.city.trim());
    } else if state.query.searchable_city().is_none() {
        println!("enter a city first");
    }
}

fn print_cards(session: &Session) {
    match render(session.state(), Utc::now()) {
        Some(cards) => print!("{}", format_cards(&cards)),
        None => println!("no weather yet"),
    }
}
