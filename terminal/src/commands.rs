use crate::PREFIX;

pub const HELP_TEXT: &str = "Available commands:\n\
    - !help: Displays this help message.\n\
    - !key <api key>: Sets your OpenRouter API key (https://openrouter.ai/keys).\n\
    - !model [name or number]: Lists the models, or chooses one.\n\
    - !temperature <0.0-1.0>: Sets the response creativity.\n\
    - !retries <1-5>: Sets how many times a failed request is attempted.\n\
    - !settings: Shows the current settings.\n\
    - !history: Shows the whole conversation again.\n\
    - !clear: Clears the chat.\n\
    - !quit: Leaves.\n\
    Anything else is sent to the assistant.";

#[derive(Debug, PartialEq)]
pub enum Command<'a> {
    Help,
    Key(&'a str),
    Model(Option<&'a str>),
    Temperature(&'a str),
    Retries(&'a str),
    Settings,
    History,
    Clear,
    Quit,
    Unknown(&'a str),
    Prompt(&'a str),
}

/// Reads one input line. Blank lines are ignored.
pub fn parse(line: &str) -> Option<Command<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(rest) = line.strip_prefix(PREFIX) else {
        return Some(Command::Prompt(line));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    let command = match name {
        "help" => Command::Help,
        "key" => Command::Key(arg),
        "model" if arg.is_empty() => Command::Model(None),
        "model" => Command::Model(Some(arg)),
        "temperature" => Command::Temperature(arg),
        "retries" => Command::Retries(arg),
        "settings" => Command::Settings,
        "history" => Command::History,
        "clear" => Command::Clear,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(name),
    };
    Some(command)
}
