/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputCommand {
    /// Plain text: becomes the new search term.
    Search(String),
    /// `:open N` opens row N (1-based) of the current list.
    Open(usize),
    /// `:refresh` reloads the list for the current search term.
    Refresh,
    /// `:quit` or `:q`.
    Quit,
    Unknown(String),
}

pub(crate) fn parse_line(line: &str) -> InputCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix(':') else {
        return InputCommand::Search(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("q" | "quit"), None, None) => InputCommand::Quit,
        (Some("refresh"), None, None) => InputCommand::Refresh,
        (Some("open"), Some(row), None) => match row.parse::<usize>() {
            Ok(row) if row > 0 => InputCommand::Open(row),
            _ => InputCommand::Unknown(line.to_string()),
        },
        _ => InputCommand::Unknown(line.to_string()),
    }
}
