//! Actions the controller can apply.
//!
//! Key binds resolve to actions; hosts can also apply actions directly
//! through [`crate::Command::handle_action`].

/// Actions that can be performed on a [`crate::Command`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Commit the highlighted item
    Accept,
    /// Add a character to the query
    AddChar(char),
    /// Move the query cursor backward one character
    BackwardChar,
    /// Delete the character before the query cursor
    BackwardDeleteChar,
    /// Move the query cursor to the beginning of the line
    BeginningOfLine,
    /// Delete the character under the query cursor
    DeleteChar,
    /// Close the results list without clearing the query
    Dismiss,
    /// Move the highlight down by N items
    Down(u16),
    /// Move the query cursor to the end of the line
    EndOfLine,
    /// Jump to the first item in the filtered list
    First,
    /// Move the query cursor forward one character
    ForwardChar,
    /// Ignore the action
    Ignore,
    /// Jump to the last item in the filtered list
    Last,
    /// Toggle the open flag
    ToggleOpen,
    /// Delete the query from the cursor to the beginning of the line
    UnixLineDiscard,
    /// Move the highlight up by N items
    Up(u16),
}

/// Parses an action string (as used in bind expressions) into an Action
pub fn parse_action(raw_action: &str) -> Option<Action> {
    let parts = raw_action.split_once([':', '(', ')']);
    let action;
    let mut arg = None;
    match parts {
        None => action = raw_action,
        Some((act, "")) => action = act,
        Some((act, a)) => {
            action = act;
            arg = Some(a.trim_end_matches(')').to_string());
        }
    }
    debug!("parse_action: action={action}, arg={arg:?}");

    use Action::*;
    match action {
        "accept" => Some(Accept),
        "add-char" => arg.and_then(|a| a.chars().next()).map(AddChar),
        "backward-char" => Some(BackwardChar),
        "backward-delete-char" => Some(BackwardDeleteChar),
        "beginning-of-line" => Some(BeginningOfLine),
        "delete-char" => Some(DeleteChar),
        "dismiss" => Some(Dismiss),
        "down" => Some(Down(arg.and_then(|s| s.parse().ok()).unwrap_or(1))),
        "end-of-line" => Some(EndOfLine),
        "first" | "top" => Some(First),
        "forward-char" => Some(ForwardChar),
        "ignore" => Some(Ignore),
        "last" => Some(Last),
        "toggle-open" => Some(ToggleOpen),
        "unix-line-discard" => Some(UnixLineDiscard),
        "up" => Some(Up(arg.and_then(|s| s.parse().ok()).unwrap_or(1))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_argument_forms() {
        assert_eq!(parse_action("accept"), Some(Action::Accept));
        assert_eq!(parse_action("down"), Some(Action::Down(1)));
        assert_eq!(parse_action("down:3"), Some(Action::Down(3)));
        assert_eq!(parse_action("up(2)"), Some(Action::Up(2)));
        assert_eq!(parse_action("add-char:x"), Some(Action::AddChar('x')));
        assert_eq!(parse_action("no-such-action"), None);
    }
}
