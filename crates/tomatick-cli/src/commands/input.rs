//! Line commands accepted by `tomatick run`.

use tomatick_core::{Intent, Mode, SettingsForm, UserInput, ValidationError};

pub const HELP: &str = "\
commands: [enter]/s start or pause   w work   b break   r reset session
          set <work-min> <break-min> <count>   y/n answer   q quit";

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    Unknown(String),
    Usage,
    Invalid(ValidationError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Unknown(cmd) => write!(f, "unknown command '{cmd}'"),
            ParseError::Usage => f.write_str("usage: set <work-min> <break-min> <count>"),
            ParseError::Invalid(e) => write!(f, "settings not saved: {e}"),
        }
    }
}

/// `Ok(None)` means the line asked for help.
pub fn parse_line(line: &str) -> Result<Option<UserInput>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Some(Intent::ToggleRun.into()));
    };

    let input = match head.to_ascii_lowercase().as_str() {
        "s" | "start" | "pause" | "toggle" => Intent::ToggleRun.into(),
        "w" | "work" | "pomodoro" => Intent::SelectMode(Mode::Work).into(),
        "b" | "break" => Intent::SelectMode(Mode::Break).into(),
        "r" | "reset" => Intent::ResetSession.into(),
        "y" | "yes" => UserInput::Answer(true),
        "n" | "no" => UserInput::Answer(false),
        "q" | "quit" | "exit" => UserInput::Quit,
        "h" | "help" | "?" => return Ok(None),
        "set" => {
            let args: Vec<&str> = words.collect();
            let &[work, brk, count] = args.as_slice() else {
                return Err(ParseError::Usage);
            };
            let update = SettingsForm::new(work, brk, count)
                .validate()
                .map_err(ParseError::Invalid)?;
            Intent::SaveSettings(update).into()
        }
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tomatick_core::SettingsUpdate;

    #[test]
    fn empty_line_toggles() {
        assert_eq!(parse_line(""), Ok(Some(Intent::ToggleRun.into())));
        assert_eq!(parse_line("   "), Ok(Some(Intent::ToggleRun.into())));
    }

    #[test]
    fn mode_and_answers() {
        assert_eq!(
            parse_line("B"),
            Ok(Some(Intent::SelectMode(Mode::Break).into()))
        );
        assert_eq!(parse_line("y"), Ok(Some(UserInput::Answer(true))));
        assert_eq!(parse_line("no"), Ok(Some(UserInput::Answer(false))));
        assert_eq!(parse_line("q"), Ok(Some(UserInput::Quit)));
        assert_eq!(parse_line("help"), Ok(None));
    }

    #[test]
    fn set_validates_input() {
        assert_eq!(
            parse_line("set 10 2 3"),
            Ok(Some(
                Intent::SaveSettings(SettingsUpdate::new(600, 120, 3).unwrap()).into()
            ))
        );
        assert!(matches!(
            parse_line("set 0 5 0"),
            Err(ParseError::Invalid(_))
        ));
        assert_eq!(parse_line("set 10 2"), Err(ParseError::Usage));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse_line("dance"),
            Err(ParseError::Unknown("dance".into()))
        );
    }
}
