//! Navigation commands typed at the `browse` prompt.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// Select a child series of the displayed level.
    Drill(String),
    /// Jump back to breadcrumb level N.
    Up(usize),
    Top,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("\"{0}\" is not a breadcrumb level")]
    BadLevel(String),
    #[error("unknown command \"{0}\" (drill, up, top, quit)")]
    Unknown(String),
}

pub fn parse(line: &str) -> Result<NavEvent, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "drill" | "d" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument("drill"));
            }
            // Series names may contain spaces.
            Ok(NavEvent::Drill(rest.to_string()))
        }
        "up" | "u" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument("up"));
            }
            rest.parse()
                .map(NavEvent::Up)
                .map_err(|_| ParseError::BadLevel(rest.to_string()))
        }
        "top" => Ok(NavEvent::Top),
        "quit" | "q" | "exit" => Ok(NavEvent::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drill_keeps_spaces_in_name() {
        assert_eq!(
            parse("drill  Eating Out "),
            Ok(NavEvent::Drill("Eating Out".to_string()))
        );
        assert_eq!(parse("d Food"), Ok(NavEvent::Drill("Food".to_string())));
    }

    #[test]
    fn up_parses_level() {
        assert_eq!(parse("up 2"), Ok(NavEvent::Up(2)));
        assert_eq!(parse("UP 0"), Ok(NavEvent::Up(0)));
        assert_eq!(parse("up -1"), Err(ParseError::BadLevel("-1".to_string())));
    }

    #[test]
    fn rejects_incomplete_and_unknown() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert_eq!(parse("drill"), Err(ParseError::MissingArgument("drill")));
        assert_eq!(parse("up"), Err(ParseError::MissingArgument("up")));
        assert_eq!(parse("jump 1"), Err(ParseError::Unknown("jump".to_string())));
        assert_eq!(parse("q"), Ok(NavEvent::Quit));
        assert_eq!(parse("top"), Ok(NavEvent::Top));
    }

    #[test]
    fn errors_name_the_offending_input() {
        assert_eq!(
            ParseError::MissingArgument("drill").to_string(),
            "drill needs an argument"
        );
        assert_eq!(
            parse("up x").unwrap_err().to_string(),
            "\"x\" is not a breadcrumb level"
        );
        assert_eq!(
            parse("jump").unwrap_err().to_string(),
            "unknown command \"jump\" (drill, up, top, quit)"
        );
    }
}
