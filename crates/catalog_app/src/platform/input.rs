use catalog_core::{CharacterId, Msg, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Msg(Msg),
    Help,
    Quit,
}

/// Parses one line typed at the prompt.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let msg = match word.to_ascii_lowercase().as_str() {
        "" => Msg::NoOp,
        "search" | "s" => {
            if rest.is_empty() {
                return Err("usage: search <text>".to_string());
            }
            Msg::SearchSubmitted(rest.to_string())
        }
        "clear" => Msg::SearchSubmitted(String::new()),
        "next" | "n" => Msg::NextPageClicked,
        "prev" | "p" => Msg::PrevPageClicked,
        "sort" => match rest.to_ascii_lowercase().as_str() {
            "asc" | "" => Msg::SortChanged(SortOrder::NameAsc),
            "desc" => Msg::SortChanged(SortOrder::NameDesc),
            other => return Err(format!("unknown sort order {other:?}; use asc or desc")),
        },
        "view" | "v" => Msg::ViewModeToggled,
        "fav" | "f" => Msg::FavoriteToggleRequested {
            id: parse_id(rest)?,
        },
        "show" => Msg::CharacterSelected {
            id: parse_id(rest)?,
        },
        "help" | "?" => return Ok(Command::Help),
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        other => return Err(format!("unknown command {other:?}; type help")),
    };
    Ok(Command::Msg(msg))
}

fn parse_id(raw: &str) -> Result<CharacterId, String> {
    raw.parse()
        .map_err(|_| format!("expected a character id, got {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_keeps_inner_spaces() {
        assert_eq!(
            parse_command("search  iron man "),
            Ok(Command::Msg(Msg::SearchSubmitted("iron man".to_string())))
        );
    }

    #[test]
    fn navigation_and_layout_commands() {
        assert_eq!(parse_command("next"), Ok(Command::Msg(Msg::NextPageClicked)));
        assert_eq!(parse_command("P"), Ok(Command::Msg(Msg::PrevPageClicked)));
        assert_eq!(parse_command("view"), Ok(Command::Msg(Msg::ViewModeToggled)));
        assert_eq!(
            parse_command("sort DESC"),
            Ok(Command::Msg(Msg::SortChanged(SortOrder::NameDesc)))
        );
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(parse_command(""), Ok(Command::Msg(Msg::NoOp)));
    }

    #[test]
    fn ids_must_be_numeric() {
        assert_eq!(
            parse_command("fav 1009610"),
            Ok(Command::Msg(Msg::FavoriteToggleRequested { id: 1009610 }))
        );
        assert!(parse_command("show spider").is_err());
        assert!(parse_command("search").is_err());
        assert!(parse_command("dance").is_err());
    }
}
