use crate::error::{NoteError, Result};

/// One line of the main prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register,
    Login,
    List { page: u32 },
    Search { query: String, page: u32 },
    Get { id: i64 },
    Create { title: String, description: String },
    Update { id: i64, title: String, description: String },
    Patch { id: i64, title: Option<String>, description: Option<String> },
    Delete { id: i64 },
    Cached,
    Settings,
    Help,
    Exit,
}

/// One line of the `settings` sub-prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsCommand {
    Profile,
    ChangePassword,
    Logout,
    Back,
}

fn usage(text: &str) -> NoteError {
    NoteError::InvalidArgument(format!("Usage: {}", text))
}

fn parse_id(arg: Option<&String>, usage_text: &str) -> Result<i64> {
    arg.and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| usage(usage_text))
}

fn parse_page(arg: Option<&String>, usage_text: &str) -> Result<u32> {
    match arg {
        None => Ok(1),
        Some(s) => match s.parse::<u32>() {
            Ok(page) if page >= 1 => Ok(page),
            _ => Err(usage(usage_text)),
        },
    }
}

/// Everything from `index` on, joined with single spaces.
fn rest(args: &[String], index: usize) -> Option<String> {
    if args.len() > index {
        Some(args[index..].join(" "))
    } else {
        None
    }
}

impl Command {
    /// Parses a prompt line. Blank lines give `Ok(None)`.
    ///
    /// Arguments follow shell quoting, so `create "Team sync" "agenda, notes"`
    /// keeps the spaces; words past the last parameter are joined into it.
    /// A line whose quotes don't balance, like `create Groceries don't forget`,
    /// is split on whitespace instead.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let words = shell_words::split(line)
            .unwrap_or_else(|_| line.split_whitespace().map(str::to_string).collect());
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };

        let command = match name.as_str() {
            "register" => Command::Register,
            "login" => Command::Login,
            "list" => Command::List {
                page: parse_page(args.first(), "list [page]")?,
            },
            "search" => {
                let query = args
                    .first()
                    .cloned()
                    .ok_or_else(|| usage("search <query> [page]"))?;
                Command::Search {
                    query,
                    page: parse_page(args.get(1), "search <query> [page]")?,
                }
            }
            "get" => Command::Get {
                id: parse_id(args.first(), "get <id>")?,
            },
            "create" => {
                let text = "create <title> <desc>";
                let title = args.first().cloned().ok_or_else(|| usage(text))?;
                let description = rest(args, 1).ok_or_else(|| usage(text))?;
                Command::Create { title, description }
            }
            "update" => {
                let text = "update <id> <title> <desc>";
                let id = parse_id(args.first(), text)?;
                let title = args.get(1).cloned().ok_or_else(|| usage(text))?;
                let description = rest(args, 2).ok_or_else(|| usage(text))?;
                Command::Update {
                    id,
                    title,
                    description,
                }
            }
            "patch" => Command::Patch {
                id: parse_id(args.first(), "patch <id> [title] [desc]")?,
                title: args.get(1).cloned(),
                description: rest(args, 2),
            },
            "delete" => Command::Delete {
                id: parse_id(args.first(), "delete <id>")?,
            },
            "cached" => Command::Cached,
            "settings" => Command::Settings,
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            other => {
                return Err(NoteError::InvalidArgument(format!(
                    "Unknown command: {}",
                    other
                )))
            }
        };

        Ok(Some(command))
    }
}

impl SettingsCommand {
    pub fn parse(line: &str) -> Result<Option<SettingsCommand>> {
        let command = match line.trim() {
            "" => return Ok(None),
            "profile" => SettingsCommand::Profile,
            "change-password" => SettingsCommand::ChangePassword,
            "logout" => SettingsCommand::Logout,
            "back" => SettingsCommand::Back,
            _ => {
                return Err(NoteError::InvalidArgument(
                    "Unknown settings command".to_string(),
                ))
            }
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    fn usage_error(line: &str) -> String {
        match Command::parse(line) {
            Err(NoteError::InvalidArgument(msg)) => msg,
            other => panic!("expected usage error for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_blank_line_is_none() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_list_defaults_to_first_page() {
        assert_eq!(parse("list"), Command::List { page: 1 });
        assert_eq!(parse("list 3"), Command::List { page: 3 });
        assert_eq!(usage_error("list 0"), "Usage: list [page]");
        assert_eq!(usage_error("list two"), "Usage: list [page]");
    }

    #[test]
    fn test_search_requires_query() {
        assert_eq!(
            parse("search \"shopping list\" 2"),
            Command::Search {
                query: "shopping list".to_string(),
                page: 2
            }
        );
        assert_eq!(usage_error("search"), "Usage: search <query> [page]");
    }

    #[test]
    fn test_create_joins_trailing_words_into_description() {
        assert_eq!(
            parse("create Groceries milk eggs bread"),
            Command::Create {
                title: "Groceries".to_string(),
                description: "milk eggs bread".to_string()
            }
        );
        assert_eq!(
            parse("create 'Team sync' 'agenda: roadmap'"),
            Command::Create {
                title: "Team sync".to_string(),
                description: "agenda: roadmap".to_string()
            }
        );
        assert_eq!(usage_error("create lonely"), "Usage: create <title> <desc>");
    }

    #[test]
    fn test_update_needs_numeric_id_and_both_fields() {
        assert_eq!(
            parse("update 4 title body text"),
            Command::Update {
                id: 4,
                title: "title".to_string(),
                description: "body text".to_string()
            }
        );
        assert_eq!(
            usage_error("update x title body"),
            "Usage: update <id> <title> <desc>"
        );
        assert_eq!(usage_error("update 4 title"), "Usage: update <id> <title> <desc>");
    }

    #[test]
    fn test_patch_fields_are_optional() {
        assert_eq!(
            parse("patch 9"),
            Command::Patch {
                id: 9,
                title: None,
                description: None
            }
        );
        assert_eq!(
            parse("patch 9 renamed"),
            Command::Patch {
                id: 9,
                title: Some("renamed".to_string()),
                description: None
            }
        );
        assert_eq!(
            parse("patch 9 renamed new body"),
            Command::Patch {
                id: 9,
                title: Some("renamed".to_string()),
                description: Some("new body".to_string())
            }
        );
    }

    #[test]
    fn test_get_and_delete_ids() {
        assert_eq!(parse("get 12"), Command::Get { id: 12 });
        assert_eq!(parse("delete 999999"), Command::Delete { id: 999999 });
        assert_eq!(usage_error("get"), "Usage: get <id>");
    }

    #[test]
    fn test_unknown_and_unbalanced_input() {
        assert_eq!(usage_error("frobnicate"), "Unknown command: frobnicate");
        assert_eq!(usage_error("create \"unterminated"), "Usage: create <title> <desc>");
    }

    #[test]
    fn test_unbalanced_apostrophe_falls_back_to_whitespace() {
        assert_eq!(
            parse("create Groceries don't forget"),
            Command::Create {
                title: "Groceries".to_string(),
                description: "don't forget".to_string(),
            }
        );
        assert_eq!(
            parse("search Bob's"),
            Command::Search {
                query: "Bob's".to_string(),
                page: 1,
            }
        );
    }

    #[test]
    fn test_settings_commands() {
        assert_eq!(
            SettingsCommand::parse("change-password").unwrap(),
            Some(SettingsCommand::ChangePassword)
        );
        assert_eq!(SettingsCommand::parse(" back ").unwrap(), Some(SettingsCommand::Back));
        assert_eq!(SettingsCommand::parse("").unwrap(), None);
        assert!(SettingsCommand::parse("delete-account").is_err());
    }
}
