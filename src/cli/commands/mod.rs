use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("ygg-console")
        .about("Console for Yggdrasil-style account services")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg(
            Arg::new("api-url")
                .short('u')
                .long("api-url")
                .help("API base URL, example: https://auth.example.com/api")
                .env("YGG_API_URL")
                .global(true)
                .required(false),
        )
        .arg(
            Arg::new("session-file")
                .short('s')
                .long("session-file")
                .help("Path of the persisted session file")
                .env("YGG_SESSION_FILE")
                .default_value("ygg-session.json")
                .global(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("YGG_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("login")
                .about("Authenticate and persist the session")
                .arg(
                    Arg::new("username")
                        .help("Account name, usually an email address")
                        .required(true),
                )
                .arg(Arg::new("password").help("Account password").required(true)),
        )
        .subcommand(Command::new("logout").about("Destroy the persisted session"))
        .subcommand(
            Command::new("profile")
                .about("Fetch a game profile from the session server")
                .arg(Arg::new("id").help("Profile id").required(true)),
        )
        .subcommand(Command::new("meta").about("Fetch best-effort server metadata"))
        .subcommand(
            Command::new("register-profile")
                .about("Register a game profile for an existing account")
                .arg(Arg::new("name").help("Profile name").required(true))
                .arg(
                    Arg::new("username")
                        .help("Account name to bind the profile to")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .short('p')
                        .long("password")
                        .help("Account password, required when the server runs profile-strict"),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "ygg-console");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Console for Yggdrasil-style account services"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_check_api_url_and_session_file() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "ygg-console",
            "--api-url",
            "https://auth.example.com/api",
            "--session-file",
            "/tmp/session.json",
            "login",
            "a@b.com",
            "pw",
        ]);

        assert_eq!(
            matches.get_one::<String>("api-url").map(|s| s.to_string()),
            Some("https://auth.example.com/api".to_string())
        );
        assert_eq!(
            matches
                .get_one::<String>("session-file")
                .map(|s| s.to_string()),
            Some("/tmp/session.json".to_string())
        );

        let (name, sub_matches) = matches.subcommand().unwrap();
        assert_eq!(name, "login");
        assert_eq!(
            sub_matches
                .get_one::<String>("username")
                .map(|s| s.to_string()),
            Some("a@b.com".to_string())
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("YGG_API_URL", Some("https://auth.example.com/api")),
                ("YGG_SESSION_FILE", Some("/tmp/session.json")),
                ("YGG_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["ygg-console", "meta"]);
                assert_eq!(
                    matches.get_one::<String>("api-url").map(|s| s.to_string()),
                    Some("https://auth.example.com/api".to_string())
                );
                assert_eq!(
                    matches
                        .get_one::<String>("session-file")
                        .map(|s| s.to_string()),
                    Some("/tmp/session.json".to_string())
                );
                assert_eq!(matches.get_one::<u8>("verbosity").map(|s| *s), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("YGG_LOG_LEVEL", Some(level)),
                    ("YGG_API_URL", Some("https://auth.example.com/api")),
                ],
                || {
                    let command = new();
                    let matches = command.get_matches_from(vec!["ygg-console", "meta"]);
                    assert_eq!(
                        matches.get_one::<u8>("verbosity").map(|s| *s),
                        Some(index as u8)
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("YGG_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "ygg-console".to_string(),
                    "--api-url".to_string(),
                    "https://auth.example.com/api".to_string(),
                ];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                args.push("meta".to_string());

                let command = new();

                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").map(|s| *s),
                    Some(index as u8)
                );
            });
        }
    }

    #[test]
    fn test_register_profile_optional_password() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "ygg-console",
            "--api-url",
            "https://auth.example.com/api",
            "register-profile",
            "Steve",
            "a@b.com",
        ]);

        let (name, sub_matches) = matches.subcommand().unwrap();
        assert_eq!(name, "register-profile");
        assert_eq!(sub_matches.get_one::<String>("password"), None);
    }
}
