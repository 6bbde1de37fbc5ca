use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;

pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let globals = GlobalArgs {
        api_url: matches
            .get_one("api-url")
            .map(|s: &String| s.to_string())
            .ok_or_else(|| anyhow!("missing required argument: --api-url"))?,
        session_file: matches
            .get_one("session-file")
            .map(|s: &String| PathBuf::from(s))
            .ok_or_else(|| anyhow!("missing required argument: --session-file"))?,
    };

    let (name, sub_matches) = matches
        .subcommand()
        .context("a subcommand is required")?;

    let arg = |key: &str| -> Result<String> {
        sub_matches
            .get_one(key)
            .map(|s: &String| s.to_string())
            .ok_or_else(|| anyhow!("missing required argument: {key}"))
    };

    let action = match name {
        "login" => Action::Login {
            username: arg("username")?,
            password: SecretString::from(arg("password")?),
        },
        "logout" => Action::Logout,
        "profile" => Action::Profile { id: arg("id")? },
        "meta" => Action::Meta,
        "register-profile" => Action::RegisterProfile {
            name: arg("name")?,
            username: arg("username")?,
            password: sub_matches
                .get_one("password")
                .map(|s: &String| s.to_string()),
        },
        _ => return Err(anyhow!("unknown subcommand: {name}")),
    };

    Ok((action, globals))
}
