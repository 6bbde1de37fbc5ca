use crate::cli::{actions::Action, globals::GlobalArgs};
use crate::config::AppConfig;
use crate::router::TracingNavigator;
use crate::session::{client::SessionClient, store::FileStore};
use anyhow::Result;
use std::sync::Arc;

/// Handle the parsed action against a file-backed session.
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let config = AppConfig::new(&globals.api_url)?;
    let store = Arc::new(FileStore::new(&globals.session_file));
    let client = SessionClient::new(&config, store, Arc::new(TracingNavigator))?;

    match action {
        Action::Login { username, password } => {
            let session = client.login(&username, &password).await?;
            match session.available_profiles.as_deref() {
                Some(profiles) if !profiles.is_empty() => {
                    for profile in profiles {
                        println!("{}\t{}", profile.id, profile.name);
                    }
                }
                _ => println!("logged in, no profiles on this account"),
            }
        }
        Action::Logout => client.logout(),
        Action::Profile { id } => {
            let profile = client.get_profile_details(&id).await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Action::Meta => match client.get_server_meta().await {
            Some(meta) => println!("{}", serde_json::to_string_pretty(&meta)?),
            None => println!("server metadata unavailable"),
        },
        Action::RegisterProfile {
            name,
            username,
            password,
        } => {
            let result = client
                .register_profile(&name, &username, password.as_deref())
                .await?;
            if !result.is_null() {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        }
    }

    Ok(())
}
