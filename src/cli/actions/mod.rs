pub mod run;

use secrecy::SecretString;

/// Parsed subcommand; secrets are wrapped so they stay out of debug output.
#[derive(Debug)]
pub enum Action {
    Login {
        username: String,
        password: SecretString,
    },
    Logout,
    Profile {
        id: String,
    },
    Meta,
    RegisterProfile {
        name: String,
        username: String,
        password: Option<String>,
    },
}
