use std::path::PathBuf;

/// Arguments shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub session_file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::GlobalArgs;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs {
            api_url: "https://auth.example.com/api".to_string(),
            session_file: "session.json".into(),
        };
        assert_eq!(args.api_url, "https://auth.example.com/api");
        assert_eq!(args.session_file.to_str(), Some("session.json"));
    }
}
