use anyhow::Result;
use ygg_console::cli::{actions, start};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let (action, globals) = start()?;

    // Handle the action
    actions::run::handle(action, &globals).await?;

    Ok(())
}
