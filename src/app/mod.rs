pub mod args;
pub mod config;
mod setup;

pub use args::AppArgs;

use anyhow::Result;

pub async fn launch() -> Result<()> {
    launch_with_args(AppArgs::from_cli()).await
}

/// Runs the widget until the user exits, then prints the last committed
/// value to stdout.
pub async fn launch_with_args(args: AppArgs) -> Result<()> {
    let setup::PreparedApp {
        autocomplete,
        log_filter,
    } = setup::prepare(args)?;

    if let Some(committed) = crate::ui::run_tui(autocomplete, &log_filter).await? {
        println!("{}", committed);
    }
    Ok(())
}
