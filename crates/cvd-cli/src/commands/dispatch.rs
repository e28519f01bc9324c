use cvd_config::CvdConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, config: &CvdConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Predict(args) => commands::predict::handle(&args, config, flags),
        Commands::Form => commands::form::handle(config, flags),
        Commands::Schema => commands::schema::handle(config, flags),
        Commands::EncodeVideo(args) => commands::encode_video::handle(&args, config, flags),
    }
}
