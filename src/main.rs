use clap::Parser;
use std::process::ExitCode;

use shoplist::cli::{Cli, Commands, ConfigAction, OutputOptions};
use shoplist::commands::{
    AddOptions, EditOptions, cmd_add, cmd_clear, cmd_config_get, cmd_config_path,
    cmd_config_set, cmd_config_show, cmd_create, cmd_delete_list, cmd_edit, cmd_lists, cmd_rm,
    cmd_sections, cmd_show, cmd_toggle, cmd_watch,
};
use shoplist::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref());

    let result = match cli.command {
        Commands::Lists { json } => cmd_lists(OutputOptions::new(json)).await,
        Commands::Watch { interval, json } => cmd_watch(interval, OutputOptions::new(json)).await,
        Commands::Create { name, json } => cmd_create(&name, OutputOptions::new(json)).await,
        Commands::DeleteList { list_id, json } => {
            cmd_delete_list(&list_id, OutputOptions::new(json)).await
        }

        Commands::Show { list_id, json } => cmd_show(&list_id, OutputOptions::new(json)).await,
        Commands::Add {
            list_id,
            name,
            section,
            quantity,
            json,
        } => {
            let options = AddOptions {
                name,
                section,
                quantity,
            };
            cmd_add(&list_id, options, OutputOptions::new(json)).await
        }
        Commands::Edit {
            list_id,
            item_id,
            name,
            section,
            quantity,
            json,
        } => {
            let options = EditOptions {
                name,
                section,
                quantity,
            };
            cmd_edit(&list_id, &item_id, options, OutputOptions::new(json)).await
        }
        Commands::Toggle {
            list_id,
            item_id,
            json,
        } => cmd_toggle(&list_id, &item_id, OutputOptions::new(json)).await,
        Commands::Rm {
            list_id,
            item_id,
            json,
        } => cmd_rm(&list_id, &item_id, OutputOptions::new(json)).await,
        Commands::Clear { list_id, json } => cmd_clear(&list_id, OutputOptions::new(json)).await,
        Commands::Sections { json } => cmd_sections(OutputOptions::new(json)),

        Commands::Config { action } => match action {
            ConfigAction::Show { json } => cmd_config_show(OutputOptions::new(json)),
            ConfigAction::Get { key, json } => cmd_config_get(&key, OutputOptions::new(json)),
            ConfigAction::Set { key, value, json } => {
                cmd_config_set(&key, &value, OutputOptions::new(json))
            }
            ConfigAction::Path => cmd_config_path(),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("command failed: {e:?}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
