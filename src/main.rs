use log_facility::config;
use log_facility::error::LogError;
use log_facility::setup;
use log_facility::telemetry;
use tracing::info;

fn main() -> Result<(), LogError> {
    telemetry::init_tracing()?;

    let settings = config::get_configuration()?;
    info!("Loaded settings");

    let (mut manager, ids) = setup::build_manager(&settings)?;

    let error = manager.get_log_level_by_priority(0)?.clone();
    let info_level = manager.get_log_level_by_priority(2)?.clone();

    manager.add_log_message_text("log facility started", &info_level);
    manager.add_log_message_text("connection lost", &error);

    for id in ids {
        manager.add_log_message_text_to("shutting down", &info_level, id)?;
    }

    Ok(())
}
