use crate::config::RelayConfig;
use crate::discord::notifier::DiscordNotifier;
use crate::error::Result;

pub struct AppState {
    pub config: RelayConfig,
    pub notifier: DiscordNotifier,
}

pub fn build_app_state(config: RelayConfig) -> Result<AppState> {
    let notifier =
        DiscordNotifier::new(config.discord_webhook_url.clone(), config.outbound_timeout)?;

    Ok(AppState { config, notifier })
}
