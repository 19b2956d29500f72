#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

mod commands;

mod discord;

mod errors;

mod framework;
use framework::{data::PoiseData, Config};

mod hat;
use hat::Hat;

mod utils;

use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, GatewayIntents};
use tracing::info;
use tracing_unwrap::ResultExt;

#[tokio::main]
async fn main() {
    framework::logging::init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "starting hatbot");

    if let Err(err) = dotenvy::dotenv() {
        info!(%err, "no .env file loaded");
    }

    let config = Config::load().expect_or_log("config should load");
    let token = std::env::var("HATBOT_TOKEN").expect_or_log("HATBOT_TOKEN should be set");

    let http = Arc::new(serenity::Http::new(&token));
    let gateway = discord::DiscordGateway::new(http, config.game.channel());
    let hat = Hat::spawn(gateway, config.game.settings());

    let data = PoiseData::new(config, hat);
    let framework = framework::poise::build(data);

    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .expect_or_log("client should be valid");

    client
        .start()
        .await
        .expect_or_log("client should not return error");
}
