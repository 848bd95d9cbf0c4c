use hoshi_l10n::ResourceKey;
use poise::CreateReply;
use serenity::builder::CreateEmbed;

use crate::data::*;

mod about;
mod content;
mod glossary;
mod guide;
pub mod localize;
mod reload;

const ERROR_INTERNAL: ResourceKey = ResourceKey::from_static("error.internal");

/// Gets all slash commands.
pub fn commands() -> Vec<HCommand> {
    vec![
        guide::guide(),
        glossary::glossary(),
        about::about(),
        reload::reload(),
    ]
}

/// Pre-command execution hook.
pub async fn pre_command(ctx: HContext<'_>) {
    log::info!("{}: {}", ctx.author().name, ctx.invocation_string());
}

/// Command execution error handler.
#[cold]
pub async fn error_handler(error: HFrameworkError<'_>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => command_error(ctx, &error).await,
        error => {
            if let Err(why) = poise::builtins::on_error(error).await {
                log::error!("Error in error handler: {why:?}");
            }
        },
    }
}

async fn command_error(ctx: HContext<'_>, err: &HError) {
    let message = if let Some(err) = err.downcast_ref::<HArgError>() {
        err.msg.to_string()
    } else {
        if let Some(ser_err) = err.downcast_ref::<serenity::Error>() {
            // print both errors to preserve the stack trace, if present
            log::warn!("Discord error in command: {ser_err:?} / {err:?}");
        } else {
            log::error!("Error in command: {err:?}");
        }

        let data = ctx.data();
        let locale = data.request_locale(ctx);
        let message = data.l10n().templater().format(&locale, &ERROR_INTERNAL, &[]);
        if message.is_empty() { "Internal error.".to_owned() } else { message }
    };

    error_reply(ctx, message).await;
}

/// Replies with an ephemeral error embed. Failures are only logged.
async fn error_reply(ctx: HContext<'_>, message: String) {
    let embed = CreateEmbed::new()
        .description(message)
        .color(ERROR_EMBED_COLOR);

    let reply = CreateReply::default().embed(embed).ephemeral(true);
    if let Err(err) = ctx.send(reply).await {
        log::error!("Error in error handler: {err:?}");
    }
}
