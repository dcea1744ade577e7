//! Telegram transport built on teloxide long polling.
//!
//! Command parsing and update delivery belong to teloxide; everything after
//! that goes through the transport-agnostic dispatcher.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::dptree;
use teloxide::payloads::{EditMessageTextSetters, SendMessageSetters};
use teloxide::prelude::*;
use teloxide::types::{ChatId as TgChatId, MessageId as TgMessageId, ParseMode};
use teloxide::utils::command::BotCommands;

use crate::market::MarketClient;
use crate::resolver;

use super::dispatch::{Command, Dispatcher as CommandDispatcher};
use super::transport::{ChatId, ChatTransport, MessageRef, TransportError};

/// Telegram command surface.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
enum TgCommand {
    #[command(description = "botu başlat")]
    Start,
    #[command(description = "yardım menüsü")]
    Help,
    #[command(description = "kripto para fiyatı")]
    Fiyat(String),
    #[command(description = "Bitcoin fiyatı")]
    Btc,
    #[command(description = "Ethereum fiyatı")]
    Eth,
    #[command(description = "top 10 kripto para")]
    Top10,
    #[command(description = "kripto para ara")]
    Ara(String),
    #[command(description = "son 1 saatin yükselenleri")]
    Yukselenler,
}

pub struct TelegramTransport {
    bot: Bot,
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_markdown(&self, chat: ChatId, text: &str) -> Result<MessageRef, TransportError> {
        let message = self
            .bot
            .send_message(TgChatId(chat.0), text)
            .parse_mode(ParseMode::Markdown)
            .await
            .map_err(|err| TransportError(err.to_string()))?;
        Ok(MessageRef(message.id.0))
    }

    async fn send_plain(&self, chat: ChatId, text: &str) -> Result<MessageRef, TransportError> {
        let message = self
            .bot
            .send_message(TgChatId(chat.0), text)
            .await
            .map_err(|err| TransportError(err.to_string()))?;
        Ok(MessageRef(message.id.0))
    }

    async fn edit_markdown(
        &self,
        chat: ChatId,
        message: MessageRef,
        text: &str,
    ) -> Result<(), TransportError> {
        self.bot
            .edit_message_text(TgChatId(chat.0), TgMessageId(message.0), text)
            .parse_mode(ParseMode::Markdown)
            .await
            .map_err(|err| TransportError(err.to_string()))?;
        Ok(())
    }
}

type BotDispatcher = CommandDispatcher<MarketClient, TelegramTransport>;

/// Start long polling and route updates into the dispatcher until shutdown.
pub async fn run(bot: Bot, market: MarketClient) {
    let transport = TelegramTransport { bot: bot.clone() };
    let dispatcher = Arc::new(CommandDispatcher::new(
        market,
        transport,
        resolver::alias_table(),
    ));

    let handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<TgCommand>()
                .endpoint(on_command),
        )
        .branch(dptree::endpoint(on_text));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![dispatcher])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn on_command(
    msg: Message,
    command: TgCommand,
    dispatcher: Arc<BotDispatcher>,
) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };

    let command = match command {
        TgCommand::Start => Command::Start,
        TgCommand::Help => Command::Help,
        TgCommand::Fiyat(query) => Command::Price(query),
        TgCommand::Btc => Command::Price("bitcoin".to_string()),
        TgCommand::Eth => Command::Price("ethereum".to_string()),
        TgCommand::Top10 => Command::Top10,
        TgCommand::Ara(query) => Command::Search(query),
        TgCommand::Yukselenler => Command::TopGainers,
    };

    dispatcher
        .handle_command(user.id.0, ChatId(msg.chat.id.0), command)
        .await;
    Ok(())
}

async fn on_text(msg: Message, dispatcher: Arc<BotDispatcher>) -> ResponseResult<()> {
    let (Some(user), Some(text)) = (msg.from(), msg.text()) else {
        return Ok(());
    };

    dispatcher
        .handle_text(user.id.0, ChatId(msg.chat.id.0), text)
        .await;
    Ok(())
}
