//! Command routing and request lifecycle.
//!
//! One dispatcher serves every transport. Each data command acquires the
//! per-user in-flight permit, posts a "fetching" notice, runs the fetch and
//! edits the notice in place with the result. The permit is RAII, so a failed
//! fetch or delivery still releases the user.

use tracing::{info, warn};

use crate::classifier;
use crate::format;
use crate::market::MarketData;
use crate::resolver::AliasTable;
use crate::texts;

use super::guard::InFlight;
use super::transport::{ChatId, ChatTransport, MessageRef};

/// Transport-agnostic bot command. Fixed-asset shortcuts (`/btc`, `/eth`)
/// arrive as `Price` with the identifier pre-filled by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Price(String),
    Top10,
    Search(String),
    TopGainers,
}

/// Who triggered the request. Governs how delivery failures surface: explicit
/// commands get a plain-text fallback, free text stays silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Command,
    FreeText,
}

pub struct Dispatcher<M, T> {
    market: M,
    transport: T,
    inflight: InFlight,
    aliases: &'static AliasTable,
}

impl<M: MarketData, T: ChatTransport> Dispatcher<M, T> {
    pub fn new(market: M, transport: T, aliases: &'static AliasTable) -> Self {
        Self {
            market,
            transport,
            inflight: InFlight::new(),
            aliases,
        }
    }

    /// Entry point for parsed commands.
    pub async fn handle_command(&self, user: u64, chat: ChatId, command: Command) {
        match command {
            Command::Start => self.send_static(chat, texts::WELCOME).await,
            Command::Help => self.send_static(chat, texts::HELP).await,
            Command::Price(query) => self.price(user, chat, query, Origin::Command).await,
            Command::Top10 => self.top10(user, chat).await,
            Command::Search(query) => self.search(user, chat, query).await,
            Command::TopGainers => self.top_gainers(user, chat).await,
        }
    }

    /// Entry point for non-command text. Plausible asset queries run the
    /// implicit price path; unrecognized single words get a usage nudge.
    pub async fn handle_text(&self, user: u64, chat: ChatId, text: &str) {
        if self.inflight.is_busy(user) {
            return;
        }

        if classifier::is_plausible_query(text, self.aliases) {
            let cleaned = classifier::clean_input(text);
            self.price(user, chat, cleaned, Origin::FreeText).await;
        } else if text.split_whitespace().count() == 1 && text.chars().count() > 2 {
            if let Err(err) = self
                .transport
                .send_markdown(chat, &texts::unrecognized_hint(text))
                .await
            {
                warn!("hint delivery failed: {err}");
            }
        }
    }

    async fn price(&self, user: u64, chat: ChatId, query: String, origin: Origin) {
        let Some(_permit) = self.inflight.begin(user) else {
            if origin == Origin::Command {
                self.notify_busy(chat).await;
            }
            return;
        };

        let query = query.trim().to_lowercase();
        if query.is_empty() {
            self.deliver(chat, None, texts::PRICE_USAGE, origin).await;
            return;
        }

        let coin_id = self.aliases.resolve(&query);
        let notice = match origin {
            Origin::Command => texts::PROCESSING,
            Origin::FreeText => texts::PROCESSING_TEXT,
        };
        let pending = self.notice(chat, notice).await;

        let reply = match self.market.snapshot(&coin_id).await {
            Ok(Some(snapshot)) => {
                info!("price served for user {user}: {query} -> {coin_id}");
                format::snapshot_message(&snapshot, &query)
            }
            Ok(None) => {
                warn!("coin not found: {query} -> {coin_id}");
                match origin {
                    Origin::Command => texts::ERR_NOT_FOUND.to_string(),
                    Origin::FreeText => texts::not_found_hint(&query),
                }
            }
            Err(err) => {
                warn!("price fetch failed for {coin_id}: {err}");
                texts::ERR_API.to_string()
            }
        };

        self.deliver(chat, pending, &reply, origin).await;
    }

    async fn top10(&self, user: u64, chat: ChatId) {
        let Some(_permit) = self.inflight.begin(user) else {
            self.notify_busy(chat).await;
            return;
        };

        let pending = self.notice(chat, texts::PROCESSING).await;

        let reply = match self.market.ranked(10).await {
            Ok(entries) if !entries.is_empty() => {
                info!("top10 served for user {user}");
                format::ranked_message(&entries)
            }
            Ok(_) => texts::ERR_API.to_string(),
            Err(err) => {
                warn!("ranked fetch failed: {err}");
                texts::ERR_API.to_string()
            }
        };

        self.deliver(chat, pending, &reply, Origin::Command).await;
    }

    async fn search(&self, user: u64, chat: ChatId, query: String) {
        let Some(_permit) = self.inflight.begin(user) else {
            self.notify_busy(chat).await;
            return;
        };

        let query = query.trim().to_string();
        if query.is_empty() {
            self.deliver(chat, None, texts::SEARCH_USAGE, Origin::Command)
                .await;
            return;
        }

        let pending = self.notice(chat, texts::PROCESSING).await;

        let reply = match self.market.search(&query).await {
            Ok(hits) if !hits.is_empty() => {
                info!("search served for user {user}: '{query}'");
                format::search_message(&hits)
            }
            Ok(_) => texts::search_empty(&query),
            Err(err) => {
                warn!("search failed for '{query}': {err}");
                texts::ERR_API.to_string()
            }
        };

        self.deliver(chat, pending, &reply, Origin::Command).await;
    }

    async fn top_gainers(&self, user: u64, chat: ChatId) {
        let Some(_permit) = self.inflight.begin(user) else {
            self.notify_busy(chat).await;
            return;
        };

        let pending = self.notice(chat, texts::PROCESSING).await;

        let reply = match self.market.top_gainers().await {
            Ok(entries) if !entries.is_empty() => {
                info!("gainers served for user {user}");
                format::gainers_message(&entries)
            }
            Ok(_) => texts::ERR_API.to_string(),
            Err(err) => {
                warn!("gainers fetch failed: {err}");
                texts::ERR_API.to_string()
            }
        };

        self.deliver(chat, pending, &reply, Origin::Command).await;
    }

    /// Post the "fetching" notice. Delivery failure is logged and tolerated;
    /// the reply then falls back to a fresh message.
    async fn notice(&self, chat: ChatId, text: &str) -> Option<MessageRef> {
        match self.transport.send_markdown(chat, text).await {
            Ok(message) => Some(message),
            Err(err) => {
                warn!("processing notice failed: {err}");
                None
            }
        }
    }

    /// Deliver the reply, editing the pending notice when there is one.
    /// Command failures degrade to one plain-text error; free-text failures
    /// only log.
    async fn deliver(&self, chat: ChatId, pending: Option<MessageRef>, text: &str, origin: Origin) {
        let outcome = match pending {
            Some(message) => self.transport.edit_markdown(chat, message, text).await,
            None => self.transport.send_markdown(chat, text).await.map(|_| ()),
        };

        if let Err(err) = outcome {
            warn!("reply delivery failed: {err}");
            if origin == Origin::Command {
                if let Err(err) = self.transport.send_plain(chat, texts::ERR_GENERIC).await {
                    warn!("plain-text fallback failed: {err}");
                }
            }
        }
    }

    async fn notify_busy(&self, chat: ChatId) {
        if let Err(err) = self.transport.send_markdown(chat, texts::BUSY).await {
            warn!("busy notice failed: {err}");
        }
    }

    async fn send_static(&self, chat: ChatId, text: &str) {
        if let Err(err) = self.transport.send_markdown(chat, text).await {
            warn!("static reply failed: {err}");
            if let Err(err) = self.transport.send_plain(chat, texts::ERR_GENERIC).await {
                warn!("plain-text fallback failed: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use crate::market::MarketError;
    use crate::market::models::{MarketEntry, PriceSnapshot, SearchHit};
    use crate::resolver::alias_table;

    use super::super::transport::TransportError;
    use super::*;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<String>>,
    }

    impl RecordingTransport {
        fn messages(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }

        fn last(&self) -> String {
            self.sent.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl ChatTransport for RecordingTransport {
        async fn send_markdown(
            &self,
            _chat: ChatId,
            text: &str,
        ) -> Result<MessageRef, TransportError> {
            let mut sent = self.sent.lock().unwrap();
            sent.push(text.to_string());
            Ok(MessageRef(sent.len() as i32 - 1))
        }

        async fn send_plain(&self, chat: ChatId, text: &str) -> Result<MessageRef, TransportError> {
            self.send_markdown(chat, text).await
        }

        async fn edit_markdown(
            &self,
            _chat: ChatId,
            message: MessageRef,
            text: &str,
        ) -> Result<(), TransportError> {
            self.sent.lock().unwrap()[message.0 as usize] = text.to_string();
            Ok(())
        }
    }

    enum StubBehavior {
        Immediate,
        Blocking,
        Failing,
        Missing,
    }

    struct StubMarket {
        calls: AtomicU32,
        gate: Notify,
        behavior: StubBehavior,
    }

    impl StubMarket {
        fn with(behavior: StubBehavior) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                gate: Notify::new(),
                behavior,
            })
        }
    }

    #[async_trait]
    impl MarketData for StubMarket {
        async fn snapshot(&self, _id: &str) -> Result<Option<PriceSnapshot>, MarketError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                StubBehavior::Blocking => self.gate.notified().await,
                StubBehavior::Failing => return Err(MarketError::Status(500)),
                StubBehavior::Missing => return Ok(None),
                StubBehavior::Immediate => {}
            }
            Ok(Some(PriceSnapshot {
                usd: Some(100.0),
                ..Default::default()
            }))
        }

        async fn ranked(&self, _limit: usize) -> Result<Vec<MarketEntry>, MarketError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, MarketError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn top_gainers(&self) -> Result<Vec<MarketEntry>, MarketError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    fn dispatcher(
        market: Arc<StubMarket>,
        transport: Arc<RecordingTransport>,
    ) -> Dispatcher<Arc<StubMarket>, Arc<RecordingTransport>> {
        Dispatcher::new(market, transport, alias_table())
    }

    #[tokio::test]
    async fn concurrent_duplicate_is_rejected_without_a_fetch() {
        let market = StubMarket::with(StubBehavior::Blocking);
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher = Arc::new(dispatcher(market.clone(), transport.clone()));

        let background = {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                dispatcher
                    .handle_command(7, ChatId(1), Command::Price("btc".into()))
                    .await;
            })
        };

        // Wait until the first request is inside the fetch
        while market.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        dispatcher
            .handle_command(7, ChatId(1), Command::Price("btc".into()))
            .await;

        assert_eq!(market.calls.load(Ordering::SeqCst), 1);
        assert!(transport.messages().iter().any(|m| m == texts::BUSY));

        market.gate.notify_one();
        background.await.unwrap();

        // Guard released: the same user goes through again
        market.gate.notify_one();
        dispatcher
            .handle_command(7, ChatId(1), Command::Price("btc".into()))
            .await;
        assert_eq!(market.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn guard_clears_after_a_failed_fetch() {
        let market = StubMarket::with(StubBehavior::Failing);
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher = dispatcher(market.clone(), transport.clone());

        dispatcher
            .handle_command(3, ChatId(1), Command::Price("btc".into()))
            .await;
        assert_eq!(transport.last(), texts::ERR_API);

        dispatcher
            .handle_command(3, ChatId(1), Command::Price("btc".into()))
            .await;
        assert_eq!(market.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn price_command_edits_the_notice_with_the_result() {
        let market = StubMarket::with(StubBehavior::Immediate);
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher = dispatcher(market, transport.clone());

        dispatcher
            .handle_command(1, ChatId(1), Command::Price("btc".into()))
            .await;

        let messages = transport.messages();
        assert_eq!(messages.len(), 1); // notice edited in place
        assert!(messages[0].contains("BTC Fiyat Bilgileri"));
    }

    #[tokio::test]
    async fn missing_coin_gets_the_not_found_reply() {
        let market = StubMarket::with(StubBehavior::Missing);
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher = dispatcher(market, transport.clone());

        dispatcher
            .handle_command(1, ChatId(1), Command::Price("nope".into()))
            .await;

        assert_eq!(transport.last(), texts::ERR_NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_price_query_gets_usage_help() {
        let market = StubMarket::with(StubBehavior::Immediate);
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher = dispatcher(market.clone(), transport.clone());

        dispatcher
            .handle_command(1, ChatId(1), Command::Price(String::new()))
            .await;

        assert_eq!(market.calls.load(Ordering::SeqCst), 0);
        assert_eq!(transport.last(), texts::PRICE_USAGE);
    }

    #[tokio::test]
    async fn free_text_runs_the_implicit_price_path() {
        let market = StubMarket::with(StubBehavior::Immediate);
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher = dispatcher(market.clone(), transport.clone());

        dispatcher.handle_text(5, ChatId(2), "Bitcoin!!").await;

        assert_eq!(market.calls.load(Ordering::SeqCst), 1);
        assert!(transport.last().contains("BITCOIN Fiyat Bilgileri"));
    }

    #[tokio::test]
    async fn conversational_text_is_ignored() {
        let market = StubMarket::with(StubBehavior::Immediate);
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher = dispatcher(market.clone(), transport.clone());

        dispatcher.handle_text(5, ChatId(2), "hello world").await;

        assert_eq!(market.calls.load(Ordering::SeqCst), 0);
        assert!(transport.messages().is_empty());
    }

    #[tokio::test]
    async fn unrecognized_single_word_gets_a_hint() {
        let market = StubMarket::with(StubBehavior::Immediate);
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher = dispatcher(market.clone(), transport.clone());

        dispatcher.handle_text(5, ChatId(2), "123coin").await;

        assert_eq!(market.calls.load(Ordering::SeqCst), 0);
        assert!(transport.last().contains("/fiyat"));
    }

    #[tokio::test]
    async fn start_and_help_reply_with_templates() {
        let market = StubMarket::with(StubBehavior::Immediate);
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher = dispatcher(market, transport.clone());

        dispatcher.handle_command(1, ChatId(1), Command::Start).await;
        dispatcher.handle_command(1, ChatId(1), Command::Help).await;

        let messages = transport.messages();
        assert_eq!(messages[0], texts::WELCOME);
        assert_eq!(messages[1], texts::HELP);
    }

    #[tokio::test]
    async fn empty_search_query_gets_usage_help() {
        let market = StubMarket::with(StubBehavior::Immediate);
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher = dispatcher(market.clone(), transport.clone());

        dispatcher
            .handle_command(1, ChatId(1), Command::Search("  ".into()))
            .await;

        assert_eq!(market.calls.load(Ordering::SeqCst), 0);
        assert_eq!(transport.last(), texts::SEARCH_USAGE);
    }

    #[tokio::test]
    async fn empty_upstream_listing_surfaces_as_unavailable() {
        let market = StubMarket::with(StubBehavior::Immediate);
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher = dispatcher(market, transport.clone());

        dispatcher.handle_command(1, ChatId(1), Command::Top10).await;

        assert_eq!(transport.last(), texts::ERR_API);
    }
}
