//! Storefront session.
//!
//! One browsing session owns exactly one cart ledger and one conversation
//! log, and drives the advice state machine
//! `Idle → Sending → {Succeeded, Failed} → Idle`.
//!
//! The terminal phase stays published until the UI calls
//! [`StorefrontSession::acknowledge_reply`] after rendering the reply, or a
//! new send starts. A `send_query` future dropped mid-request still settles
//! the round-trip: the service-error reply is appended and the phase moves
//! to `Failed`.
//!
//! Cart and transcript locks are short and never held across an await, so
//! cart operations and transcript reads keep working while an advice
//! request is outstanding. Only one advice request may be in flight: a
//! second send is answered with [`SendOutcome::Busy`] and leaves the log
//! untouched, which keeps appends in call order.

use crate::ports::conversation_logger::{
    ADVICE_REPLY, ConversationEvent, ConversationLogger, NoConversationLogger, SHOPPER_QUERY,
};
use crate::use_cases::request_advice::{AdviceOutcome, AdviceReply, RequestAdviceUseCase};
use aurelio_domain::{
    CartLedger, CartSnapshot, Catalog, ChatMessage, ChatRole, ConversationLog,
    StylistPromptTemplate,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Where the session is in an advice round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvicePhase {
    Idle,
    Sending,
    Succeeded,
    Failed,
}

impl AdvicePhase {
    pub fn is_sending(&self) -> bool {
        matches!(self, AdvicePhase::Sending)
    }
}

/// Result of [`StorefrontSession::send_query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The query and the assistant reply were appended.
    Answered {
        reply: ChatMessage,
        outcome: AdviceOutcome,
    },
    /// Another request is in flight; nothing was appended.
    Busy,
    /// The query was blank; nothing was appended.
    Ignored,
}

/// A single-writer browsing session.
pub struct StorefrontSession {
    catalog: Arc<Catalog>,
    cart: Mutex<CartLedger>,
    conversation: RwLock<ConversationLog>,
    advice: RequestAdviceUseCase,
    send_gate: tokio::sync::Mutex<()>,
    phase: watch::Sender<AdvicePhase>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl StorefrontSession {
    /// Start a session: empty cart, transcript seeded with the greeting.
    pub fn new(catalog: Arc<Catalog>, advice: RequestAdviceUseCase) -> Self {
        let (phase, _) = watch::channel(AdvicePhase::Idle);
        Self {
            catalog,
            cart: Mutex::new(CartLedger::new()),
            conversation: RwLock::new(ConversationLog::with_greeting(
                StylistPromptTemplate::greeting(),
            )),
            advice,
            send_gate: tokio::sync::Mutex::new(()),
            phase,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ==================== Cart ====================

    /// Add one unit of the catalog product `product_id`.
    ///
    /// Unknown ids leave the cart unchanged.
    pub fn add_to_cart(&self, product_id: &str) -> CartSnapshot {
        let mut cart = self.lock_cart();
        match self.catalog.find(product_id) {
            Some(product) => {
                debug!(product = product_id, "Adding to cart");
                cart.add(product)
            }
            None => {
                debug!(product = product_id, "Ignoring add for unknown product");
                cart.snapshot()
            }
        }
    }

    pub fn remove_from_cart(&self, product_id: &str) -> CartSnapshot {
        let mut cart = self.lock_cart();
        cart.remove(product_id);
        cart.snapshot()
    }

    pub fn update_quantity(&self, product_id: &str, delta: i64) -> CartSnapshot {
        let mut cart = self.lock_cart();
        cart.update_quantity(product_id, delta);
        cart.snapshot()
    }

    pub fn cart(&self) -> CartSnapshot {
        self.lock_cart().snapshot()
    }

    /// Total units in the cart (the cart badge).
    pub fn item_count(&self) -> u64 {
        self.lock_cart().item_count()
    }

    // ==================== Conversation ====================

    /// Snapshot of the full transcript.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.read_conversation().all().to_vec()
    }

    pub fn advice_phase(&self) -> AdvicePhase {
        *self.phase.borrow()
    }

    /// Receiver that observes every phase change.
    pub fn subscribe_phase(&self) -> watch::Receiver<AdvicePhase> {
        self.phase.subscribe()
    }

    /// Append the shopper's query, ask the stylist, append the reply.
    pub async fn send_query(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Ignored;
        }
        let Ok(_gate) = self.send_gate.try_lock() else {
            debug!("Advice request already in flight");
            return SendOutcome::Busy;
        };

        let history = {
            let mut log = self.write_conversation();
            let history = log.all().to_vec();
            let query = log.append(ChatRole::Shopper, text);
            self.conversation_logger.log(ConversationEvent::new(
                SHOPPER_QUERY,
                serde_json::json!({
                    "id": query.id().to_string(),
                    "text": query.text(),
                }),
            ));
            history
        };

        self.phase.send_replace(AdvicePhase::Sending);
        let pending = PendingReply::new(self);
        let reply = self.advice.execute(text, &self.catalog, &history).await;
        let (reply, outcome) = pending.complete(reply);

        SendOutcome::Answered { reply, outcome }
    }

    /// Return to `Idle` once the settled reply has been shown.
    ///
    /// No-op unless the phase is `Succeeded` or `Failed`.
    pub fn acknowledge_reply(&self) {
        self.phase.send_if_modified(|phase| match phase {
            AdvicePhase::Succeeded | AdvicePhase::Failed => {
                *phase = AdvicePhase::Idle;
                true
            }
            AdvicePhase::Idle | AdvicePhase::Sending => false,
        });
    }

    /// Append the assistant turn, record it and publish the terminal phase.
    fn settle(&self, AdviceReply { text, outcome }: AdviceReply) -> (ChatMessage, AdviceOutcome) {
        let reply = self
            .write_conversation()
            .append(ChatRole::Assistant, text)
            .clone();
        self.conversation_logger.log(ConversationEvent::new(
            ADVICE_REPLY,
            serde_json::json!({
                "id": reply.id().to_string(),
                "outcome": outcome.as_str(),
                "model": self.advice.params().model.as_str(),
                "text": reply.text(),
            }),
        ));
        info!(outcome = %outcome, "Advice round-trip finished");

        let settled = if outcome.is_answered() {
            AdvicePhase::Succeeded
        } else {
            AdvicePhase::Failed
        };
        self.phase.send_replace(settled);

        (reply, outcome)
    }

    /// Start over: empty cart and a freshly greeted transcript.
    ///
    /// Returns `false` (and changes nothing) while a request is in flight.
    pub fn reset(&self) -> bool {
        let Ok(_gate) = self.send_gate.try_lock() else {
            return false;
        };
        self.lock_cart().clear();
        *self.write_conversation() = ConversationLog::with_greeting(StylistPromptTemplate::greeting());
        self.phase.send_replace(AdvicePhase::Idle);
        info!("Session reset");
        true
    }

    fn lock_cart(&self) -> MutexGuard<'_, CartLedger> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_conversation(&self) -> std::sync::RwLockReadGuard<'_, ConversationLog> {
        self.conversation
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_conversation(&self) -> std::sync::RwLockWriteGuard<'_, ConversationLog> {
        self.conversation
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// An advice round-trip in flight.
///
/// Dropped without [`PendingReply::complete`] (the `send_query` future was
/// cancelled), it settles the session with the service-error reply.
struct PendingReply<'a> {
    session: &'a StorefrontSession,
    settled: bool,
}

impl<'a> PendingReply<'a> {
    fn new(session: &'a StorefrontSession) -> Self {
        Self {
            session,
            settled: false,
        }
    }

    fn complete(mut self, reply: AdviceReply) -> (ChatMessage, AdviceOutcome) {
        self.settled = true;
        self.session.settle(reply)
    }
}

impl Drop for PendingReply<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!(category = "cancelled", "Advice request abandoned before a reply");
            self.session
                .settle(AdviceReply::fallback(AdviceOutcome::ServiceFailed));
        }
    }
}
