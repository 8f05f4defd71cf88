//! In-process transport: tokio channels standing in for a real wire.
//!
//! A `MockHub` routes session-open requests to the counterparty's inbox; each
//! established session is a pair of bounded envelope channels, which preserves
//! per-session ordering. Dropping either end fails the session rather than
//! hanging it.

use crate::foundation::{now_nanos, IouError, PartyId, Result};
use crate::infrastructure::transport::messages::MessageEnvelope;
use crate::infrastructure::transport::{payload_hash, Session, SessionMessage, SessionTransport};
use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use tokio::sync::{mpsc, Mutex};

pub struct MockHub {
    inboxes: StdMutex<HashMap<PartyId, mpsc::Sender<MockSession>>>,
}

impl MockHub {
    pub fn new() -> Self {
        Self { inboxes: StdMutex::new(HashMap::new()) }
    }

    fn register(&self, party: PartyId, inbox: mpsc::Sender<MockSession>) {
        let mut guard = self.inboxes.lock().expect("hub lock poisoned");
        guard.insert(party, inbox);
    }

    fn inbox_for(&self, party: &PartyId) -> Result<mpsc::Sender<MockSession>> {
        let guard = self.inboxes.lock().expect("hub lock poisoned");
        guard.get(party).cloned().ok_or_else(|| IouError::Transport(format!("no transport registered for party {}", party)))
    }
}

impl Default for MockHub {
    fn default() -> Self {
        Self::new()
    }
}

pub struct MockTransport {
    hub: Arc<MockHub>,
    local_party: PartyId,
    incoming: Mutex<mpsc::Receiver<MockSession>>,
    buffer: usize,
}

impl MockTransport {
    pub fn new(hub: Arc<MockHub>, local_party: PartyId, buffer: usize) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::channel(buffer);
        hub.register(local_party.clone(), inbox_tx);
        Self { hub, local_party, incoming: Mutex::new(inbox_rx), buffer }
    }
}

#[async_trait]
impl SessionTransport for MockTransport {
    async fn open_session(&self, counterparty: &PartyId) -> Result<Box<dyn Session>> {
        let inbox = self.hub.inbox_for(counterparty)?;
        let (out_tx, out_rx) = mpsc::channel(self.buffer);
        let (back_tx, back_rx) = mpsc::channel(self.buffer);
        let local_end = MockSession {
            local_party: self.local_party.clone(),
            counterparty: counterparty.clone(),
            tx: out_tx,
            rx: back_rx,
            seq: 1,
        };
        let remote_end = MockSession {
            local_party: counterparty.clone(),
            counterparty: self.local_party.clone(),
            tx: back_tx,
            rx: out_rx,
            seq: 1,
        };
        inbox
            .send(remote_end)
            .await
            .map_err(|_| IouError::Transport(format!("party {} stopped accepting sessions", counterparty)))?;
        debug!("session opened local={} remote={}", self.local_party, counterparty);
        Ok(Box::new(local_end))
    }

    async fn accept_session(&self) -> Result<Box<dyn Session>> {
        let mut incoming = self.incoming.lock().await;
        let session = incoming
            .recv()
            .await
            .ok_or_else(|| IouError::Transport("transport shut down".to_string()))?;
        debug!("session accepted local={} remote={}", session.local_party, session.counterparty);
        Ok(Box::new(session))
    }
}

pub struct MockSession {
    local_party: PartyId,
    counterparty: PartyId,
    tx: mpsc::Sender<MessageEnvelope>,
    rx: mpsc::Receiver<MessageEnvelope>,
    seq: u64,
}

#[async_trait]
impl Session for MockSession {
    async fn send(&mut self, message: SessionMessage) -> Result<()> {
        let envelope = MessageEnvelope {
            sender: self.local_party.clone(),
            seq_no: self.seq,
            timestamp_nanos: now_nanos(),
            payload_hash: payload_hash(&message)?,
            payload: message,
        };
        self.seq += 1;
        self.tx
            .send(envelope)
            .await
            .map_err(|_| IouError::Transport(format!("session to {} closed", self.counterparty)))
    }

    async fn receive(&mut self) -> Result<SessionMessage> {
        let envelope = self
            .rx
            .recv()
            .await
            .ok_or_else(|| IouError::Transport(format!("session closed by {}", self.counterparty)))?;
        if payload_hash(&envelope.payload)? != envelope.payload_hash {
            return Err(IouError::Transport("envelope payload hash mismatch".to_string()));
        }
        Ok(envelope.payload)
    }

    fn counterparty(&self) -> &PartyId {
        &self.counterparty
    }
}
