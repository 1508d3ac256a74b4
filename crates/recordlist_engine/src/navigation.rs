use std::sync::mpsc;

/// Sink for "open this record" requests raised by row actions.
pub trait NavigationService: Send + Sync {
    fn navigate_to_record(&self, record_id: &str, kind: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub record_id: String,
    pub kind: String,
}

/// Forwards navigation requests to whoever holds the receiver.
pub struct ChannelNavigator {
    tx: mpsc::Sender<NavigationRequest>,
}

impl ChannelNavigator {
    pub fn new(tx: mpsc::Sender<NavigationRequest>) -> Self {
        Self { tx }
    }
}

impl NavigationService for ChannelNavigator {
    fn navigate_to_record(&self, record_id: &str, kind: &str) {
        let _ = self.tx.send(NavigationRequest {
            record_id: record_id.to_string(),
            kind: kind.to_string(),
        });
    }
}
