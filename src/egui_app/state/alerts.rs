use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    /// A request failed.
    Error,
    /// A prediction asked for maintenance.
    Maintenance,
}

/// A blocking message the operator has to acknowledge.
#[derive(Clone, Debug, PartialEq)]
pub struct AlertView {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

/// Pending blocking dialogs; the front one is shown.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlertQueue {
    pending: VecDeque<AlertView>,
}

impl AlertQueue {
    pub fn push(&mut self, kind: AlertKind, message: impl Into<String>) {
        let title = match kind {
            AlertKind::Error => "Error",
            AlertKind::Maintenance => "Maintenance required",
        };
        self.pending.push_back(AlertView {
            kind,
            title: title.into(),
            message: message.into(),
        });
    }

    pub fn current(&self) -> Option<&AlertView> {
        self.pending.front()
    }

    /// Acknowledge the visible alert.
    pub fn dismiss(&mut self) -> Option<AlertView> {
        self.pending.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn count(&self, kind: AlertKind) -> usize {
        self.pending.iter().filter(|alert| alert.kind == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlertView> {
        self.pending.iter()
    }
}
