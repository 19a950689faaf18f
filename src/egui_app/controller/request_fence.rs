/// Identifies one issued request within its sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RequestToken(u64);

/// Generation counter for one kind of request; only the newest token is
/// current.
#[derive(Debug, Default)]
pub(crate) struct RequestFence {
    generation: u64,
    pending: bool,
}

impl RequestFence {
    /// Issue a token that supersedes every earlier one.
    pub(crate) fn issue(&mut self) -> RequestToken {
        self.generation = self.generation.wrapping_add(1);
        self.pending = true;
        RequestToken(self.generation)
    }

    pub(crate) fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.generation
    }

    /// Settle `token`; true when it is the current one and its result should
    /// be applied.
    pub(crate) fn complete(&mut self, token: RequestToken) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.pending = false;
        true
    }

    /// Whether the newest issued request has neither completed nor been
    /// invalidated.
    pub(crate) fn is_pending(&self) -> bool {
        self.pending
    }

    /// Make every outstanding token stale without issuing a new one.
    pub(crate) fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = false;
    }
}

/// One fence per request sequence the controller runs.
#[derive(Debug, Default)]
pub(crate) struct RequestFences {
    pub(crate) catalog: RequestFence,
    pub(crate) detail: RequestFence,
    pub(crate) history: RequestFence,
    pub(crate) reading: RequestFence,
    pub(crate) create: RequestFence,
    pub(crate) model: RequestFence,
}

impl RequestFences {
    /// Drop everything tied to the open machine.
    pub(crate) fn invalidate_machine(&mut self) {
        self.history.invalidate();
        self.reading.invalidate();
        self.model.invalidate();
    }
}
