//! Guard that keeps background polling from racing user mutations.
//!
//! DESIGN
//! ======
//! Polling is suspended while a mutation is in flight. Each mutation also
//! bumps a generation counter on start and finish; a poll captures the
//! generation when it starts and its response is applied only if the
//! generation is unchanged. A poll that began before a delete therefore
//! cannot resurrect the deleted row when it lands afterwards.

#[cfg(test)]
#[path = "refresh_test.rs"]
mod refresh_test;

/// Proof that a poll was allowed to start, tagged with the gate generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollTicket(u64);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefreshGate {
    mutating: bool,
    generation: u64,
}

impl RefreshGate {
    /// Start a poll, or `None` while a mutation is in flight.
    #[must_use]
    pub fn begin_poll(&self) -> Option<PollTicket> {
        (!self.mutating).then_some(PollTicket(self.generation))
    }

    /// Whether a poll response carrying `ticket` may be applied.
    #[must_use]
    pub fn accepts(&self, ticket: PollTicket) -> bool {
        !self.mutating && ticket.0 == self.generation
    }

    pub fn begin_mutation(&mut self) {
        self.mutating = true;
        self.generation += 1;
    }

    pub fn end_mutation(&mut self) {
        self.mutating = false;
        self.generation += 1;
    }

    #[must_use]
    pub fn is_mutating(&self) -> bool {
        self.mutating
    }
}
