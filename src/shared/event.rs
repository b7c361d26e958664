// ============================================================================
// Domain Event Trait
// ============================================================================

/// Generic Domain Event trait
///
/// Every aggregate's event enum implements this so services can log and
/// count what a command produced without knowing the concrete type.
pub trait DomainEvent {
    /// Stable name of the event, e.g. `"CustomerRegistered"`
    fn event_type(&self) -> &'static str;

    /// Schema version of the event payload
    fn event_version(&self) -> i32 {
        1
    }
}

/// Names of a batch of events, in order
pub fn event_types<E: DomainEvent>(events: &[E]) -> Vec<&'static str> {
    events.iter().map(DomainEvent::event_type).collect()
}
