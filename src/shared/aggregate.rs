use uuid::Uuid;

// ============================================================================
// Aggregate Root Pattern
// ============================================================================
//
// Key Principles:
// 1. Commands are validated against current state before anything changes
// 2. Validated commands produce events describing what happened
// 3. State changes only by applying events
// 4. A command either applies all of its events or none of them
//
// ============================================================================

/// Generic Aggregate trait - every entity in the domain implements this
///
/// Type Parameters:
/// - `Event`: The domain event type for this aggregate
/// - `Command`: The command type for this aggregate
/// - `Error`: The error type for business rule violations
pub trait Aggregate: Sized + Clone + Send + Sync {
    type Event;
    type Command;
    type Error;

    /// Create new aggregate from its creation event
    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error>;

    /// Apply subsequent events to update state
    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error>;

    /// Handle command and emit events (business logic, no mutation)
    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// Get aggregate ID
    fn aggregate_id(&self) -> Uuid;

    /// Get current version (number of applied events)
    fn version(&self) -> i64;

    /// Validate a command and apply the resulting events.
    ///
    /// Events are applied to a working copy that replaces `self` only once
    /// every event has applied, so a failing command leaves the aggregate
    /// exactly as it was.
    fn execute(&mut self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let events = self.handle_command(command)?;
        if events.is_empty() {
            return Ok(events);
        }

        let mut next = self.clone();
        for event in &events {
            next.apply_event(event)?;
        }
        *self = next;

        Ok(events)
    }

    /// Rebuild an aggregate from its event history
    fn load_from_events(events: &[Self::Event]) -> Result<Option<Self>, Self::Error> {
        let Some((first, rest)) = events.split_first() else {
            return Ok(None);
        };

        let mut aggregate = Self::apply_first_event(first)?;
        for event in rest {
            aggregate.apply_event(event)?;
        }

        Ok(Some(aggregate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Counter {
        id: Uuid,
        version: i64,
        value: u32,
    }

    #[derive(Debug, Clone)]
    enum CounterEvent {
        Created(Uuid),
        Incremented,
        Poisoned,
    }

    #[derive(Debug, Clone)]
    enum CounterCommand {
        Increment(u32),
        IncrementThenFail,
    }

    impl Aggregate for Counter {
        type Event = CounterEvent;
        type Command = CounterCommand;
        type Error = String;

        fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error> {
            match event {
                CounterEvent::Created(id) => Ok(Self { id: *id, version: 1, value: 0 }),
                _ => Err("not initialized".to_string()),
            }
        }

        fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
            match event {
                CounterEvent::Created(_) => {}
                CounterEvent::Incremented => self.value += 1,
                CounterEvent::Poisoned => return Err("poisoned".to_string()),
            }
            self.version += 1;
            Ok(())
        }

        fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
            match command {
                CounterCommand::Increment(0) => Err("nothing to do".to_string()),
                CounterCommand::Increment(n) => Ok((0..*n).map(|_| CounterEvent::Incremented).collect()),
                CounterCommand::IncrementThenFail => {
                    Ok(vec![CounterEvent::Incremented, CounterEvent::Poisoned])
                }
            }
        }

        fn aggregate_id(&self) -> Uuid {
            self.id
        }

        fn version(&self) -> i64 {
            self.version
        }
    }

    fn new_counter() -> Counter {
        Counter::apply_first_event(&CounterEvent::Created(Uuid::new_v4())).unwrap()
    }

    #[test]
    fn test_execute_applies_all_events() {
        let mut counter = new_counter();
        let events = counter.execute(&CounterCommand::Increment(3)).unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(counter.value, 3);
        assert_eq!(counter.version, 4);
    }

    #[test]
    fn test_execute_rejected_command_leaves_state_untouched() {
        let mut counter = new_counter();
        let before = counter.clone();

        assert!(counter.execute(&CounterCommand::Increment(0)).is_err());
        assert_eq!(counter, before);
    }

    #[test]
    fn test_execute_is_all_or_nothing_when_an_event_fails() {
        let mut counter = new_counter();
        let before = counter.clone();

        assert!(counter.execute(&CounterCommand::IncrementThenFail).is_err());
        assert_eq!(counter, before);
    }

    #[test]
    fn test_load_from_events() {
        let id = Uuid::new_v4();
        let events = vec![
            CounterEvent::Created(id),
            CounterEvent::Incremented,
            CounterEvent::Incremented,
        ];

        let counter = Counter::load_from_events(&events).unwrap().unwrap();
        assert_eq!(counter.aggregate_id(), id);
        assert_eq!(counter.value, 2);
        assert_eq!(counter.version(), 3);
    }

    #[test]
    fn test_load_from_empty_history() {
        assert!(Counter::load_from_events(&[]).unwrap().is_none());
    }

    #[test]
    fn test_load_from_events_requires_creation_event_first() {
        let result = Counter::load_from_events(&[CounterEvent::Incremented]);
        assert!(result.is_err());
    }
}
