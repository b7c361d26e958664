use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::error::{DomainError, ErrorKind};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Counters for:
// - Rejected input and broken business rules, per entity
// - Login attempts by outcome, and lockouts
// - Inventory movements by type
// - Domain events produced, by event type
// - Paged list queries, per entity
//
// `render` produces the Prometheus text exposition format; serving it is up
// to the host application.
// ============================================================================

/// Central metrics registry for the core services
pub struct Metrics {
    registry: Registry,

    // Failure Metrics
    pub validation_failures: IntCounterVec,
    pub rule_violations: IntCounterVec,

    // Account Metrics
    pub login_attempts: IntCounterVec,
    pub account_lockouts: IntCounter,

    // Inventory Metrics
    pub inventory_movements: IntCounterVec,

    // Activity Metrics
    pub domain_events: IntCounterVec,
    pub page_queries: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        // Failure Metrics
        let validation_failures = IntCounterVec::new(
            Opts::new("validation_failures_total", "Inputs rejected by value-object validation"),
            &["entity"],
        )?;
        registry.register(Box::new(validation_failures.clone()))?;

        let rule_violations = IntCounterVec::new(
            Opts::new("rule_violations_total", "Commands rejected by an entity business rule"),
            &["entity"],
        )?;
        registry.register(Box::new(rule_violations.clone()))?;

        // Account Metrics
        let login_attempts = IntCounterVec::new(
            Opts::new("login_attempts_total", "Recorded login attempts by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(login_attempts.clone()))?;

        let account_lockouts = IntCounter::new(
            "account_lockouts_total",
            "Accounts locked after too many failed logins",
        )?;
        registry.register(Box::new(account_lockouts.clone()))?;

        // Inventory Metrics
        let inventory_movements = IntCounterVec::new(
            Opts::new("inventory_movements_total", "Recorded inventory movements"),
            &["movement_type"],
        )?;
        registry.register(Box::new(inventory_movements.clone()))?;

        // Activity Metrics
        let domain_events = IntCounterVec::new(
            Opts::new("domain_events_total", "Domain events produced by successful commands"),
            &["event_type"],
        )?;
        registry.register(Box::new(domain_events.clone()))?;

        let page_queries = IntCounterVec::new(
            Opts::new("page_queries_total", "Paged list queries served"),
            &["entity"],
        )?;
        registry.register(Box::new(page_queries.clone()))?;

        Ok(Self {
            registry,
            validation_failures,
            rule_violations,
            login_attempts,
            account_lockouts,
            inventory_movements,
            domain_events,
            page_queries,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Count a failed operation against `entity` by its error kind.
    /// Not-found, conflict and infrastructure failures are not counted here.
    pub fn record_failure(&self, entity: &str, error: &DomainError) {
        match error.kind() {
            ErrorKind::Validation => self.validation_failures.with_label_values(&[entity]).inc(),
            ErrorKind::InvariantViolation => self.rule_violations.with_label_values(&[entity]).inc(),
            ErrorKind::NotFound | ErrorKind::Conflict | ErrorKind::Infrastructure => {}
        }
    }

    pub fn record_events(&self, event_types: &[&str]) {
        for event_type in event_types {
            self.domain_events.with_label_values(&[*event_type]).inc();
        }
    }

    pub fn record_login(&self, outcome: &str) {
        self.login_attempts.with_label_values(&[outcome]).inc();
    }

    pub fn record_lockout(&self) {
        self.account_lockouts.inc();
    }

    pub fn record_movement(&self, movement_type: &str) {
        self.inventory_movements.with_label_values(&[movement_type]).inc();
    }

    pub fn record_page_query(&self, entity: &str) {
        self.page_queries.with_label_values(&[entity]).inc();
    }

    /// Text exposition format of every registered metric
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
