use uuid::Uuid;

use crate::error::{DomainError, Outcome};
use crate::metrics::Metrics;
use crate::shared::{
    event_types, paginate, Aggregate, DomainEvent, PageRequest, PagedResult, SortSpec, Specification,
};
use crate::store::{Entity, Repository};

use super::value_objects::ValidationError;

// ============================================================================
// Service Workflow - load, execute, save; filter, sort, page
// ============================================================================
//
// The steps every application service repeats, generic over the entity.
// A command runs against the loaded aggregate and the result is written
// back only if it produced events, guarded by the version it was loaded at.
//
// ============================================================================

pub(crate) async fn load<T: Entity>(repository: &dyn Repository<T>, id: Uuid) -> Outcome<T> {
    repository
        .get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(T::NAME, id))
}

/// Store a freshly created entity
pub(crate) async fn add_new<T: Entity>(
    repository: &dyn Repository<T>,
    metrics: &Metrics,
    entity: T,
    event_type: &'static str,
) -> Outcome<T> {
    let id = entity.aggregate_id();
    repository.add(entity.clone()).await?;

    metrics.record_events(&[event_type]);
    tracing::info!(entity = T::NAME, entity_id = %id, event_type, "Entity created");
    Ok(entity)
}

/// Load `id`, run `command` on it and save the outcome
pub(crate) async fn execute_and_save<T>(
    repository: &dyn Repository<T>,
    metrics: &Metrics,
    id: Uuid,
    command: &T::Command,
) -> Outcome<(T, Vec<T::Event>)>
where
    T: Entity,
    T::Event: DomainEvent,
    DomainError: From<T::Error>,
{
    let mut entity = load(repository, id).await?;
    let expected_version = entity.version();

    let events = entity
        .execute(command)
        .map_err(DomainError::from)
        .inspect_err(|e| {
            metrics.record_failure(T::NAME, e);
            tracing::warn!(entity = T::NAME, entity_id = %id, error = %e, "Command rejected");
        })?;

    if events.is_empty() {
        tracing::debug!(entity = T::NAME, entity_id = %id, "Command produced no change");
        return Ok((entity, events));
    }

    repository.update(entity.clone(), expected_version).await?;

    let types = event_types(&events);
    metrics.record_events(&types);
    tracing::info!(
        entity = T::NAME,
        entity_id = %id,
        version = entity.version(),
        events = ?types,
        "Command applied"
    );
    Ok((entity, events))
}

/// Trimmed search text, or `None` when blank
pub(crate) fn search_term(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
}

/// Resolve a caller-supplied sort field against the fields an entity allows
pub(crate) fn resolve_sort(
    sort_by: Option<&str>,
    descending: bool,
    allowed: &[&str],
    default_field: &str,
) -> Result<SortSpec, ValidationError> {
    let field = match sort_by.map(str::trim).filter(|f| !f.is_empty()) {
        None => default_field,
        Some(requested) => allowed
            .iter()
            .copied()
            .find(|candidate| *candidate == requested)
            .ok_or_else(|| ValidationError::not_allowed("sort_by", requested, allowed))?,
    };

    Ok(if descending {
        SortSpec::descending(field)
    } else {
        SortSpec::ascending(field)
    })
}

/// Search, sort and slice one page out of a repository
pub(crate) async fn fetch_page<T: Entity>(
    repository: &dyn Repository<T>,
    metrics: &Metrics,
    spec: &dyn Specification<T>,
    sort: &SortSpec,
    request: PageRequest,
) -> Outcome<PagedResult<T>> {
    let mut items = repository.search(spec).await?;
    sort.apply(&mut items);

    let page = paginate(items, request);
    metrics.record_page_query(T::NAME);
    tracing::debug!(
        entity = T::NAME,
        page_number = page.page_number,
        page_size = page.page_size,
        total_items = page.total_items,
        total_pages = page.total_pages,
        sort_field = %sort.field,
        "Page query served"
    );
    Ok(page)
}
