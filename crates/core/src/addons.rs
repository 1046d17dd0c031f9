//! Optional address-hierarchy capability.
//!
//! The address-hierarchy add-on is not part of every deployment. Instead of probing for it at
//! runtime, deployments wire an [`AddressLevelProvider`] at startup: the real add-on when
//! installed, [`AddressHierarchyAbsent`] otherwise. Callers never know the difference.

use crate::error::{DashboardError, DashboardResult, ServiceFailure};
use crate::model::AddressHierarchyLevel;

/// Source of ordered address hierarchy levels.
///
/// The two flags select which levels are included: those mapped onto an address field, those
/// not yet mapped, or both.
pub trait AddressLevelProvider: Send + Sync {
    /// The configured levels, top tier first.
    fn ordered_levels(
        &self,
        include_mapped: bool,
        include_unmapped: bool,
    ) -> Result<Vec<AddressHierarchyLevel>, ServiceFailure>;
}

/// Stand-in wired when the address-hierarchy add-on is not deployed; reports no levels.
#[derive(Clone, Copy, Debug, Default)]
pub struct AddressHierarchyAbsent;

impl AddressLevelProvider for AddressHierarchyAbsent {
    fn ordered_levels(
        &self,
        _include_mapped: bool,
        _include_unmapped: bool,
    ) -> Result<Vec<AddressHierarchyLevel>, ServiceFailure> {
        Ok(Vec::new())
    }
}

/// Address field names of the configured hierarchy levels, in display order.
///
/// Asks the provider for every level (both inclusion flags set), takes each level's address
/// field name in delivery order, and reverses the list when it has more than one entry. An
/// absent capability yields an empty list; a provider failure is an error, never swallowed.
pub fn address_hierarchy_field_names(
    provider: &dyn AddressLevelProvider,
) -> DashboardResult<Vec<String>> {
    let levels = provider
        .ordered_levels(true, true)
        .map_err(DashboardError::AddressHierarchy)?;

    let mut names: Vec<String> = levels
        .into_iter()
        .map(|level| level.address_field.name)
        .collect();
    if names.len() > 1 {
        names.reverse();
    }
    Ok(names)
}
