//! Derived views over an analysis payload.
//!
//! Everything here is a pure function of `(AnalysisResult, AreaFilter)`.
//! Nothing is memoised between payloads, so flipping the filter back and
//! forth always yields the same rows for the same payload.

use std::collections::HashSet;

use crate::domain::{AnalysisResult, AreaFilter, SaleRecord};

/// Value of the first run of ASCII digits in `label`, or 0 when there is none.
///
/// `"84A㎡"` → 84, `"제101"` → 101, `"-"` → 0.
pub fn leading_number(label: &str) -> u64 {
    label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .map_while(|c| c.to_digit(10))
        .fold(0_u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit))
        })
}

/// Distinct `areaGroup` values ordered by their embedded size number.
///
/// Equal numbers keep the order in which the groups were first seen.
pub fn available_areas(result: &AnalysisResult) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut areas: Vec<String> = result
        .all_sales
        .iter()
        .filter(|sale| seen.insert(sale.area_group.as_str()))
        .map(|sale| sale.area_group.clone())
        .collect();

    areas.sort_by_key(|area| leading_number(area));
    areas
}

/// Sales visible under `filter`, in payload order.
pub fn filtered_sales<'a>(result: &'a AnalysisResult, filter: &AreaFilter) -> Vec<&'a SaleRecord> {
    result
        .all_sales
        .iter()
        .filter(|sale| filter.matches(&sale.area_group))
        .collect()
}

/// Whether `filter` can be applied to `result` without leaving the set of
/// groups the payload actually contains.
pub fn is_valid_filter(result: &AnalysisResult, filter: &AreaFilter) -> bool {
    match filter {
        AreaFilter::ShowAll => true,
        AreaFilter::Group(group) => result.all_sales.iter().any(|sale| &sale.area_group == group),
    }
}

/// Filter options in display order: "show all" first, then the sorted groups.
pub fn filter_options(result: &AnalysisResult) -> Vec<AreaFilter> {
    std::iter::once(AreaFilter::ShowAll)
        .chain(available_areas(result).into_iter().map(AreaFilter::Group))
        .collect()
}
