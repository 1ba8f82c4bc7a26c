use crate::api::{ResourceRecord, ResourceType};

/// Independent filter criteria composed over the cached listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub term: String,
    pub year: Option<i32>,
    pub resource_type: Option<ResourceType>,
    pub course: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.term.trim().is_empty()
            && self.year.is_none()
            && self.resource_type.is_none()
            && self.course.is_none()
    }
}

/// Pure conjunction: case-insensitive substring on name, exact match on
/// year, type and course.
pub fn apply_filters(resources: &[ResourceRecord], criteria: &FilterCriteria) -> Vec<ResourceRecord> {
    let term = criteria.term.trim().to_lowercase();
    resources
        .iter()
        .filter(|resource| {
            if !term.is_empty() && !resource.name.to_lowercase().contains(&term) {
                return false;
            }
            if let Some(year) = criteria.year {
                if resource.year != year {
                    return false;
                }
            }
            if let Some(resource_type) = criteria.resource_type {
                if resource.resource_type != resource_type {
                    return false;
                }
            }
            if let Some(course) = &criteria.course {
                if &resource.course != course {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

pub fn distinct_years(resources: &[ResourceRecord]) -> Vec<i32> {
    let mut years: Vec<i32> = resources.iter().map(|r| r.year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

pub fn distinct_types(resources: &[ResourceRecord]) -> Vec<ResourceType> {
    let mut types: Vec<ResourceType> = Vec::new();
    for resource in resources {
        if !types.contains(&resource.resource_type) {
            types.push(resource.resource_type);
        }
    }
    types.sort_by_key(|t| t.as_str());
    types
}

pub fn distinct_courses(resources: &[ResourceRecord]) -> Vec<String> {
    let mut courses: Vec<String> = resources.iter().map(|r| r.course.clone()).collect();
    courses.sort();
    courses.dedup();
    courses
}
