//! Header Filter - Domain service
//!
//! Sorted, filtered view of request headers and parameters.

use crate::domain::entities::NamedValue;
use crate::domain::request::RequestContext;
use crate::domain::value_objects::IgnoreSet;

/// Separator between the values of a multi-valued header or param.
pub const VALUE_SEPARATOR: &str = "; ";

#[derive(Debug, Clone, Default)]
pub struct HeaderFilter {
    ignored: IgnoreSet,
}

impl HeaderFilter {
    pub fn new(ignored: IgnoreSet) -> Self {
        Self { ignored }
    }

    pub fn ignored(&self) -> &IgnoreSet {
        &self.ignored
    }

    /// Headers not in the ignore set, sorted by name.
    pub fn headers(&self, request: &RequestContext) -> Vec<NamedValue> {
        joined(
            request
                .headers()
                .iter()
                .filter(|(name, _)| !self.ignored.contains(name)),
        )
    }

    /// Query and form parameters, sorted by name.
    pub fn params(&self, request: &RequestContext) -> Vec<NamedValue> {
        joined(request.form().iter())
    }
}

fn joined<'a, I>(entries: I) -> Vec<NamedValue>
where
    I: Iterator<Item = (&'a String, &'a Vec<String>)>,
{
    let mut out: Vec<NamedValue> = entries
        .map(|(name, values)| NamedValue::new(name.as_str(), values.join(VALUE_SEPARATOR)))
        .collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}
