use crate::domain::Region;

/// A title search restricted to the `[offset, offset + limit)` window of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub title: String,
    pub region: Region,
    pub limit: usize,
    pub offset: usize,
}

impl ListQuery {
    pub fn new(title: impl Into<String>, region: Region, limit: usize, offset: usize) -> Self {
        Self {
            title: title.into(),
            region,
            limit,
            offset,
        }
    }
}
