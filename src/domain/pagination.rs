use std::str::FromStr;

use crate::filter::FindOptions;

/// Optional paging hints as received from callers. Zero counts as unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

impl Pagination {
    pub fn limit(limit: u32) -> Self {
        Self { limit: Some(limit), skip: None }
    }

    pub fn skip(skip: u32) -> Self {
        Self { limit: None, skip: Some(skip) }
    }

    pub fn new(limit: u32, skip: u32) -> Self {
        Self { limit: Some(limit), skip: Some(skip) }
    }
}

/// How `limit` and `skip` combine when both are given.
///
/// `Composed` is the default: a caller that passes both hints gets the page it
/// asked for. `Exclusive` keeps the legacy behavior for callers that depend on
/// `skip` being ignored whenever `limit` is set, and is selected with
/// `USER_PAGINATION_POLICY=exclusive`. Both policies accept both hints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaginationPolicy {
    /// Skip first, then limit.
    #[default]
    Composed,
    /// Legacy branches: `limit` wins when set, otherwise `skip` alone.
    Exclusive,
}

impl PaginationPolicy {
    pub fn find_options(self, page: Pagination) -> FindOptions {
        let limit = page.limit.filter(|&n| n > 0).map(|n| n as usize);
        let skip = page.skip.filter(|&n| n > 0).map(|n| n as usize);
        match self {
            PaginationPolicy::Composed => FindOptions { skip, limit },
            PaginationPolicy::Exclusive if limit.is_some() => FindOptions { skip: None, limit },
            PaginationPolicy::Exclusive => FindOptions { skip, limit: None },
        }
    }
}

impl FromStr for PaginationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "composed" => Ok(PaginationPolicy::Composed),
            "exclusive" | "legacy" => Ok(PaginationPolicy::Exclusive),
            other => Err(format!("unknown pagination policy: {other}")),
        }
    }
}
