use serde::{Deserialize, Serialize};

/// Where paging happens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    /// The database returns one page; the total comes from a count
    #[default]
    Server,
    /// Everything is returned; the caller pages
    Client,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number
    #[serde(default = "first_page")]
    pub current: u32,
    /// Falls back to the configured default page size
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub mode: PaginationMode,
}

fn first_page() -> u32 {
    1
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current: first_page(),
            page_size: None,
            mode: PaginationMode::default(),
        }
    }
}

/// Offset/limit window of one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

impl Pagination {
    pub fn server(current: u32, page_size: u32) -> Self {
        Self {
            current,
            page_size: Some(page_size),
            mode: PaginationMode::Server,
        }
    }

    pub fn off() -> Self {
        Self {
            mode: PaginationMode::Off,
            ..Default::default()
        }
    }

    /// Window to fetch, `None` unless paging server-side
    pub fn page(&self, default_size: u32) -> Option<Page> {
        if self.mode != PaginationMode::Server {
            return None;
        }
        let limit = self.page_size.filter(|&n| n > 0).unwrap_or(default_size).max(1);
        let offset = self.current.max(1).saturating_sub(1).saturating_mul(limit);
        Some(Page { offset, limit })
    }
}
