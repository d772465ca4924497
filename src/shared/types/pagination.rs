/// Offset pagination with a fixed page size.
///
/// `page` is 1-indexed; `None` means "no pagination, return everything".
/// A requested page of 0 is treated as page 1; pages past [`Self::MAX_PAGE`]
/// are clamped to it, which keeps every offset within `i64::MAX` and is
/// already past the end of any real table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    page: Option<u64>,
}

impl PageRequest {
    pub const PAGE_SIZE: u64 = 10;
    pub const MAX_PAGE: u64 = i64::MAX as u64 / Self::PAGE_SIZE;

    /// Every row, unpaginated.
    pub fn all() -> Self {
        Self { page: None }
    }

    pub fn page(page: u64) -> Self {
        Self {
            page: Some(page.clamp(1, Self::MAX_PAGE)),
        }
    }

    pub fn from_query(page: Option<u64>) -> Self {
        page.map_or_else(Self::all, Self::page)
    }

    /// `(offset, limit)` for the requested page, `None` when unpaginated.
    pub fn window(&self) -> Option<(u64, u64)> {
        self.page.map(|page| {
            let offset = page.saturating_sub(1).saturating_mul(Self::PAGE_SIZE);
            (offset, Self::PAGE_SIZE)
        })
    }

    /// Slice an already ordered, already filtered collection.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        match self.window() {
            Some((offset, limit)) => items
                .into_iter()
                .skip(usize::try_from(offset).unwrap_or(usize::MAX))
                .take(limit as usize)
                .collect(),
            None => items,
        }
    }
}
