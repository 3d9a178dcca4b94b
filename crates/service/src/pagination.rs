//! Page selection for the list endpoints.

/// Largest page size a caller can request; anything bigger is cut down.
pub const MAX_PER_PAGE: u32 = 100;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Requested slice of a listing. Pages are numbered from 1, as the
/// dashboard presents them.
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// First page with an explicit size, for fixed-size widgets such as
    /// the dashboard's activity feed.
    pub fn first_page(per_page: u32) -> Self {
        Self { page: 1, per_page }
    }

    /// Zero-based page index and effective page size, the form the ORM
    /// paginator expects. Page 0 reads as page 1; the size is forced into
    /// `1..=MAX_PER_PAGE`.
    pub fn window(self) -> (u64, u64) {
        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        (u64::from(page - 1), u64::from(per_page))
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, per_page: DEFAULT_PER_PAGE }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_zero_based() {
        assert_eq!(Pagination { page: 1, per_page: 20 }.window(), (0, 20));
        assert_eq!(Pagination { page: 5, per_page: 20 }.window(), (4, 20));
        // page 0 is treated as the first page, not an error
        assert_eq!(Pagination { page: 0, per_page: 20 }.window(), (0, 20));
    }

    #[test]
    fn window_forces_size_into_range() {
        let (_, per) = Pagination { page: 1, per_page: 0 }.window();
        assert_eq!(per, 1);
        let (_, per) = Pagination { page: 1, per_page: 1000 }.window();
        assert_eq!(per, u64::from(MAX_PER_PAGE));
    }

    #[test]
    fn default_is_first_page_of_twenty() {
        let d = Pagination::default();
        assert_eq!(d.window(), (0, u64::from(DEFAULT_PER_PAGE)));
    }
}
