//! Pagination window model.
//!
//! [`page_nav`] is a pure function from (current page, page size, total
//! items) to a navigation description, parameterized over the link type so
//! the same model serves both strategies: URL-driven lists link to a
//! [`crate::app::Route`], while the admin buckets link to a plain target
//! page delivered back to the caller.

/// One entry of the page strip.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEntry<L> {
    /// The current page; rendered non-interactive
    Current(u32),
    /// A reachable page
    Jump { page: u32, link: L },
}

/// Navigation description for one paginated list.
#[derive(Debug, Clone, PartialEq)]
pub struct PageNav<L> {
    /// Current page, clamped into `1..=total_pages`
    pub current: u32,
    pub total_pages: u32,
    /// Link to the previous page; `None` renders a disabled marker
    pub prev: Option<L>,
    /// Link to the next page; `None` renders a disabled marker
    pub next: Option<L>,
    /// One entry per page, in order
    pub entries: Vec<PageEntry<L>>,
}

/// Offset of the first item of `page`.
pub fn skip_for(page: u32, page_size: u64) -> u64 {
    u64::from(page.saturating_sub(1)) * page_size
}

/// Build the navigation model, or `None` when a single page (or nothing)
/// exists and no navigation should be rendered.
pub fn page_nav<L>(
    current_page: u32,
    page_size: u64,
    total_items: u64,
    link: impl Fn(u32) -> L,
) -> Option<PageNav<L>> {
    if page_size == 0 {
        return None;
    }
    let total_pages = total_items.div_ceil(page_size) as u32;
    if total_pages <= 1 {
        return None;
    }

    let current = current_page.clamp(1, total_pages);
    let prev = (current > 1).then(|| link(current - 1));
    let next = (current < total_pages).then(|| link(current + 1));
    let entries = (1..=total_pages)
        .map(|page| {
            if page == current {
                PageEntry::Current(page)
            } else {
                PageEntry::Jump {
                    page,
                    link: link(page),
                }
            }
        })
        .collect();

    Some(PageNav {
        current,
        total_pages,
        prev,
        next,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(current: u32, total: u64) -> Option<PageNav<u32>> {
        page_nav(current, 10, total, |page| page)
    }

    #[test]
    fn test_no_nav_for_single_page() {
        assert!(nav(1, 0).is_none());
        assert!(nav(1, 10).is_none());
        assert!(nav(1, 9).is_none());
    }

    #[test]
    fn test_first_page_of_three() {
        let nav = nav(1, 25).unwrap();
        assert_eq!(nav.total_pages, 3);
        assert_eq!(nav.entries.len(), 3);
        assert!(nav.prev.is_none());
        assert_eq!(nav.next, Some(2));
        assert_eq!(nav.entries[0], PageEntry::Current(1));
        assert_eq!(nav.entries[1], PageEntry::Jump { page: 2, link: 2 });
    }

    #[test]
    fn test_last_page_of_three() {
        let nav = nav(3, 25).unwrap();
        assert!(nav.next.is_none());
        assert_eq!(nav.prev, Some(2));
        assert_eq!(nav.entries[2], PageEntry::Current(3));
    }

    #[test]
    fn test_middle_page() {
        let nav = nav(2, 25).unwrap();
        assert_eq!(nav.prev, Some(1));
        assert_eq!(nav.next, Some(3));
    }

    #[test]
    fn test_out_of_range_current_is_clamped() {
        let nav = nav(99, 25).unwrap();
        assert_eq!(nav.current, 3);
        assert!(nav.next.is_none());

        let nav = page_nav(0, 10, 25, |page| page).unwrap();
        assert_eq!(nav.current, 1);
    }

    #[test]
    fn test_exact_page_boundary() {
        // 20 items at size 10 is exactly two pages.
        let nav_two = nav(1, 20).unwrap();
        assert_eq!(nav_two.total_pages, 2);
        // 21 items spills into a third.
        let nav_three = nav(1, 21).unwrap();
        assert_eq!(nav_three.total_pages, 3);
    }

    #[test]
    fn test_skip_for() {
        assert_eq!(skip_for(1, 10), 0);
        assert_eq!(skip_for(3, 10), 20);
        assert_eq!(skip_for(0, 10), 0);
    }

    #[test]
    fn test_link_strategy_is_caller_supplied() {
        // Route-style links.
        let nav = page_nav(2, 10, 30, |page| format!("#/questions?page={page}")).unwrap();
        match &nav.entries[0] {
            PageEntry::Jump { link, .. } => assert_eq!(link, "#/questions?page=1"),
            other => panic!("expected jump, got {other:?}"),
        }
    }
}
