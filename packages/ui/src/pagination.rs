//! Page navigation for paginated tables.

use dioxus::prelude::*;

use crate::Icon;
use crate::icons::{FaAngleLeft, FaAngleRight, FaAnglesLeft, FaAnglesRight};

/// Choices offered by the page size selector.
pub const PAGE_SIZES: [u32; 5] = [5, 10, 25, 50, 100];

/// How many numbered page buttons to show at once.
pub const WINDOW: u32 = 5;

/// Up to `width` consecutive page numbers around `current`, clamped to `1..=total`.
pub fn page_window(current: u32, total: u32, width: u32) -> Vec<u32> {
    if total == 0 || width == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let width = width.min(total);
    let start = current
        .saturating_sub(width / 2)
        .max(1)
        .min(total - width + 1);
    (start..start + width).collect()
}

/// 1-based row number across pages.
pub fn row_number(page: u32, size: u32, index: usize) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(size) + index as u64 + 1
}

#[component]
pub fn Pagination(
    current: u32,
    total_pages: u32,
    total_items: u64,
    page_size: u32,
    on_page: EventHandler<u32>,
    on_page_size: EventHandler<u32>,
) -> Element {
    if total_pages == 0 {
        return rsx! {};
    }
    let at_start = current <= 1;
    let at_end = current >= total_pages;

    rsx! {
        div {
            class: "pagination",
            div {
                class: "pagination-pages",
                button {
                    class: "btn btn-sm",
                    aria_label: "First page",
                    disabled: at_start,
                    onclick: move |_| on_page.call(1),
                    Icon { icon: FaAnglesLeft, width: 12, height: 12 }
                }
                button {
                    class: "btn btn-sm",
                    aria_label: "Previous page",
                    disabled: at_start,
                    onclick: move |_| on_page.call(current.saturating_sub(1).max(1)),
                    Icon { icon: FaAngleLeft, width: 12, height: 12 }
                }
                for page in page_window(current, total_pages, WINDOW) {
                    button {
                        key: "{page}",
                        class: if page == current { "btn btn-sm btn-active" } else { "btn btn-sm" },
                        onclick: move |_| on_page.call(page),
                        "{page}"
                    }
                }
                button {
                    class: "btn btn-sm",
                    aria_label: "Next page",
                    disabled: at_end,
                    onclick: move |_| on_page.call((current + 1).min(total_pages)),
                    Icon { icon: FaAngleRight, width: 12, height: 12 }
                }
                button {
                    class: "btn btn-sm",
                    aria_label: "Last page",
                    disabled: at_end,
                    onclick: move |_| on_page.call(total_pages),
                    Icon { icon: FaAnglesRight, width: 12, height: 12 }
                }
                span { class: "muted", "of {total_pages} ({total_items} users)" }
            }
            label {
                class: "pagination-size",
                "Items per page: "
                select {
                    class: "select select-sm",
                    value: "{page_size}",
                    onchange: move |evt: FormEvent| {
                        if let Ok(size) = evt.value().parse::<u32>() {
                            on_page_size.call(size);
                        }
                    },
                    for size in PAGE_SIZES {
                        option { key: "{size}", value: "{size}", selected: size == page_size, "{size}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_centers_on_current() {
        assert_eq!(page_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_window_clamps_at_edges() {
        assert_eq!(page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(2, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(42, 10, 5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_window_smaller_than_width() {
        assert_eq!(page_window(2, 3, 5), vec![1, 2, 3]);
        assert_eq!(page_window(0, 1, 5), vec![1]);
        assert!(page_window(1, 0, 5).is_empty());
    }

    #[test]
    fn test_row_number_continues_across_pages() {
        assert_eq!(row_number(1, 10, 0), 1);
        assert_eq!(row_number(3, 10, 4), 25);
        assert_eq!(row_number(0, 10, 0), 1);
    }
}
