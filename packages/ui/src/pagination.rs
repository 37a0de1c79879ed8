use dioxus::prelude::*;

/// Number of pages needed for `len` items; at least one.
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// Items of the zero-based `page`. Pages past the end clamp to the last one.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    if page_size == 0 {
        return items.to_vec();
    }
    let page = page.min(page_count(items.len(), page_size) - 1);
    items
        .iter()
        .skip(page * page_size)
        .take(page_size)
        .cloned()
        .collect()
}

/// Previous / next controls with a "page x of y" label. `page` is zero-based.
#[component]
pub fn Pagination(page: usize, total: usize, page_size: usize, on_change: EventHandler<usize>) -> Element {
    let pages = page_count(total, page_size);
    if pages <= 1 {
        return rsx! {};
    }
    let current = page.min(pages - 1);
    let display = current + 1;

    rsx! {
        nav {
            class: "pagination",
            button {
                class: "btn btn-secondary",
                disabled: current == 0,
                onclick: move |_| on_change.call(current.saturating_sub(1)),
                "Previous"
            }
            span { class: "pagination-label", "Page {display} of {pages}" }
            button {
                class: "btn btn-secondary",
                disabled: current + 1 >= pages,
                onclick: move |_| on_change.call((current + 1).min(pages - 1)),
                "Next"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
    }

    #[test]
    fn test_paginate_clamps_to_last_page() {
        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(paginate(&items, 0, 10), (1..=10).collect::<Vec<_>>());
        assert_eq!(paginate(&items, 2, 10), vec![21, 22, 23, 24, 25]);
        assert_eq!(paginate(&items, 9, 10), vec![21, 22, 23, 24, 25]);
        assert!(paginate::<u32>(&[], 0, 10).is_empty());
    }
}
