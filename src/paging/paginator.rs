use crate::filter::Filter;

/// Immutable view of one page.
///
/// `elements` always holds exactly `page_size` slots; slots past the last
/// result are `None` so rendering grids keep a fixed number of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub elements: Vec<Option<T>>,
    /// Results after filtering
    pub total: usize,
    /// 1-indexed number of the first result on this page, 0 when empty
    pub first: usize,
    /// 1-indexed number of the last result on this page
    pub last: usize,
    pub next: bool,
    pub previous: bool,
}

impl<T> Page<T> {
    /// Elements that are not padding.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.elements.iter().flatten()
    }
}

/// Pages through a collection with one filter applied.
///
/// The current page is derived on demand and never stored.
#[derive(Debug, Clone)]
pub struct Paginator<T, F> {
    page: usize,
    page_size: usize,
    collection: Vec<T>,
    filter: F,
}

impl<T: Clone, F: Filter<T>> Paginator<T, F> {
    /// `page` is 1-indexed; both `page` and `page_size` are floored at 1.
    pub fn new(page: usize, page_size: usize, collection: Vec<T>, filter: F) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            collection,
            filter,
        }
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    pub fn collection(&self) -> &[T] {
        &self.collection
    }

    pub fn set_collection(&mut self, collection: Vec<T>) {
        self.collection = collection;
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: F) {
        self.filter = filter;
    }

    /// Items passing the filter, in collection order.
    pub fn results(&self) -> Vec<&T> {
        if self.filter.is_blank() {
            self.collection.iter().collect()
        } else {
            self.collection
                .iter()
                .filter(|item| self.filter.matches(item))
                .collect()
        }
    }

    /// Compute the current page.
    ///
    /// If the current page lies past the filtered results (for example after
    /// the filter narrowed the collection) the page number drops to the last
    /// non-empty page, or 1 when nothing matches.
    pub fn get_page(&mut self) -> Page<T> {
        let size = self.page_size;
        let results = self.results();
        let total = results.len();

        let last_page = total.div_ceil(size).max(1);
        let page = self.page.min(last_page);

        let first = if total > 0 { (page - 1) * size + 1 } else { 0 };
        let last = page.saturating_mul(size).min(total);
        let mut elements: Vec<Option<T>> = if total > 0 {
            results[first - 1..last]
                .iter()
                .map(|item| Some((*item).clone()))
                .collect()
        } else {
            Vec::with_capacity(size)
        };
        elements.resize_with(size, || None);

        self.page = page;
        Page {
            elements,
            total,
            first,
            last,
            next: page.saturating_mul(size) < total,
            previous: page > 1,
        }
    }
}
