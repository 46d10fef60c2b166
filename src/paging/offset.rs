/// One page of results paged by the server (`from`/`size`).
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetPage<T> {
    pub from: usize,
    pub size: usize,
    pub total: usize,
    pub items: Vec<T>,
}

impl<T> OffsetPage<T> {
    pub fn new(from: usize, size: usize, total: usize, items: Vec<T>) -> Self {
        Self {
            from,
            size,
            total,
            items,
        }
    }

    pub fn has_next_page(&self) -> bool {
        self.from + self.size < self.total
    }

    pub fn has_previous_page(&self) -> bool {
        self.from > 0
    }

    /// 1-indexed number of the first result, 0 when there are none.
    pub fn first_result(&self) -> usize {
        if self.total > 0 {
            self.from + 1
        } else {
            0
        }
    }

    pub fn last_result(&self) -> usize {
        if self.has_next_page() {
            self.from + self.size
        } else {
            self.total
        }
    }

    pub fn next_offset(&self) -> usize {
        if self.has_next_page() {
            self.from + self.size
        } else {
            self.from
        }
    }

    pub fn previous_offset(&self) -> usize {
        if self.has_previous_page() {
            self.from.saturating_sub(self.size)
        } else {
            self.from
        }
    }
}
