use crate::page::Page;
use std::collections::VecDeque;

/// Back stack of previously visited pages, newest last.
#[derive(Debug)]
pub struct History {
    pages: VecDeque<Page>,
    max: usize,
}

impl History {
    pub fn new(max: usize) -> Self {
        Self {
            pages: VecDeque::new(),
            max,
        }
    }

    pub fn push(&mut self, page: Page) {
        if self.max == 0 {
            return;
        }
        if self.pages.len() == self.max {
            self.pages.pop_front();
        }
        self.pages.push_back(page);
    }

    pub fn pop(&mut self) -> Option<Page> {
        self.pages.pop_back()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
