// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Publish-time options

/// A single publish option, applied in order by [`PublishOptions::from_iter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOption {
    /// Mark the publish as a retry of an earlier delivery
    Retry,
}

/// Options consulted by retry-aware dispatchers
///
/// The bus adapters in this workspace accept these but do not act on them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishOptions {
    is_retry: bool,
}

impl PublishOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retry(mut self) -> Self {
        self.is_retry = true;
        self
    }

    pub fn is_retry(&self) -> bool {
        self.is_retry
    }

    fn apply(&mut self, option: PublishOption) {
        match option {
            PublishOption::Retry => self.is_retry = true,
        }
    }
}

impl FromIterator<PublishOption> for PublishOptions {
    fn from_iter<I: IntoIterator<Item = PublishOption>>(iter: I) -> Self {
        let mut options = Self::new();
        for option in iter {
            options.apply(option);
        }
        options
    }
}
