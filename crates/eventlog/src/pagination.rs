//! Page windows over a normalized event list.
//!
//! The normalizer always returns every record of the feed; a page is a window over
//! that list. Pages are numbered from 1. A window that falls outside the list is simply
//! empty, so callers never need to validate page numbers before slicing.
//!
//! ```
//! use eventlog::pagination::{max_page, window};
//!
//! let records = [1, 2, 3, 4, 5, 6, 7];
//! assert_eq!(window(&records, 1, 3), &[1, 2, 3]);
//! assert_eq!(window(&records, 3, 3), &[7]);
//! assert!(window(&records, 4, 3).is_empty());
//!
//! assert_eq!(max_page(150.0, 3), Some(50));
//! assert_eq!(max_page(f64::NAN, 3), None);
//! ```

use super::*;

/// Returns the records of page `page` (1-based) with `per_page` records per page.
///
/// Page `0` and pages past the end yield an empty slice.
pub fn window<T>(records: &[T], page: usize, per_page: usize) -> &[T] {
  let Some(start) = page.checked_sub(1).and_then(|index| index.checked_mul(per_page)) else {
    return &[];
  };
  let start = start.min(records.len());
  let end = start.saturating_add(per_page).min(records.len());
  &records[start..end]
}

/// Number of pages needed for `total_count` records, `None` when the count is unknown.
///
/// A `NaN`, infinite or negative count, or a zero page size, gives `None`.
pub fn max_page(total_count: f64, per_page: usize) -> Option<usize> {
  if per_page == 0 || !total_count.is_finite() || total_count < 0.0 {
    return None;
  }
  Some((total_count / per_page as f64).ceil() as usize)
}

/// Whether the previous/next controls are usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
  /// A previous page exists
  pub can_prev: bool,
  /// A next page may exist
  pub can_next: bool,
}

impl Navigation {
  /// Navigation state for `page` given the page count.
  ///
  /// With an unknown page count the next control stays enabled.
  pub fn new(page: usize, max_page: Option<usize>) -> Self {
    Self { can_prev: page > 1, can_next: max_page.map_or(true, |max| page < max) }
  }
}

/// Current position in a paginated view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
  /// Current page, 1-based
  page:     usize,
  /// Records per page
  per_page: usize,
  /// Whether windows are applied at all
  enabled:  bool,
}

impl Pager {
  /// Creates a pager positioned on page 1.
  ///
  /// # Errors
  ///
  /// Returns [`EventLogError::Config`] if `per_page` is zero.
  pub fn new(per_page: usize) -> Result<Self> {
    if per_page == 0 {
      return Err(EventLogError::Config("Records per page must be at least 1".to_string()));
    }
    Ok(Self { page: 1, per_page, enabled: true })
  }

  /// Creates a pager that always shows the whole list.
  pub fn disabled() -> Self { Self { page: 1, per_page: usize::MAX, enabled: false } }

  /// Current page number.
  pub fn page(&self) -> usize { self.page }

  /// Records per page.
  pub fn per_page(&self) -> usize { self.per_page }

  /// Whether windows are applied.
  pub fn is_enabled(&self) -> bool { self.enabled }

  /// The records visible on the current page.
  pub fn slice<'a, T>(&self, records: &'a [T]) -> &'a [T] {
    if self.enabled {
      window(records, self.page, self.per_page)
    } else {
      records
    }
  }

  /// Page count for `total_count` records.
  pub fn max_page(&self, total_count: f64) -> Option<usize> {
    if self.enabled {
      max_page(total_count, self.per_page)
    } else {
      Some(1)
    }
  }

  /// Navigation state on the current page.
  pub fn navigation(&self, total_count: f64) -> Navigation {
    if self.enabled {
      Navigation::new(self.page, self.max_page(total_count))
    } else {
      Navigation { can_prev: false, can_next: false }
    }
  }

  /// Moves to the next page if navigation allows it. Returns whether the page changed.
  pub fn next(&mut self, total_count: f64) -> bool {
    if !self.navigation(total_count).can_next {
      return false;
    }
    self.page = self.page.saturating_add(1);
    true
  }

  /// Moves to the previous page if there is one. Returns whether the page changed.
  pub fn prev(&mut self) -> bool {
    if !self.enabled || self.page <= 1 {
      return false;
    }
    self.page -= 1;
    true
  }

  /// Jumps to `page`; page numbers below 1 are raised to 1.
  pub fn go_to(&mut self, page: usize) {
    if self.enabled {
      self.page = page.max(1);
    }
  }
}
