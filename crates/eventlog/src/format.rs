//! Display formatting for event rows and the page caption.

use super::*;
use crate::{locale::Locale, number::to_number};

/// Formats a raw event timestamp (milliseconds since the Unix epoch) in local time.
///
/// Values that are not numeric, not positive, or outside the representable date range
/// are shown as the localized "invalid date" label.
///
/// # Arguments
///
/// * `timestamp` - The raw timestamp as passed through by the normalizer
/// * `locale` - Language used for the fallback label and the date layout
pub fn format_timestamp(timestamp: Option<&Value>, locale: Locale) -> String {
  format_timestamp_in(timestamp, &Local, locale)
}

/// [`format_timestamp`] for an explicit time zone.
pub fn format_timestamp_in<Tz>(timestamp: Option<&Value>, tz: &Tz, locale: Locale) -> String
where
  Tz: TimeZone,
  Tz::Offset: Display, {
  let millis = to_number(timestamp);
  if millis.is_nan() || millis <= 0.0 {
    return locale.t("invalid_date").to_string();
  }

  match tz.timestamp_millis_opt(millis as i64).single() {
    Some(datetime) => render(&datetime, locale),
    None => {
      debug!("Timestamp {} is out of range", millis);
      locale.t("invalid_date").to_string()
    },
  }
}

/// Lays out a date the way each language usually writes it.
fn render<Tz>(datetime: &DateTime<Tz>, locale: Locale) -> String
where
  Tz: TimeZone,
  Tz::Offset: Display, {
  let pattern = match locale {
    Locale::En => "%b %-d, %Y, %H:%M:%S",
    Locale::Ru => "%d.%m.%Y, %H:%M:%S",
  };
  datetime.format(pattern).to_string()
}

/// Builds the `Page N of M` caption. An unknown page count is shown as `?`.
pub fn page_caption(page: usize, max_page: Option<usize>, locale: Locale) -> String {
  let max_page = max_page.map_or_else(|| "?".to_string(), |max| max.to_string());
  format!("{} {} {} {}", locale.t("page"), page, locale.t("of"), max_page)
}
