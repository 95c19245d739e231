//! Localized UI labels.
//!
//! Catalogs are embedded TOML tables mapping a label key to its text. Lookups never
//! fail: a key missing from the selected catalog falls back to English, and a key
//! missing from English is returned as-is.

use super::*;

/// English catalog source.
const EN_CATALOG: &str = include_str!("../locales/en.toml");
/// Russian catalog source.
const RU_CATALOG: &str = include_str!("../locales/ru.toml");

lazy_static! {
  /// Parsed catalogs, keyed by locale.
  static ref CATALOGS: BTreeMap<Locale, BTreeMap<String, String>> = BTreeMap::from([
    (Locale::En, toml::from_str(EN_CATALOG).unwrap_or_default()),
    (Locale::Ru, toml::from_str(RU_CATALOG).unwrap_or_default()),
  ]);
}

/// Supported UI languages.
///
/// Unknown language codes resolve to [`Locale::En`].
///
/// ```
/// use eventlog::locale::Locale;
///
/// assert_eq!(Locale::from("ru"), Locale::Ru);
/// assert_eq!(Locale::from("de"), Locale::En);
/// assert_eq!(Locale::Ru.t("next"), "Вперёд");
/// assert_eq!(Locale::En.t("no_such_key"), "no_such_key");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Locale {
  /// English
  #[default]
  En,
  /// Russian
  Ru,
}

impl Locale {
  /// Every supported locale.
  pub const ALL: [Locale; 2] = [Locale::En, Locale::Ru];

  /// The language code of this locale.
  pub fn code(self) -> &'static str {
    match self {
      Locale::En => "en",
      Locale::Ru => "ru",
    }
  }

  /// Looks up the label for `key`.
  pub fn t<'a>(self, key: &'a str) -> &'a str {
    [self, Locale::En]
      .iter()
      .find_map(|locale| CATALOGS.get(locale).and_then(|catalog| catalog.get(key)))
      .map_or(key, |text| text.as_str())
  }
}

impl From<&str> for Locale {
  fn from(code: &str) -> Self {
    // Accept region-qualified codes such as `ru-RU`.
    let language = code.split(['-', '_']).next().unwrap_or_default().to_ascii_lowercase();
    match language.as_str() {
      "ru" => Locale::Ru,
      "en" => Locale::En,
      _ => {
        debug!("Unsupported locale {:?}, falling back to English", code);
        Locale::En
      },
    }
  }
}

impl From<String> for Locale {
  fn from(code: String) -> Self { Locale::from(code.as_str()) }
}

impl From<Locale> for String {
  fn from(locale: Locale) -> Self { locale.code().to_string() }
}

impl FromStr for Locale {
  type Err = std::convert::Infallible;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> { Ok(Locale::from(s)) }
}

impl Display for Locale {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.code()) }
}
