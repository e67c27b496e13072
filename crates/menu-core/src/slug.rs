//! URL slug generation

use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zа-яё0-9]").expect("valid slug regex"));
static DASH_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("valid dash regex"));

/// Lower-cases `name`, maps anything outside `[a-z а-яё 0-9]` to `-`,
/// collapses dash runs and trims dashes at both ends.
///
/// Slugs are not unique: two nodes with the same name share one.
pub fn generate_slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let dashed = NON_SLUG_CHARS.replace_all(&lowered, "-");
    let collapsed = DASH_RUNS.replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_and_digits() {
        assert_eq!(generate_slug("Caesar Salad 2"), "caesar-salad-2");
    }

    #[test]
    fn test_cyrillic_kept() {
        assert_eq!(generate_slug("Борщ с Пампушками"), "борщ-с-пампушками");
        assert_eq!(generate_slug("Ёжик"), "ёжик");
    }

    #[test]
    fn test_collapse_and_trim() {
        assert_eq!(generate_slug("  --Суп (копия)!! "), "суп-копия");
        assert_eq!(generate_slug("Café"), "caf");
    }

    #[test]
    fn test_only_symbols() {
        assert_eq!(generate_slug("!!!"), "");
    }
}
