/// Fixed category to display color table with a declared fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMap {
    entries: &'static [(&'static str, &'static str)],
    default: &'static str,
}

pub const CATEGORY_COLORS: ColorMap = ColorMap::new(
    &[
        ("Parque Eólico", "rgb(15,189,242)"),
        ("Presa", "red"),
    ],
    // First color of Plotly's default qualitative sequence
    "#636efa",
);

impl ColorMap {
    pub const fn new(entries: &'static [(&'static str, &'static str)], default: &'static str) -> Self {
        Self { entries, default }
    }

    pub fn color_for(&self, category: &str) -> &'static str {
        self.entries
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, color)| *color)
            .unwrap_or(self.default)
    }

    pub fn is_mapped(&self, category: &str) -> bool {
        self.entries.iter().any(|(name, _)| *name == category)
    }

    pub fn default_color(&self) -> &'static str {
        self.default
    }

    pub fn entries(&self) -> &'static [(&'static str, &'static str)] {
        self.entries
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        CATEGORY_COLORS
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mapped_categories() {
        assert_eq!(CATEGORY_COLORS.color_for("Parque Eólico"), "rgb(15,189,242)");
        assert_eq!(CATEGORY_COLORS.color_for("Presa"), "red");
        assert!(CATEGORY_COLORS.is_mapped("Presa"));
    }

    #[test]
    fn test_unmapped_category_uses_fallback() {
        assert!(!CATEGORY_COLORS.is_mapped("quarry"));
        assert_eq!(CATEGORY_COLORS.color_for("quarry"), CATEGORY_COLORS.default_color());
        assert_eq!(CATEGORY_COLORS.color_for(""), "#636efa");
    }

    #[test]
    fn test_lookup_is_exact() {
        let colors = ColorMap::new(&[("wind farm", "blue")], "gray");
        assert_eq!(colors.color_for("wind farm"), "blue");
        assert_eq!(colors.color_for("Wind Farm"), "gray");
        assert_eq!(colors.entries().len(), 1);
    }
}
