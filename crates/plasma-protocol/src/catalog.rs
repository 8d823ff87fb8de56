//! Command catalog.
//!
//! Static mapping from an operator-facing (category, value) selection to the
//! panel command code transmitted on the wire. The catalog never changes at
//! runtime; extending it means adding rows to [`CATALOG`].
//!
//! State-tracking constraint: every code within one category must share the
//! same leading two characters, because the panels key their internal state
//! (and the host its confirmed state) by that 2-character prefix. A test
//! asserts this over the whole table.

/// A command category selectable by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Panel power (`PO` prefix).
    Power,
    /// Input source selection (`II` prefix).
    Source,
    /// Display scaling mode (`DA` prefix).
    Mode,
}

/// One row of the command catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// Category the value belongs to.
    pub category: Category,
    /// Operator-facing value label.
    pub value: &'static str,
    /// Command code transmitted on the wire.
    pub code: &'static str,
}

/// The full command catalog.
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry { category: Category::Power, value: "On", code: "PON" },
    CatalogEntry { category: Category::Power, value: "Off", code: "POF" },
    CatalogEntry { category: Category::Source, value: "Video", code: "IIS:VID" },
    CatalogEntry { category: Category::Source, value: "PC VGA", code: "IIS:PC1" },
    CatalogEntry { category: Category::Mode, value: "Normal", code: "DAM:NORM" },
    CatalogEntry { category: Category::Mode, value: "Zoom", code: "DAM:ZOOM" },
    CatalogEntry { category: Category::Mode, value: "Full", code: "DAM:FULL" },
    CatalogEntry { category: Category::Mode, value: "Justified", code: "DAM:JUST" },
    CatalogEntry { category: Category::Mode, value: "Auto", code: "DAM:SELF" },
];

impl Category {
    /// All categories, in the order they are rendered in status blocks.
    pub const ALL: [Category; 3] = [Category::Power, Category::Source, Category::Mode];

    /// Get the category name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Power => "Power",
            Category::Source => "Source",
            Category::Mode => "Mode",
        }
    }

    /// Parse a category from its name (case-insensitive).
    pub fn from_str(s: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }

    /// The 2-character prefix keying this category's confirmed state.
    pub fn state_key(&self) -> &'static str {
        match self {
            Category::Power => "PO",
            Category::Source => "II",
            Category::Mode => "DA",
        }
    }

    /// Look up the command code for a value label in this category.
    pub fn code(&self, value: &str) -> Option<&'static str> {
        CATALOG
            .iter()
            .find(|e| e.category == *self && e.value == value)
            .map(|e| e.code)
    }

    /// Reverse lookup: the value label a code stands for in this category.
    pub fn value_for(&self, code: &str) -> Option<&'static str> {
        CATALOG
            .iter()
            .find(|e| e.category == *self && e.code == code)
            .map(|e| e.value)
    }

    /// All value labels in this category.
    pub fn values(&self) -> impl Iterator<Item = &'static str> + '_ {
        CATALOG
            .iter()
            .filter(move |e| e.category == *self)
            .map(|e| e.value)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every command code in the catalog, across all categories.
pub fn all_codes() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|e| e.code)
}

/// Find the catalog entry a code belongs to, if any.
pub fn find_code(code: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.code == code)
}

/// First 2 characters of a code: the state-tracking key.
///
/// All catalog codes are at least 3 ASCII characters long.
pub fn prefix2(code: &str) -> &str {
    &code[..2]
}

/// First 3 characters of a code: the acknowledgement payload.
pub fn prefix3(code: &str) -> &str {
    &code[..3]
}
