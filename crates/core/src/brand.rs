//! Known watch brands

use serde::{Deserialize, Serialize};
use std::fmt;

/// Brands the storefront has collections for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Brand {
    Casio,
    Citizen,
    Edifice,
    Ingersoll,
    Orient,
    Seiko,
    Hamilton,
    Longines,
    Omega,
    Rolex,
    Tissot,
    Tudor,
    Timex,
    Bulova,
}

impl Brand {
    /// Hint-matching order. The first brand whose name occurs in the hint wins.
    pub const ALL: &'static [Brand] = &[
        Brand::Casio,
        Brand::Citizen,
        Brand::Edifice,
        Brand::Ingersoll,
        Brand::Orient,
        Brand::Seiko,
        Brand::Hamilton,
        Brand::Longines,
        Brand::Omega,
        Brand::Rolex,
        Brand::Tissot,
        Brand::Tudor,
        Brand::Timex,
        Brand::Bulova,
    ];

    /// Canonical uppercase ASCII name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Casio => "CASIO",
            Self::Citizen => "CITIZEN",
            Self::Edifice => "EDIFICE",
            Self::Ingersoll => "INGERSOLL",
            Self::Orient => "ORIENT",
            Self::Seiko => "SEIKO",
            Self::Hamilton => "HAMILTON",
            Self::Longines => "LONGINES",
            Self::Omega => "OMEGA",
            Self::Rolex => "ROLEX",
            Self::Tissot => "TISSOT",
            Self::Tudor => "TUDOR",
            Self::Timex => "TIMEX",
            Self::Bulova => "BULOVA",
        }
    }

    /// Storefront collection label
    pub fn collection_label(&self) -> &'static str {
        match self {
            Self::Seiko => "SEİKO",
            other => other.name(),
        }
    }

    /// Find a brand mentioned anywhere in free text.
    ///
    /// Case-insensitive; the Azerbaijani dotted capital `İ` is folded to `I`
    /// so "Seİko" and "SEİKO" both resolve.
    pub fn from_hint(hint: &str) -> Option<Brand> {
        let folded = hint.to_uppercase().replace('İ', "I");
        let folded = folded.trim();
        if folded.is_empty() {
            return None;
        }
        Self::ALL.iter().copied().find(|b| folded.contains(b.name()))
    }

    /// Exact lookup by canonical name or collection label
    pub fn from_name(name: &str) -> Option<Brand> {
        let upper = name.trim().to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.name() == upper || b.collection_label() == upper)
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
