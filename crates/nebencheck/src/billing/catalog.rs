//! Reference tables the plausibility and legality passes consult. The
//! built-in table carries the DMB Betriebskostenspiegel 2023 bands; callers
//! may construct their own (newer survey year, regional figures) and inject
//! it into the engine.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::billing::domain::CostCategory;

/// Customary cost band in €/m²/year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRange {
    pub low: Decimal,
    pub high: Decimal,
}

/// A named set of reference bands plus the categories that are never
/// chargeable to tenants, each with the sentence explaining why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCatalog {
    source: String,
    ranges: BTreeMap<CostCategory, CostRange>,
    inadmissible: BTreeMap<CostCategory, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("reference band for {category:?} is inverted: low {low} exceeds high {high}")]
    InvertedRange {
        category: CostCategory,
        low: Decimal,
        high: Decimal,
    },
    #[error("category {category:?} appears in both the band table and the inadmissible table")]
    Conflicting { category: CostCategory },
}

impl ReferenceCatalog {
    /// Builds a catalog after checking that every band is ordered and that
    /// no category is simultaneously banded and inadmissible.
    pub fn new(
        source: impl Into<String>,
        ranges: BTreeMap<CostCategory, CostRange>,
        inadmissible: BTreeMap<CostCategory, String>,
    ) -> Result<Self, CatalogError> {
        for (category, range) in &ranges {
            if range.low > range.high {
                return Err(CatalogError::InvertedRange {
                    category: *category,
                    low: range.low,
                    high: range.high,
                });
            }
            if inadmissible.contains_key(category) {
                return Err(CatalogError::Conflicting {
                    category: *category,
                });
            }
        }

        Ok(Self {
            source: source.into(),
            ranges,
            inadmissible,
        })
    }

    /// The DMB Betriebskostenspiegel 2023 with the five categories German
    /// case law treats as non-apportionable.
    pub fn betriebskostenspiegel_2023() -> Self {
        let band = |low_cents: i64, high_cents: i64| CostRange {
            low: Decimal::new(low_cents, 2),
            high: Decimal::new(high_cents, 2),
        };

        let ranges = BTreeMap::from([
            (CostCategory::Heating, band(550, 1400)),
            (CostCategory::HotWater, band(150, 400)),
            (CostCategory::WaterSewage, band(200, 450)),
            (CostCategory::Garbage, band(80, 250)),
            (CostCategory::BuildingInsurance, band(50, 180)),
            (CostCategory::LiabilityInsurance, band(10, 40)),
            (CostCategory::Elevator, band(80, 250)),
            (CostCategory::Garden, band(50, 180)),
            (CostCategory::Cleaning, band(50, 220)),
            (CostCategory::Caretaker, band(80, 350)),
            (CostCategory::CableTv, band(50, 150)),
            (CostCategory::BuildingLighting, band(20, 80)),
        ]);

        let inadmissible = BTreeMap::from([
            (
                CostCategory::BankFees,
                "Bankgebühren sind keine umlegbaren Betriebskosten".to_string(),
            ),
            (
                CostCategory::ManagementFees,
                "Verwaltungskosten sind nicht umlagefähig (§ 1 Abs. 2 BetrKV)".to_string(),
            ),
            (
                CostCategory::Repair,
                "Reparaturkosten sind Instandhaltung und nicht umlagefähig".to_string(),
            ),
            (
                CostCategory::LegalFees,
                "Anwalts- und Gerichtskosten sind nicht umlegbar".to_string(),
            ),
            (
                CostCategory::VacancyCosts,
                "Leerstandskosten dürfen nicht auf Mieter umgelegt werden".to_string(),
            ),
        ]);

        Self {
            source: "Betriebskostenspiegel 2023".to_string(),
            ranges,
            inadmissible,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn range(&self, category: CostCategory) -> Option<CostRange> {
        self.ranges.get(&category).copied()
    }

    pub fn inadmissible_reason(&self, category: CostCategory) -> Option<&str> {
        self.inadmissible.get(&category).map(String::as_str)
    }

    pub fn inadmissible_categories(&self) -> impl Iterator<Item = CostCategory> + '_ {
        self.inadmissible.keys().copied()
    }
}
