// ABOUTME: Fixed consultation slot catalogs and the booked-slot wire type
//
// The two catalogs belong to the two wizard flows and are deliberately not
// unified: the freight flow groups by the viewer's morning/evening, the car
// flow groups by the catalog-declared caller region.

use serde::{Deserialize, Serialize};

/// How a catalog's slots are grouped for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotGrouping {
    /// Partition by the viewer-local hour (before noon vs after), each group
    /// sorted by converted local time-of-day.
    DayPart,
    /// Partition by the region declared on each catalog entry, declaration
    /// order preserved.
    Region,
}

/// One offerable consultation time, as a broker-local 12-hour label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSlot {
    pub label: &'static str,
    pub region: Option<&'static str>,
}

impl CatalogSlot {
    const fn at(label: &'static str) -> Self {
        Self {
            label,
            region: None,
        }
    }

    const fn regional(label: &'static str, region: &'static str) -> Self {
        Self {
            label,
            region: Some(region),
        }
    }
}

/// A fixed catalog of offerable slots for one wizard flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCatalog {
    pub name: &'static str,
    pub grouping: SlotGrouping,
    pub slots: &'static [CatalogSlot],
}

impl SlotCatalog {
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.iter().map(|s| s.label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.slots.iter().any(|s| s.label == label)
    }

    /// Regions in declaration order, deduplicated.
    pub fn regions(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for slot in self.slots {
            if let Some(region) = slot.region {
                if !out.contains(&region) {
                    out.push(region);
                }
            }
        }
        out
    }
}

pub const GCC_EUROPE: &str = "GCC / Europe";
pub const USA_CANADA: &str = "USA / Canada";

/// Freight consultation slots, broker-local, grouped morning/evening.
pub const FREIGHT_CATALOG: SlotCatalog = SlotCatalog {
    name: "freight",
    grouping: SlotGrouping::DayPart,
    slots: &[
        CatalogSlot::at("10:00 AM"),
        CatalogSlot::at("10:30 AM"),
        CatalogSlot::at("11:30 AM"),
        CatalogSlot::at("5:00 PM"),
        CatalogSlot::at("6:30 PM"),
        CatalogSlot::at("7:00 PM"),
    ],
};

/// Car-shipping consultation slots, broker-local, grouped by caller region.
pub const CAR_CATALOG: SlotCatalog = SlotCatalog {
    name: "car",
    grouping: SlotGrouping::Region,
    slots: &[
        CatalogSlot::regional("9:00 AM", GCC_EUROPE),
        CatalogSlot::regional("11:00 AM", GCC_EUROPE),
        CatalogSlot::regional("1:00 PM", GCC_EUROPE),
        CatalogSlot::regional("6:00 PM", USA_CANADA),
        CatalogSlot::regional("7:00 PM", USA_CANADA),
        CatalogSlot::regional("8:30 PM", USA_CANADA),
        CatalogSlot::regional("9:30 PM", USA_CANADA),
    ],
};

/// An already-reserved slot for one calendar date, as returned by the
/// scheduling backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSlot {
    #[serde(rename = "selectedTime")]
    pub selected_time: String,
    #[serde(rename = "userName")]
    pub user_name: String,
}
