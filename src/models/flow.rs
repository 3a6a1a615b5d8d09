// ABOUTME: Shipping-flow answer set as a tagged union so each flow only carries its own fields

use serde::{Deserialize, Serialize};

/// Which wizard flow the user is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowKind {
    Freight,
    Car,
}

impl FlowKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Freight => "International Freight",
            Self::Car => "Car Shipping",
        }
    }

    pub fn all() -> &'static [FlowKind] {
        &[Self::Freight, Self::Car]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShippingType {
    CommercialCargo,
    HouseholdMove,
}

impl ShippingType {
    pub fn label(self) -> &'static str {
        match self {
            Self::CommercialCargo => "Commercial cargo",
            Self::HouseholdMove => "Household move",
        }
    }

    pub fn all() -> &'static [ShippingType] {
        &[Self::CommercialCargo, Self::HouseholdMove]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FreightMode {
    Sea,
    Air,
    Land,
}

impl FreightMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sea => "Sea freight",
            Self::Air => "Air freight",
            Self::Land => "Land freight",
        }
    }

    pub fn all() -> &'static [FreightMode] {
        &[Self::Sea, Self::Air, Self::Land]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceTerms {
    DoorToDoor,
    DoorToPort,
    PortToPort,
}

impl ServiceTerms {
    pub fn label(self) -> &'static str {
        match self {
            Self::DoorToDoor => "Door to door",
            Self::DoorToPort => "Door to port",
            Self::PortToPort => "Port to port",
        }
    }

    pub fn all() -> &'static [ServiceTerms] {
        &[Self::DoorToDoor, Self::DoorToPort, Self::PortToPort]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandlingKind {
    FullContainer,
    SharedContainer,
}

impl HandlingKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::FullContainer => "Full container (exclusive)",
            Self::SharedContainer => "Shared container (groupage)",
        }
    }

    pub fn all() -> &'static [HandlingKind] {
        &[Self::FullContainer, Self::SharedContainer]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackagingPreference {
    ProfessionalPacking,
    SelfPacked,
    NoPackaging,
}

impl PackagingPreference {
    pub fn label(self) -> &'static str {
        match self {
            Self::ProfessionalPacking => "Professional packing",
            Self::SelfPacked => "Packed by me",
            Self::NoPackaging => "No packaging needed",
        }
    }

    pub fn all() -> &'static [PackagingPreference] {
        &[Self::ProfessionalPacking, Self::SelfPacked, Self::NoPackaging]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerKind {
    TwentyFoot,
    FortyFoot,
    FortyHighCube,
    LooseCargo,
}

impl ContainerKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::TwentyFoot => "20 ft container",
            Self::FortyFoot => "40 ft container",
            Self::FortyHighCube => "40 ft high cube",
            Self::LooseCargo => "Loose cargo / pallets",
        }
    }

    pub fn all() -> &'static [ContainerKind] {
        &[
            Self::TwentyFoot,
            Self::FortyFoot,
            Self::FortyHighCube,
            Self::LooseCargo,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadinessWindow {
    Immediately,
    WithinTwoWeeks,
    WithinMonth,
    Flexible,
}

impl ReadinessWindow {
    pub fn label(self) -> &'static str {
        match self {
            Self::Immediately => "Ready now",
            Self::WithinTwoWeeks => "Within two weeks",
            Self::WithinMonth => "Within a month",
            Self::Flexible => "Flexible",
        }
    }

    pub fn all() -> &'static [ReadinessWindow] {
        &[
            Self::Immediately,
            Self::WithinTwoWeeks,
            Self::WithinMonth,
            Self::Flexible,
        ]
    }
}

/// Answers collected by the freight wizard. Fields stay `None` until the
/// owning step commits them; no step writes outside its own fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreightAnswers {
    pub shipping_type: Option<ShippingType>,
    pub freight_mode: Option<FreightMode>,
    pub service_terms: Option<ServiceTerms>,
    pub handling: Option<HandlingKind>,
    pub packaging: Option<PackagingPreference>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub container: Option<ContainerKind>,
    pub readiness: Option<ReadinessWindow>,
}

impl FreightAnswers {
    pub fn service_complete(&self) -> bool {
        self.shipping_type.is_some() && self.freight_mode.is_some() && self.service_terms.is_some()
    }

    pub fn locations_complete(&self) -> bool {
        self.origin.as_deref().is_some_and(|s| !s.trim().is_empty())
            && self.destination.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

/// Answers collected by the car-shipping wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarAnswers {
    pub vehicle: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
}

impl CarAnswers {
    pub fn vehicle_complete(&self) -> bool {
        self.vehicle.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    pub fn locations_complete(&self) -> bool {
        self.origin.as_deref().is_some_and(|s| !s.trim().is_empty())
            && self.destination.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

/// The full answer set, tagged by flow so invalid field combinations are
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FlowAnswers {
    Freight(FreightAnswers),
    Car(CarAnswers),
}

impl FlowAnswers {
    pub fn new(kind: FlowKind) -> Self {
        match kind {
            FlowKind::Freight => Self::Freight(FreightAnswers::default()),
            FlowKind::Car => Self::Car(CarAnswers::default()),
        }
    }

    pub fn kind(&self) -> FlowKind {
        match self {
            Self::Freight(_) => FlowKind::Freight,
            Self::Car(_) => FlowKind::Car,
        }
    }
}
