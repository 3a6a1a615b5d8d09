// ABOUTME: Step state machines for the freight and car-shipping wizards
// Both flows are parameterizations of one step abstraction: ordered steps,
// per-step advance gating on the answers committed so far, and titles and
// descriptions that branch on earlier choices.

use crate::models::flow::{
    CarAnswers, FlowAnswers, FlowKind, FreightAnswers, FreightMode, ServiceTerms, ShippingType,
};

/// Steps of the freight wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreightStep {
    Service,
    Handling,
    Packaging,
    Locations,
    CargoSpecs,
    Timeline,
    Booking,
}

impl FreightStep {
    pub fn all() -> &'static [FreightStep] {
        &[
            Self::Service,
            Self::Handling,
            Self::Packaging,
            Self::Locations,
            Self::CargoSpecs,
            Self::Timeline,
            Self::Booking,
        ]
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Service => Some(Self::Handling),
            Self::Handling => Some(Self::Packaging),
            Self::Packaging => Some(Self::Locations),
            Self::Locations => Some(Self::CargoSpecs),
            Self::CargoSpecs => Some(Self::Timeline),
            Self::Timeline => Some(Self::Booking),
            Self::Booking => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Service => None,
            Self::Handling => Some(Self::Service),
            Self::Packaging => Some(Self::Handling),
            Self::Locations => Some(Self::Packaging),
            Self::CargoSpecs => Some(Self::Locations),
            Self::Timeline => Some(Self::CargoSpecs),
            Self::Booking => Some(Self::Timeline),
        }
    }

    pub fn title(self, answers: &FreightAnswers) -> &'static str {
        match self {
            Self::Service => "Shipping Service",
            Self::Handling => match answers.freight_mode {
                Some(FreightMode::Air) => "Air Cargo Handling",
                _ => "Container Handling",
            },
            Self::Packaging => "Packaging",
            Self::Locations => match answers.service_terms {
                Some(ServiceTerms::PortToPort) => "Ports",
                _ => "Pickup & Delivery",
            },
            Self::CargoSpecs => match answers.freight_mode {
                Some(FreightMode::Air) => "Cargo Details",
                _ => "Container & Cargo",
            },
            Self::Timeline => "Timeline",
            Self::Booking => "Book a Consultation",
        }
    }

    pub fn description(self, answers: &FreightAnswers) -> String {
        match self {
            Self::Service => {
                "What are you shipping, how should it travel, and to what terms?".to_string()
            }
            Self::Handling => match answers.shipping_type {
                Some(ShippingType::HouseholdMove) => {
                    "Will your household goods fill a container of their own?".to_string()
                }
                _ => "Does your cargo need an exclusive container or can it share?".to_string(),
            },
            Self::Packaging => "Who packs the shipment before pickup?".to_string(),
            Self::Locations => match answers.service_terms {
                Some(ServiceTerms::PortToPort) => {
                    "Which port does the cargo leave from, and which does it arrive at?"
                        .to_string()
                }
                Some(ServiceTerms::DoorToPort) => {
                    "Where do we collect, and which port does it arrive at?".to_string()
                }
                _ => "Where do we collect the shipment, and where does it go?".to_string(),
            },
            Self::CargoSpecs => match answers.freight_mode {
                Some(FreightMode::Air) => {
                    "Tell us about the cargo so we can quote air capacity.".to_string()
                }
                _ => "Pick the container size that fits your cargo.".to_string(),
            },
            Self::Timeline => match answers.freight_mode {
                Some(FreightMode::Sea) => {
                    "When is the cargo ready? Sea transit is booked weeks ahead.".to_string()
                }
                _ => "When will the shipment be ready to move?".to_string(),
            },
            Self::Booking => {
                "Pick a consultation time with a freight specialist, shown in your local time."
                    .to_string()
            }
        }
    }

    pub fn can_advance(self, answers: &FreightAnswers) -> bool {
        match self {
            Self::Service => answers.service_complete(),
            Self::Handling => answers.handling.is_some(),
            Self::Packaging => answers.packaging.is_some(),
            Self::Locations => answers.locations_complete(),
            Self::CargoSpecs => answers.container.is_some(),
            Self::Timeline => answers.readiness.is_some(),
            // The booking step submits instead of advancing.
            Self::Booking => false,
        }
    }
}

/// Steps of the car-shipping wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarStep {
    Vehicle,
    Locations,
    Booking,
}

impl CarStep {
    pub fn all() -> &'static [CarStep] {
        &[Self::Vehicle, Self::Locations, Self::Booking]
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Vehicle => Some(Self::Locations),
            Self::Locations => Some(Self::Booking),
            Self::Booking => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Vehicle => None,
            Self::Locations => Some(Self::Vehicle),
            Self::Booking => Some(Self::Locations),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Vehicle => "Your Vehicle",
            Self::Locations => "Route",
            Self::Booking => "Book a Consultation",
        }
    }

    pub fn description(self) -> String {
        match self {
            Self::Vehicle => "Make, model, and year of the car you are shipping.".to_string(),
            Self::Locations => "Where does the car start, and where is it headed?".to_string(),
            Self::Booking => {
                "Pick a call time with a vehicle logistics specialist, shown in your local time."
                    .to_string()
            }
        }
    }

    pub fn can_advance(self, answers: &CarAnswers) -> bool {
        match self {
            Self::Vehicle => answers.vehicle_complete(),
            Self::Locations => answers.locations_complete(),
            Self::Booking => false,
        }
    }
}

/// Position in whichever wizard flow is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Freight(FreightStep),
    Car(CarStep),
}

impl WizardStep {
    pub fn first(kind: FlowKind) -> Self {
        match kind {
            FlowKind::Freight => Self::Freight(FreightStep::Service),
            FlowKind::Car => Self::Car(CarStep::Vehicle),
        }
    }

    /// 1-indexed step number for display.
    pub fn number(self) -> usize {
        match self {
            Self::Freight(step) => {
                FreightStep::all().iter().position(|s| *s == step).unwrap_or(0) + 1
            }
            Self::Car(step) => CarStep::all().iter().position(|s| *s == step).unwrap_or(0) + 1,
        }
    }

    pub fn total(self) -> usize {
        match self {
            Self::Freight(_) => FreightStep::all().len(),
            Self::Car(_) => CarStep::all().len(),
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Freight(step) => step.next().map(Self::Freight),
            Self::Car(step) => step.next().map(Self::Car),
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Freight(step) => step.previous().map(Self::Freight),
            Self::Car(step) => step.previous().map(Self::Car),
        }
    }

    pub fn is_booking(self) -> bool {
        matches!(
            self,
            Self::Freight(FreightStep::Booking) | Self::Car(CarStep::Booking)
        )
    }

    pub fn title(self, answers: &FlowAnswers) -> &'static str {
        match (self, answers) {
            (Self::Freight(step), FlowAnswers::Freight(a)) => step.title(a),
            (Self::Car(step), _) => step.title(),
            // A freight step can only be paired with freight answers; the
            // app state constructs both from the same flow kind.
            (Self::Freight(step), FlowAnswers::Car(_)) => step.title(&FreightAnswers::default()),
        }
    }

    pub fn description(self, answers: &FlowAnswers) -> String {
        match (self, answers) {
            (Self::Freight(step), FlowAnswers::Freight(a)) => step.description(a),
            (Self::Car(step), _) => step.description(),
            (Self::Freight(step), FlowAnswers::Car(_)) => {
                step.description(&FreightAnswers::default())
            }
        }
    }

    pub fn can_advance(self, answers: &FlowAnswers) -> bool {
        match (self, answers) {
            (Self::Freight(step), FlowAnswers::Freight(a)) => step.can_advance(a),
            (Self::Car(step), FlowAnswers::Car(a)) => step.can_advance(a),
            _ => false,
        }
    }
}
