// ABOUTME: Data models for the booking wizard: flow answers, slot catalogs, and wire types

pub mod booking;
pub mod flow;
pub mod slot;

pub use booking::{BookingIntent, BookingSubmission};
pub use flow::{
    CarAnswers, ContainerKind, FlowAnswers, FlowKind, FreightAnswers, FreightMode, HandlingKind,
    PackagingPreference, ReadinessWindow, ServiceTerms, ShippingType,
};
pub use slot::{BookedSlot, CatalogSlot, SlotCatalog, SlotGrouping, CAR_CATALOG, FREIGHT_CATALOG};
