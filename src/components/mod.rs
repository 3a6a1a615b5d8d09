// ABOUTME: UI components for the TUI: layout, wizard steps, booking step, and help

pub mod booking;
pub mod help;
pub mod layout;
pub mod theme;
pub mod wizard;

pub use booking::BookingComponent;
pub use help::HelpComponent;
pub use layout::LayoutComponent;
pub use wizard::WizardComponent;
