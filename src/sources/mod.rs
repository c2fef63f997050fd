pub mod directory;
pub mod inventory;
pub mod navigation;
pub mod traits;
pub mod types;

pub use directory::StaticLocationDirectory;
pub use inventory::StaticOfferInventory;
pub use navigation::{Navigation, RecordingNavigator};
pub use traits::{LocationDirectory, NavigationSink, OfferInventory};
pub use types::{GuestCounts, SearchCriteria};
