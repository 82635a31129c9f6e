// Service exports
pub mod memory;
pub mod pairing;
pub mod sheets;
pub mod store;

pub use memory::InMemoryStore;
pub use pairing::{PairingRun, PairingService, RunOptions, ServiceError};
pub use sheets::{OutputLayout, SheetRanges, SheetsClient, ValueRange};
pub use store::{PairingStore, StoreError};
