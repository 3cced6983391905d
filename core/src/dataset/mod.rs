pub mod loader;
pub mod record;
pub mod registry;
pub mod snapshot;

pub use loader::load_csv;
pub use record::{normalize_name, RawTrackRecord, VesselTrackPoint};
pub use registry::VesselRegistry;
pub use snapshot::TrackDataset;
