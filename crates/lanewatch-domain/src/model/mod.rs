//! Domain model types

pub mod aggregate;
pub mod location;
pub mod route;
pub mod shipment;

pub use aggregate::{RouteAggregate, SideBucket, VehicleEntry};
pub use location::LocationRef;
pub use route::ReferenceRoute;
pub use shipment::{MergedShipment, RawShipmentRecord, RouteCandidate};
