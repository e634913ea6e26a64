pub mod vehicles;

pub use vehicles::{VehicleCatalog, VehicleModel};
