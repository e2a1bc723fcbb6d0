pub mod account;
pub mod address;
pub mod device;
pub mod device_model;
pub mod sensor;
pub mod unit;
pub mod user;

pub use account::Account;
pub use address::Address;
pub use device::Device;
pub use device_model::DeviceModel;
pub use sensor::Sensor;
pub use unit::Unit;
pub use user::User;
