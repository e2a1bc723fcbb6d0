pub mod customer_service;
pub mod device_service;

pub use customer_service::CustomerService;
pub use device_service::DeviceService;
