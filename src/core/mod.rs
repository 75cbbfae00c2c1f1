pub mod biometric;
pub mod crypto;
pub mod services;
pub mod wallet;
