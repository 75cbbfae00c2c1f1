pub mod vault;
pub mod wallet;
