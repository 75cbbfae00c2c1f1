pub mod vault;
pub mod wallet;

pub use vault::VaultService;
pub use wallet::WalletService;
