pub mod account;
pub mod token;

pub use account::AccountRepository;
pub use token::RefreshTokenRepository;

#[cfg(test)]
pub use account::MockAccountRepository;
#[cfg(test)]
pub use token::MockRefreshTokenRepository;
