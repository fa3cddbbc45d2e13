// Gateway module for the remote lookup client
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod client;
mod traits;

// Public re-exports - the ONLY way to access api functionality
pub use client::PokeApiClient;
pub use traits::Lookup;

#[cfg(test)]
pub(crate) use traits::MockLookup;
