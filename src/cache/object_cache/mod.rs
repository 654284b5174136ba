pub mod moka;

pub use self::moka::MokaObjectCache;
