pub mod lookup;
pub mod version;
