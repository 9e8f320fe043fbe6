mod bitmask;

pub use bitmask::WorldChanges;
