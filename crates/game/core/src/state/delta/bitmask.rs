use bitflags::bitflags;

bitflags! {
    /// Tracks which parts of the [`crate::World`] changed during one tick.
    ///
    /// Each bit represents one aggregate of the world. Observers (renderers,
    /// learners) can skip work for the parts that did not move.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct WorldChanges: u8 {
        const BODY    = 1 << 0;
        const HEADING = 1 << 1;
        const GOAL    = 1 << 2;
        const HAZARD  = 1 << 3;
        const DEATH   = 1 << 4;
    }
}
