use serde_repr::{Deserialize_repr, Serialize_repr};
use std::convert::TryFrom;

#[derive(Deserialize_repr, Serialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AdjustmentKind {
    Initial = 0,
    Match = 1,
    Shielded = 2
}

impl TryFrom<i32> for AdjustmentKind {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(AdjustmentKind::Initial),
            1 => Ok(AdjustmentKind::Match),
            2 => Ok(AdjustmentKind::Shielded),
            _ => Err(())
        }
    }
}
