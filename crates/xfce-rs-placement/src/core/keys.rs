use std::fmt;

use slotmap::{new_key_type, Key};

new_key_type! {
    /// Handle to a managed view. Lookups through a handle whose view was
    /// removed yield `None`.
    pub struct ViewId;
    pub struct OutputId;
    pub struct RegionId;
}

macro_rules! display_as_key_data {
    ($($name:ident),*) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{:?}", self.data())
                }
            }
        )*
    };
}

display_as_key_data!(ViewId, OutputId, RegionId);
