pub(crate) use self::surface::*;

pub(crate) mod surface;
pub(crate) mod widgets;
