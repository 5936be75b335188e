mod color;
mod edges;
mod enums;
mod role;
mod style;

pub use color::{Color, ColorOp, Rgb};
pub use edges::Edges;
pub use enums::{
    Align, Backdrop, Border, Direction, Justify, Position, Size, TextAlign, TextStyle, TextWrap,
};
pub use role::Role;
pub use style::Style;
