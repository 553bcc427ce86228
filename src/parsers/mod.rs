pub mod excel;
pub mod traits;

pub mod prelude {
    pub use super::excel::prelude::*;
    pub use super::traits::Parser;
}
