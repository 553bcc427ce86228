use crate::layout::Layout;

pub trait Parser {
    type Output;

    fn parse(content: &[u8], layout: &Layout) -> Result<Vec<Self::Output>, String>;

    fn is_supported(filename: Option<&str>, content: &[u8]) -> bool;
}
