use std::fmt::{Display, Formatter};


/// Renders a sequence as `[ v1 v2 ... ]`.
pub struct DisplayList<I>(pub I);


impl<I> Display for DisplayList<I>
where
    I: Iterator + Clone,
    I::Item: Display
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[ ")?;
        for item in self.0.clone() {
            write!(f, "{} ", item)?;
        }
        write!(f, "]")
    }
}
