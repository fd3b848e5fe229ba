use std::collections::VecDeque;


/// Ordered, indexable container that can drop elements by position.
pub trait Sequence: Clone {
    type Item;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn item(&self, index: usize) -> &Self::Item;

    fn item_mut(&mut self, index: usize) -> &mut Self::Item;

    /// Keeps only the elements whose original position satisfies `keep`.
    ///
    /// Positions are visited in ascending order, exactly once each.
    fn retain_positions<F: FnMut(usize) -> bool>(&mut self, keep: F);
}


macro_rules! position_counter {
    ($keep:ident) => {{
        let mut position = 0;
        move |_: &_| {
            let kept = $keep(position);
            position += 1;
            kept
        }
    }};
}


impl<T: Clone> Sequence for Vec<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn item(&self, index: usize) -> &T {
        &self[index]
    }

    #[inline]
    fn item_mut(&mut self, index: usize) -> &mut T {
        &mut self[index]
    }

    fn retain_positions<F: FnMut(usize) -> bool>(&mut self, mut keep: F) {
        self.retain(position_counter!(keep))
    }
}


impl<T: Clone> Sequence for VecDeque<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn item(&self, index: usize) -> &T {
        &self[index]
    }

    #[inline]
    fn item_mut(&mut self, index: usize) -> &mut T {
        &mut self[index]
    }

    fn retain_positions<F: FnMut(usize) -> bool>(&mut self, mut keep: F) {
        self.retain(position_counter!(keep))
    }
}
