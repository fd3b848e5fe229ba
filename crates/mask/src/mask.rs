use crate::error::MaskError;
use crate::sequence::Sequence;
use std::convert::Infallible;
use std::str::FromStr;
use tracing::trace;


/// Fixed-length pattern of keep/skip flags, applied cyclically to sequences.
///
/// Any nonzero flag keeps (or transforms) the element at the matching position,
/// zero drops (or leaves it untouched). Element `i` of a sequence is matched
/// against flag `i % N`, so sequences of any length can be masked.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Mask<const N: usize> {
    flags: [i32; N]
}


impl<const N: usize> Mask<N> {
    const NON_EMPTY: () = assert!(N > 0, "mask must have at least one flag");

    /// Creates a mask from exactly `N` flags.
    ///
    /// Empty masks are rejected at compile time:
    ///
    /// ```compile_fail
    /// let mask = cmask::Mask::<0>::new([]);
    /// ```
    pub const fn new(flags: [i32; N]) -> Self {
        let () = Self::NON_EMPTY;
        Self {
            flags
        }
    }

    #[inline]
    pub const fn size(&self) -> usize {
        N
    }

    pub fn at(&self, index: usize) -> Result<i32, MaskError> {
        self.flags.get(index).copied().ok_or(MaskError::IndexOutOfRange {
            index,
            size: N
        })
    }

    pub fn is_set(&self, index: usize) -> Result<bool, MaskError> {
        self.at(index).map(|flag| flag != 0)
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, i32>> {
        self.flags.iter().copied()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.flags
    }

    /// Whether the element at `position` of a masked sequence is kept.
    #[inline]
    pub fn keeps(&self, position: usize) -> bool {
        self.flags[position % N] != 0
    }

    /// Positions in `0..len` kept by the mask, in ascending order.
    pub fn positions(&self, len: usize) -> impl Iterator<Item=usize> + Clone {
        let mask = *self;
        (0..len).filter(move |&i| mask.keeps(i))
    }

    /// Number of elements that survive [Mask::slice] of a sequence of length `len`.
    pub fn count_kept(&self, len: usize) -> usize {
        let set = |flags: &[i32]| flags.iter().filter(|&&flag| flag != 0).count();
        len / N * set(&self.flags) + set(&self.flags[..len % N])
    }

    /// Items at kept positions, without touching the source.
    pub fn select<I: IntoIterator>(&self, items: I) -> impl Iterator<Item=I::Item> {
        let mask = *self;
        items.into_iter()
            .enumerate()
            .filter(move |(i, _)| mask.keeps(*i))
            .map(|(_, item)| item)
    }

    /// Removes the elements at skipped positions, keeping the order of the rest.
    pub fn slice<C: Sequence>(&self, container: &mut C) {
        let len = container.len();
        container.retain_positions(|i| self.keeps(i));
        trace!(
            len,
            kept = container.len(),
            dropped = len - container.len(),
            "sliced sequence"
        );
    }

    /// Copy of `container` with `func` applied at every kept position.
    pub fn transform<C, F>(&self, container: &C, mut func: F) -> C
    where
        C: Sequence,
        F: FnMut(&C::Item) -> C::Item
    {
        match self.try_transform(container, |item| Ok::<_, Infallible>(func(item))) {
            Ok(result) => result,
            Err(never) => match never {}
        }
    }

    /// Like [Mask::transform], but stops at the first error returned by `func`.
    pub fn try_transform<C, F, E>(&self, container: &C, mut func: F) -> Result<C, E>
    where
        C: Sequence,
        F: FnMut(&C::Item) -> Result<C::Item, E>
    {
        let mut result = container.clone();
        for i in self.positions(container.len()) {
            *result.item_mut(i) = func(container.item(i))?;
        }
        Ok(result)
    }

    /// [Mask::transform] followed by [Mask::slice].
    pub fn slice_and_transform<C, F>(&self, container: &C, func: F) -> C
    where
        C: Sequence,
        F: FnMut(&C::Item) -> C::Item
    {
        let mut result = self.transform(container, func);
        self.slice(&mut result);
        result
    }

    pub fn try_slice_and_transform<C, F, E>(&self, container: &C, func: F) -> Result<C, E>
    where
        C: Sequence,
        F: FnMut(&C::Item) -> Result<C::Item, E>
    {
        let mut result = self.try_transform(container, func)?;
        self.slice(&mut result);
        Ok(result)
    }
}


impl<'a, const N: usize> IntoIterator for &'a Mask<N> {
    type Item = i32;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, i32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


impl<const N: usize> TryFrom<&[i32]> for Mask<N> {
    type Error = MaskError;

    fn try_from(values: &[i32]) -> Result<Self, Self::Error> {
        // `Mask::new` can't be used here, it doesn't compile for N = 0
        if N == 0 {
            return Err(MaskError::invalid("mask must have at least one flag"))
        }
        let flags: [i32; N] = values.try_into().map_err(|_| {
            MaskError::invalid(format!("expected {} mask flags, got {}", N, values.len()))
        })?;
        Ok(Self {
            flags
        })
    }
}


impl<const N: usize> TryFrom<Vec<i32>> for Mask<N> {
    type Error = MaskError;

    fn try_from(values: Vec<i32>) -> Result<Self, Self::Error> {
        Self::try_from(values.as_slice())
    }
}


/// Parses comma or whitespace separated flags, e.g. `1,0,0` or `1 0 0`.
impl<const N: usize> FromStr for Mask<N> {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let flags = s.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<i32>().map_err(|err| {
                    MaskError::invalid(format!("invalid mask flag '{}': {}", token, err))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from(flags)
    }
}


#[cfg(test)]
mod test {
    use crate::{Mask, MaskError};
    use proptest::prelude::*;
    use std::collections::VecDeque;


    const EVERY_THIRD: Mask<3> = Mask::new([1, 0, 0]);


    #[test]
    fn basic_access() {
        let mask = Mask::new([1, 0, 7, 0]);
        assert_eq!(mask.size(), 4);
        assert_eq!(mask.at(2), Ok(7));
        assert_eq!(mask.is_set(1), Ok(false));
        assert_eq!(mask.is_set(2), Ok(true));
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![1, 0, 7, 0]);
        assert_eq!((&mask).into_iter().count(), 4);
        assert_eq!(
            mask.at(4),
            Err(MaskError::IndexOutOfRange { index: 4, size: 4 })
        );
    }

    #[test]
    fn iteration_restarts() {
        let mut sum = 0;
        for _ in 0..2 {
            for flag in &EVERY_THIRD {
                sum += flag;
            }
        }
        assert_eq!(sum, 2);
    }

    #[test]
    fn runtime_construction() {
        assert_eq!(Mask::<3>::try_from(vec![1, 0, 0]), Ok(EVERY_THIRD));
        assert_eq!("1, 0, 0".parse::<Mask<3>>(), Ok(EVERY_THIRD));
        assert_eq!("1 0\t0".parse::<Mask<3>>(), Ok(EVERY_THIRD));

        assert!(matches!(
            Mask::<3>::try_from(&[1, 0] as &[i32]),
            Err(MaskError::InvalidArgument(_))
        ));
        assert!(matches!(
            Mask::<0>::try_from(&[] as &[i32]),
            Err(MaskError::InvalidArgument(_))
        ));
        assert!(matches!(
            "1,x,0".parse::<Mask<3>>(),
            Err(MaskError::InvalidArgument(_))
        ));
    }

    #[test]
    fn slicing_wraps_around() {
        let mut data = vec![1, 2, 3, 4, 5, 6, 7];
        EVERY_THIRD.slice(&mut data);
        assert_eq!(data, vec![1, 4, 7]);

        let mut empty: Vec<i32> = Vec::new();
        EVERY_THIRD.slice(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn transform_keeps_skipped_items() {
        let data = vec![1, 2, 3, 4, 5, 6, 7];
        let result = EVERY_THIRD.transform(&data, |x| x * 10);
        assert_eq!(result, vec![10, 2, 3, 40, 5, 6, 70]);
        assert_eq!(data, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(EVERY_THIRD.transform(&Vec::<i32>::new(), |x| x * 10), Vec::<i32>::new());
    }

    #[test]
    fn slice_and_transform_on_deque() {
        let data: VecDeque<i32> = (1..=7).collect();
        let result = EVERY_THIRD.slice_and_transform(&data, |x| x * 10);
        assert_eq!(result, VecDeque::from(vec![10, 40, 70]));
    }

    #[test]
    fn callback_error_is_returned_as_is() {
        let data = vec!["1".to_string(), "oops".to_string(), "3".to_string()];
        let mask = Mask::new([1]);

        let result = mask.try_transform(&data, |s| {
            s.parse::<u32>().map(|n| (n * 2).to_string())
        });

        assert!(result.unwrap_err().to_string().contains("invalid digit"));
    }

    #[test]
    fn callback_is_not_called_after_error() {
        let data = vec![1, 2, 3, 4];
        let mut calls = 0;

        let result = Mask::new([1, 1]).try_slice_and_transform(&data, |x| {
            calls += 1;
            if *x == 2 { Err("two") } else { Ok(*x) }
        });

        assert_eq!(result, Err("two"));
        assert_eq!(calls, 2);
    }

    #[test]
    fn selection() {
        let mask = Mask::new([0, 1]);
        let picked: String = mask.select("abcde".chars()).collect();
        assert_eq!(picked, "bd");
        assert_eq!(mask.positions(5).collect::<Vec<_>>(), vec![1, 3]);
    }

    fn check_laws<const N: usize>(mask: Mask<N>, data: Vec<i64>) {
        let f = |x: &i64| x.wrapping_mul(3).wrapping_add(1);

        let expected_len = (0..data.len()).filter(|i| mask.as_slice()[i % N] != 0).count();
        assert_eq!(mask.count_kept(data.len()), expected_len);
        assert_eq!(mask.positions(data.len()).count(), expected_len);

        let mut sliced = data.clone();
        mask.slice(&mut sliced);
        assert_eq!(sliced.len(), expected_len);
        assert_eq!(sliced, mask.select(data.iter().copied()).collect::<Vec<_>>());

        let transformed = mask.transform(&data, f);
        assert_eq!(transformed.len(), data.len());
        for (i, (x, y)) in data.iter().zip(transformed.iter()).enumerate() {
            if mask.keeps(i) {
                assert_eq!(*y, f(x));
            } else {
                assert_eq!(y, x);
            }
        }

        let mut composed = transformed.clone();
        mask.slice(&mut composed);
        assert_eq!(mask.slice_and_transform(&data, f), composed);
    }

    proptest! {
        #[test]
        fn laws_single_flag(flag in -2..3i32, data in prop::collection::vec(any::<i64>(), 0..50usize)) {
            check_laws(Mask::new([flag]), data)
        }

        #[test]
        fn laws_five_flags(flags in prop::array::uniform5(-1..2i32), data in prop::collection::vec(any::<i64>(), 0..100usize)) {
            check_laws(Mask::new(flags), data)
        }

        #[test]
        fn slice_preserves_order(flags in prop::array::uniform4(0..2i32), len in 0..200usize) {
            let mask = Mask::new(flags);
            let mut data: Vec<usize> = (0..len).collect();
            mask.slice(&mut data);
            assert!(data.windows(2).all(|w| w[0] < w[1]));
            assert_eq!(data, mask.positions(len).collect::<Vec<_>>());
        }
    }
}
