/// マグマ. 二項演算で閉じている代数構造
pub trait Magma {
    /// マグマの元の型
    type T: Eq;
    /// 二項演算
    fn op(&self, lhs: &Self::T, rhs: &Self::T) -> Self::T;
}

/// マグマが結合律が成り立つことを表すトレイト
pub trait Associativity: Magma {}
/// マグマが交換則が成り立つことを表すトレイト
pub trait Commutativity: Magma {}

/// 半群. 単位元は要求しない
///
/// 演算は要素の並び順どおりに適用されるので, 交換則は不要である.
pub trait Semigroup: Associativity + Magma<T: Clone> {}
impl<S: Associativity + Magma<T: Clone>> Semigroup for S {}

/// 最小値を取る演算
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Min<T>(std::marker::PhantomData<fn() -> T>);

impl<T> Min<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(std::marker::PhantomData)
    }
}

impl<T: Ord + Clone> Magma for Min<T> {
    type T = T;
    fn op(&self, lhs: &T, rhs: &T) -> T {
        if rhs < lhs {
            rhs.clone()
        } else {
            lhs.clone()
        }
    }
}
impl<T: Ord + Clone> Associativity for Min<T> {}
impl<T: Ord + Clone> Commutativity for Min<T> {}

/// 最大値を取る演算
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Max<T>(std::marker::PhantomData<fn() -> T>);

impl<T> Max<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(std::marker::PhantomData)
    }
}

impl<T: Ord + Clone> Magma for Max<T> {
    type T = T;
    fn op(&self, lhs: &T, rhs: &T) -> T {
        if lhs < rhs {
            rhs.clone()
        } else {
            lhs.clone()
        }
    }
}
impl<T: Ord + Clone> Associativity for Max<T> {}
impl<T: Ord + Clone> Commutativity for Max<T> {}

/// 和を取る演算
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sum<T>(std::marker::PhantomData<fn() -> T>);

impl<T> Sum<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(std::marker::PhantomData)
    }
}

impl<T: Eq + Clone + std::ops::Add<Output = T>> Magma for Sum<T> {
    type T = T;
    fn op(&self, lhs: &T, rhs: &T) -> T {
        lhs.clone() + rhs.clone()
    }
}
impl<T: Eq + Clone + std::ops::Add<Output = T>> Associativity for Sum<T> {}
impl<T: Eq + Clone + std::ops::Add<Output = T>> Commutativity for Sum<T> {}

/// クロージャを半群として扱うラッパー
///
/// `f`が結合律を満たすことは呼び出し側が保証する.
///
/// ```
/// use sqrttree::util::{FnSemigroup, Magma};
///
/// let gcd = FnSemigroup::new(|a: &u64, b: &u64| {
///     let (mut a, mut b) = (*a, *b);
///     while b != 0 {
///         (a, b) = (b, a % b);
///     }
///     a
/// });
/// assert_eq!(gcd.op(&12, &18), 6);
/// ```
#[derive(Clone, Copy)]
pub struct FnSemigroup<T, F>(F, std::marker::PhantomData<fn(&T, &T) -> T>);

impl<T, F: Fn(&T, &T) -> T> FnSemigroup<T, F> {
    #[must_use]
    pub const fn new(f: F) -> Self {
        Self(f, std::marker::PhantomData)
    }
}

impl<T: Eq, F: Fn(&T, &T) -> T> Magma for FnSemigroup<T, F> {
    type T = T;
    fn op(&self, lhs: &T, rhs: &T) -> T {
        (self.0)(lhs, rhs)
    }
}
impl<T: Eq, F: Fn(&T, &T) -> T> Associativity for FnSemigroup<T, F> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ops() {
        assert_eq!(Min::new().op(&3, &-2), -2);
        assert_eq!(Max::new().op(&3, &-2), 3);
        assert_eq!(Sum::new().op(&3, &-2), 1);
    }

    #[test]
    fn closure_keeps_order() {
        let concat = FnSemigroup::new(|a: &String, b: &String| format!("{a}{b}"));
        assert_eq!(concat.op(&"ab".to_string(), &"cd".to_string()), "abcd");
    }
}
