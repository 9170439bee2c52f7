pub mod markup;

use std::collections::BTreeMap;

use itertools::{EitherOrBoth, Itertools};

pub trait Coefficient:
    core::fmt::Debug
    + PartialEq
    + Clone
    + std::ops::AddAssign
    + std::ops::SubAssign
    + num_traits::Zero
    + num_traits::One
{
}

pub trait Exponent:
    core::fmt::Debug
    + Eq
    + Ord
    + Clone
    + std::ops::AddAssign
    + for<'a> std::ops::AddAssign<&'a Self>
    + num_traits::Zero
    + num_traits::One
{
}

impl Coefficient for f64 {}
impl Exponent for u32 {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term<C, P> {
    coefficient: C,
    exponent: P,
}

impl<C, P> Term<C, P> {
    pub fn get_coefficient(&self) -> &C {
        &self.coefficient
    }

    pub fn get_exponent(&self) -> &P {
        &self.exponent
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial<C, P> {
    // Terms are sorted in decreasing order of exponent, each exponent
    // appears at most once, and no coefficient is zero. The empty list is
    // the zero polynomial.
    terms: Vec<Term<C, P>>,
}

impl<C, P> Polynomial<C, P>
where
    C: Coefficient,
    P: Exponent,
{
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    pub fn new_term(coefficient: C, exponent: P) -> Self {
        let mut polynomial = Self::new();
        polynomial.insert(coefficient, exponent);
        polynomial
    }

    pub fn new_constant(value: C) -> Self {
        Self::new_term(value, P::zero())
    }

    pub fn get_terms(&self) -> &[Term<C, P>] {
        &self.terms[..]
    }

    /// Inserts a term, keeping the sequence normalized: a zero coefficient
    /// is ignored, and a term whose exponent is already present has its
    /// coefficient merged into the existing one, dropping the term if the
    /// sum cancels out.
    pub fn insert(&mut self, coefficient: C, exponent: P) {
        if coefficient.is_zero() {
            return;
        }

        match self
            .terms
            .binary_search_by(|t| t.exponent.cmp(&exponent).reverse())
        {
            Ok(pos) => {
                let term = &mut self.terms[pos];
                term.coefficient += coefficient;
                if term.coefficient.is_zero() {
                    self.terms.remove(pos);
                }
            }
            Err(pos) => self.terms.insert(
                pos,
                Term {
                    coefficient,
                    exponent,
                },
            ),
        }
    }

    fn sum_terms(
        a: impl Iterator<Item = Term<C, P>>,
        b: impl Iterator<Item = Term<C, P>>,
    ) -> Vec<Term<C, P>> {
        a.merge_join_by(b, |x, y| y.exponent.cmp(&x.exponent))
            .filter_map(|pair| match pair {
                EitherOrBoth::Both(mut x, y) => {
                    x.coefficient += y.coefficient;
                    if x.coefficient.is_zero() {
                        None
                    } else {
                        Some(x)
                    }
                }
                EitherOrBoth::Left(t) | EitherOrBoth::Right(t) => Some(t),
            })
            .collect()
    }
}

impl<C, P> Default for Polynomial<C, P> {
    fn default() -> Self {
        Self { terms: Vec::new() }
    }
}

impl<C, P> FromIterator<(C, P)> for Polynomial<C, P>
where
    C: Coefficient,
    P: Exponent,
{
    fn from_iter<T: IntoIterator<Item = (C, P)>>(pairs: T) -> Self {
        let mut polynomial = Self::new();
        for (coefficient, exponent) in pairs {
            polynomial.insert(coefficient, exponent);
        }
        polynomial
    }
}

impl<C, P> num_traits::Zero for Polynomial<C, P>
where
    C: Coefficient,
    P: Exponent,
{
    fn zero() -> Self {
        Polynomial { terms: Vec::new() }
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<C, P> std::ops::Add for &Polynomial<C, P>
where
    C: Coefficient,
    P: Exponent,
{
    type Output = Polynomial<C, P>;

    fn add(self, rhs: &Polynomial<C, P>) -> Self::Output {
        Polynomial {
            terms: Polynomial::sum_terms(self.terms.iter().cloned(), rhs.terms.iter().cloned()),
        }
    }
}

impl<C, P> std::ops::Add for Polynomial<C, P>
where
    C: Coefficient,
    P: Exponent,
{
    type Output = Polynomial<C, P>;

    fn add(self, rhs: Polynomial<C, P>) -> Self::Output {
        Self {
            terms: Self::sum_terms(self.terms.into_iter(), rhs.terms.into_iter()),
        }
    }
}

impl<C, P> std::ops::Add<C> for Polynomial<C, P>
where
    C: Coefficient,
    P: Exponent,
{
    type Output = Polynomial<C, P>;

    fn add(mut self, rhs: C) -> Self::Output {
        self.insert(rhs, P::zero());
        self
    }
}

impl<C, P> std::ops::Neg for Polynomial<C, P>
where
    C: Coefficient,
    P: Exponent,
{
    type Output = Self;

    fn neg(mut self) -> Self {
        for term in self.terms.iter_mut() {
            let tmp = std::mem::replace(&mut term.coefficient, C::zero());
            term.coefficient -= tmp;
        }
        self
    }
}

impl<C, P> std::ops::Sub for Polynomial<C, P>
where
    C: Coefficient,
    P: Exponent,
{
    type Output = Polynomial<C, P>;

    fn sub(self, rhs: Polynomial<C, P>) -> Self::Output {
        self + (-rhs)
    }
}

impl<C, P> std::ops::Sub<C> for Polynomial<C, P>
where
    C: Coefficient,
    P: Exponent,
{
    type Output = Polynomial<C, P>;

    fn sub(mut self, rhs: C) -> Self::Output {
        let mut neg = C::zero();
        neg -= rhs;
        self.insert(neg, P::zero());
        self
    }
}

impl<C, P> std::ops::Mul for &Polynomial<C, P>
where
    C: Coefficient,
    P: Exponent,
{
    type Output = Polynomial<C, P>;

    fn mul(self, rhs: &Polynomial<C, P>) -> Self::Output {
        let mut new_terms = BTreeMap::new();

        let (outer, inner) = if self.terms.len() > rhs.terms.len() {
            (&rhs.terms, &self.terms)
        } else {
            (&self.terms, &rhs.terms)
        };

        for a in outer {
            for b in inner {
                let coefficient = a.coefficient.clone() * b.coefficient.clone();
                let mut exponent = a.exponent.clone();
                exponent += &b.exponent;

                let entry = new_terms.entry(exponent);
                match entry {
                    std::collections::btree_map::Entry::Vacant(e) => {
                        if !coefficient.is_zero() {
                            e.insert(coefficient);
                        }
                    }
                    std::collections::btree_map::Entry::Occupied(mut e) => {
                        *e.get_mut() += coefficient;
                        if e.get().is_zero() {
                            e.remove();
                        }
                    }
                }
            }
        }

        // The map iterates in increasing exponent order, the term list is
        // decreasing.
        let terms: Vec<_> = new_terms
            .into_iter()
            .rev()
            .map(|(exponent, coefficient)| Term {
                coefficient,
                exponent,
            })
            .collect();
        Self::Output { terms }
    }
}

impl<C, P> std::ops::Mul for Polynomial<C, P>
where
    C: Coefficient,
    P: Exponent,
{
    type Output = Polynomial<C, P>;

    fn mul(self, rhs: Polynomial<C, P>) -> Self::Output {
        &self * &rhs
    }
}

impl<C, P> std::ops::Mul<C> for &Polynomial<C, P>
where
    C: Coefficient,
    P: Exponent,
{
    type Output = Polynomial<C, P>;

    fn mul(self, rhs: C) -> Self::Output {
        self * &Polynomial::new_constant(rhs)
    }
}

impl<C, P> std::fmt::Display for Polynomial<C, P>
where
    C: Coefficient + num_traits::Signed + std::fmt::Display,
    P: Exponent + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.rendered::<markup::SupTag>(), f)
    }
}

#[cfg(test)]
pub mod tests {
    use num_rational::Rational32;
    use num_traits::Zero;
    use rand::prelude::SliceRandom;

    use super::*;

    impl Coefficient for i32 {}
    impl Coefficient for Rational32 {}

    pub type SmallPoly = Polynomial<i32, u32>;
    pub type RealPoly = Polynomial<f64, u32>;
    type RatPoly = Polynomial<Rational32, u32>;

    #[test]
    fn insertion_keeps_exponents_decreasing() {
        let mut p = SmallPoly::new();
        p.insert(5, 0);
        p.insert(3, 2);
        p.insert(-2, 1);

        println!("p = {}", p);

        let exponents: Vec<u32> = p.get_terms().iter().map(|t| *t.get_exponent()).collect();
        assert_eq!(exponents, [2, 1, 0]);

        let coefficients: Vec<i32> = p.get_terms().iter().map(|t| *t.get_coefficient()).collect();
        assert_eq!(coefficients, [3, -2, 5]);
    }

    #[test]
    fn insertion_merges_equal_exponents() {
        let mut p = SmallPoly::new();
        p.insert(2, 3);
        p.insert(3, 3);

        assert_eq!(p.get_terms().len(), 1);
        assert_eq!(*p.get_terms()[0].get_coefficient(), 5);

        // Cancelling the only term must leave the zero polynomial.
        p.insert(-5, 3);
        assert!(p.is_zero());
        assert_eq!(p.to_string(), "0");
    }

    #[test]
    fn zero_coefficient_is_ignored() {
        let mut p = SmallPoly::new();
        p.insert(0, 4);

        assert!(p.get_terms().is_empty());
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let mut pairs = vec![(3, 7u32), (1, 5), (-4, 4), (9, 2), (-1, 1), (8, 0)];

        let reference: SmallPoly = pairs.iter().copied().collect();

        for _ in 0..10 {
            pairs.shuffle(&mut rand::thread_rng());
            let shuffled: SmallPoly = pairs.iter().copied().collect();
            assert_eq!(shuffled, reference);
        }
    }

    #[test]
    fn addition_cancels_opposite_terms() {
        let a: SmallPoly = [(1, 2u32), (2, 0)].into_iter().collect();
        let b: SmallPoly = [(1, 2), (-2, 0)].into_iter().collect();

        let c = &a + &b;
        println!("({}) + ({}) = {}", a, b, c);

        assert_eq!(c.get_terms().len(), 1);
        assert_eq!(c.to_string(), "2x<sup>2</sup>");
    }

    #[test]
    fn addition_identity_and_commutativity() {
        let a: SmallPoly = [(4, 3), (-2, 1), (7, 0)].into_iter().collect();

        assert_eq!(&a + &SmallPoly::zero(), a);
        assert_eq!(&SmallPoly::zero() + &a, a);

        let b: SmallPoly = [(1, 4), (2, 1), (-7, 0)].into_iter().collect();
        assert_eq!(&a + &b, &b + &a);
    }

    #[test]
    fn adding_a_polynomial_that_is_effectively_zero() {
        let a = SmallPoly::new_term(2, 1);

        let mut b = SmallPoly::new();
        b.insert(0, 0);

        let c = &a + &b;
        assert_eq!(c.to_string(), "2x");
    }

    #[test]
    fn subtraction_restores_the_other_operand() {
        let a: SmallPoly = [(4, 3), (-2, 1), (7, 0)].into_iter().collect();
        let b: SmallPoly = [(1, 4), (2, 1), (-7, 0)].into_iter().collect();

        let c = &a + &b;
        assert_eq!(c - b.clone(), a);
    }

    #[test]
    fn multiplication_convolves_terms() {
        // (x + 1)(x - 1) = x^2 - 1
        let a = SmallPoly::new_term(1, 1) + 1;
        let b = SmallPoly::new_term(1, 1) - 1;

        let c = &a * &b;
        println!("({}) * ({}) = {}", a, b, c);

        let expected: SmallPoly = [(1, 2), (-1, 0)].into_iter().collect();
        assert_eq!(c, expected);

        let x = SmallPoly::new_term(1, 1);
        assert_eq!((&x * &x).to_string(), "x<sup>2</sup>");
    }

    #[test]
    fn multiply_by_zero() {
        let p: SmallPoly = [(3, 2), (-2, 1), (5, 0)].into_iter().collect();
        let zero = SmallPoly::new_constant(0);

        let a = &p * &zero;
        let b = &zero * &p;

        assert_eq!(a, b);
        assert_eq!(a, zero);
        assert!(a.is_zero());
    }

    #[test]
    fn multiplication_commutes() {
        let a: SmallPoly = [(2, 3), (-1, 1), (4, 0)].into_iter().collect();
        let b: SmallPoly = [(1, 2), (3, 0)].into_iter().collect();

        assert_eq!(&a * &b, &b * &a);
    }

    #[test]
    fn multiply_by_constant() {
        let p: SmallPoly = [(3, 2), (-2, 1), (5, 0)].into_iter().collect();
        let a = &p * -42;

        for (a, p) in a.get_terms().iter().zip(p.get_terms()) {
            assert_eq!(a.get_exponent(), p.get_exponent());
            assert_eq!(*a.get_coefficient(), -42 * p.get_coefficient());
        }
    }

    #[test]
    fn results_stay_normalized() {
        let a: SmallPoly = [(1, 3), (2, 2), (3, 0)].into_iter().collect();
        let b: SmallPoly = [(-1, 3), (5, 1), (-3, 0)].into_iter().collect();

        for p in [&a + &b, &a * &b] {
            println!("checking {}", p);

            let mut previous: Option<u32> = None;
            for term in p.get_terms() {
                assert!(!term.get_coefficient().is_zero());
                if let Some(previous) = previous {
                    assert!(*term.get_exponent() < previous);
                }
                previous = Some(*term.get_exponent());
            }
        }
    }

    #[test]
    fn rational_coefficients_stay_exact() {
        let r = Rational32::new;

        let mut p = RatPoly::new();
        p.insert(r(1, 3), 1);
        p.insert(r(2, 3), 1);

        // 1/3 + 2/3 merges to a unit coefficient:
        assert_eq!(p.to_string(), "x");

        let q = RatPoly::new_term(r(1, 2), 1);
        assert_eq!((&q * &q).to_string(), "1/4x<sup>2</sup>");
    }
}
