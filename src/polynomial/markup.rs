//! Renders polynomials for display.
//!
//! The term layout (signs, coefficient magnitude, variable symbol) is the
//! same for every target; only the superscript syntax differs, so that part
//! is a type parameter chosen by the caller.

use std::{
    fmt::{self, Write},
    marker::PhantomData,
};

use num_traits::Signed;

use super::{Coefficient, Exponent, Polynomial, Term};

pub trait Markup {
    fn write_exponent<P: fmt::Display>(f: &mut fmt::Formatter<'_>, exponent: &P) -> fmt::Result;
}

/// HTML `<sup>` tags. This is the canonical format, used by the `Display`
/// implementation of `Polynomial`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupTag;

impl Markup for SupTag {
    fn write_exponent<P: fmt::Display>(f: &mut fmt::Formatter<'_>, exponent: &P) -> fmt::Result {
        write!(f, "<sup>{}</sup>", exponent)
    }
}

/// Caret notation for plain text output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caret;

impl Markup for Caret {
    fn write_exponent<P: fmt::Display>(f: &mut fmt::Formatter<'_>, exponent: &P) -> fmt::Result {
        write!(f, "^{}", exponent)
    }
}

/// Borrowed view of a polynomial bound to a markup style.
pub struct Rendered<'a, M, C, P> {
    polynomial: &'a Polynomial<C, P>,
    _markup: PhantomData<M>,
}

impl<C, P> Polynomial<C, P> {
    pub fn rendered<M: Markup>(&self) -> Rendered<'_, M, C, P> {
        Rendered {
            polynomial: self,
            _markup: PhantomData,
        }
    }
}

fn write_term<M, C, P>(f: &mut fmt::Formatter<'_>, term: &Term<C, P>, is_first: bool) -> fmt::Result
where
    M: Markup,
    C: Coefficient + Signed + fmt::Display,
    P: Exponent + fmt::Display,
{
    let coefficient = term.get_coefficient();
    let exponent = term.get_exponent();

    if coefficient.is_negative() {
        f.write_str(if is_first { "-" } else { " - " })?;
    } else if !is_first {
        f.write_str(" + ")?;
    }

    // A magnitude of 1 is implied by the variable, except in the constant
    // term where the coefficient is all there is.
    let magnitude = coefficient.abs();
    if exponent.is_zero() || !magnitude.is_one() {
        fmt::Display::fmt(&magnitude, f)?;
    }

    if *exponent > P::zero() {
        f.write_char('x')?;
        if *exponent > P::one() {
            M::write_exponent(f, exponent)?;
        }
    }

    Ok(())
}

impl<M, C, P> fmt::Display for Rendered<'_, M, C, P>
where
    M: Markup,
    C: Coefficient + Signed + fmt::Display,
    P: Exponent + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.polynomial.get_terms().iter();
        match iter.next() {
            None => {
                return f.write_char('0');
            }
            Some(t) => {
                write_term::<M, C, P>(f, t, true)?;
            }
        }

        for t in iter {
            write_term::<M, C, P>(f, t, false)?;
        }

        Ok(())
    }
}
