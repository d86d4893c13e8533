use std::fmt::{self, Display};
use std::slice;
use std::vec;

/// An error type which can hold many errors of the same kind.
///
/// Deferred passes push into this instead of failing fast, so one run can
/// report every structural problem at once.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Errors<T> {
    errors: Vec<T>,
}

impl<T> Default for Errors<T> {
    fn default() -> Self {
        Errors::new()
    }
}

impl<T> Errors<T> {
    pub fn new() -> Errors<T> {
        Errors { errors: Vec::new() }
    }

    pub fn has_errors(&self) -> bool {
        !self.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, error: T) {
        self.errors.push(error);
    }

    pub fn take(&mut self) -> Self {
        Errors {
            errors: std::mem::take(&mut self.errors),
        }
    }

    pub fn append(&mut self, other: &mut Self) {
        self.errors.append(&mut other.errors);
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.errors.iter()
    }
}

impl<T> fmt::Display for Errors<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl<T> Extend<T> for Errors<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl<T> From<T> for Errors<T> {
    fn from(error: T) -> Errors<T> {
        Errors {
            errors: vec![error],
        }
    }
}

impl<T> From<Vec<T>> for Errors<T> {
    fn from(errors: Vec<T>) -> Errors<T> {
        Errors { errors }
    }
}

impl<T> From<Errors<T>> for Vec<T> {
    fn from(errors: Errors<T>) -> Vec<T> {
        errors.errors
    }
}

impl<T> FromIterator<T> for Errors<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Errors<T> {
        Errors {
            errors: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Errors<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> vec::IntoIter<T> {
        self.errors.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Errors<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.errors.iter()
    }
}
