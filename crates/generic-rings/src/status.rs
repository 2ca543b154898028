//! Operation status codes and three-valued predicate outcomes.
//!
//! A [`Status`] is a small lattice value:
//!
//! ```text
//!         DOMAIN | UNABLE
//!          /          \
//!      DOMAIN        UNABLE
//!          \          /
//!            SUCCESS
//! ```
//!
//! Joining two statuses (`|`) is the lattice join, so folding the statuses
//! of every sub-operation yields the status of the composite operation.
//! `SUCCESS` is the identity and never masks a failure.
//!
//! Predicates (`is_zero`, `equal`, ...) return a [`Truth`]: a proven answer,
//! or the status explaining why no answer could be given.
//!
//! # Example
//!
//! ```
//! use generic_rings::Status;
//!
//! let mut status = Status::SUCCESS;
//! status |= Status::SUCCESS;
//! assert!(status.is_success());
//!
//! status |= Status::UNABLE;
//! status |= Status::SUCCESS;
//! assert!(status.is_unable());
//! assert!(!status.is_domain());
//! ```

use core::fmt;
use core::iter::FromIterator;
use core::ops::{BitOr, BitOrAssign};

use crate::error::GrError;

// ============================================================================
// Status
// ============================================================================

/// Outcome of a ring, vector, or matrix operation.
///
/// Output buffers are only meaningful when the status is [`Status::SUCCESS`].
#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status(u8);

impl Status {
    /// The operation completed and every output is meaningful.
    pub const SUCCESS: Self = Self(0);

    /// The operation is mathematically undefined for the given inputs.
    pub const DOMAIN: Self = Self(1);

    /// The ring could not decide a predicate the operation depends on.
    pub const UNABLE: Self = Self(2);

    /// Raw bit representation (`DOMAIN = 1`, `UNABLE = 2`).
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if no failure bit is set.
    #[inline]
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the domain-failure bit is set.
    #[inline]
    #[must_use]
    pub const fn is_domain(self) -> bool {
        self.0 & Self::DOMAIN.0 != 0
    }

    /// Returns true if the undecidability bit is set.
    #[inline]
    #[must_use]
    pub const fn is_unable(self) -> bool {
        self.0 & Self::UNABLE.0 != 0
    }

    /// Lattice join of two statuses.
    #[inline]
    pub const fn join(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Converts the status into a `Result` for `?`-style propagation.
    ///
    /// A status carrying both bits reports [`GrError::Domain`]: an impossible
    /// request stays impossible whatever else could not be decided.
    ///
    /// # Errors
    ///
    /// Returns [`GrError::Domain`] or [`GrError::Unable`] for any status other
    /// than [`Status::SUCCESS`].
    pub const fn check(self) -> Result<(), GrError> {
        if self.is_domain() {
            Err(GrError::Domain)
        } else if self.is_unable() {
            Err(GrError::Unable)
        } else {
            Ok(())
        }
    }
}

impl BitOr for Status {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.join(rhs)
    }
}

impl BitOrAssign for Status {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.join(rhs);
    }
}

impl FromIterator<Status> for Status {
    fn from_iter<I: IntoIterator<Item = Status>>(iter: I) -> Self {
        iter.into_iter().fold(Status::SUCCESS, Status::join)
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_domain(), self.is_unable()) {
            (false, false) => f.write_str("Status::SUCCESS"),
            (true, false) => f.write_str("Status::DOMAIN"),
            (false, true) => f.write_str("Status::UNABLE"),
            (true, true) => f.write_str("Status::DOMAIN | Status::UNABLE"),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_domain(), self.is_unable()) {
            (false, false) => f.write_str("success"),
            (true, false) => f.write_str("domain"),
            (false, true) => f.write_str("unable"),
            (true, true) => f.write_str("domain | unable"),
        }
    }
}

// ============================================================================
// Truth
// ============================================================================

/// Result of a predicate whose answer may be undecidable.
///
/// The boolean is only available when the predicate succeeded; callers
/// branch on the variant instead of trusting a value written under failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Truth {
    /// The predicate is proven to hold.
    True,
    /// The predicate is proven not to hold.
    False,
    /// No answer; the status says why. Never [`Status::SUCCESS`].
    Undecided(Status),
}

impl Truth {
    /// A proven answer.
    #[inline]
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }

    /// The predicate could not be decided (`Unable`).
    pub const UNKNOWN: Self = Self::Undecided(Status::UNABLE);

    /// Status of the predicate evaluation.
    #[inline]
    pub const fn status(self) -> Status {
        match self {
            Self::True | Self::False => Status::SUCCESS,
            Self::Undecided(status) => status,
        }
    }

    /// The proven answer, if any.
    #[inline]
    #[must_use]
    pub const fn value(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Undecided(_) => None,
        }
    }

    /// Returns true only when the predicate is proven to hold.
    #[inline]
    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    /// Returns true only when the predicate is proven not to hold.
    #[inline]
    #[must_use]
    pub const fn is_false(self) -> bool {
        matches!(self, Self::False)
    }

    /// Conjunction over a lazily evaluated sequence of checks.
    ///
    /// Stops at the first proven `False`. Undecided checks do not stop the
    /// scan: a later check may still prove the conjunction false. When every
    /// check is `True` the result is `True`; otherwise the joined status of
    /// the undecided checks is reported.
    pub fn all<I: IntoIterator<Item = Truth>>(checks: I) -> Self {
        let mut pending = Status::SUCCESS;
        for check in checks {
            match check {
                Self::True => {}
                Self::False => return Self::False,
                Self::Undecided(status) => pending |= status,
            }
        }
        if pending.is_success() {
            Self::True
        } else {
            Self::Undecided(pending)
        }
    }
}

impl From<bool> for Truth {
    #[inline]
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}
