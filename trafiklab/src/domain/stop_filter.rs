//! Stop finder location filter.
//!
//! The stop finder takes a bitmask (`any_obj_filter_sf`) selecting which
//! kinds of location to match. `StopFilter` is a set over [`StopKind`], so
//! only bits that name a kind can ever be set.

use std::fmt;

/// A kind of location the stop finder can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum StopKind {
    Suburb = 1 << 0,
    Stop = 1 << 1,
    Street = 1 << 2,
    Address = 1 << 3,
    Unknown = 1 << 4,
    PointOfInterest = 1 << 5,
}

impl StopKind {
    /// Every kind, in bit order.
    pub const ALL: [StopKind; 6] = [
        StopKind::Suburb,
        StopKind::Stop,
        StopKind::Street,
        StopKind::Address,
        StopKind::Unknown,
        StopKind::PointOfInterest,
    ];

    /// The single bit this kind occupies.
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// The name the API uses for this kind.
    pub const fn name(self) -> &'static str {
        match self {
            StopKind::Suburb => "suburb",
            StopKind::Stop => "stop",
            StopKind::Street => "street",
            StopKind::Address => "singlehouse",
            StopKind::Unknown => "unknown2",
            StopKind::PointOfInterest => "poi",
        }
    }

    /// Look up a kind by its API name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for StopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when building a filter from names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidStopFilter {
    /// No names were given
    #[error("no stop filter provided")]
    Empty,

    /// A name is not one of the recognized filter names
    #[error("invalid stop filter: {0}")]
    UnknownName(String),
}

/// A set of [`StopKind`]s.
///
/// # Examples
///
/// ```
/// use trafiklab::domain::{StopFilter, StopKind};
///
/// let filter = StopFilter::from_names(["stop", "poi"]).unwrap();
/// assert!(filter.has(StopKind::Stop));
/// assert!(!filter.has(StopKind::Street));
/// assert_eq!(filter.bits(), 34);
///
/// assert!(StopFilter::from_names(["bogus"]).is_err());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StopFilter(u8);

impl StopFilter {
    /// The empty filter, named `none` by the API.
    pub const NONE: StopFilter = StopFilter(0);

    /// The name of the empty filter.
    pub const NONE_NAME: &'static str = "none";

    /// Build a filter from API names. `none` contributes no bits.
    ///
    /// Fails if `names` is empty or any name is unrecognized; no partial
    /// filter is returned.
    pub fn from_names<I, S>(names: I) -> Result<Self, InvalidStopFilter>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = StopFilter::NONE;
        let mut seen_any = false;

        for name in names {
            let name = name.as_ref();
            seen_any = true;

            if name == Self::NONE_NAME {
                continue;
            }
            let kind = StopKind::from_name(name)
                .ok_or_else(|| InvalidStopFilter::UnknownName(name.to_string()))?;
            filter = filter.add(kind);
        }

        if !seen_any {
            return Err(InvalidStopFilter::Empty);
        }
        Ok(filter)
    }

    /// Whether `kind` is selected.
    pub const fn has(self, kind: StopKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Returns this filter with `kind` selected.
    #[must_use]
    pub const fn add(self, kind: StopKind) -> Self {
        StopFilter(self.0 | kind.bit())
    }

    /// Returns this filter with `kind` deselected.
    #[must_use]
    pub const fn remove(self, kind: StopKind) -> Self {
        StopFilter(self.0 & !kind.bit())
    }

    /// Returns the union of two filters.
    #[must_use]
    pub const fn union(self, other: StopFilter) -> Self {
        StopFilter(self.0 | other.0)
    }

    /// Whether no kind is selected.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The raw bitmask sent to the API.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// The selected kinds, in bit order.
    pub fn kinds(self) -> impl Iterator<Item = StopKind> {
        StopKind::ALL.into_iter().filter(move |k| self.has(*k))
    }
}

impl From<StopKind> for StopFilter {
    fn from(kind: StopKind) -> Self {
        StopFilter(kind.bit())
    }
}

impl FromIterator<StopKind> for StopFilter {
    fn from_iter<T: IntoIterator<Item = StopKind>>(iter: T) -> Self {
        iter.into_iter().fold(StopFilter::NONE, StopFilter::add)
    }
}

impl fmt::Debug for StopFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.kinds()).finish()
    }
}

/// Formats as the decimal bitmask, the form the query string expects.
impl fmt::Display for StopFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
