//! SL site identifier formats.
//!
//! SL moved its journey planner from HAFAS to EFA without keeping stop IDs
//! compatible. Three encodings are in circulation:
//!
//! - legacy site IDs: the bare site number, at most 7 digits (`"9192"`)
//! - HAFAS IDs: 9 digits laid out as `XFGYEDCBA`, where `X` is always `3`
//!   (a site), `Y` is the transport authority number mod 10 (`1` for SL) and
//!   `GFEDCBA` is the 7-digit site number
//! - EFA global IDs: a 9-digit regional prefix followed by the 7-digit site
//!   number (`"9091001000009192"`)
//!
//! Only the forward direction (legacy → HAFAS → EFA) is provided.

use std::fmt;

/// The EFA prefix for SL sites ("Place (site)" entities in the Stockholm
/// region). Other entity types or authorities may use other prefixes.
pub const SL_EFA_PREFIX: &str = "909100100";

/// SL's transport authority number mod 10, the fourth HAFAS digit.
const SL_AUTHORITY_DIGIT: u8 = b'1';

/// Legacy site IDs longer than this are assumed to already be in a
/// compatible format.
const MAX_LEGACY_LEN: usize = 7;

/// Positions of `GFEDCBA` in a HAFAS ID.
const SITE_NUMBER_POSITIONS: [usize; 7] = [2, 1, 4, 5, 6, 7, 8];

/// Error returned when an identifier does not have the expected format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid site id {input:?}: {reason}")]
pub struct InvalidSiteId {
    input: String,
    reason: &'static str,
}

impl InvalidSiteId {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Why the input was rejected.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// A 9-digit HAFAS site ID.
///
/// # Examples
///
/// ```
/// use trafiklab::domain::HafasId;
///
/// let id = HafasId::parse("300104400").unwrap();
/// assert_eq!(id.site_number(), "0004400");
///
/// // Must start with 3
/// assert!(HafasId::parse("400109192").is_err());
/// // Must be 9 digits
/// assert!(HafasId::parse("123").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HafasId([u8; 9]);

impl HafasId {
    /// Parse a HAFAS ID: exactly 9 ASCII digits, the first being `3`.
    pub fn parse(s: &str) -> Result<Self, InvalidSiteId> {
        let bytes: [u8; 9] = s
            .as_bytes()
            .try_into()
            .map_err(|_| InvalidSiteId::new(s, "HAFAS id must be exactly 9 digits"))?;

        if bytes[0] != b'3' {
            return Err(InvalidSiteId::new(s, "HAFAS id must start with '3'"));
        }
        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(InvalidSiteId::new(s, "HAFAS id must only contain digits"));
        }

        Ok(HafasId(bytes))
    }

    /// Build a HAFAS ID from a legacy site ID of at most 7 digits.
    ///
    /// The site number is split into a high part (`/ 100000`) and a low
    /// part (`% 100000`) and laid out as `3` + high(2) + `1` + low(5).
    pub fn from_site_id(s: &str) -> Result<Self, InvalidSiteId> {
        if !all_digits(s) {
            return Err(InvalidSiteId::new(s, "site id must be numeric"));
        }
        if s.len() > MAX_LEGACY_LEN {
            return Err(InvalidSiteId::new(s, "site id must be at most 7 digits"));
        }

        let id: u32 = s
            .parse()
            .map_err(|_| InvalidSiteId::new(s, "site id must be numeric"))?;
        let high = id / 100_000;
        let low = id % 100_000;
        let text = format!("3{high:02}{}{low:05}", SL_AUTHORITY_DIGIT as char);

        Self::parse(&text)
    }

    /// Returns the 7-digit site number (`GFEDCBA`).
    pub fn site_number(&self) -> String {
        SITE_NUMBER_POSITIONS
            .iter()
            .map(|&i| self.0[i] as char)
            .collect()
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII digits are stored
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Convert to an EFA global ID under the given prefix.
    pub fn to_efa(&self, prefix: &EfaPrefix) -> EfaId {
        EfaId(format!("{}{}", prefix.as_str(), self.site_number()))
    }
}

impl fmt::Debug for HafasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HafasId({})", self.as_str())
    }
}

impl fmt::Display for HafasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 9-digit EFA regional prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EfaPrefix([u8; 9]);

impl EfaPrefix {
    /// Parse a prefix: exactly 9 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidSiteId> {
        let bytes: [u8; 9] = s
            .as_bytes()
            .try_into()
            .map_err(|_| InvalidSiteId::new(s, "EFA prefix must be exactly 9 digits"))?;

        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(InvalidSiteId::new(s, "EFA prefix must only contain digits"));
        }

        Ok(EfaPrefix(bytes))
    }

    /// The SL Stockholm prefix, `909100100`.
    pub fn sl() -> Self {
        EfaPrefix(*b"909100100")
    }

    /// Returns the prefix as a string slice.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for EfaPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EfaPrefix({})", self.as_str())
    }
}

/// A 16-digit EFA global ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EfaId(String);

impl EfaId {
    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ID and returns the inner String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EfaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convert a legacy SL site ID to HAFAS format.
///
/// Numeric IDs longer than 7 digits are returned unchanged.
///
/// ```
/// use trafiklab::domain::convert_id_to_hafas;
///
/// assert_eq!(convert_id_to_hafas("4400").unwrap(), "300104400");
/// assert_eq!(convert_id_to_hafas("12345678").unwrap(), "12345678");
/// assert!(convert_id_to_hafas("notnum").is_err());
/// ```
pub fn convert_id_to_hafas(id: &str) -> Result<String, InvalidSiteId> {
    if id.len() > MAX_LEGACY_LEN && all_digits(id) {
        return Ok(id.to_string());
    }
    HafasId::from_site_id(id).map(|h| h.as_str().to_string())
}

/// Convert a 9-digit HAFAS ID to a 16-digit EFA global ID.
///
/// ```
/// use trafiklab::domain::convert_hafas_to_efa;
///
/// assert_eq!(
///     convert_hafas_to_efa("300104400", "909100100").unwrap(),
///     "9091001000004400"
/// );
/// assert!(convert_hafas_to_efa("123", "909100100").is_err());
/// ```
pub fn convert_hafas_to_efa(hafas_id: &str, prefix: &str) -> Result<String, InvalidSiteId> {
    let hafas = HafasId::parse(hafas_id)?;
    let prefix = EfaPrefix::parse(prefix)?;
    Ok(hafas.to_efa(&prefix).into_inner())
}

/// Whether `s` looks like an SL site ID that can be converted to EFA:
/// a legacy ID of up to 7 digits or a 9-digit HAFAS ID.
pub fn is_site_id(s: &str) -> bool {
    if !all_digits(s) {
        return false;
    }
    s.len() <= MAX_LEGACY_LEN || HafasId::parse(s).is_ok()
}

/// Convert a legacy site ID or a HAFAS ID to an EFA global ID.
pub fn convert_site_id_to_efa(id: &str, prefix: &str) -> Result<String, InvalidSiteId> {
    let hafas = match HafasId::parse(id) {
        Ok(hafas) => hafas,
        Err(_) => HafasId::from_site_id(id)?,
    };
    let prefix = EfaPrefix::parse(prefix)?;
    Ok(hafas.to_efa(&prefix).into_inner())
}
