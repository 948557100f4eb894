//! Coordinate system identification.

use std::fmt::{Display, Formatter};

/// Spatial reference of a geometry, given either by well-known IDs or by a WKT string.
///
/// Setting the WKT clears all numeric IDs. Equality is alias tolerant, see [`PartialEq`] impl.
#[derive(Debug, Clone, Default)]
pub struct SpatialReference {
    wkid: Option<i32>,
    latest_wkid: Option<i32>,
    vcs_wkid: Option<i32>,
    latest_vcs_wkid: Option<i32>,
    wkt: Option<String>,
}

impl SpatialReference {
    /// Geographic WGS 84.
    pub const WGS84: SpatialReference = SpatialReference {
        wkid: Some(4326),
        latest_wkid: Some(4326),
        vcs_wkid: None,
        latest_vcs_wkid: None,
        wkt: None,
    };

    /// Web Mercator (auxiliary sphere).
    pub const WEB_MERCATOR: SpatialReference = SpatialReference {
        wkid: Some(102100),
        latest_wkid: Some(3857),
        vcs_wkid: None,
        latest_vcs_wkid: None,
        wkt: None,
    };

    /// Creates a spatial reference with the given horizontal WKID.
    pub const fn from_wkid(wkid: i32) -> Self {
        Self {
            wkid: Some(wkid),
            latest_wkid: None,
            vcs_wkid: None,
            latest_vcs_wkid: None,
            wkt: None,
        }
    }

    /// Creates a spatial reference given by a WKT string.
    pub fn from_wkt(wkt: impl Into<String>) -> Self {
        let mut sr = Self::default();
        sr.set_wkt(wkt);
        sr
    }

    /// Horizontal WKID.
    pub fn wkid(&self) -> Option<i32> {
        self.wkid
    }

    /// Sets the horizontal WKID.
    pub fn with_wkid(mut self, wkid: impl Into<Option<i32>>) -> Self {
        self.wkid = wkid.into();
        self
    }

    /// Latest (current) alias of the horizontal WKID.
    pub fn latest_wkid(&self) -> Option<i32> {
        self.latest_wkid
    }

    /// Sets the latest horizontal WKID.
    pub fn with_latest_wkid(mut self, latest_wkid: impl Into<Option<i32>>) -> Self {
        self.latest_wkid = latest_wkid.into();
        self
    }

    /// Vertical coordinate system WKID.
    pub fn vcs_wkid(&self) -> Option<i32> {
        self.vcs_wkid
    }

    /// Sets the vertical WKID.
    pub fn with_vcs_wkid(mut self, vcs_wkid: impl Into<Option<i32>>) -> Self {
        self.vcs_wkid = vcs_wkid.into();
        self
    }

    /// Latest alias of the vertical WKID.
    pub fn latest_vcs_wkid(&self) -> Option<i32> {
        self.latest_vcs_wkid
    }

    /// Sets the latest vertical WKID.
    pub fn with_latest_vcs_wkid(mut self, latest_vcs_wkid: impl Into<Option<i32>>) -> Self {
        self.latest_vcs_wkid = latest_vcs_wkid.into();
        self
    }

    /// WKT definition, if the reference is given by one.
    pub fn wkt(&self) -> Option<&str> {
        self.wkt.as_deref()
    }

    /// Sets the WKT definition and clears all numeric IDs.
    pub fn set_wkt(&mut self, wkt: impl Into<String>) {
        self.wkt = Some(wkt.into());
        self.wkid = None;
        self.latest_wkid = None;
        self.vcs_wkid = None;
        self.latest_vcs_wkid = None;
    }

    /// Returns true if the reference carries a non-blank WKT.
    pub fn is_wkt(&self) -> bool {
        self.wkt.as_deref().is_some_and(|wkt| !wkt.trim().is_empty())
    }

    /// The ID to use where only one number can be written: `wkid`, or `latestWkid` if the former is absent.
    pub fn preferred_wkid(&self) -> Option<i32> {
        self.wkid.or(self.latest_wkid)
    }
}

impl From<i32> for SpatialReference {
    fn from(wkid: i32) -> Self {
        Self::from_wkid(wkid)
    }
}

impl From<&str> for SpatialReference {
    fn from(wkt: &str) -> Self {
        Self::from_wkt(wkt.trim())
    }
}

fn ids_match(a: [Option<i32>; 2], b: [Option<i32>; 2]) -> bool {
    if a.iter().chain(b.iter()).all(Option::is_none) {
        return true;
    }

    a.iter()
        .flatten()
        .any(|id| b.iter().flatten().any(|other| other == id))
}

/// WKT references compare their WKT strings case-insensitively. Otherwise the
/// horizontal IDs match if any ID present on one side (`wkid` or `latestWkid`)
/// equals any ID present on the other, or if neither side has one; the vertical
/// IDs follow the same rule.
///
/// The relation is not transitive, so `Eq` and `Hash` are not implemented.
impl PartialEq for SpatialReference {
    fn eq(&self, other: &Self) -> bool {
        if self.is_wkt() || other.is_wkt() {
            return match (&self.wkt, &other.wkt) {
                (Some(a), Some(b)) => a.trim().eq_ignore_ascii_case(b.trim()),
                _ => false,
            };
        }

        ids_match(
            [self.wkid, self.latest_wkid],
            [other.wkid, other.latest_wkid],
        ) && ids_match(
            [self.vcs_wkid, self.latest_vcs_wkid],
            [other.vcs_wkid, other.latest_vcs_wkid],
        )
    }
}

impl Display for SpatialReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(wkt) = self.wkt() {
            return write!(f, "wkt:{wkt}");
        }

        match self.preferred_wkid() {
            Some(wkid) => write!(f, "wkid:{wkid}")?,
            None => write!(f, "wkid:none")?,
        }
        if let Some(vcs) = self.vcs_wkid.or(self.latest_vcs_wkid) {
            write!(f, ";vcs:{vcs}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wkt_clears_ids() {
        let mut sr = SpatialReference::from_wkid(4326)
            .with_latest_wkid(4326)
            .with_vcs_wkid(5773);
        sr.set_wkt("GEOGCS[\"WGS 84\"]");

        assert_eq!(sr.wkid(), None);
        assert_eq!(sr.latest_wkid(), None);
        assert_eq!(sr.vcs_wkid(), None);
        assert_eq!(sr.wkt(), Some("GEOGCS[\"WGS 84\"]"));
    }

    #[test]
    fn latest_wkid_is_an_alias() {
        let by_latest = SpatialReference::default().with_latest_wkid(4326);
        assert_eq!(SpatialReference::from_wkid(4326), by_latest);
        assert_eq!(by_latest, SpatialReference::WGS84);

        let mercator = SpatialReference::from_wkid(3857);
        assert_eq!(mercator, SpatialReference::WEB_MERCATOR);
        assert_ne!(mercator, SpatialReference::WGS84);
    }

    #[test]
    fn differing_ids_are_not_equal() {
        assert_ne!(
            SpatialReference::from_wkid(1),
            SpatialReference::from_wkid(2)
        );
        assert_ne!(
            SpatialReference::from_wkid(4326),
            SpatialReference::default()
        );
        assert_eq!(SpatialReference::default(), SpatialReference::default());
    }

    #[test]
    fn vertical_ids_take_part() {
        let a = SpatialReference::from_wkid(4326).with_vcs_wkid(5773);
        let b = SpatialReference::from_wkid(4326).with_latest_vcs_wkid(5773);
        let c = SpatialReference::from_wkid(4326).with_vcs_wkid(115700);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, SpatialReference::from_wkid(4326));
    }

    #[test]
    fn wkt_compares_case_insensitively() {
        assert_eq!(
            SpatialReference::from_wkt("PROJCS[\"A\"]"),
            SpatialReference::from_wkt("projcs[\"a\"]")
        );
        assert_ne!(
            SpatialReference::from_wkt("WKT"),
            SpatialReference::from_wkid(4326)
        );
    }

    #[test]
    fn display() {
        assert_eq!(SpatialReference::WEB_MERCATOR.to_string(), "wkid:102100");
        assert_eq!(SpatialReference::from("WKT").to_string(), "wkt:WKT");
    }
}
