//! Chart builder: turns birth data into a natal context via an ephemeris
//! provider.

use chrono::{DateTime, Utc};
use kp_core::{Body, EphemerisError, EphemerisProvider, GeoLocation};
use kp_time::{jd_from_datetime, parse_instant};
use kp_vedic_base::{
    ALL_GRAHAS, Graha, GrahaLongitudes, LordCycle, Nakshatra, Rashi, RashiLordship,
    SignificatorMap, build_significators, house_of_longitude, house_signs, kp_position,
    normalize_360, validate_cusps,
};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Birth data as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthInput {
    /// ISO-8601 instant with an explicit offset or `Z`.
    pub instant: String,
    /// Degrees, north positive.
    pub latitude: f64,
    /// Degrees, east positive.
    pub longitude: f64,
    #[serde(default)]
    pub name: Option<String>,
    /// Free-form phrasing preference, carried through untouched.
    #[serde(default)]
    pub tone: Option<String>,
}

impl BirthInput {
    pub fn new(instant: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            instant: instant.into(),
            latitude,
            longitude,
            name: None,
            tone: None,
        }
    }

    /// Parse the instant and check the coordinates.
    pub fn validate(&self) -> Result<(DateTime<Utc>, GeoLocation), SearchError> {
        if self.instant.trim().is_empty() {
            return Err(SearchError::InvalidInput("birth instant is missing".to_string()));
        }
        let utc = parse_instant(&self.instant)?;
        let location = GeoLocation::new(self.latitude, self.longitude);
        location.validate()?;
        Ok((utc, location))
    }
}

/// Provider body for a graha; Ketu has none and is derived from Rahu.
pub const fn graha_body(graha: Graha) -> Option<Body> {
    match graha {
        Graha::Surya => Some(Body::Sun),
        Graha::Chandra => Some(Body::Moon),
        Graha::Mangal => Some(Body::Mars),
        Graha::Buddh => Some(Body::Mercury),
        Graha::Guru => Some(Body::Jupiter),
        Graha::Shukra => Some(Body::Venus),
        Graha::Shani => Some(Body::Saturn),
        Graha::Rahu => Some(Body::MeanNode),
        Graha::Ketu => None,
    }
}

/// Sidereal longitudes of all 9 grahas at `jd_utc`.
///
/// Ketu is placed exactly opposite Rahu.
pub fn graha_longitudes_at(
    provider: &dyn EphemerisProvider,
    jd_utc: f64,
) -> Result<GrahaLongitudes, SearchError> {
    let mut lons = [0.0; 9];
    for graha in ALL_GRAHAS {
        let Some(body) = graha_body(graha) else {
            continue;
        };
        let lon = provider.longitude_deg(body, jd_utc)?;
        if !lon.is_finite() {
            return Err(SearchError::EphemerisUnavailable(EphemerisError::Unavailable(
                format!("{} returned a non-finite longitude for {}", provider.name(), body.name()),
            )));
        }
        lons[graha.index() as usize] = normalize_360(lon);
    }
    lons[Graha::Ketu.index() as usize] = normalize_360(lons[Graha::Rahu.index() as usize] + 180.0);
    Ok(GrahaLongitudes::from_all(lons))
}

/// Immutable snapshot of a birth chart.
#[derive(Debug, Clone, PartialEq)]
pub struct NatalContext {
    pub birth_utc: DateTime<Utc>,
    pub birth_jd: f64,
    pub location: GeoLocation,
    /// All 9 grahas are present.
    pub longitudes: GrahaLongitudes,
    /// Sidereal cusp longitudes, index 0 = house 1.
    pub cusps: [f64; 12],
    /// Sign on each cusp, index 0 = house 1.
    pub house_signs: [Rashi; 12],
}

impl NatalContext {
    /// Longitude of `graha`, if the chart carries it.
    pub fn longitude(&self, graha: Graha) -> Option<f64> {
        self.longitudes.get(graha)
    }

    /// Moon longitude; every dasha computation starts here.
    pub fn moon_longitude(&self) -> Result<f64, SearchError> {
        self.longitude(Graha::Chandra)
            .ok_or_else(|| SearchError::InvalidInput("chart has no moon longitude".to_string()))
    }

    /// Longitude of the first cusp.
    pub fn ascendant(&self) -> f64 {
        self.cusps[0]
    }

    /// Sign occupied by the Moon.
    pub fn moon_sign(&self) -> Option<Rashi> {
        self.longitude(Graha::Chandra).map(kp_vedic_base::rashi_from_longitude)
    }

    /// House (1..=12) occupied by `graha`.
    pub fn house_of(&self, graha: Graha) -> Option<u8> {
        self.longitude(graha).map(|lon| house_of_longitude(lon, &self.cusps))
    }

    /// House significators of every graha in this chart.
    pub fn significators(
        &self,
        cycle: &LordCycle,
        lordship: &RashiLordship,
    ) -> Result<SignificatorMap, SearchError> {
        Ok(build_significators(
            &self.longitudes,
            &self.cusps,
            cycle,
            lordship,
        )?)
    }

    /// Sign on the cusp of `house` (1..=12).
    pub fn house_sign(&self, house: u8) -> Option<Rashi> {
        self.house_signs.get(usize::from(house).checked_sub(1)?).copied()
    }
}

/// Build a natal context for validated birth data.
pub fn build_natal(
    provider: &dyn EphemerisProvider,
    input: &BirthInput,
) -> Result<NatalContext, SearchError> {
    let (birth_utc, location) = input.validate()?;
    build_natal_at(provider, birth_utc, location)
}

/// Build a natal context for an already parsed instant and location.
pub fn build_natal_at(
    provider: &dyn EphemerisProvider,
    birth_utc: DateTime<Utc>,
    location: GeoLocation,
) -> Result<NatalContext, SearchError> {
    location.validate()?;
    let birth_jd = jd_from_datetime(&birth_utc);
    let longitudes = graha_longitudes_at(provider, birth_jd)?;

    let cusps = provider.house_cusps_deg(birth_jd, &location)?.map(normalize_360);
    validate_cusps(&cusps).map_err(|e| {
        SearchError::EphemerisUnavailable(EphemerisError::Unavailable(format!(
            "{} returned unusable cusps: {e}",
            provider.name()
        )))
    })?;

    debug!(
        "natal chart at jd {birth_jd:.6} via {}: asc {:.4}, moon {:.4}",
        provider.name(),
        cusps[0],
        longitudes.get(Graha::Chandra).unwrap_or(f64::NAN)
    );

    Ok(NatalContext {
        birth_utc,
        birth_jd,
        location,
        longitudes,
        cusps,
        house_signs: house_signs(&cusps),
    })
}

/// One graha's row in a chart report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrahaRow {
    pub graha: Graha,
    pub longitude: f64,
    pub rashi: Rashi,
    pub nakshatra: Nakshatra,
    pub star_lord: Graha,
    pub sub_lord: Graha,
    pub house: u8,
}

/// One cusp's row in a chart report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuspRow {
    pub house: u8,
    pub longitude: f64,
    pub rashi: Rashi,
    pub star_lord: Graha,
    pub sub_lord: Graha,
}

/// Serializable chart report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalSummary {
    pub birth_utc: DateTime<Utc>,
    pub birth_jd: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub ascendant: f64,
    pub moon_sign: Option<Rashi>,
    pub grahas: Vec<GrahaRow>,
    pub cusps: Vec<CuspRow>,
}

/// Report every graha and cusp with its KP pointers.
pub fn natal_summary(
    natal: &NatalContext,
    cycle: &LordCycle,
    lordship: &RashiLordship,
) -> NatalSummary {
    let grahas = natal
        .longitudes
        .iter()
        .map(|(graha, lon)| {
            let pos = kp_position(lon, cycle, lordship);
            GrahaRow {
                graha,
                longitude: pos.longitude,
                rashi: pos.rashi,
                nakshatra: pos.nakshatra,
                star_lord: pos.star_lord,
                sub_lord: pos.sub_lord,
                house: house_of_longitude(lon, &natal.cusps),
            }
        })
        .collect();
    let cusps = natal
        .cusps
        .iter()
        .enumerate()
        .map(|(i, &lon)| {
            let pos = kp_position(lon, cycle, lordship);
            CuspRow {
                house: i as u8 + 1,
                longitude: pos.longitude,
                rashi: pos.rashi,
                star_lord: pos.star_lord,
                sub_lord: pos.sub_lord,
            }
        })
        .collect();
    NatalSummary {
        birth_utc: natal.birth_utc,
        birth_jd: natal.birth_jd,
        latitude: natal.location.latitude_deg,
        longitude: natal.location.longitude_deg,
        ascendant: natal.ascendant(),
        moon_sign: natal.moon_sign(),
        grahas,
        cusps,
    }
}
