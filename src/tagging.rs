//! Tag schemes and version math for release workflows.
//!
//! Release candidates are tagged `rc-<version>` and promoted releases
//! `version-<version>`. A version is either a semantic version ("1.2.3")
//! or a calendar version ("2021.01.01_0"). A candidate and its promoted
//! release share a base version: "major.minor" for semver, the date
//! component for calver.
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use semver::Version;
use std::fmt;

use crate::{
    config::VersioningStrategy,
    error::{RelmanError, Result},
};

/// Tag prefix marking a release candidate.
pub const RC_PREFIX: &str = "rc";

/// Tag prefix marking a promoted release.
pub const VERSION_PREFIX: &str = "version";

const SEMVER_TAG_PATTERN: &str = r"^(rc|version)-(\d+\.\d+\.\d+)$";
const CALVER_TAG_PATTERN: &str =
    r"^(rc|version)-(\d{4})\.(\d{2})\.(\d{2})_(\d+)$";

/// Whether a tag marks a candidate or a promoted release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagType {
    ReleaseCandidate,
    Release,
}

impl TagType {
    pub fn prefix(&self) -> &'static str {
        match self {
            TagType::ReleaseCandidate => RC_PREFIX,
            TagType::Release => VERSION_PREFIX,
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            RC_PREFIX => Some(TagType::ReleaseCandidate),
            VERSION_PREFIX => Some(TagType::Release),
            _ => None,
        }
    }
}

/// Calendar version: a date plus a patch counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalverVersion {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub patch: u64,
}

impl CalverVersion {
    pub fn from_date(date: NaiveDate, patch: u64) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            patch,
        }
    }

    /// The date component alone, e.g. "2021.01.01".
    pub fn date_version(&self) -> String {
        format!("{:04}.{:02}.{:02}", self.year, self.month, self.day)
    }

    fn same_date(&self, date: NaiveDate) -> bool {
        self.year == date.year()
            && self.month == date.month()
            && self.day == date.day()
    }
}

impl fmt::Display for CalverVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.date_version(), self.patch)
    }
}

/// A version under one of the supported versioning strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleVersion {
    Semver(Version),
    Calver(CalverVersion),
}

impl CycleVersion {
    /// The strategy this version belongs to.
    pub fn strategy(&self) -> VersioningStrategy {
        match self {
            CycleVersion::Semver(_) => VersioningStrategy::Semver,
            CycleVersion::Calver(_) => VersioningStrategy::Calver,
        }
    }

    /// The version identifier shared by a release candidate and its
    /// corresponding promoted release.
    pub fn base_version(&self) -> String {
        match self {
            CycleVersion::Semver(version) => {
                format!("{}.{}", version.major, version.minor)
            }
            CycleVersion::Calver(version) => version.date_version(),
        }
    }

    /// The next patch version within the same release cycle.
    pub fn bump_patch(&self) -> CycleVersion {
        match self {
            CycleVersion::Semver(version) => CycleVersion::Semver(
                Version::new(version.major, version.minor, version.patch + 1),
            ),
            CycleVersion::Calver(version) => {
                CycleVersion::Calver(CalverVersion {
                    patch: version.patch + 1,
                    ..version.clone()
                })
            }
        }
    }
}

impl fmt::Display for CycleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleVersion::Semver(version) => write!(f, "{}", version),
            CycleVersion::Calver(version) => write!(f, "{}", version),
        }
    }
}

/// Parsed components of a release tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagParts {
    pub tag_type: TagType,
    pub version: CycleVersion,
}

impl TagParts {
    /// Parse a tag name under either tag scheme. Returns `None` for tags
    /// that fit neither.
    pub fn parse(tag_name: &str) -> Option<TagParts> {
        let semver_re = Regex::new(SEMVER_TAG_PATTERN).ok()?;

        if let Some(caps) = semver_re.captures(tag_name) {
            let tag_type = TagType::from_prefix(&caps[1])?;
            let version = Version::parse(&caps[2]).ok()?;
            return Some(TagParts {
                tag_type,
                version: CycleVersion::Semver(version),
            });
        }

        let calver_re = Regex::new(CALVER_TAG_PATTERN).ok()?;

        if let Some(caps) = calver_re.captures(tag_name) {
            let tag_type = TagType::from_prefix(&caps[1])?;
            let version = CalverVersion {
                year: caps[2].parse().ok()?,
                month: caps[3].parse().ok()?,
                day: caps[4].parse().ok()?,
                patch: caps[5].parse().ok()?,
            };
            return Some(TagParts {
                tag_type,
                version: CycleVersion::Calver(version),
            });
        }

        None
    }

    /// Render the tag name, round-tripping with [`TagParts::parse`].
    pub fn tag_name(&self) -> String {
        format!("{}-{}", self.tag_type.prefix(), self.version)
    }

    pub fn base_version(&self) -> String {
        self.version.base_version()
    }
}

/// Why a tag name failed validation, split into a short title and a
/// longer explanation for the host to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNameError {
    pub title: String,
    pub subtitle: String,
}

/// Validate that a tag name fits one of the supported tag schemes.
pub fn validate_tag_name(tag_name: &str) -> Option<TagNameError> {
    if TagParts::parse(tag_name).is_some() {
        return None;
    }

    Some(TagNameError {
        title: format!("invalid tag name \"{}\"", tag_name),
        subtitle: format!(
            "expected \"{}-<version>\" or \"{}-<version>\" where version is \
             semver (\"1.2.3\") or calver (\"2021.01.01_0\")",
            RC_PREFIX, VERSION_PREFIX
        ),
    })
}

/// Whether a tag name matches the configured versioning strategy.
pub fn matches_strategy(
    strategy: VersioningStrategy,
    tag_name: &str,
) -> bool {
    TagParts::parse(tag_name)
        .map(|parts| parts.version.strategy() == strategy)
        .unwrap_or(false)
}

/// Compute the next release-candidate version.
///
/// Semver bumps the minor version of the latest release and zeroes the
/// patch; the first release is 0.1.0. Calver uses today's date, bumping
/// the patch counter when the latest release shares the date.
pub fn next_candidate(
    strategy: VersioningStrategy,
    latest: Option<&TagParts>,
    today: NaiveDate,
) -> Result<CycleVersion> {
    match strategy {
        VersioningStrategy::Semver => match latest {
            Some(TagParts {
                version: CycleVersion::Semver(version),
                ..
            }) => Ok(CycleVersion::Semver(Version::new(
                version.major,
                version.minor + 1,
                0,
            ))),
            Some(parts) => Err(RelmanError::InvalidTagName(format!(
                "latest release tag \"{}\" does not match versioning \
                 strategy {}",
                parts.tag_name(),
                strategy
            ))),
            None => Ok(CycleVersion::Semver(Version::new(0, 1, 0))),
        },
        VersioningStrategy::Calver => {
            let patch = match latest {
                Some(TagParts {
                    version: CycleVersion::Calver(version),
                    ..
                }) if version.same_date(today) => version.patch + 1,
                _ => 0,
            };

            Ok(CycleVersion::Calver(CalverVersion::from_date(today, patch)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tag_name: &str) -> TagParts {
        TagParts::parse(tag_name).unwrap()
    }

    #[test]
    fn parses_semver_candidate_tags() {
        let parts = parse("rc-1.2.3");
        assert_eq!(parts.tag_type, TagType::ReleaseCandidate);
        assert_eq!(
            parts.version,
            CycleVersion::Semver(Version::new(1, 2, 3))
        );
        assert_eq!(parts.tag_name(), "rc-1.2.3");
    }

    #[test]
    fn parses_semver_release_tags() {
        let parts = parse("version-10.0.1");
        assert_eq!(parts.tag_type, TagType::Release);
        assert_eq!(parts.base_version(), "10.0");
    }

    #[test]
    fn parses_calver_tags() {
        let parts = parse("rc-2021.01.01_0");
        assert_eq!(parts.tag_type, TagType::ReleaseCandidate);
        assert_eq!(
            parts.version,
            CycleVersion::Calver(CalverVersion {
                year: 2021,
                month: 1,
                day: 1,
                patch: 0,
            })
        );
        assert_eq!(parts.tag_name(), "rc-2021.01.01_0");
        assert_eq!(parts.base_version(), "2021.01.01");
    }

    #[test]
    fn rejects_malformed_tags() {
        assert!(TagParts::parse("v1.2.3").is_none());
        assert!(TagParts::parse("rc-1.2").is_none());
        assert!(TagParts::parse("rc-2021.1.1_0").is_none());
        assert!(TagParts::parse("release-1.2.3").is_none());
        assert!(TagParts::parse("rc-1.2.3-alpha.1").is_none());
    }

    #[test]
    fn validates_tag_names() {
        assert!(validate_tag_name("rc-1.2.3").is_none());
        assert!(validate_tag_name("version-2021.01.01_3").is_none());

        let error = validate_tag_name("my-tag").unwrap();
        assert_eq!(error.title, "invalid tag name \"my-tag\"");
        assert!(error.subtitle.contains("rc-<version>"));
    }

    #[test]
    fn matches_strategy_compares_tag_scheme() {
        assert!(matches_strategy(VersioningStrategy::Semver, "rc-1.2.3"));
        assert!(!matches_strategy(
            VersioningStrategy::Semver,
            "rc-2021.01.01_0"
        ));
        assert!(matches_strategy(
            VersioningStrategy::Calver,
            "version-2021.01.01_0"
        ));
        assert!(!matches_strategy(VersioningStrategy::Calver, "junk"));
    }

    #[test]
    fn next_semver_candidate_bumps_minor() {
        let latest = parse("version-1.2.3");
        let today = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();

        let version = next_candidate(
            VersioningStrategy::Semver,
            Some(&latest),
            today,
        )
        .unwrap();
        assert_eq!(version, CycleVersion::Semver(Version::new(1, 3, 0)));
    }

    #[test]
    fn next_semver_candidate_first_release() {
        let today = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();

        let version =
            next_candidate(VersioningStrategy::Semver, None, today).unwrap();
        assert_eq!(version, CycleVersion::Semver(Version::new(0, 1, 0)));
    }

    #[test]
    fn next_semver_candidate_rejects_calver_latest() {
        let latest = parse("version-2021.01.01_0");
        let today = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();

        let result =
            next_candidate(VersioningStrategy::Semver, Some(&latest), today);
        assert!(result.is_err());
    }

    #[test]
    fn next_calver_candidate_uses_today() {
        let today = NaiveDate::from_ymd_opt(2021, 6, 15).unwrap();

        let version =
            next_candidate(VersioningStrategy::Calver, None, today).unwrap();
        assert_eq!(version.to_string(), "2021.06.15_0");
    }

    #[test]
    fn next_calver_candidate_bumps_patch_on_same_day() {
        let latest = parse("rc-2021.06.15_1");
        let today = NaiveDate::from_ymd_opt(2021, 6, 15).unwrap();

        let version = next_candidate(
            VersioningStrategy::Calver,
            Some(&latest),
            today,
        )
        .unwrap();
        assert_eq!(version.to_string(), "2021.06.15_2");
    }

    #[test]
    fn next_calver_candidate_resets_patch_on_new_day() {
        let latest = parse("rc-2021.06.14_4");
        let today = NaiveDate::from_ymd_opt(2021, 6, 15).unwrap();

        let version = next_candidate(
            VersioningStrategy::Calver,
            Some(&latest),
            today,
        )
        .unwrap();
        assert_eq!(version.to_string(), "2021.06.15_0");
    }

    #[test]
    fn bump_patch_advances_within_cycle() {
        let semver = parse("version-1.2.3").version.bump_patch();
        assert_eq!(semver, CycleVersion::Semver(Version::new(1, 2, 4)));

        let calver = parse("rc-2021.01.01_0").version.bump_patch();
        assert_eq!(calver.to_string(), "2021.01.01_1");
    }
}
