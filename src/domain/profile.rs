#[derive(Debug, Clone, PartialEq, Eq)]
/// Substitution expression carried by a routing record.
///
/// Only the pattern text is transmitted; use [`Regexp::from_regex`] to hand
/// over an already-compiled [`regex::Regex`].
pub struct Regexp {
    pub pattern: String,
    pub replace: String,
}

impl Regexp {
    /// Create a substitution from a literal pattern string.
    pub fn new(pattern: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replace: replace.into(),
        }
    }

    /// Create a substitution from a compiled regular expression.
    pub fn from_regex(pattern: &regex::Regex, replace: impl Into<String>) -> Self {
        Self::new(pattern.as_str(), replace)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Single NAPTR routing record of a provisioning profile.
///
/// Fields not set through [`Record::new`] start at the service defaults and
/// can be adjusted directly before the record is submitted.
pub struct Record {
    pub order: u16,
    pub preference: u16,
    pub service: String,
    pub regexp: Regexp,
    pub ttl: u32,
    pub domain: String,
    pub replacement: String,
    pub partner_id: i64,
    pub flags: String,
}

impl Record {
    /// Default record TTL in seconds.
    pub const DEFAULT_TTL: u32 = 900;
    /// Default ENUM domain suffix.
    pub const DEFAULT_DOMAIN: &'static str = "e164enum.net";
    /// Default replacement field.
    pub const DEFAULT_REPLACEMENT: &'static str = ".";
    /// Default NAPTR flags.
    pub const DEFAULT_FLAGS: &'static str = "u";
    /// Sentinel partner id meaning "applies to all partners".
    pub const PARTNER_ALL: i64 = -1;

    /// Create a record with the service defaults for ttl, domain,
    /// replacement, partner id, and flags.
    pub fn new(
        order: u16,
        preference: u16,
        service: impl Into<String>,
        regexp: Regexp,
    ) -> Self {
        Self {
            order,
            preference,
            service: service.into(),
            regexp,
            ttl: Self::DEFAULT_TTL,
            domain: Self::DEFAULT_DOMAIN.to_owned(),
            replacement: Self::DEFAULT_REPLACEMENT.to_owned(),
            partner_id: Self::PARTNER_ALL,
            flags: Self::DEFAULT_FLAGS.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Provisioning profile: an ordered set of routing records under one id.
///
/// A profile submitted for creation or update must contain at least one
/// record; the client rejects empty profiles before any network call.
pub struct Profile {
    pub id: String,
    pub tier: i32,
    pub records: Vec<Record>,
}

impl Profile {
    /// Default profile tier.
    pub const DEFAULT_TIER: i32 = 2;

    /// Create an empty profile at the default tier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tier: Self::DEFAULT_TIER,
            records: Vec::new(),
        }
    }

    /// Create a profile at the default tier with an initial set of records.
    pub fn with_records(id: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            records,
            ..Self::new(id)
        }
    }

    /// Append a record, preserving submission order.
    pub fn add_record(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Remove every record.
    pub fn clear_records(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Record {
        Record::new(
            10,
            1,
            "E2U+pstn:tel",
            Regexp::new("^.*$", "tel:+15551234567"),
        )
    }

    #[test]
    fn record_new_applies_service_defaults() {
        let record = sample_record();
        assert_eq!(record.ttl, 900);
        assert_eq!(record.domain, "e164enum.net");
        assert_eq!(record.replacement, ".");
        assert_eq!(record.partner_id, Record::PARTNER_ALL);
        assert_eq!(record.flags, "u");
    }

    #[test]
    fn regexp_from_regex_transmits_only_the_pattern_text() {
        let compiled = regex::Regex::new(r"^\+1(\d+)$").unwrap();
        let regexp = Regexp::from_regex(&compiled, "sip:\\1@example.com");
        assert_eq!(regexp.pattern, r"^\+1(\d+)$");
        assert_eq!(regexp.replace, "sip:\\1@example.com");
    }

    #[test]
    fn profile_defaults_and_record_mutators() {
        let mut profile = Profile::new("MyProfile");
        assert_eq!(profile.tier, 2);
        assert!(profile.records.is_empty());

        profile.add_record(sample_record());
        profile.add_record(sample_record());
        assert_eq!(profile.records.len(), 2);

        profile.clear_records();
        assert!(profile.records.is_empty());
    }

    #[test]
    fn with_records_preserves_order() {
        let mut second = sample_record();
        second.order = 20;
        let profile = Profile::with_records("MyProfile", vec![sample_record(), second]);
        assert_eq!(profile.records[0].order, 10);
        assert_eq!(profile.records[1].order, 20);
    }
}
