//! Request body construction: domain values rendered into their SOAP
//! element shape.

use xmltree::{Element, XMLNode};

use crate::domain::{ParsedPhoneNumber, Profile, Record};
use crate::transport::xml::{push_child, text_element};

/// Body for the phone-number operations: `TN { Base, CountryCode }` plus the
/// default tier.
pub fn encode_phone_number(method: &str, parsed: ParsedPhoneNumber) -> Element {
    let mut body = Element::new(method);

    let mut tn = Element::new("TN");
    push_child(&mut tn, text_element("Base", parsed.national_number.to_string()));
    push_child(
        &mut tn,
        text_element("CountryCode", parsed.country_code.to_string()),
    );
    push_child(&mut body, tn);
    push_child(
        &mut body,
        text_element("Tier", Profile::DEFAULT_TIER.to_string()),
    );

    body
}

/// Body for profile definition and update: `ProfileID`, `Tier`, then one
/// `NAPTR` element per record in submission order.
pub fn encode_profile(method: &str, profile: &Profile) -> Element {
    let mut body = Element::new(method);
    push_child(&mut body, text_element("ProfileID", profile.id.clone()));
    push_child(&mut body, text_element("Tier", profile.tier.to_string()));
    for record in &profile.records {
        push_child(&mut body, encode_record(record));
    }
    body
}

pub fn encode_record(record: &Record) -> Element {
    let mut naptr = Element::new("NAPTR");
    naptr
        .attributes
        .insert("ttl".to_owned(), record.ttl.to_string());

    push_child(&mut naptr, text_element("DomainName", record.domain.clone()));
    push_child(
        &mut naptr,
        text_element("Preference", record.preference.to_string()),
    );
    push_child(&mut naptr, text_element("Order", record.order.to_string()));
    push_child(&mut naptr, text_element("Flags", record.flags.clone()));
    push_child(&mut naptr, text_element("Service", record.service.clone()));
    push_child(&mut naptr, encode_regexp(record));
    push_child(
        &mut naptr,
        text_element("Replacement", record.replacement.clone()),
    );
    push_child(&mut naptr, text_element("CountryCode", "false"));
    push_child(&mut naptr, encode_partner(record));

    naptr
}

fn encode_regexp(record: &Record) -> Element {
    let mut regexp = text_element("Regexp", record.regexp.replace.clone());
    regexp
        .attributes
        .insert("pattern".to_owned(), record.regexp.pattern.clone());
    regexp
}

// partner_id == -1 is the only value that renders the "ALL" marker; every
// other id is transmitted as the bare numeric attribute.
fn encode_partner(record: &Record) -> Element {
    let mut partner = Element::new("Partner");
    partner
        .attributes
        .insert("id".to_owned(), record.partner_id.to_string());
    if record.partner_id == Record::PARTNER_ALL {
        partner.children.push(XMLNode::Text("ALL".to_owned()));
    }
    partner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Regexp;
    use crate::transport::xml::text_of;

    fn sample_record() -> Record {
        Record::new(
            10,
            1,
            "E2U+pstn:tel",
            Regexp::new("^.*$", "tel:+15551234567"),
        )
    }

    #[test]
    fn phone_number_body_has_tn_and_default_tier() {
        let parsed = ParsedPhoneNumber {
            country_code: 1,
            national_number: 5158675309,
        };
        let body = encode_phone_number("Activate", parsed);

        assert_eq!(body.name, "Activate");
        let tn = body.get_child("TN").unwrap();
        assert_eq!(text_of(tn.get_child("Base").unwrap()), "5158675309");
        assert_eq!(text_of(tn.get_child("CountryCode").unwrap()), "1");
        assert_eq!(text_of(body.get_child("Tier").unwrap()), "2");
    }

    #[test]
    fn record_renders_ttl_attribute_and_field_elements() {
        let record = sample_record();
        let naptr = encode_record(&record);

        assert_eq!(naptr.name, "NAPTR");
        assert_eq!(naptr.attributes.get("ttl").map(String::as_str), Some("900"));
        assert_eq!(text_of(naptr.get_child("DomainName").unwrap()), "e164enum.net");
        assert_eq!(text_of(naptr.get_child("Preference").unwrap()), "1");
        assert_eq!(text_of(naptr.get_child("Order").unwrap()), "10");
        assert_eq!(text_of(naptr.get_child("Flags").unwrap()), "u");
        assert_eq!(text_of(naptr.get_child("Service").unwrap()), "E2U+pstn:tel");
        assert_eq!(text_of(naptr.get_child("Replacement").unwrap()), ".");
        assert_eq!(text_of(naptr.get_child("CountryCode").unwrap()), "false");
    }

    #[test]
    fn regexp_renders_pattern_attribute_with_replacement_text() {
        let naptr = encode_record(&sample_record());
        let regexp = naptr.get_child("Regexp").unwrap();
        assert_eq!(
            regexp.attributes.get("pattern").map(String::as_str),
            Some("^.*$")
        );
        assert_eq!(text_of(regexp), "tel:+15551234567");
    }

    #[test]
    fn partner_sentinel_renders_all_marker() {
        let naptr = encode_record(&sample_record());
        let partner = naptr.get_child("Partner").unwrap();
        assert_eq!(partner.attributes.get("id").map(String::as_str), Some("-1"));
        assert_eq!(text_of(partner), "ALL");
    }

    #[test]
    fn explicit_partner_id_renders_numeric_attribute_without_marker() {
        let mut record = sample_record();
        record.partner_id = 42;
        let naptr = encode_record(&record);
        let partner = naptr.get_child("Partner").unwrap();
        assert_eq!(partner.attributes.get("id").map(String::as_str), Some("42"));
        assert_eq!(text_of(partner), "");
    }

    #[test]
    fn profile_body_lists_records_in_order() {
        let mut second = sample_record();
        second.order = 20;
        let profile = Profile::with_records("MyProfile", vec![sample_record(), second]);

        let body = encode_profile("DefineDNSProfile", &profile);
        assert_eq!(body.name, "DefineDNSProfile");
        assert_eq!(text_of(body.get_child("ProfileID").unwrap()), "MyProfile");
        assert_eq!(text_of(body.get_child("Tier").unwrap()), "2");

        let records = crate::transport::xml::children(&body, "NAPTR");
        assert_eq!(records.len(), 2);
        assert_eq!(text_of(records[0].get_child("Order").unwrap()), "10");
        assert_eq!(text_of(records[1].get_child("Order").unwrap()), "20");
    }
}
