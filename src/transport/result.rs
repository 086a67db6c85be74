//! Response decoding for the three result shapes.
//!
//! Every response carries `Envelope/Body/Response/ReturnCode` and zero or
//! more `TextMessage` entries; the query shapes additionally carry
//! `ResponseData`. Fields that may repeat (`TextMessage`, `TNData`, `NAPTR`)
//! are normalized to sequences here, never left to the XML parse.

use std::str::FromStr;

use xmltree::Element;

use crate::domain::phone;
use crate::domain::{
    BaseResponse, NumberEntry, Profile, ProfileQueryData, ProfileQueryResponse,
    QueryNumbersResponse, Record, Regexp, Response, ReturnCode,
};
use crate::transport::xml;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("missing element: {path}")]
    MissingElement { path: &'static str },

    #[error("missing attribute {attribute} on {element}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("invalid integer in {field}: {value:?}")]
    InvalidInt { field: &'static str, value: String },
}

pub fn decode_base(root: &Element) -> Result<BaseResponse, DecodeError> {
    let response = response_element(root)?;
    Ok(Response {
        code: return_code(response)?,
        messages: messages(response),
        data: (),
    })
}

pub fn decode_query_numbers(root: &Element) -> Result<QueryNumbersResponse, DecodeError> {
    let response = response_element(root)?;
    let data = match response.get_child("ResponseData") {
        None => Vec::new(),
        Some(response_data) => xml::children(response_data, "TNData")
            .into_iter()
            .map(number_entry)
            .collect::<Result<_, _>>()?,
    };

    Ok(Response {
        code: return_code(response)?,
        messages: messages(response),
        data,
    })
}

pub fn decode_query_profile(root: &Element) -> Result<ProfileQueryResponse, DecodeError> {
    let response = response_element(root)?;
    let data = match response.get_child("ResponseData") {
        None => None,
        Some(response_data) => {
            let profile_data = required_child(
                response_data,
                "DNSProfileData",
                "ResponseData.DNSProfileData",
            )?;
            Some(profile_query_data(profile_data)?)
        }
    };

    Ok(Response {
        code: return_code(response)?,
        messages: messages(response),
        data,
    })
}

fn response_element(root: &Element) -> Result<&Element, DecodeError> {
    if root.name != "Envelope" {
        return Err(DecodeError::MissingElement { path: "Envelope" });
    }
    let body = required_child(root, "Body", "Envelope.Body")?;
    required_child(body, "Response", "Envelope.Body.Response")
}

fn return_code(response: &Element) -> Result<ReturnCode, DecodeError> {
    let element = required_child(response, "ReturnCode", "Response.ReturnCode")?;
    int_text(element, "ReturnCode").map(ReturnCode::new)
}

// A single TextMessage and a repeated one decode to the same sequence shape.
fn messages(response: &Element) -> Vec<String> {
    xml::children(response, "TextMessage")
        .into_iter()
        .map(xml::text_of)
        .collect()
}

fn number_entry(tn_data: &Element) -> Result<NumberEntry, DecodeError> {
    let tn = required_child(tn_data, "TN", "TNData.TN")?;
    let base: u64 = int_text(required_child(tn, "Base", "TN.Base")?, "TN.Base")?;
    let country_code: u16 = int_text(
        required_child(tn, "CountryCode", "TN.CountryCode")?,
        "TN.CountryCode",
    )?;
    let customer = required_child(tn_data, "Customer", "TNData.Customer")?;

    Ok(NumberEntry {
        customer_id: int_attribute(customer, "id", "Customer.id")?,
        created: child_text(tn_data, "DateCreated"),
        status: child_text(tn_data, "Status"),
        tn: phone::format(base, country_code),
        profile_id: child_text(tn_data, "DNSProfileID"),
        tier: int_text(required_child(tn_data, "Tier", "TNData.Tier")?, "TNData.Tier")?,
    })
}

fn profile_query_data(profile_data: &Element) -> Result<ProfileQueryData, DecodeError> {
    let customer = required_child(profile_data, "Customer", "DNSProfileData.Customer")?;
    let records = xml::children(profile_data, "NAPTR")
        .into_iter()
        .map(decode_record)
        .collect::<Result<Vec<_>, _>>()?;

    let profile = Profile {
        id: child_text(profile_data, "ProfileID"),
        tier: int_text(
            required_child(profile_data, "Tier", "DNSProfileData.Tier")?,
            "DNSProfileData.Tier",
        )?,
        records,
    };

    Ok(ProfileQueryData {
        customer_id: int_attribute(customer, "id", "Customer.id")?,
        created: child_text(profile_data, "DateCreated"),
        is_in_use: child_text(profile_data, "IsInUse").trim().eq_ignore_ascii_case("true"),
        profile,
    })
}

// Inverse of the record serialization in `encode`: ttl comes back off the
// NAPTR attribute, partner_id off the Partner id attribute.
fn decode_record(naptr: &Element) -> Result<Record, DecodeError> {
    let regexp = required_child(naptr, "Regexp", "NAPTR.Regexp")?;
    let pattern =
        regexp
            .attributes
            .get("pattern")
            .cloned()
            .ok_or(DecodeError::MissingAttribute {
                element: "Regexp",
                attribute: "pattern",
            })?;
    let partner = required_child(naptr, "Partner", "NAPTR.Partner")?;

    Ok(Record {
        order: int_text(required_child(naptr, "Order", "NAPTR.Order")?, "NAPTR.Order")?,
        preference: int_text(
            required_child(naptr, "Preference", "NAPTR.Preference")?,
            "NAPTR.Preference",
        )?,
        service: child_text(naptr, "Service"),
        regexp: Regexp {
            pattern,
            replace: xml::text_of(regexp),
        },
        ttl: int_attribute(naptr, "ttl", "NAPTR.ttl")?,
        domain: child_text(naptr, "DomainName"),
        replacement: child_text(naptr, "Replacement"),
        partner_id: int_attribute(partner, "id", "Partner.id")?,
        flags: child_text(naptr, "Flags"),
    })
}

fn required_child<'a>(
    parent: &'a Element,
    name: &str,
    path: &'static str,
) -> Result<&'a Element, DecodeError> {
    parent
        .get_child(name)
        .ok_or(DecodeError::MissingElement { path })
}

fn child_text(parent: &Element, name: &str) -> String {
    parent.get_child(name).map(xml::text_of).unwrap_or_default()
}

fn int_text<T: FromStr>(element: &Element, field: &'static str) -> Result<T, DecodeError> {
    let value = xml::text_of(element);
    value
        .trim()
        .parse()
        .map_err(|_| DecodeError::InvalidInt { field, value })
}

fn int_attribute<T: FromStr>(
    element: &Element,
    attribute: &'static str,
    field: &'static str,
) -> Result<T, DecodeError> {
    let value = element
        .attributes
        .get(attribute)
        .ok_or(DecodeError::MissingAttribute {
            element: field,
            attribute,
        })?;
    value.trim().parse().map_err(|_| DecodeError::InvalidInt {
        field,
        value: value.clone(),
    })
}
