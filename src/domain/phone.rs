use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Phone number broken into the pair the provisioning API transmits.
pub struct ParsedPhoneNumber {
    pub country_code: u16,
    pub national_number: u64,
}

/// Parse a dial string into its (national number, country code) pair.
///
/// Formatting characters are stripped before parsing, so `"+1 (515) 867-5309"`
/// and `"15158675309"` resolve to the same number. The cleaned digit string
/// must form a valid international number.
pub fn parse(input: &str) -> Result<ParsedPhoneNumber, ValidationError> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();

    let parsed =
        phonenumber::parse(None, format!("+{digits}")).map_err(|_| {
            ValidationError::InvalidPhoneNumber {
                input: input.to_owned(),
            }
        })?;
    if !phonenumber::is_valid(&parsed) {
        return Err(ValidationError::InvalidPhoneNumber {
            input: input.to_owned(),
        });
    }

    Ok(ParsedPhoneNumber {
        country_code: parsed.code().value(),
        national_number: parsed.national().value(),
    })
}

/// Format a (national number, country code) pair as an E.164 dial string.
pub fn format(national_number: u64, country_code: u16) -> String {
    format!("+{country_code}{national_number}")
}
