//! SOAP 1.1 envelope skeleton.

use xmltree::Element;

use crate::transport::xml;

const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SOAP_ENV_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Wrap a serialized body element into the fixed envelope structure.
///
/// The Body holds a single element named after the operation label; when a
/// namespace is given it is emitted as the default namespace on that element.
/// Apart from body serialization this is plain string concatenation.
pub fn build_envelope(
    operation: &str,
    body: &Element,
    namespace: Option<&str>,
) -> Result<String, xmltree::Error> {
    let body_xml = xml::to_xml(body)?;

    let mut envelope = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <env:Envelope xmlns:xsd=\"{XSD_NAMESPACE}\" xmlns:xsi=\"{XSI_NAMESPACE}\" \
         xmlns:env=\"{SOAP_ENV_NAMESPACE}\">"
    );
    envelope.push_str("<env:Body>");
    match namespace {
        Some(namespace) => envelope.push_str(&format!("<{operation} xmlns=\"{namespace}\">")),
        None => envelope.push_str(&format!("<{operation}>")),
    }
    envelope.push_str(&body_xml);
    envelope.push_str(&format!("</{operation}>"));
    envelope.push_str("</env:Body>");
    envelope.push_str("</env:Envelope>");

    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::xml::{text_element, text_of};

    #[test]
    fn builds_fixed_envelope_with_default_namespace() {
        let body = text_element("Deactivate", "x");
        let envelope =
            build_envelope("Request", &body, Some("http://www.neustar.biz/sip_ix/prov")).unwrap();

        assert!(envelope.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(envelope.contains(
            "<env:Envelope xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\" \
             xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
             xmlns:env=\"http://schemas.xmlsoap.org/soap/envelope/\">"
        ));
        assert!(
            envelope.contains("<Request xmlns=\"http://www.neustar.biz/sip_ix/prov\">")
        );
        assert!(envelope.ends_with("</Request></env:Body></env:Envelope>"));
    }

    #[test]
    fn omits_namespace_attribute_when_not_supplied() {
        let body = text_element("Deactivate", "x");
        let envelope = build_envelope("Request", &body, None).unwrap();
        assert!(envelope.contains("<env:Body><Request><Deactivate>"));
    }

    #[test]
    fn envelope_parses_back_to_the_same_body() {
        let body = text_element("QueryTN", "MyProfile");
        let envelope = build_envelope("Request", &body, None).unwrap();

        let root = xml::parse(&envelope).unwrap();
        assert_eq!(root.name, "Envelope");
        let operation = root
            .get_child("Body")
            .and_then(|body| body.get_child("Request"))
            .unwrap();
        assert_eq!(text_of(operation.get_child("QueryTN").unwrap()), "MyProfile");
    }
}
