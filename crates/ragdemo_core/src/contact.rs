use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.message]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Characters `encodeURIComponent` leaves alone but the form serializer escapes.
const UNRESERVED_MARKS: &[(&str, &str)] = &[
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%7E", "~"),
];

/// Percent-encodes a URI component the way `encodeURIComponent` does:
/// spaces become `%20`, and `!'()~` stay literal.
pub fn encode_uri_component(value: &str) -> String {
    // `+` only ever comes out of the serializer as an encoded space; a literal
    // plus is emitted as `%2B`.
    let mut encoded = form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    for (escaped, literal) in UNRESERVED_MARKS {
        encoded = encoded.replace(escaped, literal);
    }
    encoded
}

/// Builds the `mailto:` link that pre-fills the user's mail client.
pub fn mailto_link(recipient: &str, form: &ContactForm) -> String {
    let subject = encode_uri_component(&format!("Contact from {}", form.name));
    let body = encode_uri_component(&format!(
        "Name: {}\nEmail: {}\n\nMessage:\n{}",
        form.name, form.email, form.message
    ));
    format!("mailto:{recipient}?subject={subject}&body={body}")
}
