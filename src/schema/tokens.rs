/// Tenant data available to `{dealer.X}` placeholders in static form text.
#[derive(Debug, Clone, Default)]
pub struct DealerProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl DealerProfile {
    fn token_value(&self, key: &str) -> Option<&str> {
        match key {
            "name" => Some(&self.name),
            "address" => Some(&self.address),
            "phone" => Some(&self.phone),
            "email" => Some(&self.email),
            _ => None,
        }
    }
}

/// Replaces every `{dealer.X}` placeholder in `text` with the matching value
/// from the dealer profile.
///
/// Placeholders with an unrecognized key are left verbatim so a typo in a
/// dealer-authored blurb stays visible instead of silently disappearing.
pub fn substitute_tokens(text: &str, dealer: &DealerProfile) -> String {
    const PREFIX: &str = "{dealer.";

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(PREFIX) {
        out.push_str(&rest[..start]);
        let after_prefix = &rest[start + PREFIX.len()..];
        match after_prefix.find('}') {
            Some(end) => {
                let key = &after_prefix[..end];
                match dealer.token_value(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str(PREFIX);
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after_prefix[end + 1..];
            }
            None => {
                // Unterminated placeholder: emit as-is and stop scanning.
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Renders every static-text entry of a form with the dealer's data,
/// preserving order.
pub fn render_static_text(entries: &[String], dealer: &DealerProfile) -> Vec<String> {
    entries
        .iter()
        .map(|text| substitute_tokens(text, dealer))
        .collect()
}
