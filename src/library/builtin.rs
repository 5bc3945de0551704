use super::PatternDescriptor;

/// The built-in common-pattern registry. Order is display order.
pub fn patterns() -> Vec<PatternDescriptor> {
    vec![
        PatternDescriptor {
            id: "email",
            name: "Email",
            canonical: r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$",
            description: "Email address (local part, @, domain with TLD)",
            examples: &["user@example.com", "first.last+tag@mail.co.uk"],
        },
        PatternDescriptor {
            id: "url",
            name: "URL",
            canonical: r"^https?://[^\s/$.?#][^\s]*$",
            description: "HTTP or HTTPS URL",
            examples: &["https://example.com/path?q=1", "http://localhost:8080"],
        },
        PatternDescriptor {
            id: "ipv4",
            name: "IPv4 Address",
            canonical: r"^(?:(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)\.){3}(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)$",
            description: "Dotted-quad IPv4 address with per-octet range check",
            examples: &["192.168.0.1", "8.8.8.8", "255.255.255.255"],
        },
        PatternDescriptor {
            id: "iso-date",
            name: "ISO Date",
            canonical: r"^\d{4}-\d{2}-\d{2}$",
            description: "Calendar date in ISO-8601 form (YYYY-MM-DD)",
            examples: &["2024-01-31", "1999-12-01"],
        },
        PatternDescriptor {
            id: "password",
            name: "Strong Password",
            canonical: r"^(?=.*[a-z])(?=.*[A-Z])(?=.*\d)(?=.*[@$!%*?&])[A-Za-z\d@$!%*?&]{8,}$",
            description: "At least 8 characters with lower, upper, digit, and symbol",
            examples: &["Str0ng!pass", "aB3$defgh"],
        },
        PatternDescriptor {
            id: "hex-color",
            name: "Hex Color",
            canonical: r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$",
            description: "CSS hex color, 3 or 6 digits with leading #",
            examples: &["#fff", "#1A2b3C"],
        },
        PatternDescriptor {
            id: "us-phone",
            name: "US Phone Number",
            canonical: r"^\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}$",
            description: "US phone number with optional area-code parens and separators",
            examples: &["(555) 123-4567", "555-123-4567", "5551234567"],
        },
        PatternDescriptor {
            id: "ssn",
            name: "US Social Security Number",
            canonical: r"^\d{3}-\d{2}-\d{4}$",
            description: "US SSN in 3-2-4 digit form",
            examples: &["123-45-6789"],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let patterns = patterns();
        for (i, a) in patterns.iter().enumerate() {
            for b in &patterns[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn every_descriptor_has_examples() {
        for descriptor in patterns() {
            assert!(!descriptor.examples.is_empty(), "{}", descriptor.id);
        }
    }
}
