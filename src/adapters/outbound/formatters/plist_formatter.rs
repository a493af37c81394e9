use crate::license_generation::domain::License;

const PLIST_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>PreferenceSpecifiers</key>
	<array>
"#;

const PLIST_FOOTER: &str = "\t</array>\n</dict>\n</plist>\n";

const GROUP_SPECIFIER: &str = "PSGroupSpecifier";
const CHILD_PANE_SPECIFIER: &str = "PSChildPaneSpecifier";

/// PlistFormatter renders Settings.bundle preference plists (XML, version 1.0)
///
/// The index document lists one child pane per license; each license gets
/// its own document whose group footer holds the license text.
pub struct PlistFormatter;

impl PlistFormatter {
    /// Index document: a "Licenses" group followed by one child pane per license
    pub fn index(prefix: &str, licenses: &[License]) -> String {
        let mut output = String::from(PLIST_HEADER);
        Self::push_item(&mut output, &[("Title", "Licenses"), ("Type", GROUP_SPECIFIER)]);
        for license in licenses {
            let file = format!("{}/{}", prefix, license.name());
            Self::push_item(
                &mut output,
                &[
                    ("File", file.as_str()),
                    ("Title", license.name()),
                    ("Type", CHILD_PANE_SPECIFIER),
                ],
            );
        }
        output.push_str(PLIST_FOOTER);
        output
    }

    /// License document: a single group whose footer is the license body
    pub fn license(license: &License) -> String {
        let mut output = String::from(PLIST_HEADER);
        Self::push_item(
            &mut output,
            &[("FooterText", license.body()), ("Type", GROUP_SPECIFIER)],
        );
        output.push_str(PLIST_FOOTER);
        output
    }

    fn push_item(output: &mut String, entries: &[(&str, &str)]) {
        output.push_str("\t\t<dict>\n");
        for (key, value) in entries {
            output.push_str(&format!(
                "\t\t\t<key>{}</key>\n\t\t\t<string>{}</string>\n",
                key,
                Self::escape_xml(value)
            ));
        }
        output.push_str("\t\t</dict>\n");
    }

    fn escape_xml(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                _ => escaped.push(c),
            }
        }
        escaped
    }
}
