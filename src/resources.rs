//! Crisis lines, support organizations and self-care ideas.

use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrisisLine {
    pub name: &'static str,
    pub contact: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportSite {
    pub name: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

pub const CRISIS_LINES: [CrisisLine; 3] = [
    CrisisLine {
        name: "National Suicide Prevention Lifeline",
        contact: "988",
        description: "24/7 free and confidential support",
    },
    CrisisLine {
        name: "Crisis Text Line",
        contact: "Text HOME to 741741",
        description: "Free, 24/7 crisis support via text",
    },
    CrisisLine {
        name: "Teen Line",
        contact: "800-852-8336",
        description: "Teens helping teens, 6PM-10PM PST",
    },
];

pub const SUPPORT_SITES: [SupportSite; 4] = [
    SupportSite {
        name: "National Alliance on Mental Illness (NAMI)",
        url: "https://nami.org",
        description: "Mental health education, advocacy, and support",
    },
    SupportSite {
        name: "Mental Health America",
        url: "https://mhanational.org",
        description: "Mental health screening tools and resources",
    },
    SupportSite {
        name: "Crisis Text Line",
        url: "https://crisistextline.org",
        description: "Free crisis counseling via text message",
    },
    SupportSite {
        name: "JED Campus",
        url: "https://jedcampus.org",
        description: "Mental health resources for students",
    },
];

pub const SELF_CARE_IDEAS: [&str; 12] = [
    "Take a warm bath or shower",
    "Go for a walk in nature",
    "Listen to your favorite music",
    "Call a trusted friend or family member",
    "Practice deep breathing exercises",
    "Write in a journal",
    "Watch funny videos or movies",
    "Do some gentle stretching or yoga",
    "Make your favorite healthy snack",
    "Create art, draw, or doodle",
    "Read a book or listen to a podcast",
    "Organize your space",
];

pub const REMINDERS: [&str; 5] = [
    "Your mental health is just as important as your physical health",
    "It's okay to not be okay - seeking help is a sign of strength",
    "Healing takes time, and that's completely normal",
    "You deserve support, care, and happiness",
    "Small steps forward are still progress",
];

pub const DISCLAIMER: &str =
    "This app is a supportive tool and not a substitute for professional mental health care.";

/// Renders the whole directory as plain text, crisis lines first.
pub fn render() -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "If you're having thoughts of self-harm or suicide, please reach out immediately:\n");
    for line in CRISIS_LINES {
        let _ = writeln!(out, "  {}: {}", line.name, line.contact);
        let _ = writeln!(out, "    {}", line.description);
    }

    let _ = writeln!(out, "\nMental Health Support\n");
    for site in SUPPORT_SITES {
        let _ = writeln!(out, "  {} <{}>", site.name, site.url);
        let _ = writeln!(out, "    {}", site.description);
    }

    let _ = writeln!(out, "\nSelf-Care Ideas\n");
    for idea in SELF_CARE_IDEAS {
        let _ = writeln!(out, "  - {}", idea);
    }

    let _ = writeln!(out, "\nImportant Reminders\n");
    for reminder in REMINDERS {
        let _ = writeln!(out, "  • {}", reminder);
    }

    let _ = writeln!(out, "\n{}", DISCLAIMER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_crisis_lines_first() {
        let text = render();
        let lifeline = text.find("988").unwrap();
        let sites = text.find("Mental Health Support").unwrap();
        assert!(lifeline < sites);
        assert!(text.contains("Text HOME to 741741"));
        assert!(text.contains("800-852-8336"));
    }

    #[test]
    fn test_render_includes_every_entry() {
        let text = render();
        for site in SUPPORT_SITES {
            assert!(text.contains(site.url));
        }
        for idea in SELF_CARE_IDEAS {
            assert!(text.contains(idea));
        }
        for reminder in REMINDERS {
            assert!(text.contains(reminder));
        }
    }
}
