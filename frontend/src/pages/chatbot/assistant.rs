use crate::api::ResourceRecord;

/// FAQ knowledge base: application usage plus general university
/// information, matched on keywords in the question.
struct FaqEntry {
    keywords: &'static [&'static str],
    answer: &'static str,
}

const KNOWLEDGE: &[FaqEntry] = &[
    FaqEntry {
        keywords: &["download"],
        answer: "Open a resource's detail page and press Download. The link is a \
                 time-limited signed URL, so start the download right away; if it \
                 expires, press Download again.",
    },
    FaqEntry {
        keywords: &["upload"],
        answer: "Uploading is available to administrators under Upload Resource in \
                 the header. Fill in the details, attach the file, and submit.",
    },
    FaqEntry {
        keywords: &["password"],
        answer: "If you've lost access to your account, ask an administrator to set \
                 a new password for you from the User Management page. Passwords \
                 must be at least 6 characters.",
    },
    FaqEntry {
        keywords: &["register", "sign up", "account"],
        answer: "Use the Register page to create an account with your university \
                 email. You may need to confirm your email address before signing in.",
    },
    FaqEntry {
        keywords: &["landmark", "university", "contact"],
        answer: "Landmark University's resource hub collects lecture notes, \
                 textbooks, research papers and other academic materials shared by \
                 faculty and staff. For administrative questions, contact the \
                 registry through the university's main site.",
    },
];

const MAX_MATCHES: usize = 5;

/// Words too common to drive a resource search.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "any", "are", "can", "do", "does", "find", "for", "have", "how", "i", "is",
    "me", "of", "on", "search", "show", "the", "there", "to", "what", "where", "you",
];

/// Answer a question from the FAQ knowledge base, falling back to a
/// search over the resource listing the way the original assistant's
/// search tool did (name, description and keywords).
pub fn answer(question: &str, resources: &[ResourceRecord]) -> String {
    let normalized = question.to_lowercase();
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return "Ask me anything about the resource hub or Landmark University."
            .to_string();
    }

    for entry in KNOWLEDGE {
        if entry.keywords.iter().any(|k| trimmed.contains(k)) {
            return entry.answer.to_string();
        }
    }

    let matches = search_resources(trimmed, resources);
    if !matches.is_empty() {
        let mut lines = vec!["Here is what I found in the resource hub:".to_string()];
        for resource in matches.iter().take(MAX_MATCHES) {
            lines.push(format!(
                "• {} ({}, {} {})",
                resource.name,
                resource.resource_type.as_str(),
                resource.course,
                resource.year
            ));
        }
        if matches.len() > MAX_MATCHES {
            lines.push(format!("...and {} more.", matches.len() - MAX_MATCHES));
        }
        return lines.join("\n");
    }

    "I couldn't find matching resources or an answer for that. Try different \
     keywords, or browse the Resources page."
        .to_string()
}

fn search_resources<'a>(question: &str, resources: &'a [ResourceRecord]) -> Vec<&'a ResourceRecord> {
    let terms: Vec<&str> = question
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.len() > 1 && !STOP_WORDS.contains(word))
        .collect();
    if terms.is_empty() {
        return Vec::new();
    }
    resources
        .iter()
        .filter(|resource| {
            let haystack = format!(
                "{} {} {} {}",
                resource.name.to_lowercase(),
                resource.description.to_lowercase(),
                resource.course.to_lowercase(),
                resource.keywords.join(" ").to_lowercase()
            );
            terms.iter().any(|term| haystack.contains(term))
        })
        .collect()
}
