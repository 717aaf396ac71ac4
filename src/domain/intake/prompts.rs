//! Prompt construction for the extraction, question, and summary calls.
//!
//! Each builder returns the full prompt text; the caller decides model
//! parameters. Replies are expected as bare JSON objects where noted.

use super::field::FieldName;
use super::profile::CandidateProfile;

/// Prompt for opportunistic extraction from one chat message.
///
/// Lists every registry field and names the one currently being asked so
/// the model can resolve bare answers ("it's 555-0192") to the right key.
pub fn message_extraction(user_input: &str, current_field: FieldName) -> String {
    format!(
        "From the user's text, extract the following pieces of information if they exist: {fields}.\n\
         The user is currently being asked for the '{current}'. They may also provide other information.\n\
         Return ONLY a valid JSON object with the keys you found. If you find nothing, return an empty JSON object.\n\n\
         USER'S TEXT: \"{input}\"",
        fields = FieldName::joined_names(),
        current = current_field.as_str(),
        input = user_input,
    )
}

/// Prompt for pre-filling from resume text.
///
/// Restricted to the document field subset; missing values come back as
/// explicit JSON nulls.
pub fn document_extraction(resume_text: &str) -> String {
    let fields = FieldName::DOCUMENT_FIELDS
        .iter()
        .map(|f| format!("\"{}\"", f.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "You are an expert resume parser for a tech recruitment agency.\n\
         From the following resume text, extract the candidate's information into a valid JSON object.\n\
         The keys you must look for are: {fields}.\n\
         For \"tech_stack\", provide a list of relevant technologies found.\n\
         If you cannot find a specific piece of information, set its value to null.\n\n\
         Resume Text:\n---\n{resume_text}\n---",
    )
}

/// Prompt for the technical interview questions.
pub fn interview_questions(experience_level: &str, tech_stack: &str) -> String {
    format!(
        "Generate 5 technical interview questions for a candidate with '{experience_level}' \
         experience and the following tech stack: {tech_stack}. \
         The questions should be appropriate for this experience level.",
    )
}

/// Prompt for the recruiter-facing candidate summary.
pub fn recruiter_summary(profile: &CandidateProfile) -> String {
    let profile_lines = profile
        .entries()
        .map(|(field, value)| format!("- {}: {}", field.display_name(), value))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "You are an AI specialized in writing concise candidate summaries for recruiters.\n\
         Based on the following profile, write a concise 3-4 sentence summary.\n\
         Highlight the experience level, key skills, and desired role.\n\n\
         Candidate Profile:\n{profile_lines}\n\n\
         Summary:",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_extraction_names_every_field_and_the_current_one() {
        let prompt = message_extraction("my number is 5550192837", FieldName::PhoneNumber);
        for field in FieldName::ALL {
            assert!(prompt.contains(field.as_str()));
        }
        assert!(prompt.contains("currently being asked for the 'phone_number'"));
        assert!(prompt.contains("my number is 5550192837"));
    }

    #[test]
    fn document_extraction_lists_only_document_fields() {
        let prompt = document_extraction("resume body");
        assert!(prompt.contains("\"tech_stack\""));
        assert!(!prompt.contains("\"years_experience\""));
        assert!(prompt.contains("resume body"));
    }

    #[test]
    fn interview_questions_embed_experience_and_stack() {
        let prompt = interview_questions("Senior", "Rust, Postgres");
        assert!(prompt.contains("'Senior'"));
        assert!(prompt.contains("Rust, Postgres"));
    }

    #[test]
    fn recruiter_summary_uses_display_names() {
        let mut profile = CandidateProfile::new();
        profile.set(FieldName::FullName, "Ada Lovelace");
        profile.set(FieldName::TechStack, "Rust");
        let prompt = recruiter_summary(&profile);
        assert!(prompt.contains("- Full Name: Ada Lovelace"));
        assert!(prompt.contains("- Tech Stack: Rust"));
    }
}
