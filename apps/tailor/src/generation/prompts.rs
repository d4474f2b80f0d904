// All LLM prompt constants for the generation module.
// Templates use `{placeholder}` markers filled with `str::replace` before sending.

/// System persona for keyword extraction.
pub const KEYWORDS_SYSTEM: &str = "You are an assistant that identifies the keywords and \
    phrases of a job description that Applicant Tracking System (ATS) software is likely \
    to filter applicants on.";

/// Keyword extraction prompt. Replace `{job_description}`.
pub const KEYWORDS_PROMPT_TEMPLATE: &str = r#"Extract the most relevant keywords and phrases from the job description below that an Applicant Tracking System might use to filter applicants.

Return a JSON object with this EXACT schema:
{"keywords": ["keyword 1", "keyword 2"]}

Order the keywords from most to least important. Return keywords only, no commentary.

JOB DESCRIPTION:
{job_description}"#;

/// System persona for experience rewrites.
pub const EXPERIENCE_SYSTEM: &str =
    "You are an assistant that rewrites resume work-experience entries in JSON format.";

/// Experience rewrite prompt.
/// Replace: {ats_instruction}, {keywords}, {bullet_count}, {bullet_length},
///          {job_title}, {company}, {location}, {dates}, {bullet_points}
pub const EXPERIENCE_PROMPT_TEMPLATE: &str = r#"{ats_instruction}

Rewrite the following work experience to align with these keywords: {keywords}.

RULES:
1. Write EXACTLY {bullet_count} bullet points. Do NOT exceed {bullet_count} bullet points.
2. Each bullet point should be roughly {bullet_length} characters long.
3. Do NOT alter the original job title.
4. Metrics and impact statements are welcome as long as they are plausible.

Return the result in this EXACT JSON format:
{
  "job_title": "<job_title>",
  "company": "<company>",
  "location": "<location>",
  "dates": "<dates>",
  "bullet_points": ["<bullet_point_1>", "<bullet_point_2>"]
}

Job Title: {job_title}
Company: {company}
Location: {location}
Dates: {dates}
Bullet Points:
{bullet_points}"#;

/// System persona for education rewrites.
pub const EDUCATION_SYSTEM: &str =
    "You are a helpful assistant that rewrites the education sections of resumes.";

/// Education rewrite prompt.
/// Replace: {ats_instruction}, {keywords}, {institution}, {major}, {dates}
pub const EDUCATION_PROMPT_TEMPLATE: &str = r#"{ats_instruction}

Rewrite the following education details to align with these keywords: {keywords}.
Make the education background sound more relevant to the job. Keep the institution and dates unchanged.

Return the result in this EXACT JSON format:
{
  "institution": "<institution>",
  "major": "<major>",
  "dates": "<dates>"
}

Institution: {institution}
Major: {major}
Dates: {dates}"#;

/// System persona for the skills rewrite.
pub const SKILLS_SYSTEM: &str = "You are an assistant that rewrites the technical skills \
    section of a resume so the applicant passes ATS screening.";

/// Skills rewrite prompt.
/// Replace: {ats_instruction}, {keywords}, {max_categories}, {skills_json}
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"{ats_instruction}

Rewrite the following technical skills to align with these keywords: {keywords}.
Retain or introduce skill categories as needed, but use NO MORE than {max_categories} categories in total.

Current technical skills:
{skills_json}

Return the result in this EXACT JSON format:
{
  "technical_skills": {
    "Category 1": ["Skill 1", "Skill 2", "Skill 3"],
    "Category 2": ["Skill 1", "Skill 2", "Skill 3"]
  }
}"#;
