//! Content Renderer: serializes records back into the résumé macro dialect.
//!
//! Only interpolated field values go through [`escape_latex`]; the structural markers
//! emitted here are written verbatim. The layout mirrors the common résumé template so
//! that rendering freshly extracted records reproduces the original section.

use std::borrow::Cow;

use crate::latex::markers::{
    ESCAPE_SEQUENCE, ITEMIZE_END, ITEMIZE_START, ITEM_LIST_END, ITEM_LIST_START,
    SUBHEADING_LIST_END, SUBHEADING_LIST_START,
};
use crate::models::{EducationEntry, ExperienceEntry, SectionKind, SkillCategories};

/// Records for exactly one section, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionContent {
    Experience(Vec<ExperienceEntry>),
    Education(Vec<EducationEntry>),
    TechnicalSkills(SkillCategories),
}

impl SectionContent {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionContent::Experience(_) => SectionKind::Experience,
            SectionContent::Education(_) => SectionKind::Education,
            SectionContent::TechnicalSkills(_) => SectionKind::TechnicalSkills,
        }
    }
}

/// Renders a section's records into markup.
pub fn render(content: &SectionContent) -> String {
    match content {
        SectionContent::Experience(entries) => render_experience(entries),
        SectionContent::Education(entries) => render_education(entries),
        SectionContent::TechnicalSkills(skills) => render_skills(skills),
    }
}

pub fn render_experience(entries: &[ExperienceEntry]) -> String {
    let mut out = format!("\n  {SUBHEADING_LIST_START}\n");

    for entry in entries {
        push_subheading(
            &mut out,
            [
                entry.job_title.as_str(),
                entry.dates.as_str(),
                entry.company.as_str(),
                entry.location.as_str(),
            ],
        );

        // An empty item list does not compile, so bullet-less entries get none.
        if !entry.bullet_points.is_empty() {
            out.push_str(&format!("      {ITEM_LIST_START}\n"));
            for bullet in &entry.bullet_points {
                out.push_str(&format!("        \\resumeItem{{{}}}\n", escape_latex(bullet)));
            }
            out.push_str(&format!("      {ITEM_LIST_END}\n"));
        }
    }

    out.push_str(&format!("\n  {SUBHEADING_LIST_END}\n\n"));
    out
}

pub fn render_education(entries: &[EducationEntry]) -> String {
    let mut out = format!("\n  {SUBHEADING_LIST_START}\n");

    for entry in entries {
        let location = entry.location.as_deref().unwrap_or_default();
        push_subheading(
            &mut out,
            [
                entry.institution.as_str(),
                entry.dates.as_str(),
                entry.major.as_str(),
                location,
            ],
        );
    }

    out.push_str(&format!("\n  {SUBHEADING_LIST_END}\n\n"));
    out
}

/// Renders the skills block up to and including its closing `\end{itemize}`; the
/// patcher replaces exactly that span.
pub fn render_skills(skills: &SkillCategories) -> String {
    let mut out = format!("\n {ITEMIZE_START}\n    \\small{{\\item{{\n");

    for (category, values) in skills {
        let values = values
            .iter()
            .map(|v| escape_latex(v))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "     \\textbf{{{}}}{{: {}}} \\\\\n",
            escape_latex(category),
            values
        ));
    }

    out.push_str(&format!("    }}}}\n {ITEMIZE_END}"));
    out
}

/// Emits `\resumeSubheading` with its four fields over two lines.
fn push_subheading(out: &mut String, fields: [&str; 4]) {
    let [first, second, third, fourth] = fields.map(escape_latex);
    out.push_str("\n    \\resumeSubheading\n");
    out.push_str(&format!("      {{{first}}}{{{second}}}\n"));
    out.push_str(&format!("      {{{third}}}{{{fourth}}}\n"));
}

/// Escapes the characters that are special in the markup dialect.
///
/// Single pass over the input, so the backslashes and braces introduced by an escape
/// sequence are never escaped again. Text without special characters is borrowed.
pub fn escape_latex(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_special) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '%' | '$' | '#' | '&' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '~' => escaped.push_str(r"\textasciitilde{}"),
            '^' => escaped.push_str(r"\textasciicircum{}"),
            '\\' => escaped.push_str(r"\textbackslash{}"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Inverse of [`escape_latex`] for exactly the sequences it produces.
pub fn unescape_latex(text: &str) -> Cow<'_, str> {
    ESCAPE_SEQUENCE.replace_all(text, |caps: &regex::Captures<'_>| {
        match &caps[0] {
            r"\textasciitilde{}" => "~".to_string(),
            r"\textasciicircum{}" => "^".to_string(),
            r"\textbackslash{}" => "\\".to_string(),
            seq => seq[1..].to_string(),
        }
    })
}

fn is_special(c: char) -> bool {
    matches!(c, '%' | '$' | '#' | '&' | '_' | '{' | '}' | '~' | '^' | '\\')
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_escape_plain_text_is_unchanged_and_borrowed() {
        let text = "Built a REST API in Rust -- 40 percent faster";
        let escaped = escape_latex(text);
        assert_eq!(escaped, text);
        assert!(matches!(escaped, Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_every_special_character() {
        assert_eq!(
            escape_latex(r"50% $5 #1 R&D a_b {x} ~ ^ \"),
            r"50\% \$5 \#1 R\&D a\_b \{x\} \textasciitilde{} \textasciicircum{} \textbackslash{}"
        );
    }

    #[test]
    fn test_escape_does_not_re_escape_its_own_output() {
        // A naive sequential replace would turn the `{}` of `\textbackslash{}` into `\{\}`.
        assert_eq!(escape_latex("\\"), r"\textbackslash{}");
        assert_eq!(escape_latex("~"), r"\textasciitilde{}");
    }

    #[test]
    fn test_unescape_inverts_escape() {
        let original = r"C# & C++ at 100% {fast} ~fun^2 \o/ snake_case $$";
        let escaped = escape_latex(original);
        assert_eq!(unescape_latex(&escaped), original);
    }

    #[test]
    fn test_unescape_leaves_other_commands_alone() {
        assert_eq!(unescape_latex(r"\textbf{Bold} A\&M"), r"\textbf{Bold} A&M");
    }

    #[test]
    fn test_render_experience_layout() {
        let entries = vec![ExperienceEntry {
            job_title: "Engineer".to_string(),
            company: "R&D Labs".to_string(),
            location: "Remote".to_string(),
            dates: "2020 -- 2022".to_string(),
            bullet_points: vec!["Cut costs 30%".to_string(), "Shipped v2".to_string()],
        }];
        let expected = "\n  \\resumeSubHeadingListStart\n\
            \n    \\resumeSubheading\n\
            \x20     {Engineer}{2020 -- 2022}\n\
            \x20     {R\\&D Labs}{Remote}\n\
            \x20     \\resumeItemListStart\n\
            \x20       \\resumeItem{Cut costs 30\\%}\n\
            \x20       \\resumeItem{Shipped v2}\n\
            \x20     \\resumeItemListEnd\n\
            \n  \\resumeSubHeadingListEnd\n\n";
        assert_eq!(render_experience(&entries), expected);
    }

    #[test]
    fn test_render_experience_skips_empty_item_list() {
        let entries = vec![ExperienceEntry {
            job_title: "Intern".to_string(),
            ..Default::default()
        }];
        let out = render_experience(&entries);
        assert!(out.contains("{Intern}"));
        assert!(!out.contains(ITEM_LIST_START));
    }

    #[test]
    fn test_render_education_uses_institution_dates_major_location() {
        let entries = vec![EducationEntry {
            institution: "Southwestern University".to_string(),
            major: "B.A. Computer Science".to_string(),
            dates: "Aug. 2018 -- May 2021".to_string(),
            location: Some("Georgetown, TX".to_string()),
        }];
        let out = render_education(&entries);
        assert!(out.contains("{Southwestern University}{Aug. 2018 -- May 2021}"));
        assert!(out.contains("{B.A. Computer Science}{Georgetown, TX}"));
        assert!(!out.contains(ITEM_LIST_START));
    }

    #[test]
    fn test_render_skills_layout() {
        let mut skills = IndexMap::new();
        skills.insert("Languages".to_string(), vec!["Python".to_string(), "C#".to_string()]);
        let expected = "\n \\begin{itemize}[leftmargin=0.15in, label={}]\n\
            \x20   \\small{\\item{\n\
            \x20    \\textbf{Languages}{: Python, C\\#} \\\\\n\
            \x20   }}\n \\end{itemize}";
        assert_eq!(render_skills(&skills), expected);
    }

    #[test]
    fn test_render_skills_emits_every_category_in_order() {
        for n in 0..=5 {
            let skills: SkillCategories = (0..n)
                .map(|i| (format!("Cat {i}"), vec![format!("skill{i}")]))
                .collect();
            let out = render_skills(&skills);
            assert_eq!(out.matches("\\textbf{").count(), n);
            let positions: Vec<_> = (0..n)
                .map(|i| out.find(&format!("Cat {i}")).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_rendered_values_never_carry_unescaped_specials() {
        let nasty = r"100% of $ & # _ { } ~ ^ \".to_string();
        let entries = vec![ExperienceEntry {
            job_title: nasty.clone(),
            company: nasty.clone(),
            location: nasty.clone(),
            dates: nasty.clone(),
            bullet_points: vec![nasty.clone()],
        }];
        let out = render_experience(&entries);
        for line in out.lines().filter(|l| l.contains("100")) {
            let bare = unescape_latex(line);
            // Stripping every escape sequence must remove all special characters
            // that came from the field values.
            let stripped = ESCAPE_SEQUENCE.replace_all(line, "");
            assert!(!stripped.contains('%'), "unescaped % in {line}");
            assert!(!stripped.contains('$'), "unescaped $ in {line}");
            assert!(!stripped.contains('&'), "unescaped & in {line}");
            assert!(!stripped.contains('#'), "unescaped # in {line}");
            assert!(bare.contains(&nasty));
        }
    }

    #[test]
    fn test_section_content_kind() {
        assert_eq!(
            SectionContent::TechnicalSkills(IndexMap::new()).kind(),
            SectionKind::TechnicalSkills
        );
        assert_eq!(SectionContent::Education(vec![]).kind(), SectionKind::Education);
    }
}
