//! Job application email template

use askama::Template;
use chrono::{DateTime, Utc};

use crate::domain::{
    careers::JobApplication,
    communication::rendering::{format_timestamp, lines},
};

const RULE_WIDTH: usize = 60;

/// Notification sent to the hiring team for a job application
#[derive(Debug, Template)]
#[template(path = "emails/careers/application.html")]
pub struct JobApplicationEmail {
    /// Title of the position applied for
    pub position_title: String,

    /// Identifier of the position, if known
    pub position_id: Option<i64>,

    /// When the application was submitted
    pub applied_at: String,

    /// Candidate's name
    pub name: String,

    /// Candidate's email address
    pub email: String,

    /// Candidate's phone number
    pub phone: String,

    /// Years of experience, already worded (`1 year`, `4 years`)
    pub experience: Option<String>,

    /// LinkedIn profile URL
    pub linkedin_url: Option<String>,

    /// Cover letter text
    pub cover_letter: Option<String>,

    /// Cover letter split into lines for the HTML version
    pub cover_letter_lines: Vec<String>,

    /// Name of the attached resume file
    pub resume_file_name: String,
}

impl JobApplicationEmail {
    /// Creates a new `JobApplicationEmail`; `attachment_name` is the name the
    /// resume is attached under.
    pub fn new(
        application: &JobApplication,
        attachment_name: &str,
        submitted_at: &DateTime<Utc>,
    ) -> Self {
        let experience = application.experience_years().map(|years| match years {
            1 => "1 year".to_string(),
            years => format!("{years} years"),
        });

        Self {
            position_title: application.position_title().to_string(),
            position_id: application.position_id(),
            applied_at: format_timestamp(submitted_at),
            name: application.name().to_string(),
            email: application.email().to_string(),
            phone: application.phone().to_string(),
            experience,
            linkedin_url: application.linkedin_url().map(str::to_string),
            cover_letter: application.cover_letter().map(str::to_string),
            cover_letter_lines: application.cover_letter().map(lines).unwrap_or_default(),
            resume_file_name: application
                .resume()
                .file_name()
                .unwrap_or(attachment_name)
                .to_string(),
        }
    }

    /// Renders the plain text version of the email
    pub fn render_plain(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut plain = format!("NEW JOB APPLICATION - {}\n{rule}\n\n", self.position_title);

        if let Some(position_id) = self.position_id {
            plain.push_str(&format!("Position ID: #{position_id}\n"));
        }

        plain.push_str(&format!("Applied: {}\n\n", self.applied_at));
        plain.push_str("CANDIDATE INFORMATION\n---------------------\n");
        plain.push_str(&format!("Name: {}\n", self.name));
        plain.push_str(&format!("Email: {}\n", self.email));
        plain.push_str(&format!("Phone: {}\n", self.phone));

        if let Some(experience) = &self.experience {
            plain.push_str(&format!("Experience: {experience}\n"));
        }

        if let Some(linkedin_url) = &self.linkedin_url {
            plain.push_str(&format!("LinkedIn: {linkedin_url}\n"));
        }

        if let Some(cover_letter) = &self.cover_letter {
            plain.push_str(&format!("\nCOVER LETTER\n------------\n{cover_letter}\n"));
        }

        plain.push_str(&format!(
            "\nRESUME ATTACHED: {}\n\n{rule}\nSent from the website careers page",
            self.resume_file_name
        ));

        plain
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use testresult::TestResult;

    use super::*;

    fn application() -> JobApplication {
        JobApplication::new(
            Some("Senior Rust Engineer"),
            Some("Jane Doe"),
            Some("jane@example.com"),
            Some("+1 555 0100"),
            Some("JVBERi0xLjQ="),
            Some("jane-cv.pdf"),
        )
        .expect("valid application")
    }

    fn render(application: &JobApplication) -> JobApplicationEmail {
        let submitted_at = Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap();

        JobApplicationEmail::new(application, "Jane_Doe_resume.pdf", &submitted_at)
    }

    #[test]
    fn test_required_sections() -> TestResult {
        let email = render(&application().with_position_id(Some(42)));

        let html = email.render()?;

        assert!(html.contains("Senior Rust Engineer"));
        assert!(html.contains("#42"));
        assert!(html.contains("mailto:jane@example.com"));
        assert!(html.contains("+1 555 0100"));
        assert!(html.contains("jane-cv.pdf"));
        assert!(html.contains("Tue, Mar 5, 2024, 09:30 AM UTC"));

        Ok(())
    }

    #[test]
    fn test_optional_sections_are_omitted_when_absent() -> TestResult {
        let email = render(&application());

        let html = email.render()?;
        let plain = email.render_plain();

        for label in ["Position ID", "Experience", "LinkedIn", "Cover Letter"] {
            assert!(!html.contains(label), "{label} should be omitted");
        }

        for label in ["Position ID:", "Experience:", "LinkedIn:", "COVER LETTER"] {
            assert!(!plain.contains(label), "{label} should be omitted");
        }

        Ok(())
    }

    #[test]
    fn test_optional_sections_are_included_when_present() -> TestResult {
        let email = render(
            &application()
                .with_experience_years(Some(4))
                .with_linkedin_url(Some("https://www.linkedin.com/in/janedoe"))
                .with_cover_letter(Some("Dear team,\nI love Rust.")),
        );

        let html = email.render()?;
        let plain = email.render_plain();

        assert!(html.contains("4 years"));
        assert!(html.contains("href=\"https://www.linkedin.com/in/janedoe\""));
        assert!(html.contains("Dear team,<br>I love Rust."));

        assert!(plain.contains("Experience: 4 years\n"));
        assert!(plain.contains("LinkedIn: https://www.linkedin.com/in/janedoe\n"));
        assert!(plain.contains("COVER LETTER\n------------\nDear team,\nI love Rust.\n"));

        Ok(())
    }

    #[test]
    fn test_single_year_is_not_pluralised() {
        let email = render(&application().with_experience_years(Some(1)));

        assert!(email.render_plain().contains("Experience: 1 year\n"));
    }

    #[test]
    fn test_html_escapes_user_text() -> TestResult {
        let application = JobApplication::new(
            Some("<b>Lead</b>"),
            Some("Jane \"JD\" O'Doe"),
            Some("jane@example.com"),
            Some("555 & 0100"),
            Some("JVBERi0xLjQ="),
            Some("<cv>.pdf"),
        )?
        .with_cover_letter(Some("<script>alert(1)</script>"));

        let email = render(&application);
        let html = email.render()?;

        assert!(html.contains("&lt;b&gt;Lead&lt;/b&gt;"));
        assert!(html.contains("Jane &quot;JD&quot; O&#x27;Doe"));
        assert!(html.contains("555 &amp; 0100"));
        assert!(html.contains("&lt;cv&gt;.pdf"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));

        assert!(email.render_plain().contains("<script>alert(1)</script>"));

        Ok(())
    }

    #[test]
    fn test_attachment_name_is_used_when_file_name_is_missing() {
        let application = JobApplication::new(
            Some("Dev"),
            Some("Jane Doe"),
            Some("jane@example.com"),
            Some("1"),
            Some("AAAA"),
            None,
        )
        .expect("valid application");

        let email = render(&application);

        assert!(email.render_plain().contains("RESUME ATTACHED: Jane_Doe_resume.pdf"));
    }
}
