//! Job application

use chrono::{DateTime, Utc};

use crate::domain::communication::{
    mailer::Message,
    rendering::{present, render_html, RenderError},
};

use super::{emails::job_application::JobApplicationEmail, JobApplicationError, Resume};

/// A job application with the fields the hiring team needs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobApplication {
    position_id: Option<i64>,
    position_title: String,
    name: String,
    email: String,
    phone: String,
    resume: Resume,
    cover_letter: Option<String>,
    linkedin_url: Option<String>,
    experience_years: Option<u32>,
}

impl JobApplication {
    /// Checks that the required fields are present.
    ///
    /// The email address is passed through untouched; its shape is checked by
    /// the dispatcher when the notification is sent.
    pub fn new(
        position_title: Option<&str>,
        name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        resume_base64: Option<&str>,
        resume_file_name: Option<&str>,
    ) -> Result<Self, JobApplicationError> {
        let (Some(position_title), Some(name), Some(email), Some(phone), Some(resume_base64)) = (
            present(position_title),
            present(name),
            present(email),
            present(phone),
            present(resume_base64),
        ) else {
            return Err(JobApplicationError::MissingFields);
        };

        Ok(Self {
            position_id: None,
            position_title,
            name,
            email,
            phone,
            resume: Resume::new(&resume_base64, resume_file_name),
            cover_letter: None,
            linkedin_url: None,
            experience_years: None,
        })
    }

    /// Sets the identifier of the position applied for
    pub fn with_position_id(mut self, position_id: Option<i64>) -> Self {
        self.position_id = position_id;
        self
    }

    /// Sets the cover letter; blank letters are ignored
    pub fn with_cover_letter(mut self, cover_letter: Option<&str>) -> Self {
        self.cover_letter = present(cover_letter);
        self
    }

    /// Sets the LinkedIn profile URL; blank URLs are ignored
    pub fn with_linkedin_url(mut self, linkedin_url: Option<&str>) -> Self {
        self.linkedin_url = present(linkedin_url);
        self
    }

    /// Sets the years of experience; zero is treated as not given
    pub fn with_experience_years(mut self, experience_years: Option<u32>) -> Self {
        self.experience_years = experience_years.filter(|years| *years > 0);
        self
    }

    /// The identifier of the position
    pub fn position_id(&self) -> Option<i64> {
        self.position_id
    }

    /// The title of the position
    pub fn position_title(&self) -> &str {
        &self.position_title
    }

    /// The candidate's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The candidate's email address
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The candidate's phone number
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// The uploaded resume
    pub fn resume(&self) -> &Resume {
        &self.resume
    }

    /// The cover letter, if any
    pub fn cover_letter(&self) -> Option<&str> {
        self.cover_letter.as_deref()
    }

    /// The LinkedIn profile URL, if any
    pub fn linkedin_url(&self) -> Option<&str> {
        self.linkedin_url.as_deref()
    }

    /// Years of experience, if given
    pub fn experience_years(&self) -> Option<u32> {
        self.experience_years
    }

    /// Builds the notification email, with the resume attached, for `recipient`
    pub fn to_message(
        &self,
        recipient: &str,
        submitted_at: &DateTime<Utc>,
    ) -> Result<Message, RenderError> {
        let attachment = self.resume.to_attachment(&self.name);
        let template = JobApplicationEmail::new(self, &attachment.filename, submitted_at);
        let html = render_html(&template)?;
        let plain = template.render_plain();

        Ok(Message::new(
            recipient,
            &self.email,
            &format!(
                "New Job Application: {} - {}",
                self.position_title, self.name
            ),
            &html,
        )
        .with_plain_body(&plain)
        .with_reply_to(&self.email)
        .with_attachment(attachment))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn application() -> Result<JobApplication, JobApplicationError> {
        JobApplication::new(
            Some("Senior Rust Engineer"),
            Some("Jane Doe"),
            Some("jane@example.com"),
            Some("+1 555 0100"),
            Some("data:application/pdf;base64,JVBERi0xLjQ="),
            Some("cv.pdf"),
        )
    }

    #[test]
    fn test_required_fields() {
        let cases = [
            (None, Some("Jane"), Some("j@example.com"), Some("1"), Some("AAAA")),
            (Some("Dev"), None, Some("j@example.com"), Some("1"), Some("AAAA")),
            (Some("Dev"), Some("Jane"), Some(""), Some("1"), Some("AAAA")),
            (Some("Dev"), Some("Jane"), Some("j@example.com"), Some(" "), Some("AAAA")),
            (Some("Dev"), Some("Jane"), Some("j@example.com"), Some("1"), None),
        ];

        for (title, name, email, phone, resume) in cases {
            assert_eq!(
                JobApplication::new(title, name, email, phone, resume, Some("cv.pdf")),
                Err(JobApplicationError::MissingFields)
            );
        }
    }

    #[test]
    fn test_optional_fields_drop_blank_values() -> TestResult {
        let application = application()?
            .with_cover_letter(Some("   "))
            .with_linkedin_url(Some(""))
            .with_experience_years(Some(0));

        assert_eq!(application.cover_letter(), None);
        assert_eq!(application.linkedin_url(), None);
        assert_eq!(application.experience_years(), None);

        Ok(())
    }

    #[test]
    fn test_to_message() -> TestResult {
        let application = application()?.with_position_id(Some(7));

        let message = application.to_message("hr@example.com", &Utc::now())?;

        assert_eq!(message.to(), "hr@example.com");
        assert_eq!(message.from(), "jane@example.com");
        assert_eq!(message.reply_to(), "jane@example.com");
        assert_eq!(
            message.subject(),
            "New Job Application: Senior Rust Engineer - Jane Doe"
        );
        assert_eq!(message.attachments().len(), 1);

        let attachment = &message.attachments()[0];

        assert_eq!(attachment.filename, "Jane_Doe_resume.pdf");
        assert_eq!(attachment.content, "JVBERi0xLjQ=");
        assert_eq!(attachment.content_type, "application/pdf");
        assert_eq!(attachment.decode()?, b"%PDF-1.4".to_vec());

        Ok(())
    }

    #[test]
    fn test_to_message_html_escapes_quotes() -> TestResult {
        let application = application()?.with_cover_letter(Some(r#"I'm "keen" & <ready>"#));

        let message = application.to_message("hr@example.com", &Utc::now())?;

        assert!(message
            .html_body()
            .contains("I&#x27;m &quot;keen&quot; &amp; &lt;ready&gt;"));

        Ok(())
    }
}
