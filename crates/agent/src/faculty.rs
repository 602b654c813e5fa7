//! Faculty listings rendered as HTML cards

use campus_faq_config::FacultyMember;
use campus_faq_core::Department;

/// Icon shown when no department is selected
pub const OVERVIEW_ICON: &str = "fas fa-chalkboard-teacher";

/// Render one faculty member as a card.
///
/// Contact numbers become `tel:` links. Emails become `mailto:` links when
/// they look like an address; other non-empty email text (e.g. "Email
/// Professor") is shown as-is.
pub fn render_card(member: &FacultyMember) -> String {
    let mut card = String::with_capacity(256);
    card.push_str("<div class=\"faculty-card\">\n");
    card.push_str(&format!("<h3>{}</h3>\n", member.name));
    card.push_str(&format!(
        "<p><strong>Position:</strong> {}</p>\n",
        member.position
    ));
    card.push_str(&format!(
        "<p><strong>Education:</strong> {}</p>\n",
        member.education
    ));
    card.push_str(&format!(
        "<p><strong>Experience:</strong> {}</p>\n",
        member.experience
    ));

    let contact = member.contact.trim();
    if !contact.is_empty() {
        let dial: String = contact
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '+')
            .collect();
        card.push_str(&format!(
            "<p><strong>Contact:</strong> <a href=\"tel:{}\">{}</a></p>\n",
            dial, contact
        ));
    }

    let email = member.email.trim();
    if email.contains('@') {
        card.push_str(&format!(
            "<p><strong>Email:</strong> <a href=\"mailto:{}\">{}</a></p>\n",
            email, email
        ));
    } else if !email.is_empty() {
        card.push_str(&format!("<p>{}</p>\n", email));
    }

    card.push_str("</div>");
    card
}

/// Section title for a department's faculty
pub fn title(department: Department) -> String {
    format!("{} Faculty", department.display_name())
}

/// Render the faculty section of one department
pub fn render_department(department: Department, members: &[FacultyMember]) -> String {
    let heading = format!(
        "<h2><i class=\"{}\"></i> {}</h2>",
        department.icon(),
        title(department)
    );

    if members.is_empty() {
        return format!(
            "<div class=\"faculty-section\">\n{}\n<p>No faculty data available for this department.</p>\n</div>",
            heading
        );
    }

    let cards: Vec<String> = members.iter().map(render_card).collect();
    format!(
        "<div class=\"faculty-section\">\n{}\n<div class=\"faculty-grid\">\n{}\n</div>\n</div>",
        heading,
        cards.join("\n")
    )
}

/// Quick-action buttons that ask for each department's faculty
pub fn department_buttons() -> String {
    let buttons: Vec<String> = Department::all()
        .iter()
        .map(|d| {
            let label = match d {
                Department::It => "IT".to_string(),
                other => {
                    let key = other.key();
                    let mut chars = key.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().chain(chars).collect(),
                        None => String::new(),
                    }
                }
            };
            format!(
                "<button class=\"dept-button\" onclick=\"sendButtonMessage('{} faculty')\">{}</button>",
                d.key(),
                label
            )
        })
        .collect();

    format!(
        "<div class=\"dept-button-container\">\n{}\n</div>",
        buttons.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(contact: &str, email: &str) -> FacultyMember {
        FacultyMember {
            name: "Prof. Test".into(),
            position: "Assistant Professor".into(),
            education: "M.Tech".into(),
            experience: "5 Years".into(),
            contact: contact.into(),
            email: email.into(),
        }
    }

    #[test]
    fn test_card_fields() {
        let card = render_card(&member("+91 99993 77246", "hod@rvparankar.in"));
        assert!(card.contains("<h3>Prof. Test</h3>"));
        assert!(card.contains("href=\"tel:919999377246\""));
        assert!(card.contains("href=\"mailto:hod@rvparankar.in\""));
    }

    #[test]
    fn test_card_omits_missing_contact() {
        let card = render_card(&member("", ""));
        assert!(!card.contains("Contact:"));
        assert!(!card.contains("Email:"));

        let card = render_card(&member("", "Email Professor"));
        assert!(card.contains("<p>Email Professor</p>"));
        assert!(!card.contains("mailto:"));
    }

    #[test]
    fn test_department_section() {
        let html = render_department(Department::Civil, &[member("", "")]);
        assert!(html.contains("fas fa-hard-hat"));
        assert!(html.contains("Civil Engineering Faculty"));
        assert!(html.contains("faculty-grid"));

        let empty = render_department(Department::It, &[]);
        assert!(empty.contains("Information Technology Faculty"));
        assert!(empty.contains("No faculty data available"));
    }

    #[test]
    fn test_buttons_cover_every_department() {
        let buttons = department_buttons();
        for dept in Department::all() {
            assert!(buttons.contains(&format!("'{} faculty'", dept.key())));
        }
        assert!(buttons.contains(">Mechanical</button>"));
        assert!(buttons.contains(">IT</button>"));
    }
}
